//! Error types for the driver
//!
//! This module defines error types for configuration building
//! ([`BuilderError`]) and display operations ([`Error`]).
//!
//! Transport and pin failures surface as
//! [`InterfaceError`](crate::interface::InterfaceError) wrapped in
//! [`Error::Interface`]. A failed transfer leaves the controller with a
//! half-applied window or write stream, so nothing is retried internally;
//! the caller decides whether to halt, re-initialize, or abort.
//!
//! ## Example
//!
//! ```
//! use hx8357d::{BuilderError, Dimensions};
//!
//! // Larger than the controller can drive
//! let result = Dimensions::new(1000, 500);
//! assert!(matches!(result, Err(BuilderError::InvalidDimensions { .. })));
//! ```

use crate::interface::PanelInterface;

/// Maximum rows (gate lines) the controller drives
pub const MAX_ROWS: u16 = 480;

/// Maximum columns (source lines) the controller drives
pub const MAX_COLUMNS: u16 = 320;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific transport
/// error, so handling code can match on the underlying hardware failure.
#[derive(Debug)]
pub enum Error<I: PanelInterface> {
    /// Interface error (SPI bus or control pin)
    ///
    /// Wraps the underlying hardware error from the [`PanelInterface`]
    /// implementation.
    Interface(I::Error),
}

impl<I: PanelInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
        }
    }
}

impl<I: PanelInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug)]
pub enum BuilderError {
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for
    /// constraints.
    InvalidDimensions {
        /// Number of rows (height) requested
        rows: u16,
        /// Number of columns (width) requested
        cols: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => write!(
                f,
                "Invalid dimensions {rows}x{cols} (max {MAX_ROWS}x{MAX_COLUMNS})"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

//! HX8357-D TFT LCD Driver
//!
//! A driver for the Himax HX8357-D TFT controller, as found on 3.5"
//! 480x320 RGB565 panels, talking over 4-wire SPI.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Streaming draws with no local framebuffer
//! - Batched rectangle fills that degrade gracefully under allocation
//!   pressure (with `alloc` feature) and fall back to per-pixel writes
//!
//! ## Wiring
//!
//! The driver needs the SPI bus plus two GPIO outputs: DC (data/command
//! select) and CS (chip select). CS is driven by the driver itself because
//! streaming writes hold it asserted across many bus transfers. The reset
//! pin belongs to board bring-up: toggle it once before calling
//! [`Display::init`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use hx8357d::{Builder, Display, Interface, Orientation, Rect, color};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::SpiBus;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let cs = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc, cs);
//! let config = Builder::new().orientation(Orientation::LandscapeFlipped).build();
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.init(&mut delay);
//!
//! // Direct primitives, raw RGB565
//! let _ = display.fill_screen(color::BLACK);
//! let _ = display.draw_hline(0, 479, 160, color::translate(0xFF_FFFF));
//! let _ = display.fill_rect(Rect::new(100, 100, 199, 149), color::RED);
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Color translation and RGB565 constants
pub mod color;
/// HX8357-D command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;

/// Scratch buffer for batched rectangle fills
#[cfg(any(test, feature = "alloc"))]
mod fill;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use config::{Builder, Config, Dimensions, MAX_COLUMNS, MAX_ROWS, Orientation};
pub use display::{Display, DrawMetrics, Rect};
pub use error::{BuilderError, Error};
pub use interface::{Boundary, CHUNK_LIMIT, Interface, InterfaceError, PanelInterface};

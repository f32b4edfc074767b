//! Scratch buffer for batched rectangle fills
//!
//! Streaming a fill one pixel at a time costs one bus transfer per pixel.
//! A scratch buffer holding the color pattern for many rows lets
//! [`fill_rect`](crate::display::Display::fill_rect) move whole rows per
//! transfer instead. Allocation pressure degrades the buffer gracefully:
//! the row count is halved until an allocation succeeds, and when not even
//! one row fits the fill falls back to the per-pixel path.
//!
//! The buffer lives for exactly one fill call and is dropped on every
//! exit path.

use alloc::vec::Vec;

/// Wire size of one pixel
pub(crate) const BYTES_PER_PIXEL: usize = 2;

/// A scratch buffer holding `rows` rows of the replicated wire-order color
pub(crate) struct FillBuffer {
    rows: usize,
    pixels_per_row: usize,
    bytes: Vec<u8>,
}

impl FillBuffer {
    /// Try a single allocation sized for exactly `rows` full rows
    ///
    /// Returns `None` if the allocation fails or the requested size is
    /// zero. On success every pixel slot holds the 2-byte wire-order
    /// color.
    pub(crate) fn new(pixels_per_row: usize, rows: usize, raw: u16) -> Option<Self> {
        if pixels_per_row == 0 || rows == 0 {
            return None;
        }
        let pixels = pixels_per_row * rows;
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(pixels * BYTES_PER_PIXEL).ok()?;

        let color = raw.to_be_bytes();
        for _ in 0..pixels {
            bytes.extend_from_slice(&color);
        }
        Some(Self {
            rows,
            pixels_per_row,
            bytes,
        })
    }

    /// Allocate as many full rows as memory allows, at most `rows_total`
    ///
    /// Halves the row count on each failed attempt. Returns `None` when
    /// not even a single row can be allocated.
    pub(crate) fn allocate(pixels_per_row: usize, rows_total: usize, raw: u16) -> Option<Self> {
        let mut rows = rows_total;
        while rows >= 1 {
            if let Some(buffer) = Self::new(pixels_per_row, rows, raw) {
                if buffer.rows < rows_total {
                    log::debug!(
                        "fill buffer degraded to {} of {} rows",
                        buffer.rows,
                        rows_total
                    );
                }
                return Some(buffer);
            }
            rows /= 2;
        }
        None
    }

    /// Number of full rows this buffer holds
    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    /// Number of pixels per row this buffer was sized for
    pub(crate) fn pixels_per_row(&self) -> usize {
        self.pixels_per_row
    }

    /// The wire bytes for the first `rows` rows
    ///
    /// `rows` must not exceed [`rows()`](Self::rows).
    pub(crate) fn row_bytes(&self, rows: usize) -> &[u8] {
        &self.bytes[..rows * self.pixels_per_row * BYTES_PER_PIXEL]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_replicates_wire_order_color() {
        let buffer = FillBuffer::new(3, 2, 0xF81F).unwrap();
        assert_eq!(buffer.rows(), 2);
        assert_eq!(buffer.pixels_per_row(), 3);
        assert_eq!(
            buffer.row_bytes(2),
            &[0xF8, 0x1F, 0xF8, 0x1F, 0xF8, 0x1F, 0xF8, 0x1F, 0xF8, 0x1F, 0xF8, 0x1F]
        );
    }

    #[test]
    fn test_new_rejects_empty_geometry() {
        assert!(FillBuffer::new(0, 4, 0x0000).is_none());
        assert!(FillBuffer::new(4, 0, 0x0000).is_none());
    }

    #[test]
    fn test_row_bytes_partial_view() {
        let buffer = FillBuffer::new(2, 4, 0x0000).unwrap();
        assert_eq!(buffer.row_bytes(1).len(), 2 * BYTES_PER_PIXEL);
        assert_eq!(buffer.row_bytes(3).len(), 6 * BYTES_PER_PIXEL);
    }

    #[test]
    fn test_allocate_prefers_full_request() {
        let buffer = FillBuffer::allocate(320, 480, 0xFFFF).unwrap();
        assert_eq!(buffer.rows(), 480);
        assert_eq!(buffer.row_bytes(480).len(), 320 * 480 * BYTES_PER_PIXEL);
    }

    #[test]
    fn test_allocate_empty_geometry_is_none() {
        assert!(FillBuffer::allocate(0, 480, 0xFFFF).is_none());
        assert!(FillBuffer::allocate(320, 0, 0xFFFF).is_none());
    }
}

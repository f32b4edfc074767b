//! Core display operations
//!
//! [`Display`] owns the panel interface and a [`Config`], and exposes the
//! drawing primitive set: single pixels, horizontal and vertical lines,
//! inclusive rectangle fills, plus the bring-up sequence and panel mode
//! commands. Every draw call reprograms the address window; no window
//! state is cached.
//!
//! Coordinates are a caller contract: they are assumed to lie within the
//! logical display extents and are not range-checked. Out-of-range values
//! produce undefined wire-level behavior, not an error.

use embedded_hal::delay::DelayNs;

use crate::color;
use crate::command::{
    COLUMN_ADDRESS_SET, DISPLAY_OFF, DISPLAY_ON, ENABLE_EXTENSION, INVERT_OFF, INVERT_ON,
    MEMORY_ACCESS_CONTROL, MEMORY_WRITE, PAGE_ADDRESS_SET, PIXEL_FORMAT, SET_DISPLAY_CYCLE,
    SET_GAMMA_CURVE, SET_OSCILLATOR, SET_PANEL_CHARACTERISTICS, SET_POWER_CONTROL,
    SET_RGB_INTERFACE, SET_SOURCE_OPTION, SET_TEAR_SCANLINE, SET_VCOM_VOLTAGE, SLEEP_IN,
    SLEEP_OUT, SOFT_RESET, TEARING_EFFECT_ON,
};
use crate::config::{Config, Dimensions, Orientation};
use crate::error::Error;
#[cfg(any(test, feature = "alloc"))]
use crate::fill::FillBuffer;
use crate::interface::{Boundary, PanelInterface};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Magic bytes unlocking the vendor command set
const EXTENSION_UNLOCK: [u8; 3] = [0xFF, 0x83, 0x57];

/// A rectangle, fully inclusive on all four bounds
///
/// Both `x_min`/`x_max` and `y_min`/`y_max` are drawn; a single pixel is
/// `Rect { x_min: x, y_min: y, x_max: x, y_max: y }`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Leftmost column, drawn
    pub x_min: u16,
    /// Topmost row, drawn
    pub y_min: u16,
    /// Rightmost column, drawn
    pub x_max: u16,
    /// Bottommost row, drawn
    pub y_max: u16,
}

impl Rect {
    /// Create a new inclusive rectangle
    pub fn new(x_min: u16, y_min: u16, x_max: u16, y_max: u16) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Width in pixels, counting both bounds
    pub fn width(&self) -> u16 {
        self.x_max - self.x_min + 1
    }

    /// Height in pixels, counting both bounds
    pub fn height(&self) -> u16 {
        self.y_max - self.y_min + 1
    }

    /// Total pixel count
    pub fn pixels(&self) -> u32 {
        u32::from(self.width()) * u32::from(self.height())
    }
}

/// Instrumentation counters for draw operations
///
/// Per-display state, read via [`Display::metrics`]. Counts only what was
/// handed to the transport; a failed transfer may leave the counters ahead
/// of the panel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DrawMetrics {
    /// Pixels streamed to the panel
    pub pixels_streamed: u32,
    /// Payload transfers issued (command bytes not counted)
    pub transfers: u32,
}

/// Core display driver for the HX8357-D
///
/// Generic over any [`PanelInterface`]. For embedded-graphics support,
/// enable the `graphics` feature; `Display` then implements `DrawTarget`
/// directly.
pub struct Display<I>
where
    I: PanelInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Draw instrumentation
    metrics: DrawMetrics,
}

impl<I> Display<I>
where
    I: PanelInterface,
{
    /// Create a new Display instance
    ///
    /// The panel must have been hardware-reset by board bring-up before
    /// [`init`](Self::init) is called.
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            metrics: DrawMetrics::default(),
        }
    }

    /// Run the bring-up sequence
    ///
    /// Plays the fixed vendor configuration script: extension unlock, RGB
    /// interface, VCOM, oscillator, panel polarity, power, standby and
    /// drive-cycle timing, gamma, color depth, orientation and tearing
    /// control, then sleep-out and display-on. Ordering and the settle
    /// delays (10 ms, 300 ms, 150 ms, 50 ms) are a contract with the
    /// controller; nothing is reordered or skipped.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let config = self.config.clone();

        log::debug!("running panel bring-up sequence");
        self.command(SOFT_RESET, &[])?;
        delay.delay_ms(10);

        self.command(ENABLE_EXTENSION, &EXTENSION_UNLOCK)?;
        delay.delay_ms(300);

        self.command(SET_RGB_INTERFACE, &config.rgb_interface)?;
        self.command(SET_VCOM_VOLTAGE, &[config.vcom])?;
        self.command(SET_OSCILLATOR, &[config.oscillator])?;
        self.command(SET_PANEL_CHARACTERISTICS, &[config.panel_characteristics])?;
        self.command(SET_POWER_CONTROL, &config.power_control)?;
        self.command(SET_SOURCE_OPTION, &config.source_option)?;
        self.command(SET_DISPLAY_CYCLE, &config.display_cycle)?;
        self.command(SET_GAMMA_CURVE, &config.gamma)?;
        self.command(PIXEL_FORMAT, &[config.pixel_format])?;
        self.command(MEMORY_ACCESS_CONTROL, &[config.orientation.madctl()])?;
        self.command(TEARING_EFFECT_ON, &[config.tearing_effect])?;
        self.command(SET_TEAR_SCANLINE, &config.tear_scanline)?;

        self.sleep_out(delay)?;
        self.display_on(delay)?;
        log::debug!("panel ready");
        Ok(())
    }

    /// Program the active draw window
    ///
    /// Bounds are inclusive: the window covers columns
    /// `col_start..=col_start + width - 1` and rows
    /// `row_start..=row_start + height - 1`, each bound encoded as two
    /// big-endian bytes. The RAM-write command is not issued here; callers
    /// that stream pixels decide how the write transaction is framed.
    pub fn set_window(
        &mut self,
        row_start: u16,
        col_start: u16,
        height: u16,
        width: u16,
    ) -> DisplayResult<I> {
        let col_end = col_start + width - 1;
        let row_end = row_start + height - 1;
        self.command(COLUMN_ADDRESS_SET, &window_bounds(col_start, col_end))?;
        self.command(PAGE_ADDRESS_SET, &window_bounds(row_start, row_end))
    }

    /// Set a single pixel to an RGB565 color
    pub fn draw_pixel(&mut self, x: u16, y: u16, raw: u16) -> DisplayResult<I> {
        self.set_window(y, x, 1, 1)?;
        self.command(MEMORY_WRITE, &color::wire_bytes(raw))?;
        self.metrics.pixels_streamed += 1;
        self.metrics.transfers += 1;
        Ok(())
    }

    /// Draw a horizontal line from `x1` to `x2` inclusive at row `y`
    ///
    /// `x1` must not exceed `x2`.
    pub fn draw_hline(&mut self, x1: u16, x2: u16, y: u16, raw: u16) -> DisplayResult<I> {
        self.set_window(y, x1, 1, x2 - x1 + 1)?;
        let wire = color::wire_bytes(raw);

        self.begin_stream()?;
        self.stream_packet(Some(MEMORY_WRITE), &[])?;
        for _ in x1..=x2 {
            self.stream_packet(None, &wire)?;
            self.metrics.pixels_streamed += 1;
            self.metrics.transfers += 1;
        }
        self.end_stream()
    }

    /// Draw a vertical line from `y1` to `y2` inclusive at column `x`
    ///
    /// `y1` must not exceed `y2`.
    pub fn draw_vline(&mut self, x: u16, y1: u16, y2: u16, raw: u16) -> DisplayResult<I> {
        self.set_window(y1, x, y2 - y1 + 1, 1)?;
        let wire = color::wire_bytes(raw);

        self.begin_stream()?;
        self.stream_packet(Some(MEMORY_WRITE), &[])?;
        for _ in y1..=y2 {
            self.stream_packet(None, &wire)?;
            self.metrics.pixels_streamed += 1;
            self.metrics.transfers += 1;
        }
        self.end_stream()
    }

    /// Fill an inclusive rectangle with an RGB565 color
    ///
    /// The whole fill runs as one streaming transaction: the chip-select
    /// boundary is asserted once before the first pixel and released once
    /// after the last. Bulk data goes through a scratch buffer that covers
    /// as many rows per transfer as memory allows; when no buffer can be
    /// allocated at all, the fill degrades to one transfer per pixel.
    pub fn fill_rect(&mut self, rect: Rect, raw: u16) -> DisplayResult<I> {
        let rows_total = rect.height() as usize;
        let pixels_per_row = rect.width() as usize;

        self.set_window(rect.y_min, rect.x_min, rect.height(), rect.width())?;
        self.begin_stream()?;
        self.stream_packet(Some(MEMORY_WRITE), &[])?;

        #[cfg(any(test, feature = "alloc"))]
        {
            if let Some(buffer) = FillBuffer::allocate(pixels_per_row, rows_total, raw) {
                self.stream_rows(&buffer, rows_total)?;
                return self.end_stream();
            }
            log::debug!("no fill buffer available, writing per pixel");
        }

        self.fill_unbuffered(rows_total, pixels_per_row, raw)?;
        self.end_stream()
    }

    /// Draw a horizontal run of palette-indexed pixels
    ///
    /// Palette-indexed 1/4/8 bpp formats are unsupported; the call is
    /// accepted and silently ignored so table-driven callers need no
    /// special case. Callers must not depend on it drawing.
    pub fn draw_pixels_indexed(
        &mut self,
        _x: u16,
        _y: u16,
        _count: usize,
        _bits_per_pixel: u8,
        _data: &[u8],
        _palette: &[u16],
    ) -> DisplayResult<I> {
        Ok(())
    }

    /// Flush cached drawing operations
    ///
    /// Nothing is cached; every draw call reaches the panel before
    /// returning. Provided for callers that flush unconditionally.
    pub fn flush(&mut self) -> DisplayResult<I> {
        Ok(())
    }

    /// Fill the whole logical screen with an RGB565 color
    ///
    /// (Named to stay clear of `DrawTarget::clear`, which takes the
    /// embedded-graphics color type instead of a raw RGB565 word.)
    pub fn fill_screen(&mut self, raw: u16) -> DisplayResult<I> {
        let dims = self.config.logical_dimensions();
        self.fill_rect(Rect::new(0, 0, dims.cols - 1, dims.rows - 1), raw)
    }

    /// Enter sleep mode
    pub fn sleep_in(&mut self) -> DisplayResult<I> {
        self.command(SLEEP_IN, &[])
    }

    /// Exit sleep mode, waiting the mandated 150 ms settle delay
    pub fn sleep_out<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.command(SLEEP_OUT, &[])?;
        delay.delay_ms(150);
        Ok(())
    }

    /// Turn the panel on, waiting the mandated 50 ms settle delay
    pub fn display_on<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.command(DISPLAY_ON, &[])?;
        delay.delay_ms(50);
        Ok(())
    }

    /// Blank the panel; frame memory is retained
    pub fn display_off(&mut self) -> DisplayResult<I> {
        self.command(DISPLAY_OFF, &[])
    }

    /// Enable or disable display color inversion
    pub fn invert(&mut self, inverted: bool) -> DisplayResult<I> {
        self.command(if inverted { INVERT_ON } else { INVERT_OFF }, &[])
    }

    /// Change the display orientation
    ///
    /// Re-issues the memory access control register and updates the cached
    /// configuration, so [`logical_dimensions`](Self::logical_dimensions)
    /// follows.
    pub fn set_orientation(&mut self, orientation: Orientation) -> DisplayResult<I> {
        self.command(MEMORY_ACCESS_CONTROL, &[orientation.madctl()])?;
        self.config.orientation = orientation;
        Ok(())
    }

    /// Native display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Logical dimensions after applying the orientation
    pub fn logical_dimensions(&self) -> Dimensions {
        self.config.logical_dimensions()
    }

    /// Display orientation
    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Draw instrumentation counters
    pub fn metrics(&self) -> &DrawMetrics {
        &self.metrics
    }

    /// Reset the instrumentation counters to zero
    pub fn reset_metrics(&mut self) {
        self.metrics = DrawMetrics::default();
    }

    #[cfg(test)]
    pub(crate) fn interface_ref(&self) -> &I {
        &self.interface
    }

    /// Stream full buffer-sized row chunks, then the remainder
    #[cfg(any(test, feature = "alloc"))]
    fn stream_rows(&mut self, buffer: &FillBuffer, rows_total: usize) -> DisplayResult<I> {
        let rows_per_chunk = buffer.rows();
        let full_chunks = rows_total / rows_per_chunk;
        let remainder = rows_total % rows_per_chunk;

        for _ in 0..full_chunks {
            self.stream_packet(None, buffer.row_bytes(rows_per_chunk))?;
            self.metrics.transfers += 1;
        }
        if remainder > 0 {
            self.stream_packet(None, buffer.row_bytes(remainder))?;
            self.metrics.transfers += 1;
        }
        self.metrics.pixels_streamed += (rows_total * buffer.pixels_per_row()) as u32;
        Ok(())
    }

    /// Per-pixel fill path, used when no scratch buffer could be allocated
    fn fill_unbuffered(
        &mut self,
        rows_total: usize,
        pixels_per_row: usize,
        raw: u16,
    ) -> DisplayResult<I> {
        let wire = color::wire_bytes(raw);
        for _ in 0..rows_total {
            for _ in 0..pixels_per_row {
                self.stream_packet(None, &wire)?;
                self.metrics.transfers += 1;
            }
        }
        self.metrics.pixels_streamed += (rows_total * pixels_per_row) as u32;
        Ok(())
    }

    /// One-shot command packet framing its own transaction
    fn command(&mut self, command: u8, payload: &[u8]) -> DisplayResult<I> {
        self.interface
            .write_packet(Some(command), payload, Boundary::Owned)
            .map_err(Error::Interface)
    }

    /// Packet inside a held streaming transaction
    fn stream_packet(&mut self, command: Option<u8>, payload: &[u8]) -> DisplayResult<I> {
        self.interface
            .write_packet(command, payload, Boundary::Held)
            .map_err(Error::Interface)
    }

    fn begin_stream(&mut self) -> DisplayResult<I> {
        self.interface.begin_transaction().map_err(Error::Interface)
    }

    fn end_stream(&mut self) -> DisplayResult<I> {
        self.interface.end_transaction().map_err(Error::Interface)
    }
}

/// Encode an inclusive 16-bit bound pair as 4 big-endian bytes
fn window_bounds(start: u16, end: u16) -> [u8; 4] {
    let start = start.to_be_bytes();
    let end = end.to_be_bytes();
    [start[0], start[1], end[0], end[1]]
}

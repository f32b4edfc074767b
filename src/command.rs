//! HX8357-D command definitions
//!
//! This module defines the command bytes used to control the HX8357-D
//! TFT LCD controller. Commands are sent over SPI with the DC pin low
//! for the command byte and high for its parameter data.
//!
//! ## Command Structure
//!
//! All commands follow the pattern:
//! 1. Set DC low (command mode)
//! 2. Assert CS (chip select)
//! 3. Send command byte
//! 4. Set DC high (data mode)
//! 5. Send parameter bytes (if any)
//! 6. Deassert CS
//!
//! Streaming RAM writes keep CS asserted across many data transfers; see
//! [`PanelInterface`](crate::interface::PanelInterface) for the framing
//! rules.

// System commands

/// Software reset command (0x01)
///
/// Resets the controller to default state. Requires a 10 ms settle delay
/// before the next command.
pub const SOFT_RESET: u8 = 0x01;

/// Enter sleep mode command (0x10)
pub const SLEEP_IN: u8 = 0x10;

/// Exit sleep mode command (0x11)
///
/// Requires a 150 ms settle delay before RAM access.
pub const SLEEP_OUT: u8 = 0x11;

/// Display inversion off command (0x20)
pub const INVERT_OFF: u8 = 0x20;

/// Display inversion on command (0x21)
pub const INVERT_ON: u8 = 0x21;

/// Display off command (0x28)
///
/// Blanks the panel; frame memory is retained.
pub const DISPLAY_OFF: u8 = 0x28;

/// Display on command (0x29)
///
/// Requires a 50 ms settle delay after power-on initialization.
pub const DISPLAY_ON: u8 = 0x29;

// Address window and RAM commands

/// Column address set command (0x2A)
///
/// Sets the column (X) range of the active draw window.
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB], inclusive.
pub const COLUMN_ADDRESS_SET: u8 = 0x2A;

/// Page address set command (0x2B)
///
/// Sets the row (Y) range of the active draw window.
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB], inclusive.
pub const PAGE_ADDRESS_SET: u8 = 0x2B;

/// Memory write command (0x2C)
///
/// Opens a RAM write stream into the active window. Followed by pixel
/// data, 2 bytes per pixel (RGB565, most-significant byte first). The
/// address counter wraps within the window set by
/// [`COLUMN_ADDRESS_SET`]/[`PAGE_ADDRESS_SET`].
pub const MEMORY_WRITE: u8 = 0x2C;

/// Tearing effect line on command (0x35)
///
/// Requires 1 byte: 0x00 = V-blanking only.
pub const TEARING_EFFECT_ON: u8 = 0x35;

/// Memory access control command (0x36)
///
/// Sets scan/refresh direction via the MY/MX/MV bits; see
/// [`Orientation`](crate::config::Orientation).
/// Requires 1 byte.
pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;

/// Interface pixel format command (0x3A)
///
/// Requires 1 byte: 0x55 = 16 bits per pixel.
pub const PIXEL_FORMAT: u8 = 0x3A;

/// Set tear scanline command (0x44)
///
/// Requires 2 bytes: the scanline on which the tearing effect signal fires.
pub const SET_TEAR_SCANLINE: u8 = 0x44;

// Extended (vendor) commands, unlocked by ENABLE_EXTENSION

/// Set internal oscillator command (0xB0)
///
/// Requires 1 byte selecting normal/idle frame rates.
pub const SET_OSCILLATOR: u8 = 0xB0;

/// Set power control command (0xB1)
///
/// Requires 6 bytes: standby mode, BT, VSPR, VSNR, AP, FS.
pub const SET_POWER_CONTROL: u8 = 0xB1;

/// Set RGB interface command (0xB3)
///
/// Requires 4 bytes: interface/oscillator selection, sync polarities,
/// horizontal and vertical blanking periods.
pub const SET_RGB_INTERFACE: u8 = 0xB3;

/// Set display cycle command (0xB4)
///
/// Requires 7 bytes: NW, RTN, DIV, DUM, DUM, GDON, GDOFF.
pub const SET_DISPLAY_CYCLE: u8 = 0xB4;

/// Set VCOM voltage command (0xB6)
///
/// Requires 1 byte.
pub const SET_VCOM_VOLTAGE: u8 = 0xB6;

/// Enable extension command (0xB9)
///
/// Unlocks the vendor command set (0xB0 and up).
/// Requires the magic bytes [0xFF, 0x83, 0x57] and a 300 ms settle delay.
pub const ENABLE_EXTENSION: u8 = 0xB9;

/// Set source option command (0xC0)
///
/// Requires 6 bytes: OPON normal, OPON idle, three STBA timing bytes, GEN.
pub const SET_SOURCE_OPTION: u8 = 0xC0;

/// Set panel characteristics command (0xCC)
///
/// Requires 1 byte: color filter order and gate scan direction.
pub const SET_PANEL_CHARACTERISTICS: u8 = 0xCC;

/// Set gamma curve command (0xE0)
///
/// Requires 34 bytes: positive and negative voltage curves plus two
/// control bytes.
pub const SET_GAMMA_CURVE: u8 = 0xE0;

//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_ROWS};

/// Display dimensions in the panel's native (portrait) orientation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Number of rows (native height in pixels, gate lines)
    pub rows: u16,
    /// Number of columns (native width in pixels, source lines)
    pub cols: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - rows == 0 or rows > MAX_ROWS (480)
    /// - cols == 0 or cols > MAX_COLUMNS (320)
    pub fn new(rows: u16, cols: u16) -> Result<Self, BuilderError> {
        if rows == 0 || rows > MAX_ROWS {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        if cols == 0 || cols > MAX_COLUMNS {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Total pixel count
    pub fn pixels(&self) -> u32 {
        u32::from(self.rows) * u32::from(self.cols)
    }
}

impl Default for Dimensions {
    /// The full 480x320 panel the controller drives at maximum
    fn default() -> Self {
        Self {
            rows: MAX_ROWS,
            cols: MAX_COLUMNS,
        }
    }
}

/// Display orientation, encoded as the memory access control byte
///
/// The MY/MX/MV bits of the memory access control register select how the
/// address counter maps onto the panel. Landscape orientations swap the
/// logical width and height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(u8)]
pub enum Orientation {
    /// Native portrait, 320 wide x 480 tall
    Portrait = 0x00,
    /// Landscape, column/row exchange (MV | MX)
    Landscape = 0x60,
    /// Portrait rotated 180 degrees (MY | MX)
    PortraitFlipped = 0xC0,
    /// Landscape rotated 180 degrees (MY | MV)
    #[default]
    LandscapeFlipped = 0xA0,
}

impl Orientation {
    /// The memory access control register value for this orientation
    pub fn madctl(self) -> u8 {
        self as u8
    }

    /// Whether this orientation swaps the native width and height
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Landscape | Self::LandscapeFlipped)
    }
}

/// Display configuration
///
/// Holds every tunable register value of the bring-up sequence. Use
/// [`Builder`] to construct one; the defaults are the values proven on the
/// 3.5" 480x320 panel.
#[derive(Clone, Debug)]
pub struct Config {
    /// Native display dimensions
    pub dimensions: Dimensions,
    /// Display orientation (memory access control)
    pub orientation: Orientation,
    /// RGB interface settings (4 bytes for command 0xB3)
    pub rgb_interface: [u8; 4],
    /// VCOM voltage register value
    pub vcom: u8,
    /// Internal oscillator setting
    pub oscillator: u8,
    /// Panel characteristics (color filter order, gate direction)
    pub panel_characteristics: u8,
    /// Power control settings (6 bytes for command 0xB1)
    pub power_control: [u8; 6],
    /// Source option / standby timing (6 bytes for command 0xC0)
    pub source_option: [u8; 6],
    /// Display cycle settings (7 bytes for command 0xB4)
    pub display_cycle: [u8; 7],
    /// Gamma curve (34 bytes for command 0xE0)
    pub gamma: [u8; 34],
    /// Interface pixel format
    pub pixel_format: u8,
    /// Tearing effect mode
    pub tearing_effect: u8,
    /// Tear scanline (2 bytes for command 0x44)
    pub tear_scanline: [u8; 2],
}

impl Config {
    /// Logical dimensions after applying the orientation
    ///
    /// Landscape orientations report the native column count as the height
    /// and the native row count as the width.
    pub fn logical_dimensions(&self) -> Dimensions {
        if self.orientation.swaps_axes() {
            Dimensions {
                rows: self.dimensions.cols,
                cols: self.dimensions.rows,
            }
        } else {
            self.dimensions
        }
    }
}

/// One positive-or-negative gamma voltage curve half, 16 entries
const GAMMA_CURVE_HALF: [u8; 16] = [
    0x02, 0x0A, 0x11, 0x1D, 0x23, 0x35, 0x41, 0x4B, 0x4B, 0x42, 0x3A, 0x27, 0x1B, 0x08, 0x09,
    0x03,
];

fn default_gamma() -> [u8; 34] {
    let mut gamma = [0u8; 34];
    gamma[..16].copy_from_slice(&GAMMA_CURVE_HALF);
    gamma[16..32].copy_from_slice(&GAMMA_CURVE_HALF);
    gamma[32] = 0x00;
    gamma[33] = 0x01;
    gamma
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use hx8357d::{Builder, Orientation};
///
/// let config = Builder::new().orientation(Orientation::Portrait).build();
/// assert_eq!(config.logical_dimensions().cols, 320);
/// ```
#[must_use]
pub struct Builder {
    dimensions: Dimensions,
    orientation: Orientation,
    rgb_interface: [u8; 4],
    vcom: u8,
    oscillator: u8,
    panel_characteristics: u8,
    power_control: [u8; 6],
    source_option: [u8; 6],
    display_cycle: [u8; 7],
    gamma: [u8; 34],
    pixel_format: u8,
    tearing_effect: u8,
    tear_scanline: [u8; 2],
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            orientation: Orientation::default(),
            // SDO enabled, MPU interface, internal oscillator; default blanking
            rgb_interface: [0x80, 0x00, 0x06, 0x06],
            // Datasheet suggests 0x2C; panels ship tuned to 0x25
            vcom: 0x25,
            // 75 Hz normal, 60 Hz idle; differs from the datasheet table,
            // value proven on hardware
            oscillator: 0x68,
            // BGR filter order, gate direction swapped
            panel_characteristics: 0x05,
            // Not deep standby, BT, VSPR, VSNR, AP, FS
            power_control: [0x00, 0x15, 0x1C, 0x1C, 0x83, 0xAA],
            // OPON normal, OPON idle, STBA timing, GEN
            source_option: [0x50, 0x50, 0x01, 0x3C, 0x1E, 0x08],
            // NW, RTN, DIV, DUM, DUM, GDON, GDOFF
            display_cycle: [0x02, 0x40, 0x00, 0x2A, 0x2A, 0x0D, 0x78],
            gamma: default_gamma(),
            // 16 bits per pixel
            pixel_format: 0x55,
            // Tearing effect on V-blanking only
            tearing_effect: 0x00,
            tear_scanline: [0x00, 0x02],
        }
    }
}

impl Builder {
    /// Create a new Builder with the proven panel defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set native display dimensions
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = dims;
        self
    }

    /// Set display orientation
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set RGB interface parameters
    pub fn rgb_interface(mut self, values: [u8; 4]) -> Self {
        self.rgb_interface = values;
        self
    }

    /// Set the VCOM voltage register value
    pub fn vcom(mut self, value: u8) -> Self {
        self.vcom = value;
        self
    }

    /// Set the internal oscillator value
    pub fn oscillator(mut self, value: u8) -> Self {
        self.oscillator = value;
        self
    }

    /// Set panel characteristics
    pub fn panel_characteristics(mut self, value: u8) -> Self {
        self.panel_characteristics = value;
        self
    }

    /// Set power control parameters
    pub fn power_control(mut self, values: [u8; 6]) -> Self {
        self.power_control = values;
        self
    }

    /// Set source option / standby timing parameters
    pub fn source_option(mut self, values: [u8; 6]) -> Self {
        self.source_option = values;
        self
    }

    /// Set display cycle parameters
    pub fn display_cycle(mut self, values: [u8; 7]) -> Self {
        self.display_cycle = values;
        self
    }

    /// Set the gamma curve
    pub fn gamma(mut self, values: [u8; 34]) -> Self {
        self.gamma = values;
        self
    }

    /// Set the interface pixel format
    pub fn pixel_format(mut self, value: u8) -> Self {
        self.pixel_format = value;
        self
    }

    /// Set the tearing effect mode
    pub fn tearing_effect(mut self, value: u8) -> Self {
        self.tearing_effect = value;
        self
    }

    /// Set the tear scanline
    pub fn tear_scanline(mut self, values: [u8; 2]) -> Self {
        self.tear_scanline = values;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        Config {
            dimensions: self.dimensions,
            orientation: self.orientation,
            rgb_interface: self.rgb_interface,
            vcom: self.vcom,
            oscillator: self.oscillator,
            panel_characteristics: self.panel_characteristics,
            power_control: self.power_control,
            source_option: self.source_option,
            display_cycle: self.display_cycle,
            gamma: self.gamma,
            pixel_format: self.pixel_format,
            tearing_effect: self.tearing_effect,
            tear_scanline: self.tear_scanline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions_are_native_panel() {
        let dims = Dimensions::default();
        assert_eq!(dims.rows, 480);
        assert_eq!(dims.cols, 320);
        assert_eq!(dims.pixels(), 153_600);
    }

    #[test]
    fn test_dimensions_validation() {
        assert!(Dimensions::new(480, 320).is_ok());
        assert!(Dimensions::new(1, 1).is_ok());
        assert!(matches!(
            Dimensions::new(0, 320),
            Err(BuilderError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Dimensions::new(481, 320),
            Err(BuilderError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Dimensions::new(480, 321),
            Err(BuilderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_builder_defaults_match_proven_values() {
        let config = Builder::new().build();
        assert_eq!(config.vcom, 0x25);
        assert_eq!(config.oscillator, 0x68);
        assert_eq!(config.panel_characteristics, 0x05);
        assert_eq!(config.pixel_format, 0x55);
        assert_eq!(config.rgb_interface, [0x80, 0x00, 0x06, 0x06]);
        assert_eq!(config.power_control, [0x00, 0x15, 0x1C, 0x1C, 0x83, 0xAA]);
        assert_eq!(config.gamma.len(), 34);
        assert_eq!(config.gamma[32..], [0x00, 0x01]);
        assert_eq!(config.gamma[..16], config.gamma[16..32]);
    }

    #[test]
    fn test_default_orientation_is_landscape_flipped() {
        let config = Builder::new().build();
        assert_eq!(config.orientation.madctl(), 0xA0);
    }

    #[test]
    fn test_logical_dimensions_follow_orientation() {
        let config = Builder::new().orientation(Orientation::Portrait).build();
        assert_eq!(config.logical_dimensions().cols, 320);
        assert_eq!(config.logical_dimensions().rows, 480);

        let config = Builder::new()
            .orientation(Orientation::LandscapeFlipped)
            .build();
        assert_eq!(config.logical_dimensions().cols, 480);
        assert_eq!(config.logical_dimensions().rows, 320);
    }

    #[test]
    fn test_orientation_madctl_bits() {
        assert_eq!(Orientation::Portrait.madctl(), 0x00);
        assert_eq!(Orientation::Landscape.madctl(), 0x60);
        assert_eq!(Orientation::PortraitFlipped.madctl(), 0xC0);
        assert_eq!(Orientation::LandscapeFlipped.madctl(), 0xA0);
    }
}

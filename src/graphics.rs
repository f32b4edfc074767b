//! Graphics support via embedded-graphics
//!
//! This module implements the
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait
//! for [`Display`], so the generic embedded-graphics library can draw
//! primitives, text and images without knowing anything about the panel.
//!
//! There is no local framebuffer: every drawing operation goes straight to
//! the controller's RAM. Solid rectangle fills map onto the driver's
//! batched fill path; everything else decomposes into single pixels.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::Rgb565,
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use hx8357d::{Builder, Display, Interface};
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
//! let interface = Interface::new(MockSpi, MockPin, MockPin);
//! let mut display = Display::new(interface, Builder::new().build());
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
//!     .draw(&mut display);
//! ```

use embedded_graphics_core::Pixel;
use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{Dimensions as _, OriginDimensions, Point, Size};
use embedded_graphics_core::pixelcolor::Rgb565;
use embedded_graphics_core::prelude::IntoStorage;
use embedded_graphics_core::primitives::Rectangle;

use crate::display::{Display, Rect};
use crate::error::Error;
use crate::interface::PanelInterface;

impl<I> DrawTarget for Display<I>
where
    I: PanelInterface,
{
    type Color = Rgb565;
    type Error = Error<I>;

    fn draw_iter<P>(&mut self, pixels: P) -> Result<(), Self::Error>
    where
        P: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let size = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let (x, y) = (x as u32, y as u32);
            if x >= size.width || y >= size.height {
                continue;
            }

            self.draw_pixel(x as u16, y as u16, color.into_storage())?;
        }

        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        let rect = Rect::new(
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        );
        self.fill_rect(rect, color.into_storage())
    }
}

impl<I> OriginDimensions for Display<I>
where
    I: PanelInterface,
{
    fn size(&self) -> Size {
        let dims = self.logical_dimensions();
        Size::new(u32::from(dims.cols), u32::from(dims.rows))
    }
}

//! A drawable display surface in logical coordinates, backed by an LED strip frame.

use core::convert::Infallible;

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb888, prelude::*};

use super::{Frame2d, LedLayout};
use crate::Result;
use crate::led_strip::{
    Frame1d, Gamma, LedStripDriver, RGB8, ToRgb8, apply_correction, generate_combo_table,
};

/// Owns the pixel buffer of a `W`×`H` logical display and pushes it to an LED strip.
///
/// Pixels are stored in strip order; a lookup table built from the logical [`LedLayout`]
/// translates each `(x, y)` to its strip index. Drawing never touches the hardware;
/// [`flush`](Self::flush) does, applying gamma and brightness on the way out.
///
/// ```rust
/// # use message_panel::{Result, led_strip::{Frame1d, Gamma, LedStripDriver, colors}};
/// use message_panel::led2d::{LedLayout, surface::DisplaySurface};
///
/// struct Sink;
/// impl LedStripDriver<6> for Sink {
///     async fn write_frame(&mut self, _frame: &Frame1d<6>) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// const LAYOUT: LedLayout<6, 3, 2> = LedLayout::serpentine_column_major();
/// let mut surface = DisplaySurface::new(Sink, &LAYOUT, Gamma::Linear, 255);
/// surface.set_pixel(1, 0, colors::RED);
/// assert_eq!(surface.frame()[3], colors::RED); // (1, 0) is LED3
/// ```
pub struct DisplaySurface<S, const N: usize, const W: usize, const H: usize> {
    strip: S,
    frame: Frame1d<N>,
    index_by_xy: [u16; N],
    gamma: Gamma,
    brightness: u8,
    combo_table: [u8; 256],
}

impl<S, const N: usize, const W: usize, const H: usize> DisplaySurface<S, N, W, H>
where
    S: LedStripDriver<N>,
{
    /// Create a blank surface. Nothing is sent to the strip until [`flush`](Self::flush).
    #[must_use]
    pub fn new(strip: S, layout: &LedLayout<N, W, H>, gamma: Gamma, brightness: u8) -> Self {
        Self {
            strip,
            frame: Frame1d::new(),
            index_by_xy: layout.xy_to_index(),
            gamma,
            brightness,
            combo_table: generate_combo_table(gamma, brightness),
        }
    }

    /// Set every pixel to black. Does not flush.
    pub fn clear(&mut self) {
        self.frame = Frame1d::new();
    }

    /// Set one logical pixel. Does not flush.
    ///
    /// Coordinates must be on the grid; this is checked in debug builds only.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: RGB8) {
        debug_assert!(x < W && y < H, "pixel ({}, {}) is off the grid", x, y);
        let strip_index = usize::from(self.index_by_xy[y * W + x]);
        self.frame[strip_index] = color;
    }

    /// Read back one logical pixel, before brightness scaling.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> RGB8 {
        debug_assert!(x < W && y < H, "pixel ({}, {}) is off the grid", x, y);
        self.frame[usize::from(self.index_by_xy[y * W + x])]
    }

    /// Transmit the whole buffer, with gamma and brightness applied.
    ///
    /// # Errors
    ///
    /// Propagates the strip driver's error.
    pub async fn flush(&mut self) -> Result<()> {
        let mut corrected = self.frame;
        apply_correction(&mut corrected, &self.combo_table);
        self.strip.write_frame(&corrected).await
    }

    /// Set the global brightness used by subsequent flushes.
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
        self.combo_table = generate_combo_table(self.gamma, brightness);
    }

    /// Current global brightness.
    #[must_use]
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Number of pixels that are not black.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.frame
            .iter()
            .filter(|color| **color != RGB8::default())
            .count()
    }

    /// The uncorrected buffer, in strip order.
    #[must_use]
    pub const fn frame(&self) -> &Frame1d<N> {
        &self.frame
    }

    /// Snapshot of the buffer in logical `(x, y)` order.
    #[must_use]
    pub fn logical_frame(&self) -> Frame2d<W, H> {
        let mut logical = Frame2d::new();
        for (y_index, row) in logical.iter_mut().enumerate() {
            for (x_index, color) in row.iter_mut().enumerate() {
                *color = self.frame[usize::from(self.index_by_xy[y_index * W + x_index])];
            }
        }
        logical
    }

    /// The strip driver.
    #[must_use]
    pub const fn strip(&self) -> &S {
        &self.strip
    }

    /// The strip driver, mutably.
    pub const fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }
}

impl<S, const N: usize, const W: usize, const H: usize> OriginDimensions
    for DisplaySurface<S, N, W, H>
{
    fn size(&self) -> Size {
        Frame2d::<W, H>::SIZE
    }
}

impl<S, const N: usize, const W: usize, const H: usize> DrawTarget for DisplaySurface<S, N, W, H>
where
    S: LedStripDriver<N>,
{
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let (Ok(x_index), Ok(y_index)) = (usize::try_from(coord.x), usize::try_from(coord.y))
                && x_index < W
                && y_index < H
            {
                self.set_pixel(x_index, y_index, color.to_rgb8());
            }
        }
        Ok(())
    }
}

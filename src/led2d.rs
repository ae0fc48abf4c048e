//! Rectangular LED panels: wiring layouts, logical-to-physical remapping, and the drawable surface.
//!
//! The message panel is two 32×8 zigzag panels wired as one 64×8 strip matrix, but the
//! application thinks in a 32×16 logical grid. The pieces fit together like this:
//!
//! - [`LedLayout`] describes how a strip's LED order maps to physical `(x, y)` cells.
//! - [`remap::StackedRemap`] folds the right half of the physical matrix under the left half,
//!   upside down, and produces the logical [`LedLayout`] at compile time.
//! - [`surface::DisplaySurface`] owns the strip frame and draws in logical coordinates,
//!   both pixel by pixel and through [`embedded-graphics`](https://docs.rs/embedded-graphics).
//! - [`Frame2d`] is a plain logical snapshot, used for previews and comparisons.
//!
//! # Example
//!
//! ```rust
//! use message_panel::led2d::{LedLayout, remap::PanelRemap};
//!
//! const PHYSICAL: LedLayout<512, 64, 8> = LedLayout::serpentine_column_major();
//! const LOGICAL: LedLayout<512, 32, 16> = PanelRemap::layout(&PHYSICAL);
//!
//! // Logical (0, 15) sits on the folded panel, in physical column 63, row 0.
//! assert_eq!(PanelRemap::map(0, 15), (63, 0));
//! assert_eq!(LOGICAL.width(), 32);
//! ```

use core::{
    convert::Infallible,
    ops::{Deref, DerefMut, Index, IndexMut},
};

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb888, prelude::*};
use smart_leds::RGB8;

pub use embedded_graphics::geometry::{Point, Size};

pub mod layout;
pub mod remap;
pub mod surface;

#[doc(inline)]
pub use layout::LedLayout;

/// 2D array of [`RGB8`] pixels in logical (x, y) space.
///
/// Indexed as `frame[(x, y)]`; rows are stored top to bottom. `Frame2d` is also an
/// `embedded-graphics` [`DrawTarget`] that silently clips off-grid pixels.
///
/// ```rust
/// use message_panel::led2d::Frame2d;
/// use message_panel::led_strip::colors;
///
/// let mut frame = Frame2d::<32, 16>::new();
/// frame[(3, 2)] = colors::RED;
/// assert_eq!(frame[(3, 2)], colors::RED);
/// assert_eq!(frame.lit_count(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame2d<const W: usize, const H: usize>(pub [[RGB8; W]; H]);

impl<const W: usize, const H: usize> Frame2d<W, H> {
    /// Frame width in pixels (columns).
    pub const WIDTH: usize = W;
    /// Frame height in pixels (rows).
    pub const HEIGHT: usize = H;
    /// Total number of pixels (WIDTH × HEIGHT).
    pub const LEN: usize = W * H;
    /// Frame dimensions as a [`Size`].
    pub const SIZE: Size = Size::new(W as u32, H as u32);
    /// Top-left corner coordinate as a [`Point`].
    pub const TOP_LEFT: Point = Point::new(0, 0);

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([[RGB8::new(0, 0, 0); W]; H])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: RGB8) -> Self {
        Self([[color; W]; H])
    }

    /// Number of pixels that are not black.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.0
            .iter()
            .flatten()
            .filter(|color| **color != RGB8::default())
            .count()
    }
}

impl<const W: usize, const H: usize> Deref for Frame2d<W, H> {
    type Target = [[RGB8; W]; H];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const W: usize, const H: usize> DerefMut for Frame2d<W, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const W: usize, const H: usize> Index<(usize, usize)> for Frame2d<W, H> {
    type Output = RGB8;

    fn index(&self, (x_index, y_index): (usize, usize)) -> &Self::Output {
        assert!(x_index < W, "x_index must be within width");
        assert!(y_index < H, "y_index must be within height");
        &self.0[y_index][x_index]
    }
}

impl<const W: usize, const H: usize> IndexMut<(usize, usize)> for Frame2d<W, H> {
    fn index_mut(&mut self, (x_index, y_index): (usize, usize)) -> &mut Self::Output {
        assert!(x_index < W, "x_index must be within width");
        assert!(y_index < H, "y_index must be within height");
        &mut self.0[y_index][x_index]
    }
}

impl<const W: usize, const H: usize> Default for Frame2d<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> OriginDimensions for Frame2d<W, H> {
    fn size(&self) -> Size {
        Self::SIZE
    }
}

impl<const W: usize, const H: usize> DrawTarget for Frame2d<W, H> {
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
                self.0[y_index][x_index] = RGB8::new(color.r(), color.g(), color.b());
            }
        }
        Ok(())
    }
}

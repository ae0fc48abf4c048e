//! The rainbow snake: a fixed-length rainbow that slithers down and up every column in turn.
//!
//! The animation is a step function. Each [`RainbowSnake::step`] draws one frame on a
//! [`DisplaySurface`]; the caller flushes and decides when the next frame happens. That keeps
//! network servicing running between frames and lets a new command cancel the animation.
//!
//! ```rust
//! use message_panel::rainbow_snake::{RainbowSnake, SNAKE_LENGTH, wheel};
//! use message_panel::led_strip::RGB8;
//!
//! assert_eq!(RainbowSnake::<SNAKE_LENGTH, 32, 16>::FRAME_COUNT, 544);
//! assert_eq!(wheel(85), RGB8::new(0, 255, 0));
//! ```

use crate::led2d::surface::DisplaySurface;
use crate::led_strip::{LedStripDriver, RGB8};

/// Number of lit segments in the snake.
pub const SNAKE_LENGTH: usize = 32;

/// Hue wheel: maps 0..=255 around red → green → blue → red.
///
/// Three linear segments: `p < 85` fades red into green, `p < 170` green into blue,
/// and the rest blue back into red.
#[must_use]
pub const fn wheel(position: u8) -> RGB8 {
    if position < 85 {
        RGB8::new(255 - position * 3, position * 3, 0)
    } else if position < 170 {
        let position = position - 85;
        RGB8::new(0, 255 - position * 3, position * 3)
    } else {
        let position = position - 170;
        RGB8::new(position * 3, 0, 255 - position * 3)
    }
}

/// Position along the column-major serpentine traversal of a grid `height` tall.
///
/// Column 0 runs top to bottom, column 1 bottom to top, and so on.
#[must_use]
pub const fn serpentine_xy(position: usize, height: usize) -> (usize, usize) {
    let x = position / height;
    let y = if x % 2 == 0 {
        position % height
    } else {
        height - 1 - position % height
    };
    (x, y)
}

/// Color of segment `index` in a snake `length` segments long.
#[must_use]
pub const fn segment_color(index: usize, length: usize) -> RGB8 {
    wheel(((index * 256 / length) & 255) as u8)
}

/// State of one run of the animation on a `W`×`H` grid, `LEN` segments long.
///
/// Segment 0 is the head. Segments start off the grid and enter one per frame; the run ends
/// after the tail has left the grid, `W·H + LEN` frames in all.
#[derive(Clone, Debug)]
pub struct RainbowSnake<const LEN: usize, const W: usize, const H: usize> {
    segments: [Option<usize>; LEN],
    next_head: usize,
}

impl<const LEN: usize, const W: usize, const H: usize> RainbowSnake<LEN, W, H> {
    /// Cells on the grid.
    pub const TOTAL_PIXELS: usize = W * H;
    /// Frames in one full run.
    pub const FRAME_COUNT: usize = W * H + LEN;

    /// A snake that has not entered the grid yet.
    #[must_use]
    pub const fn new() -> Self {
        assert!(LEN > 0, "snake needs at least one segment");
        Self {
            segments: [None; LEN],
            next_head: 0,
        }
    }

    /// Frames produced so far.
    #[must_use]
    pub const fn frames_drawn(&self) -> usize {
        self.next_head
    }

    /// True once all [`Self::FRAME_COUNT`] frames have been produced.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.next_head >= Self::FRAME_COUNT
    }

    /// Move the snake forward one cell. Returns `false`, doing nothing, once finished.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.segments.copy_within(0..LEN - 1, 1);
        self.segments[0] = Some(self.next_head);
        self.next_head += 1;
        true
    }

    /// The segments currently on the grid, as `(x, y, color)`.
    pub fn lit_segments(&self) -> impl Iterator<Item = (usize, usize, RGB8)> + '_ {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(index, segment)| match *segment {
                Some(position) if position < Self::TOTAL_PIXELS => {
                    let (x, y) = serpentine_xy(position, H);
                    Some((x, y, segment_color(index, LEN)))
                }
                _ => None,
            })
    }

    /// Draw the next frame on `surface` (clear, advance, draw). Does not flush.
    ///
    /// Returns `false` without touching the surface once the run is finished.
    pub fn step<S, const N: usize>(&mut self, surface: &mut DisplaySurface<S, N, W, H>) -> bool
    where
        S: LedStripDriver<N>,
    {
        if !self.advance() {
            return false;
        }
        surface.clear();
        for (x, y, color) in self.lit_segments() {
            surface.set_pixel(x, y, color);
        }
        true
    }
}

impl<const LEN: usize, const W: usize, const H: usize> Default for RainbowSnake<LEN, W, H> {
    fn default() -> Self {
        Self::new()
    }
}

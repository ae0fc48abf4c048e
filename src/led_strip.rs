//! Frames, color correction, and the hardware boundary for NeoPixel-style (WS2812) LED strips.
//!
//! The crate never produces LED bitstreams itself. Anything that can transmit a
//! [`Frame1d`] implements [`LedStripDriver`]. On the Pico that is
//! `pio_strip::PioLedStrip`, which runs embassy-rp's PIO WS2812 program.
//!
//! Brightness and gamma are applied as one 256-entry lookup table built by
//! [`generate_combo_table`], so scaling a frame costs one table lookup per channel.

use core::ops::{Deref, DerefMut};

use crate::Result;

#[cfg(not(feature = "host"))]
pub mod pio_strip;

/// Predefined RGB color constants from the `smart_leds` crate.
#[doc(inline)]
pub use smart_leds::colors;

/// 8-bit-per-channel RGB color from `embedded_graphics`.
#[doc(inline)]
pub use embedded_graphics::pixelcolor::Rgb888;

/// RGB color type used by LED strip frames.
pub use smart_leds::RGB8;

use embedded_graphics::prelude::RgbColor;

// ============================================================================
// Gamma Correction
// ============================================================================

/// Gamma correction mode for LED strips.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gamma {
    /// Linear gamma (no correction). Gamma = 1.0
    #[default]
    Linear,
    /// Standard gamma 2.2 correction for perceived brightness.
    Gamma2_2,
}

/// Gamma 2.2 lookup table for 8-bit values.
/// Pre-computed to avoid floating point math: corrected = (value/255)^2.2 * 255
const GAMMA_2_2_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 11, 11,
    11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23,
    23, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 39, 39,
    40, 41, 42, 43, 43, 44, 45, 46, 47, 48, 49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61,
    62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85, 87, 88,
    89, 90, 91, 93, 94, 95, 97, 98, 99, 100, 102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116,
    117, 119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 141, 143, 145,
    146, 148, 149, 151, 153, 154, 156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175, 177,
    179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197, 199, 201, 203, 205, 207, 209, 211, 213,
    215, 217, 219, 221, 223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253,
    255,
];

/// Generate a combined gamma correction and brightness scaling lookup table.
///
/// `combo_table[input_value]` is the value sent to the strip: the input is gamma corrected,
/// then scaled by `brightness / 255`. A brightness of 255 with [`Gamma::Linear`] is the identity.
///
/// ```rust
/// use message_panel::led_strip::{Gamma, generate_combo_table};
///
/// const FULL: [u8; 256] = generate_combo_table(Gamma::Linear, 255);
/// const DIM: [u8; 256] = generate_combo_table(Gamma::Linear, 3);
/// const _: () = assert!(FULL[200] == 200);
/// const _: () = assert!(DIM[255] == 3);
/// ```
#[must_use]
pub const fn generate_combo_table(gamma: Gamma, brightness: u8) -> [u8; 256] {
    let mut result = [0u8; 256];
    let mut index = 0;
    while index < 256 {
        let gamma_corrected = match gamma {
            Gamma::Linear => index as u8,
            Gamma::Gamma2_2 => GAMMA_2_2_TABLE[index],
        };
        // (value * brightness) / 255
        let scaled = ((gamma_corrected as u16 * brightness as u16) / 255) as u8;
        result[index] = scaled;
        index += 1;
    }
    result
}

/// Apply a table from [`generate_combo_table`] to every channel of every LED.
pub fn apply_correction<const N: usize>(frame: &mut Frame1d<N>, combo_table: &[u8; 256]) {
    for color in frame.iter_mut() {
        *color = RGB8::new(
            combo_table[usize::from(color.r)],
            combo_table[usize::from(color.g)],
            combo_table[usize::from(color.b)],
        );
    }
}

// ============================================================================
// Color conversion
// ============================================================================

/// Convert colors to [`RGB8`] for LED strip rendering.
///
/// ```rust
/// use message_panel::led_strip::{Rgb888, ToRgb8, RGB8};
///
/// assert_eq!(Rgb888::new(16, 32, 48).to_rgb8(), RGB8::new(16, 32, 48));
/// ```
pub trait ToRgb8 {
    /// Convert this color to [`RGB8`].
    #[must_use]
    fn to_rgb8(self) -> RGB8;
}

impl ToRgb8 for RGB8 {
    #[inline(always)]
    fn to_rgb8(self) -> RGB8 {
        self
    }
}

impl ToRgb8 for Rgb888 {
    #[inline(always)]
    fn to_rgb8(self) -> RGB8 {
        RGB8::new(self.r(), self.g(), self.b())
    }
}

/// Convert colors to [`Rgb888`] for embedded-graphics rendering.
pub trait ToRgb888 {
    /// Convert this color to [`Rgb888`].
    #[must_use]
    fn to_rgb888(self) -> Rgb888;
}

impl ToRgb888 for RGB8 {
    #[inline(always)]
    fn to_rgb888(self) -> Rgb888 {
        Rgb888::new(self.r, self.g, self.b)
    }
}

impl ToRgb888 for Rgb888 {
    #[inline(always)]
    fn to_rgb888(self) -> Rgb888 {
        self
    }
}

// ============================================================================
// Frame1d
// ============================================================================

/// [`RGB8`] pixel data for an LED strip, in wiring order.
///
/// Frames deref to `[RGB8; N]`, so pixels can be mutated directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame1d<const N: usize>(pub [RGB8; N]);

impl<const N: usize> Frame1d<N> {
    /// Number of LEDs in this frame.
    pub const LEN: usize = N;

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([RGB8::new(0, 0, 0); N])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: RGB8) -> Self {
        Self([color; N])
    }
}

impl<const N: usize> Deref for Frame1d<N> {
    type Target = [RGB8; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> DerefMut for Frame1d<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> From<[RGB8; N]> for Frame1d<N> {
    fn from(array: [RGB8; N]) -> Self {
        Self(array)
    }
}

impl<const N: usize> From<Frame1d<N>> for [RGB8; N] {
    fn from(frame: Frame1d<N>) -> Self {
        frame.0
    }
}

impl<const N: usize> Default for Frame1d<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Hardware boundary
// ============================================================================

/// Something that can transmit a full frame to a physical LED strip.
///
/// The frame arrives already brightness- and gamma-corrected, in wiring order.
pub trait LedStripDriver<const N: usize> {
    /// Transmit `frame`. Returns once the strip has latched it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StripWrite`](crate::Error::StripWrite) if the driver cannot transmit.
    async fn write_frame(&mut self, frame: &Frame1d<N>) -> Result<()>;
}

impl<const N: usize, T: LedStripDriver<N>> LedStripDriver<N> for &mut T {
    async fn write_frame(&mut self, frame: &Frame1d<N>) -> Result<()> {
        (**self).write_frame(frame).await
    }
}

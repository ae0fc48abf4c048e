//! Draw the current [`DisplayState`]: the message right-aligned against a fixed overlay glyph.
//!
//! The overlay glyph sits at `anchor_x = width / 4 + 2`. The message ends two columns before
//! it, so long messages run off the left edge rather than over the glyph.
//!
//! Positions are computed on the logical 32-wide grid, so the glyph sits at column 10. Firmware
//! drawing straight onto the unremapped 64×8 strip matrix would put it at 64 / 4 + 2 = 18.

use embedded_graphics::{
    draw_target::DrawTarget,
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
};

use crate::Result;
use crate::command::{DisplayState, Mode};
use crate::led2d::surface::DisplaySurface;
use crate::led_strip::{LedStripDriver, ToRgb888};

/// The glyph always drawn at the anchor column.
pub const OVERLAY_GLYPH: &str = "C";

/// Column of the overlay glyph on a grid `width` wide.
#[must_use]
pub const fn anchor_x(width: usize) -> i32 {
    (width / 4 + 2) as i32
}

/// Column where a message of `char_count` characters, each `char_width` wide, starts.
///
/// ```rust
/// use message_panel::render::text_x;
///
/// assert_eq!(text_x(5, 5, 32), -17); // "HELLO" on the 32-wide grid
/// ```
#[must_use]
pub const fn text_x(char_count: usize, char_width: u32, width: usize) -> i32 {
    anchor_x(width) - (char_count as i32) * (char_width as i32) - 2
}

/// Draw `state` on `target`. Returns `false`, drawing nothing, when the panel is off.
///
/// While animating this draws the message anyway; the panel loop decides what runs.
///
/// # Errors
///
/// Propagates the draw target's error.
pub fn draw<D>(
    state: &DisplayState,
    target: &mut D,
    font: &MonoFont<'_>,
) -> core::result::Result<bool, D::Error>
where
    D: DrawTarget<Color = Rgb888> + OriginDimensions,
{
    if state.mode() == Mode::Off {
        return Ok(false);
    }
    target.clear(Rgb888::BLACK)?;

    let width = target.size().width as usize;
    let char_width = font.character_size.width + font.character_spacing;
    let message = state.message();
    let anchor = anchor_x(width);

    Text::with_baseline(
        message,
        Point::new(text_x(message.chars().count(), char_width, width), 0),
        MonoTextStyle::new(font, state.message_color().to_rgb888()),
        Baseline::Top,
    )
    .draw(target)?;

    Text::with_baseline(
        OVERLAY_GLYPH,
        Point::new(anchor, 0),
        MonoTextStyle::new(font, state.overlay_color().to_rgb888()),
        Baseline::Top,
    )
    .draw(target)?;

    Ok(true)
}

/// Draw `state` on `surface` and flush. Does nothing when the panel is off.
///
/// # Errors
///
/// Propagates the strip driver's error.
pub async fn render<S, const N: usize, const W: usize, const H: usize>(
    state: &DisplayState,
    surface: &mut DisplaySurface<S, N, W, H>,
    font: &MonoFont<'_>,
) -> Result<()>
where
    S: LedStripDriver<N>,
{
    if draw(state, surface, font)? {
        surface.flush().await?;
    }
    Ok(())
}

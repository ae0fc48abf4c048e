#![allow(missing_docs)]
#![allow(clippy::unwrap_used, reason = "a failed unwrap is a failed test")]
//! Host-level tests for the display surface.

mod common;

use common::{RecordingStrip, panel_surface};
use embassy_futures::block_on;
use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};
use message_panel::Error;
use message_panel::led2d::surface::DisplaySurface;
use message_panel::led2d::LedLayout;
use message_panel::led_strip::{Frame1d, Gamma, RGB8, ToRgb8, ToRgb888, colors};

#[test]
fn set_pixel_writes_the_mapped_led() {
    let mut surface = panel_surface(RecordingStrip::default());
    surface.set_pixel(0, 0, colors::RED);
    surface.set_pixel(31, 15, colors::GREEN);
    surface.set_pixel(0, 15, colors::BLUE);

    assert_eq!(surface.frame()[0], colors::RED);
    assert_eq!(surface.frame()[256], colors::GREEN);
    assert_eq!(surface.frame()[511], colors::BLUE);
    assert_eq!(surface.pixel(31, 15), colors::GREEN);
    assert_eq!(surface.lit_count(), 3);
}

#[test]
fn flush_scales_by_brightness() {
    let mut surface = panel_surface(RecordingStrip::default());
    surface.set_brightness(3);
    surface.set_pixel(4, 4, colors::WHITE);
    block_on(surface.flush()).unwrap();

    let index = (0..512)
        .find(|&i| surface.frame()[i] != RGB8::default())
        .unwrap();
    let written = surface.strip().last().unwrap();
    assert_eq!(written[index], RGB8::new(3, 3, 3));
    assert_eq!(written.iter().filter(|c| **c != RGB8::default()).count(), 1);
    // The logical buffer keeps full-range colors.
    assert_eq!(surface.pixel(4, 4), colors::WHITE);

    surface.set_brightness(128);
    assert_eq!(surface.brightness(), 128);
    block_on(surface.flush()).unwrap();
    assert_eq!(surface.strip().last().unwrap()[index], RGB8::new(128, 128, 128));
    assert_eq!(surface.strip().frames.len(), 2);
}

#[test]
fn zero_brightness_writes_black() {
    let mut surface = panel_surface(RecordingStrip::default());
    surface.set_brightness(0);
    surface.set_pixel(1, 1, colors::WHITE);
    block_on(surface.flush()).unwrap();
    assert!(surface.strip().last().unwrap().iter().all(|c| *c == RGB8::default()));
}

#[test]
fn clear_does_not_flush() {
    let mut surface = panel_surface(RecordingStrip::default());
    surface.set_pixel(2, 2, colors::RED);
    surface.clear();
    assert_eq!(surface.lit_count(), 0);
    assert!(surface.strip().frames.is_empty());
}

#[test]
fn draw_target_clips_to_the_grid() {
    let mut surface = panel_surface(RecordingStrip::default());
    Rectangle::new(Point::new(-2, -2), Size::new(4, 4))
        .into_styled(PrimitiveStyle::with_fill(Rgb888::GREEN))
        .draw(&mut surface)
        .unwrap();
    Rectangle::new(Point::new(30, 14), Size::new(10, 10))
        .into_styled(PrimitiveStyle::with_fill(Rgb888::BLUE))
        .draw(&mut surface)
        .unwrap();

    assert_eq!(surface.size(), Size::new(32, 16));
    assert_eq!(surface.lit_count(), 8);
    assert_eq!(surface.pixel(1, 1), RGB8::new(0, 255, 0));
    assert_eq!(surface.pixel(31, 15), colors::BLUE);
}

#[test]
fn logical_frame_matches_pixels() {
    let mut surface = panel_surface(RecordingStrip::default());
    surface.set_pixel(5, 12, colors::BLUE);
    surface.set_pixel(30, 1, colors::RED);

    let frame = surface.logical_frame();
    assert_eq!(frame[(5, 12)], colors::BLUE);
    assert_eq!(frame[(30, 1)], colors::RED);
    assert_eq!(frame.lit_count(), 2);
}

#[test]
fn flush_propagates_strip_errors() {
    let mut surface = panel_surface(RecordingStrip::default());
    surface.strip_mut().fail = true;
    assert!(matches!(block_on(surface.flush()), Err(Error::StripWrite)));
}

#[test]
fn gamma_applies_before_brightness() {
    const LAYOUT: LedLayout<2, 2, 1> = LedLayout::new([(0, 0), (1, 0)]);
    let mut surface: DisplaySurface<RecordingStrip<2>, 2, 2, 1> =
        DisplaySurface::new(RecordingStrip::default(), &LAYOUT, Gamma::Gamma2_2, 255);
    surface.set_pixel(0, 0, RGB8::new(128, 255, 0));
    block_on(surface.flush()).unwrap();

    let written: Frame1d<2> = *surface.strip().last().unwrap();
    assert!(written[0].r < 128);
    assert_eq!(written[0].g, 255);
    assert_eq!(written[0].b, 0);
}

#[test]
fn color_conversions_round_trip() {
    let color = RGB8::new(10, 20, 30);
    let converted = color.to_rgb888();
    assert_eq!(converted, Rgb888::new(10, 20, 30));
    assert_eq!(converted.to_rgb8(), color);
}

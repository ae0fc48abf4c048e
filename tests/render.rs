#![allow(missing_docs)]
#![allow(clippy::unwrap_used, reason = "a failed unwrap is a failed test")]
//! Host-level tests for message rendering.

mod common;

use common::{RecordingStrip, panel_surface};
use embassy_futures::block_on;
use embedded_graphics::mono_font::ascii::FONT_5X7;
use message_panel::command::{CommandDispatcher, DisplayState};
use message_panel::config::{LOGICAL_HEIGHT, LOGICAL_WIDTH, Topics};
use message_panel::led2d::Frame2d;
use message_panel::led_strip::{RGB8, colors};
use message_panel::render::{anchor_x, draw, render, text_x};

type PanelFrame = Frame2d<LOGICAL_WIDTH, LOGICAL_HEIGHT>;

fn state_with(commands: &[(&str, &str)]) -> DisplayState {
    let dispatcher = CommandDispatcher::new(Topics::DEFAULT);
    let mut state = DisplayState::default();
    for (topic, payload) in commands {
        dispatcher.dispatch(&mut state, topic, payload.as_bytes());
    }
    state
}

fn lit(frame: &PanelFrame) -> Vec<(usize, usize, RGB8)> {
    let mut out = Vec::new();
    for (y, row) in frame.iter().enumerate() {
        for (x, color) in row.iter().enumerate() {
            if *color != RGB8::default() {
                out.push((x, y, *color));
            }
        }
    }
    out
}

#[test]
fn positions_on_the_panel_grid() {
    assert_eq!(anchor_x(LOGICAL_WIDTH), 10);
    assert_ne!(anchor_x(LOGICAL_WIDTH), anchor_x(64));
    assert_eq!(text_x(5, 5, 32), -17);
    assert_eq!(text_x(1, 5, 32), 3);
    assert_eq!(text_x(0, 5, 32), 8);
}

#[test]
fn message_ends_before_the_overlay_glyph() {
    let state = state_with(&[("panel_color", "red"), ("panel_msg", "HELLO")]);
    let mut frame = PanelFrame::new();
    assert!(draw(&state, &mut frame, &FONT_5X7).unwrap());

    let pixels = lit(&frame);
    assert!(pixels.iter().all(|&(_, y, _)| y < 7));
    assert!(pixels.iter().all(|&(x, _, _)| x != 8 && x != 9));
    assert!(
        pixels
            .iter()
            .filter(|&&(x, _, _)| x < 8)
            .all(|&(_, _, color)| color == colors::RED)
    );
    assert!(
        pixels
            .iter()
            .filter(|&&(x, _, _)| x >= 10)
            .all(|&(x, _, color)| x < 15 && color == colors::WHITE)
    );
    assert!(pixels.iter().any(|&(x, _, _)| x < 8));
    assert!(pixels.iter().any(|&(x, _, _)| x >= 10));
}

#[test]
fn empty_message_draws_only_the_glyph() {
    let state = DisplayState::default();
    let mut frame = PanelFrame::filled(colors::BLUE);
    assert!(draw(&state, &mut frame, &FONT_5X7).unwrap());

    let pixels = lit(&frame);
    assert!(!pixels.is_empty());
    assert!(pixels.iter().all(|&(x, y, _)| (10..15).contains(&x) && y < 7));
}

#[test]
fn off_draws_nothing() {
    let state = state_with(&[("panel_msg", "HELLO"), ("panel_msg", "off")]);
    let mut frame = PanelFrame::filled(colors::BLUE);
    assert!(!draw(&state, &mut frame, &FONT_5X7).unwrap());
    assert_eq!(frame, PanelFrame::filled(colors::BLUE));
}

#[test]
fn render_flushes_only_when_drawn() {
    let mut surface = panel_surface(RecordingStrip::default());
    let showing = state_with(&[("panel_msg", "HI")]);
    block_on(render(&showing, &mut surface, &FONT_5X7)).unwrap();
    assert_eq!(surface.strip().frames.len(), 1);
    assert!(surface.lit_count() > 0);

    let off = state_with(&[("panel_msg", "off")]);
    block_on(render(&off, &mut surface, &FONT_5X7)).unwrap();
    assert_eq!(surface.strip().frames.len(), 1);
}

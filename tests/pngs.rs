#![cfg(feature = "host")]
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, reason = "a failed unwrap is a failed test")]
//! Host-level tests for PNG previews.

mod common;

use std::fs::File;
use std::path::Path;

use common::{RecordingStrip, panel_surface};
use embedded_graphics::mono_font::ascii::FONT_5X7;
use message_panel::command::{CommandDispatcher, DisplayState};
use message_panel::config::{LOGICAL_HEIGHT, LOGICAL_WIDTH, Topics};
use message_panel::led2d::Frame2d;
use message_panel::rainbow_snake::{RainbowSnake, SNAKE_LENGTH};
use message_panel::render::draw;
use message_panel::to_png::{PreviewOptions, write_frame_png, write_frames_apng};
use png::{AnimationControl, BitDepth};

type PanelFrame = Frame2d<LOGICAL_WIDTH, LOGICAL_HEIGHT>;

struct Decoded {
    width: u32,
    height: u32,
    bit_depth: BitDepth,
    animation: Option<AnimationControl>,
}

fn decode_info(path: &Path) -> Decoded {
    let decoder = png::Decoder::new(File::open(path).unwrap());
    let reader = decoder.read_info().unwrap();
    let info = reader.info();
    Decoded {
        width: info.width,
        height: info.height,
        bit_depth: info.bit_depth,
        animation: info.animation_control,
    }
}

#[test]
fn message_frame_preview() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("previews").join("hello.png");

    let dispatcher = CommandDispatcher::new(Topics::DEFAULT);
    let mut state = DisplayState::default();
    dispatcher.dispatch(&mut state, "panel_msg", b"HELLO");
    let mut frame = PanelFrame::new();
    draw(&state, &mut frame, &FONT_5X7).unwrap();

    let (width, height) = write_frame_png(&frame, &path, PreviewOptions::default()).unwrap();
    assert_eq!((width, height), (622, 318));

    let info = decode_info(&path);
    assert_eq!((info.width, info.height), (width, height));
    assert_eq!(info.bit_depth, BitDepth::Sixteen);
    assert!(info.animation.is_none());
}

#[test]
fn rainbow_snake_animation_preview() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snake.png");

    let mut surface = panel_surface(RecordingStrip::default());
    let mut snake = RainbowSnake::<SNAKE_LENGTH, LOGICAL_WIDTH, LOGICAL_HEIGHT>::new();
    let mut frames = Vec::new();
    while snake.step(&mut surface) {
        if snake.frames_drawn() % 16 == 0 {
            frames.push(surface.logical_frame());
        }
    }
    assert_eq!(frames.len(), 34);

    let options = PreviewOptions {
        max_dimension: 160,
        ..PreviewOptions::default()
    };
    let (width, height) = write_frames_apng(&frames, &path, options, 20).unwrap();
    assert!(width <= 160 && height <= 160);

    let info = decode_info(&path);
    let animation = info.animation.unwrap();
    assert_eq!(animation.num_frames, 34);
    assert_eq!(animation.num_plays, 0);
}

#[test]
fn empty_animation_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let frames: [PanelFrame; 0] = [];
    let path = dir.path().join("none.png");
    assert!(write_frames_apng(&frames, path, PreviewOptions::default(), 20).is_err());
}

#[test]
fn tiny_previews_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let options = PreviewOptions {
        max_dimension: 40,
        ..PreviewOptions::default()
    };
    assert!(write_frame_png(&PanelFrame::new(), dir.path().join("tiny.png"), options).is_err());
}

#![allow(missing_docs)]
//! Host-level tests for the rainbow snake animation.

mod common;

use common::{RecordingStrip, panel_surface};
use message_panel::config::{LOGICAL_HEIGHT, LOGICAL_WIDTH};
use message_panel::led_strip::RGB8;
use message_panel::rainbow_snake::{
    RainbowSnake, SNAKE_LENGTH, segment_color, serpentine_xy, wheel,
};

type PanelSnake = RainbowSnake<SNAKE_LENGTH, LOGICAL_WIDTH, LOGICAL_HEIGHT>;

#[test]
fn wheel_hits_primary_colors() {
    assert_eq!(wheel(0), RGB8::new(255, 0, 0));
    assert_eq!(wheel(42), RGB8::new(129, 126, 0));
    assert_eq!(wheel(85), RGB8::new(0, 255, 0));
    assert_eq!(wheel(170), RGB8::new(0, 0, 255));
    assert_eq!(wheel(255), RGB8::new(255, 0, 0));
}

#[test]
fn wheel_channels_move_monotonically_within_each_third() {
    for position in 0..84u8 {
        let (here, next) = (wheel(position), wheel(position + 1));
        assert!(next.r < here.r && next.g > here.g && next.b == 0);
    }
    for position in 85..169u8 {
        let (here, next) = (wheel(position), wheel(position + 1));
        assert!(next.g < here.g && next.b > here.b && next.r == 0);
    }
    for position in 170..255u8 {
        let (here, next) = (wheel(position), wheel(position + 1));
        assert!(next.b < here.b && next.r > here.r && next.g == 0);
    }
}

#[test]
fn serpentine_walks_columns_alternately() {
    assert_eq!(serpentine_xy(0, 16), (0, 0));
    assert_eq!(serpentine_xy(15, 16), (0, 15));
    assert_eq!(serpentine_xy(16, 16), (1, 15));
    assert_eq!(serpentine_xy(31, 16), (1, 0));
    assert_eq!(serpentine_xy(32, 16), (2, 0));
    assert_eq!(serpentine_xy(511, 16), (31, 0));
}

#[test]
fn segment_colors_span_the_wheel() {
    assert_eq!(segment_color(0, SNAKE_LENGTH), wheel(0));
    assert_eq!(segment_color(1, SNAKE_LENGTH), RGB8::new(231, 24, 0));
    assert_eq!(segment_color(31, SNAKE_LENGTH), wheel(248));
}

#[test]
fn full_run_lights_at_most_snake_length_and_ends_blank() {
    let mut surface = panel_surface(RecordingStrip::default());
    let mut snake = PanelSnake::new();
    let mut lit_per_frame = Vec::new();

    while snake.step(&mut surface) {
        lit_per_frame.push(surface.lit_count());
    }

    assert_eq!(PanelSnake::FRAME_COUNT, 544);
    assert_eq!(lit_per_frame.len(), 544);
    assert!(snake.is_finished());
    for (frame, &lit) in lit_per_frame.iter().enumerate() {
        let expected = match frame {
            0..32 => frame + 1,
            32..512 => SNAKE_LENGTH,
            _ => 543 - frame,
        };
        assert_eq!(lit, expected, "frame {frame}");
    }
    assert_eq!(lit_per_frame.last(), Some(&0));
}

#[test]
fn head_leads_and_body_follows() {
    let mut surface = panel_surface(RecordingStrip::default());
    let mut snake = PanelSnake::new();

    assert!(snake.step(&mut surface));
    assert_eq!(surface.pixel(0, 0), wheel(0));

    assert!(snake.step(&mut surface));
    assert_eq!(surface.pixel(0, 1), wheel(0));
    assert_eq!(surface.pixel(0, 0), RGB8::new(231, 24, 0));
    assert_eq!(snake.frames_drawn(), 2);

    for _ in 2..17 {
        snake.step(&mut surface);
    }
    // Head has turned the corner into column 1, moving up.
    assert_eq!(snake.lit_segments().next(), Some((1, 15, wheel(0))));
}

#[test]
fn step_after_finish_leaves_surface_alone() {
    let mut surface = panel_surface(RecordingStrip::default());
    let mut snake = PanelSnake::new();
    while snake.step(&mut surface) {}

    surface.set_pixel(3, 3, RGB8::new(1, 2, 3));
    assert!(!snake.step(&mut surface));
    assert!(!snake.advance());
    assert_eq!(surface.lit_count(), 1);
    assert!(surface.strip().frames.is_empty());
}

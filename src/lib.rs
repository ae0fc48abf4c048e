//! A WS2812 message panel for the Pico 1 and Pico 2, driven by publish/subscribe commands.
//!
//! Two 32×8 zigzag panels are chained on one data pin and mounted one above the other, the
//! second upside down. The crate presents them as a single 32×16 display, shows a short text
//! message against a fixed "C" glyph, runs a rainbow snake on request, and takes its
//! commands (text, color, brightness) from a publish/subscribe link.
//!
//! - [`led2d`] maps the 32×16 logical grid onto the strip and draws on it.
//! - [`rainbow_snake`] is the animation, one frame per step.
//! - [`command`] holds the display state and interprets inbound commands.
//! - [`render`] draws the state; [`panel`] is the loop tying everything together.
//! - [`link`] and [`update`] are the seams to the network and to firmware updates.
//!
//! # Glossary
//!
//! - **Logical grid:** the 32×16 coordinate space the application draws in.
//! - **Physical matrix:** the 64×8 grid of the chained panels, in wiring terms.
//! - **Zigzag wiring:** alternate columns run in the opposite electrical direction.
//! - **PIO ([Programmable I/O](https://medium.com/data-science/nine-pico-pio-wats-with-rust-part-1-9d062067dc25)):**
//!   the Pico's small state machines; one of them generates the WS2812 signal.
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Must enable the 'arm' architecture feature");

// Must come first so the logging macros are visible to every module below.
#[macro_use]
mod fmt;

pub mod command;
pub mod config;
mod error;
pub mod led2d;
pub mod led_strip;
pub mod link;
pub mod panel;
pub mod rainbow_snake;
pub mod render;
#[cfg(feature = "host")]
pub mod to_png;
pub mod update;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};

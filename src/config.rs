//! Compile-time configuration: panel geometry, topic names, timing, and display defaults.
//!
//! Everything here is `const`. Firmware overrides a default with the `with_*` builders:
//!
//! ```rust
//! use embassy_time::Duration;
//! use message_panel::config::{PanelConfig, Topics};
//!
//! const CONFIG: PanelConfig = PanelConfig::new()
//!     .with_topics(Topics { status: "lobby_pub", ..Topics::DEFAULT })
//!     .with_tick_interval(Duration::from_millis(50));
//! assert_eq!(CONFIG.topics.message, "panel_msg");
//! ```

use embassy_time::Duration;
use embedded_graphics::mono_font::{MonoFont, ascii::FONT_5X7};

use crate::led2d::{LedLayout, remap::PanelRemap};
use crate::led_strip::{Gamma, RGB8, colors};

/// Width of one 32×8 panel.
pub const PANEL_WIDTH: usize = 32;
/// Height of one 32×8 panel.
pub const PANEL_HEIGHT: usize = 8;
/// Logical grid width.
pub const LOGICAL_WIDTH: usize = PanelRemap::LOGICAL_WIDTH;
/// Logical grid height.
pub const LOGICAL_HEIGHT: usize = PanelRemap::LOGICAL_HEIGHT;
/// Total LEDs on the strip.
pub const LED_COUNT: usize = LOGICAL_WIDTH * LOGICAL_HEIGHT;

/// Both panels chained into one 64×8 column-major zigzag.
pub const PHYSICAL_LAYOUT: LedLayout<LED_COUNT, 64, 8> = LedLayout::serpentine_column_major();
/// The same strip, addressed in the 32×16 logical grid.
pub const LOGICAL_LAYOUT: LedLayout<LED_COUNT, LOGICAL_WIDTH, LOGICAL_HEIGHT> =
    PanelRemap::layout(&PHYSICAL_LAYOUT);

/// Topic names for inbound commands and the outbound status message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Topics {
    /// Message text, or the `off` / `rb` keywords.
    pub message: &'static str,
    /// Message color.
    pub color: &'static str,
    /// Brightness, 0 to 255 as a decimal string.
    pub brightness: &'static str,
    /// Outbound: the current message, published periodically.
    pub status: &'static str,
}

impl Topics {
    /// `panel_msg`, `panel_color`, `panel_ll`, and `panel_pub`.
    pub const DEFAULT: Self = Self {
        message: "panel_msg",
        color: "panel_color",
        brightness: "panel_ll",
        status: "panel_pub",
    };
}

impl Default for Topics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Runtime knobs for [`MessagePanel`](crate::panel::MessagePanel).
#[derive(Clone, Copy)]
pub struct PanelConfig {
    /// Topic names.
    pub topics: Topics,
    /// Loop period while showing a message or off.
    pub tick_interval: Duration,
    /// Loop period while the rainbow snake runs.
    pub frame_delay: Duration,
    /// Minimum time between status publishes. A publish happens once strictly more has passed.
    pub status_interval: Duration,
    /// Brightness at power-up.
    pub default_brightness: u8,
    /// Message color at power-up.
    pub message_color: RGB8,
    /// Color of the fixed overlay glyph.
    pub overlay_color: RGB8,
    /// Color correction applied on flush.
    pub gamma: Gamma,
    /// Font for the message and the overlay glyph.
    pub font: &'static MonoFont<'static>,
}

impl PanelConfig {
    /// The stock configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            topics: Topics::DEFAULT,
            tick_interval: Duration::from_millis(100),
            frame_delay: Duration::from_millis(20),
            status_interval: Duration::from_millis(2000),
            default_brightness: 3,
            message_color: colors::WHITE,
            overlay_color: colors::WHITE,
            gamma: Gamma::Linear,
            font: &FONT_5X7,
        }
    }

    /// Override [`Self::topics`].
    #[must_use]
    pub const fn with_topics(mut self, topics: Topics) -> Self {
        self.topics = topics;
        self
    }

    /// Override [`Self::tick_interval`].
    #[must_use]
    pub const fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Override [`Self::frame_delay`].
    #[must_use]
    pub const fn with_frame_delay(mut self, frame_delay: Duration) -> Self {
        self.frame_delay = frame_delay;
        self
    }

    /// Override [`Self::status_interval`].
    #[must_use]
    pub const fn with_status_interval(mut self, status_interval: Duration) -> Self {
        self.status_interval = status_interval;
        self
    }

    /// Override [`Self::default_brightness`].
    #[must_use]
    pub const fn with_default_brightness(mut self, default_brightness: u8) -> Self {
        self.default_brightness = default_brightness;
        self
    }

    /// Override [`Self::message_color`].
    #[must_use]
    pub const fn with_message_color(mut self, message_color: RGB8) -> Self {
        self.message_color = message_color;
        self
    }

    /// Override [`Self::overlay_color`].
    #[must_use]
    pub const fn with_overlay_color(mut self, overlay_color: RGB8) -> Self {
        self.overlay_color = overlay_color;
        self
    }

    /// Override [`Self::gamma`].
    #[must_use]
    pub const fn with_gamma(mut self, gamma: Gamma) -> Self {
        self.gamma = gamma;
        self
    }

    /// Override [`Self::font`].
    #[must_use]
    pub const fn with_font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = font;
        self
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::new()
    }
}

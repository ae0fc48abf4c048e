//! Display state and the dispatcher that turns inbound `(topic, payload)` pairs into state changes.
//!
//! The dispatcher never touches hardware. Commands that need an immediate hardware action
//! (blanking, a brightness change, starting the animation) return an [`Effect`] for the
//! panel loop to apply.
//!
//! | Topic (default) | Payload | Result |
//! |---|---|---|
//! | `panel_color` | `red`, `white`, `blue`, or `rgb(R, G, B)` | message color |
//! | `panel_msg` | `off` | [`Mode::Off`], [`Effect::Blank`] |
//! | `panel_msg` | `rb` | [`Mode::Animating`], [`Effect::StartAnimation`] |
//! | `panel_msg` | anything else | [`Mode::ShowingMessage`] with that text |
//! | `panel_ll` | `0` to `255` | [`Effect::Brightness`] |
//!
//! Anything else is ignored and leaves the state as it was.

use heapless::String;

use crate::config::{PanelConfig, Topics};
use crate::led_strip::{RGB8, colors};

/// Longest message kept, in characters. Longer text is cut after this many characters.
pub const MESSAGE_CAPACITY: usize = 49;

/// Bytes needed to hold [`MESSAGE_CAPACITY`] characters of any width.
pub const MESSAGE_BYTES: usize = MESSAGE_CAPACITY * 4;

/// Bounded message text.
pub type MessageText = String<MESSAGE_BYTES>;

/// What the panel is doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Dark; nothing is drawn.
    Off,
    /// Drawing the message and the overlay glyph every tick.
    #[default]
    ShowingMessage,
    /// Running the rainbow snake.
    Animating,
}

/// Everything the render loop needs to draw a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayState {
    mode: Mode,
    resume_mode: Mode,
    message: MessageText,
    message_color: RGB8,
    overlay_color: RGB8,
    brightness: u8,
}

impl DisplayState {
    /// Power-up state: showing an empty message in the configured colors.
    #[must_use]
    pub const fn new(config: &PanelConfig) -> Self {
        Self {
            mode: Mode::ShowingMessage,
            resume_mode: Mode::ShowingMessage,
            message: String::new(),
            message_color: config.message_color,
            overlay_color: config.overlay_color,
            brightness: config.default_brightness,
        }
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Mode to return to when the animation completes.
    #[must_use]
    pub const fn resume_mode(&self) -> Mode {
        self.resume_mode
    }

    /// Last message text received (kept while off or animating).
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Color of the message text.
    #[must_use]
    pub const fn message_color(&self) -> RGB8 {
        self.message_color
    }

    /// Color of the overlay glyph.
    #[must_use]
    pub const fn overlay_color(&self) -> RGB8 {
        self.overlay_color
    }

    /// Last accepted brightness.
    #[must_use]
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(&PanelConfig::new())
    }
}

/// Hardware action requested by a command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// State only; the next render picks it up.
    #[default]
    None,
    /// Clear and flush right away.
    Blank,
    /// (Re)start the rainbow snake from its first frame.
    StartAnimation,
    /// Apply this brightness and flush right away.
    Brightness(u8),
}

/// Routes inbound commands by topic.
#[derive(Clone, Copy, Debug)]
pub struct CommandDispatcher {
    topics: Topics,
}

impl CommandDispatcher {
    /// Dispatcher listening on `topics`.
    #[must_use]
    pub const fn new(topics: Topics) -> Self {
        Self { topics }
    }

    /// Apply one inbound command to `state`.
    ///
    /// ```rust
    /// use message_panel::command::{CommandDispatcher, DisplayState, Effect, Mode};
    /// use message_panel::config::Topics;
    ///
    /// let dispatcher = CommandDispatcher::new(Topics::DEFAULT);
    /// let mut state = DisplayState::default();
    ///
    /// assert_eq!(dispatcher.dispatch(&mut state, "panel_msg", b"HELLO"), Effect::None);
    /// assert_eq!(state.message(), "HELLO");
    ///
    /// assert_eq!(dispatcher.dispatch(&mut state, "panel_ll", b"300"), Effect::None);
    /// assert_eq!(state.brightness(), 3);
    ///
    /// assert_eq!(dispatcher.dispatch(&mut state, "panel_msg", b"off"), Effect::Blank);
    /// assert_eq!(state.mode(), Mode::Off);
    /// ```
    pub fn dispatch(&self, state: &mut DisplayState, topic: &str, payload: &[u8]) -> Effect {
        let Ok(text) = core::str::from_utf8(payload) else {
            debug!("ignoring non-UTF-8 payload on {}", topic);
            return Effect::None;
        };

        if topic == self.topics.message {
            Self::on_message(state, text)
        } else if topic == self.topics.color {
            Self::on_color(state, text)
        } else if topic == self.topics.brightness {
            Self::on_brightness(state, text)
        } else {
            debug!("ignoring unknown topic {}", topic);
            Effect::None
        }
    }

    /// Return to the mode that was active before the animation started.
    pub fn finish_animation(&self, state: &mut DisplayState) {
        if state.mode == Mode::Animating {
            state.mode = state.resume_mode;
            info!("animation finished, resuming {}", state.mode);
        }
    }

    fn on_message(state: &mut DisplayState, text: &str) -> Effect {
        match text {
            "off" => {
                info!("display off");
                state.mode = Mode::Off;
                Effect::Blank
            }
            "rb" => {
                if state.mode != Mode::Animating {
                    state.resume_mode = state.mode;
                }
                state.mode = Mode::Animating;
                info!("rainbow snake");
                Effect::StartAnimation
            }
            _ => {
                state.mode = Mode::ShowingMessage;
                state.message = truncate_message(text);
                info!("message: {}", state.message.as_str());
                Effect::None
            }
        }
    }

    fn on_color(state: &mut DisplayState, text: &str) -> Effect {
        match parse_color(text) {
            Some(color) => {
                state.message_color = color;
                debug!("message color {} {} {}", color.r, color.g, color.b);
            }
            None => debug!("ignoring color {}", text),
        }
        Effect::None
    }

    fn on_brightness(state: &mut DisplayState, text: &str) -> Effect {
        let Ok(level) = text.trim().parse::<i64>() else {
            debug!("ignoring brightness {}", text);
            return Effect::None;
        };
        let Ok(level) = u8::try_from(level) else {
            warn!("brightness {} out of range 0..=255", level);
            return Effect::None;
        };
        state.brightness = level;
        info!("brightness {}", level);
        Effect::Brightness(level)
    }
}

/// Parse a color payload: `red`, `white`, `blue`, or `rgb(R, G, B)` with components 0 to 255.
///
/// ```rust
/// use message_panel::command::parse_color;
/// use message_panel::led_strip::RGB8;
///
/// assert_eq!(parse_color("rgb(108, 147, 134)"), Some(RGB8::new(108, 147, 134)));
/// assert_eq!(parse_color("green"), None);
/// assert_eq!(parse_color("rgb(1, 2, 256)"), None);
/// ```
#[must_use]
pub fn parse_color(text: &str) -> Option<RGB8> {
    match text {
        "red" => Some(colors::RED),
        "white" => Some(colors::WHITE),
        "blue" => Some(colors::BLUE),
        _ => {
            let inner = text.strip_prefix("rgb(")?.strip_suffix(')')?;
            let mut components = inner.split(',').map(|part| part.trim().parse::<u8>());
            let (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) = (
                components.next(),
                components.next(),
                components.next(),
                components.next(),
            ) else {
                return None;
            };
            Some(RGB8::new(r, g, b))
        }
    }
}

/// Keep the first [`MESSAGE_CAPACITY`] characters of `text`.
///
/// ```rust
/// use message_panel::command::truncate_message;
///
/// assert_eq!(truncate_message(&"é".repeat(60)).chars().count(), 49);
/// ```
#[must_use]
pub fn truncate_message(text: &str) -> MessageText {
    let mut message = MessageText::new();
    for ch in text.chars().take(MESSAGE_CAPACITY) {
        // Cannot fail: MESSAGE_BYTES holds MESSAGE_CAPACITY characters of up to four bytes.
        if message.push(ch).is_err() {
            break;
        }
    }
    message
}

//! The publish/subscribe boundary: the [`PubSubLink`] trait, an in-memory channel link,
//! and a line codec for bridging a broker over TCP.
//!
//! The panel loop only sees [`PubSubLink`]. Whatever speaks to the broker (the TCP bridge
//! in the demo firmware, or a test) holds the other end of a [`LinkChannels`] pair.
//!
//! ```rust
//! use embassy_futures::block_on;
//! use embassy_sync::blocking_mutex::raw::NoopRawMutex;
//! use message_panel::link::{LinkChannels, PubSubLink};
//!
//! let channels = LinkChannels::<NoopRawMutex, 4>::new();
//! let (mut link, transport) = channels.split();
//!
//! transport.deliver("panel_msg", b"HELLO").unwrap();
//! let mut seen = None;
//! block_on(link.service(&mut |topic: &str, payload: &[u8]| {
//!     seen = Some((topic.len(), payload.len()));
//! }))
//! .unwrap();
//! assert_eq!(seen, Some((9, 5)));
//! ```

use core::fmt::Write as _;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use heapless::{String, Vec};

use crate::{Error, Result};

/// Longest topic carried by [`LinkMessage`].
pub const TOPIC_CAPACITY: usize = 32;
/// Longest payload carried by [`LinkMessage`]; a full-length message always fits.
pub const PAYLOAD_CAPACITY: usize = crate::command::MESSAGE_BYTES;
/// Longest encoded bridge line, including the trailing newline.
pub const LINE_CAPACITY: usize = TOPIC_CAPACITY + PAYLOAD_CAPACITY + 2;

/// A publish/subscribe session as seen by the panel loop.
///
/// Connection management, retries, and subscriptions belong to the implementation.
pub trait PubSubLink {
    /// Deliver every message that has arrived since the last call to `on_message`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unusable; the caller logs it and carries on.
    async fn service(&mut self, on_message: &mut dyn FnMut(&str, &[u8])) -> Result<()>;

    /// Publish `payload` on `topic`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Publish`] if the message could not be queued or sent.
    async fn publish(&mut self, topic: &'static str, payload: &[u8]) -> Result<()>;
}

/// One message in either direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkMessage {
    /// Topic name.
    pub topic: String<TOPIC_CAPACITY>,
    /// Raw payload bytes.
    pub payload: Vec<u8, PAYLOAD_CAPACITY>,
}

impl LinkMessage {
    /// Copy `topic` and `payload` into a bounded message.
    ///
    /// A payload longer than [`PAYLOAD_CAPACITY`] is truncated, at a character boundary when
    /// it is UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MessageTooLong`] if the topic exceeds [`TOPIC_CAPACITY`].
    pub fn new(topic: &str, payload: &[u8]) -> Result<Self> {
        let mut message = Self {
            topic: String::new(),
            payload: Vec::new(),
        };
        message
            .topic
            .push_str(topic)
            .map_err(|()| Error::MessageTooLong)?;
        let kept = truncate_payload(payload, PAYLOAD_CAPACITY);
        if kept.len() < payload.len() {
            debug!("truncated payload on {} to {} bytes", topic, kept.len());
        }
        message
            .payload
            .extend_from_slice(kept)
            .map_err(|()| Error::MessageTooLong)?;
        Ok(message)
    }
}

/// The longest prefix of `payload` within `capacity` bytes that does not split a UTF-8
/// character. Non-UTF-8 payloads are cut at `capacity`.
fn truncate_payload(payload: &[u8], capacity: usize) -> &[u8] {
    if payload.len() <= capacity {
        return payload;
    }
    let end = match core::str::from_utf8(payload) {
        Ok(text) => (0..=capacity)
            .rev()
            .find(|&index| text.is_char_boundary(index))
            .unwrap_or(0),
        Err(_) => capacity,
    };
    &payload[..end]
}

/// Inbound and outbound queues shared by the panel loop and the transport.
///
/// Usually placed in a `static` (with `CriticalSectionRawMutex`) so both tasks can borrow it.
pub struct LinkChannels<M: RawMutex, const DEPTH: usize> {
    inbound: Channel<M, LinkMessage, DEPTH>,
    outbound: Channel<M, LinkMessage, DEPTH>,
}

impl<M: RawMutex, const DEPTH: usize> LinkChannels<M, DEPTH> {
    /// Empty queues.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inbound: Channel::new(),
            outbound: Channel::new(),
        }
    }

    /// The panel's end and the transport's end.
    #[must_use]
    pub fn split(&self) -> (ChannelLink<'_, M, DEPTH>, TransportEnd<'_, M, DEPTH>) {
        (
            ChannelLink {
                inbound: self.inbound.receiver(),
                outbound: self.outbound.sender(),
            },
            TransportEnd {
                inbound: self.inbound.sender(),
                outbound: self.outbound.receiver(),
            },
        )
    }
}

impl<M: RawMutex, const DEPTH: usize> Default for LinkChannels<M, DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}

/// [`PubSubLink`] over a pair of in-memory queues.
pub struct ChannelLink<'a, M: RawMutex, const DEPTH: usize> {
    inbound: Receiver<'a, M, LinkMessage, DEPTH>,
    outbound: Sender<'a, M, LinkMessage, DEPTH>,
}

impl<M: RawMutex, const DEPTH: usize> PubSubLink for ChannelLink<'_, M, DEPTH> {
    async fn service(&mut self, on_message: &mut dyn FnMut(&str, &[u8])) -> Result<()> {
        while let Ok(message) = self.inbound.try_receive() {
            on_message(&message.topic, &message.payload);
        }
        Ok(())
    }

    async fn publish(&mut self, topic: &'static str, payload: &[u8]) -> Result<()> {
        let message = LinkMessage::new(topic, payload)?;
        self.outbound
            .try_send(message)
            .map_err(|_| Error::Publish(topic))
    }
}

/// The transport's end of a [`LinkChannels`] pair.
pub struct TransportEnd<'a, M: RawMutex, const DEPTH: usize> {
    inbound: Sender<'a, M, LinkMessage, DEPTH>,
    outbound: Receiver<'a, M, LinkMessage, DEPTH>,
}

impl<M: RawMutex, const DEPTH: usize> TransportEnd<'_, M, DEPTH> {
    /// Queue an inbound message for the panel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LinkQueueFull`] if the panel has fallen behind, or
    /// [`Error::MessageTooLong`] for an oversized topic. Oversized payloads are truncated.
    pub fn deliver(&self, topic: &str, payload: &[u8]) -> Result<()> {
        let message = LinkMessage::new(topic, payload)?;
        self.inbound
            .try_send(message)
            .map_err(|_| Error::LinkQueueFull)
    }

    /// Wait for the panel to publish something.
    pub async fn next_outbound(&self) -> LinkMessage {
        self.outbound.receive().await
    }

    /// Take a published message if one is waiting.
    #[must_use]
    pub fn try_next_outbound(&self) -> Option<LinkMessage> {
        self.outbound.try_receive().ok()
    }
}

// ============================================================================
// Bridge line codec
// ============================================================================

/// Split a bridge line `"<topic> <payload>"` (as printed by `mosquitto_sub -v`).
///
/// Trailing `\r`/`\n` are dropped. A line with no space is a topic with an empty payload.
/// Returns `None` for an empty topic.
///
/// ```rust
/// use message_panel::link::parse_line;
///
/// assert_eq!(parse_line("panel_msg hello world\n"), Some(("panel_msg", "hello world")));
/// assert_eq!(parse_line("panel_msg"), Some(("panel_msg", "")));
/// assert_eq!(parse_line(" orphan"), None);
/// ```
#[must_use]
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (topic, payload) = line.split_once(' ').unwrap_or((line, ""));
    if topic.is_empty() {
        None
    } else {
        Some((topic, payload))
    }
}

/// Encode one outbound message as a bridge line, newline included.
///
/// # Errors
///
/// Returns [`Error::FormatError`] if the payload is not UTF-8 or the line does not fit.
pub fn format_line(topic: &str, payload: &[u8]) -> Result<String<LINE_CAPACITY>> {
    let payload = core::str::from_utf8(payload).map_err(|_| Error::FormatError)?;
    let mut line = String::new();
    writeln!(line, "{topic} {payload}")?;
    Ok(line)
}

/// Reassembles newline-terminated lines from a byte stream.
///
/// A line longer than `CAP` bytes keeps its first `CAP` bytes (less any split trailing
/// character); the rest, up to the newline, is discarded. Lines that are not UTF-8 are dropped.
pub struct LineReader<const CAP: usize> {
    buffer: Vec<u8, CAP>,
    overflowed: bool,
}

impl<const CAP: usize> LineReader<CAP> {
    /// Empty reader.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed received bytes; `on_line` is called once per complete line, without the newline.
    pub fn push(&mut self, bytes: &[u8], mut on_line: impl FnMut(&str)) {
        for &byte in bytes {
            if byte == b'\n' {
                let line = match core::str::from_utf8(&self.buffer) {
                    Ok(line) => Some(line),
                    // An overflowed line may end mid-character.
                    Err(err) if self.overflowed => {
                        core::str::from_utf8(&self.buffer[..err.valid_up_to()]).ok()
                    }
                    Err(_) => None,
                };
                match line {
                    Some(line) => {
                        if self.overflowed {
                            debug!("truncated bridge line to {} bytes", line.len());
                        }
                        on_line(line.trim_end_matches('\r'));
                    }
                    None => warn!("dropping bridge line that is not UTF-8"),
                }
                self.buffer.clear();
                self.overflowed = false;
            } else if self.buffer.push(byte).is_err() {
                self.overflowed = true;
            }
        }
    }
}

impl<const CAP: usize> Default for LineReader<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

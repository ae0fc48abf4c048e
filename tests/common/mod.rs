//! Test doubles shared by the host tests.
#![allow(dead_code, missing_docs)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use message_panel::config::{LED_COUNT, LOGICAL_HEIGHT, LOGICAL_LAYOUT, LOGICAL_WIDTH};
use message_panel::led2d::surface::DisplaySurface;
use message_panel::led_strip::{Frame1d, Gamma, LedStripDriver};
use message_panel::link::PubSubLink;
use message_panel::update::{FirmwareUpdate, UpdateEvent};
use message_panel::{Error, Result};

/// Names of calls in the order they happened, shared by every double in one test.
pub type CallLog = Rc<RefCell<Vec<&'static str>>>;

pub type PanelSurface = DisplaySurface<RecordingStrip<LED_COUNT>, LED_COUNT, LOGICAL_WIDTH, LOGICAL_HEIGHT>;

/// Keeps every frame written to it.
#[derive(Default)]
pub struct RecordingStrip<const N: usize> {
    pub frames: Vec<Frame1d<N>>,
    pub log: CallLog,
    pub fail: bool,
}

impl<const N: usize> RecordingStrip<N> {
    pub fn with_log(log: CallLog) -> Self {
        Self {
            frames: Vec::new(),
            log,
            fail: false,
        }
    }

    pub fn last(&self) -> Option<&Frame1d<N>> {
        self.frames.last()
    }
}

impl<const N: usize> LedStripDriver<N> for RecordingStrip<N> {
    async fn write_frame(&mut self, frame: &Frame1d<N>) -> Result<()> {
        self.log.borrow_mut().push("flush");
        if self.fail {
            return Err(Error::StripWrite);
        }
        self.frames.push(*frame);
        Ok(())
    }
}

/// A 32×16 panel surface at full brightness over a recording strip.
pub fn panel_surface(strip: RecordingStrip<LED_COUNT>) -> PanelSurface {
    DisplaySurface::new(strip, &LOGICAL_LAYOUT, Gamma::Linear, 255)
}

/// Link that hands out queued messages and records publishes.
#[derive(Default)]
pub struct ScriptedLink {
    pub inbound: VecDeque<(String, Vec<u8>)>,
    pub published: Vec<(String, Vec<u8>)>,
    pub log: CallLog,
    pub fail_publish: bool,
}

impl ScriptedLink {
    pub fn with_log(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub fn push(&mut self, topic: &str, payload: &str) {
        self.inbound
            .push_back((topic.to_owned(), payload.as_bytes().to_vec()));
    }
}

impl PubSubLink for ScriptedLink {
    async fn service(&mut self, on_message: &mut dyn FnMut(&str, &[u8])) -> Result<()> {
        self.log.borrow_mut().push("service");
        while let Some((topic, payload)) = self.inbound.pop_front() {
            on_message(&topic, &payload);
        }
        Ok(())
    }

    async fn publish(&mut self, topic: &'static str, payload: &[u8]) -> Result<()> {
        self.log.borrow_mut().push("publish");
        if self.fail_publish {
            return Err(Error::Publish(topic));
        }
        self.published.push((topic.to_owned(), payload.to_vec()));
        Ok(())
    }
}

/// Update service that replays queued events, one per call.
#[derive(Default)]
pub struct ScriptedUpdater {
    pub events: VecDeque<UpdateEvent>,
    pub began: bool,
    pub log: CallLog,
}

impl ScriptedUpdater {
    pub fn with_log(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }
}

impl FirmwareUpdate for ScriptedUpdater {
    fn begin(&mut self) -> Result<()> {
        self.began = true;
        Ok(())
    }

    async fn service(&mut self) -> Option<UpdateEvent> {
        self.log.borrow_mut().push("update");
        self.events.pop_front()
    }
}

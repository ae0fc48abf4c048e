//! The panel loop: one cooperative task that services the link, the update service, the status
//! publish, and the display, in that order, every tick.
//!
//! ```text
//! tick
//!  ├─ link.service     → CommandDispatcher mutates DisplayState, Effects applied to the surface
//!  ├─ updater.service  → events logged
//!  ├─ status publish   → every status_interval, the current message on the status topic
//!  └─ draw             → off: nothing / animating: one snake frame / otherwise: message + "C"
//! ```
//!
//! [`MessagePanel::tick`] does one pass and returns how long to sleep; [`MessagePanel::run`]
//! loops it on the embassy timer. Nothing a command or the network does is fatal to the loop.

use embassy_time::{Duration, Instant};

use crate::Result;
use crate::command::{CommandDispatcher, DisplayState, Effect, Mode};
use crate::config::PanelConfig;
use crate::led2d::surface::DisplaySurface;
use crate::led_strip::LedStripDriver;
use crate::link::PubSubLink;
use crate::rainbow_snake::{RainbowSnake, SNAKE_LENGTH};
use crate::render::render;
use crate::update::{FirmwareUpdate, log_event};

/// Hardware actions collected while servicing the link, applied once afterwards.
#[derive(Default)]
struct PendingEffects {
    blank: bool,
    start_animation: bool,
    brightness: Option<u8>,
}

impl PendingEffects {
    fn record(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Blank => self.blank = true,
            Effect::StartAnimation => self.start_animation = true,
            Effect::Brightness(level) => self.brightness = Some(level),
        }
    }
}

/// The message panel application, generic over its strip, link, and update service.
pub struct MessagePanel<S, L, U, const N: usize, const W: usize, const H: usize> {
    config: PanelConfig,
    dispatcher: CommandDispatcher,
    state: DisplayState,
    surface: DisplaySurface<S, N, W, H>,
    link: L,
    updater: U,
    animation: Option<RainbowSnake<SNAKE_LENGTH, W, H>>,
    last_status: Instant,
}

impl<S, L, U, const N: usize, const W: usize, const H: usize> MessagePanel<S, L, U, N, W, H>
where
    S: LedStripDriver<N>,
    L: PubSubLink,
    U: FirmwareUpdate,
{
    /// Assemble the panel. `started_at` anchors the status publish schedule.
    ///
    /// The surface's brightness is reset to the configured default.
    #[must_use]
    pub fn new(
        config: PanelConfig,
        mut surface: DisplaySurface<S, N, W, H>,
        link: L,
        updater: U,
        started_at: Instant,
    ) -> Self {
        surface.set_brightness(config.default_brightness);
        Self {
            config,
            dispatcher: CommandDispatcher::new(config.topics),
            state: DisplayState::new(&config),
            surface,
            link,
            updater,
            animation: None,
            last_status: started_at,
        }
    }

    /// Start the update service. A failure is logged and the panel runs without it.
    pub fn start(&mut self) {
        match self.updater.begin() {
            Ok(()) => info!("update service ready"),
            Err(err) => warn!("update service unavailable: {}", err),
        }
    }

    /// One pass of the loop at time `now`. Returns how long to wait before the next pass.
    ///
    /// # Errors
    ///
    /// Returns the strip driver's error if a flush fails. Link and update errors are logged.
    pub async fn tick(&mut self, now: Instant) -> Result<Duration> {
        let pending = self.service_link().await;
        let applied = self.apply(pending).await;

        if let Some(event) = self.updater.service().await {
            log_event(event);
        }

        self.publish_status(now).await;
        applied?;
        self.draw().await
    }

    async fn apply(&mut self, pending: PendingEffects) -> Result<()> {
        if pending.start_animation && self.state.mode() == Mode::Animating {
            self.animation = Some(RainbowSnake::new());
        }
        if pending.blank && self.state.mode() == Mode::Off {
            self.surface.clear();
            self.surface.flush().await?;
        }
        if let Some(level) = pending.brightness {
            self.surface.set_brightness(level);
            self.surface.flush().await?;
        }
        Ok(())
    }

    async fn service_link(&mut self) -> PendingEffects {
        let mut pending = PendingEffects::default();
        let dispatcher = &self.dispatcher;
        let state = &mut self.state;
        if let Err(err) = self
            .link
            .service(&mut |topic: &str, payload: &[u8]| {
                pending.record(dispatcher.dispatch(state, topic, payload));
            })
            .await
        {
            warn!("link service failed: {}", err);
        }
        pending
    }

    async fn publish_status(&mut self, now: Instant) {
        if now.saturating_duration_since(self.last_status) <= self.config.status_interval {
            return;
        }
        self.last_status = now;
        let topic = self.config.topics.status;
        match self
            .link
            .publish(topic, self.state.message().as_bytes())
            .await
        {
            Ok(()) => debug!("published {}", self.state.message()),
            Err(err) => warn!("status publish failed: {}", err),
        }
    }

    async fn draw(&mut self) -> Result<Duration> {
        if self.state.mode() != Mode::Animating {
            self.animation = None;
        }
        match self.state.mode() {
            Mode::Off => Ok(self.config.tick_interval),
            Mode::Animating => {
                let snake = self.animation.get_or_insert_with(RainbowSnake::new);
                if snake.step(&mut self.surface) {
                    self.surface.flush().await?;
                }
                if snake.is_finished() {
                    self.animation = None;
                    self.dispatcher.finish_animation(&mut self.state);
                }
                Ok(self.config.frame_delay)
            }
            Mode::ShowingMessage => {
                render(&self.state, &mut self.surface, self.config.font).await?;
                Ok(self.config.tick_interval)
            }
        }
    }

    /// Current display state.
    #[must_use]
    pub const fn state(&self) -> &DisplayState {
        &self.state
    }

    /// The display surface.
    #[must_use]
    pub const fn surface(&self) -> &DisplaySurface<S, N, W, H> {
        &self.surface
    }

    /// The link, for inspection.
    #[must_use]
    pub const fn link(&self) -> &L {
        &self.link
    }

    /// The link, mutably.
    pub const fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// The update service.
    #[must_use]
    pub const fn updater(&self) -> &U {
        &self.updater
    }

    /// The running animation, if any.
    #[must_use]
    pub const fn animation(&self) -> Option<&RainbowSnake<SNAKE_LENGTH, W, H>> {
        self.animation.as_ref()
    }

    /// Start the update service, then tick forever on the embassy timer.
    ///
    /// A failed tick is logged and the loop carries on at the normal tick interval.
    #[cfg(not(feature = "host"))]
    pub async fn run(mut self) -> core::convert::Infallible {
        self.start();
        loop {
            let delay = match self.tick(Instant::now()).await {
                Ok(delay) => delay,
                Err(err) => {
                    error!("panel tick failed: {}", err);
                    self.config.tick_interval
                }
            };
            embassy_time::Timer::after(delay).await;
        }
    }
}

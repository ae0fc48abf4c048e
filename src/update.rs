//! Over-the-air firmware update seam.
//!
//! The panel loop calls [`FirmwareUpdate::begin`] once and [`FirmwareUpdate::service`] every
//! tick, and only logs what comes back. `()` stands in when there is no update service.

use crate::Result;

/// What an update is replacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateTarget {
    /// The firmware image.
    Sketch,
    /// The data partition.
    Filesystem,
}

/// Why an update failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateError {
    /// The uploader failed authentication.
    Auth,
    /// The update could not be started.
    Begin,
    /// The uploader could not be reached.
    Connect,
    /// The transfer broke off.
    Receive,
    /// The image could not be finalized.
    End,
}

/// Progress reported by an update service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateEvent {
    /// An upload began.
    Started(UpdateTarget),
    /// Percent complete, 0 to 100.
    Progress(u8),
    /// The upload completed.
    Finished,
    /// The upload failed.
    Failed(UpdateError),
}

/// A firmware update service polled from the panel loop.
pub trait FirmwareUpdate {
    /// Start listening for updates.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot start; the panel runs without it.
    fn begin(&mut self) -> Result<()>;

    /// Do a bounded amount of update work and report what happened, if anything.
    async fn service(&mut self) -> Option<UpdateEvent>;
}

impl FirmwareUpdate for () {
    fn begin(&mut self) -> Result<()> {
        Ok(())
    }

    async fn service(&mut self) -> Option<UpdateEvent> {
        None
    }
}

/// Whole percent of `total` that `progress` represents, capped at 100. Zero when `total` is zero.
///
/// ```rust
/// use message_panel::update::progress_percent;
///
/// assert_eq!(progress_percent(512, 2048), 25);
/// assert_eq!(progress_percent(7, 0), 0);
/// ```
#[must_use]
pub const fn progress_percent(progress: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = progress as u64 * 100 / total as u64;
    if percent > 100 { 100 } else { percent as u8 }
}

/// Log one update event.
pub fn log_event(event: UpdateEvent) {
    match event {
        UpdateEvent::Started(target) => info!("update started: {}", target),
        UpdateEvent::Progress(percent) => debug!("update progress: {}%", percent),
        UpdateEvent::Finished => info!("update finished"),
        UpdateEvent::Failed(error) => error!("update failed: {}", error),
    }
}

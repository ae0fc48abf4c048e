use core::convert::Infallible;

use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[derive(Debug, Display, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    #[cfg(feature = "arm")]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    #[display("LED strip write failed")]
    StripWrite,

    #[display("Publish to '{_0}' failed")]
    Publish(#[error(not(source))] &'static str),

    #[display("Link queue is full")]
    LinkQueueFull,

    #[display("Topic does not fit the link buffer")]
    MessageTooLong,

    #[display("Link is not connected")]
    LinkDisconnected,

    #[display("Network connection failed")]
    Network,

    #[display("WiFi join failed with status {_0}")]
    WifiJoin(#[error(not(source))] u32),

    #[display("Format error")]
    FormatError,
}

impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Self::FormatError
    }
}

#[cfg(feature = "arm")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}

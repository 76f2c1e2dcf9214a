use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure while establishing a session with the remote listing service.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("could not reach {host}: {reason}")]
    Transport { host: String, reason: String },
    #[error("login rejected: {0}")]
    Login(String),
    #[error("could not enter remote directory {dir}: {reason}")]
    Directory { dir: String, reason: String },
}

#[derive(Debug, Error)]
#[error("listing failed: {0}")]
pub struct ListingError(pub String);

/// A filename had the right shape but its date token is not a calendar year-month.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("expected 6 digits (YYYYMM), got {0:?}")]
    Malformed(String),
    #[error("year {year} out of range in {token:?}")]
    InvalidYear { token: String, year: i32 },
    #[error("month {month} out of range in {token:?}")]
    InvalidMonth { token: String, month: u32 },
}

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("network failure: {0}")]
    Network(#[source] io::Error),
    #[error("server refused transfer: {0}")]
    Rejected(String),
    #[error("protocol failure: {0}")]
    Protocol(String),
    /// The sink handed to a remote rejected a write. The remote does not know where the
    /// sink leads, [`download`](crate::download) turns this into `LocalIo`.
    #[error("local write failed: {0}")]
    Sink(#[source] io::Error),
    #[error("local write failed for {path:?}: {source}")]
    LocalIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("archive not found: {0:?}")]
    MissingArchive(PathBuf),
    #[error("corrupt archive {path:?}: {reason}")]
    CorruptArchive { path: PathBuf, reason: String },
    #[error("I/O failure extracting {path:?}: {source}")]
    LocalIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

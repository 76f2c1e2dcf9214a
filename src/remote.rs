use std::io::Write;

use crate::error::{ConnectionError, ListingError, TransferError};

/// An open session on a remote file listing service, already positioned in the
/// directory that holds the archives.
pub trait RemoteArchive {
    fn list_filenames(&mut self) -> Result<Vec<String>, ListingError>;

    /// Stream `name` into `sink`, returning the number of bytes written.
    fn retrieve_file(&mut self, name: &str, sink: &mut dyn Write) -> Result<u64, TransferError>;

    fn close(&mut self) -> Result<(), String>;
}

/// Knows how to open a [`RemoteArchive`] session.
pub trait Connector {
    type Remote: RemoteArchive;

    fn connect(&self) -> Result<Self::Remote, ConnectionError>;

    /// Human readable location, used when reporting.
    fn describe(&self) -> String;
}

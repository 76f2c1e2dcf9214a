use std::{
    fs::{self, OpenOptions},
    io::BufWriter,
    path::Path,
};

use crate::{error::TransferError, remote::RemoteArchive};

/// Bytes written on success.
pub type TransferOutcome = Result<u64, TransferError>;

/// Copy the remote file `name` to `local_path`.
///
/// The parent directory must already exist. Any existing file at `local_path` is
/// truncated. A single attempt is made. When the transfer fails the partially written
/// file is removed so that a later run never mistakes it for a complete archive.
pub fn download<RA>(remote: &mut RA, name: &str, local_path: &Path) -> TransferOutcome
where
    RA: RemoteArchive + ?Sized,
{
    let local_io = |source| TransferError::LocalIo {
        path: local_path.to_path_buf(),
        source,
    };

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(local_path)
        .map_err(local_io)?;

    let mut sink = BufWriter::new(file);
    let res = remote
        .retrieve_file(name, &mut sink)
        .map_err(|err| match err {
            TransferError::Sink(source) => local_io(source),
            other => other,
        })
        .and_then(|bytes| {
            sink.into_inner()
                .map_err(|err| local_io(err.into_error()))
                .and_then(|file| file.sync_all().map_err(local_io))
                .map(|_| bytes)
        });

    match res {
        Ok(bytes) => {
            log::debug!("Wrote {} bytes to {:?}", bytes, local_path);
            Ok(bytes)
        }
        Err(err) => {
            if let Err(rm_err) = fs::remove_file(local_path) {
                log::warn!("Could not remove partial file {:?}: {}", local_path, rm_err);
            }
            Err(err)
        }
    }
}

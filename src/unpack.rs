use std::{fs, io, path::Path};

use crate::error::ExtractError;
use zip::{result::ZipError, ZipArchive};

/// Number of archive entries on success.
pub type ExtractionOutcome = Result<usize, ExtractError>;

/// Unpack every entry of the zip archive at `archive_path` under `target_dir`, keeping the
/// relative paths stored in the archive. `target_dir` is created if needed.
///
/// Entries whose stored path would escape `target_dir` make the archive corrupt. On failure,
/// whatever was already written stays on disk.
pub fn extract(archive_path: &Path, target_dir: &Path) -> ExtractionOutcome {
    if !archive_path.is_file() {
        return Err(ExtractError::MissingArchive(archive_path.to_path_buf()));
    }

    let local_io = |path: &Path, source: io::Error| ExtractError::LocalIo {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(target_dir).map_err(|err| local_io(target_dir, err))?;

    let file = fs::File::open(archive_path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ExtractError::MissingArchive(archive_path.to_path_buf()),
        _ => local_io(archive_path, err),
    })?;

    let mut archive = ZipArchive::new(file).map_err(|err| classify(archive_path, err))?;
    let entries = archive.len();
    log::debug!("{:?} holds {} entries", archive_path, entries);

    archive
        .extract(target_dir)
        .map_err(|err| classify(archive_path, err))?;

    Ok(entries)
}

fn classify(archive_path: &Path, err: ZipError) -> ExtractError {
    match err {
        ZipError::Io(source) => match source.kind() {
            io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
                ExtractError::CorruptArchive {
                    path: archive_path.to_path_buf(),
                    reason: source.to_string(),
                }
            }
            _ => ExtractError::LocalIo {
                path: archive_path.to_path_buf(),
                source,
            },
        },
        other => ExtractError::CorruptArchive {
            path: archive_path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}

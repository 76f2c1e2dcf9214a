use std::{fs, path::PathBuf};

use crate::{
    config::Settings,
    confirm::Confirm,
    remote::{Connector, RemoteArchive},
    report::{Event, Reporter},
    selector::{self, FilePattern},
    session::with_session,
    transfer, unpack,
};
use strum::{Display, IntoStaticStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Connect,
    Select,
    Confirm,
    Download,
    Extract,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed {
        file: String,
        archive: PathBuf,
        extracted_to: PathBuf,
        entries: usize,
    },
    NothingToDo,
    Cancelled {
        file: String,
    },
    Failed {
        stage: Stage,
        reason: String,
    },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        if self.is_failure() {
            1
        } else {
            0
        }
    }
}

/// Connect, list and select, confirm, download, extract.
///
/// Each stage runs at most once. A failing stage ends the run and nothing done by an
/// earlier stage is undone, so a failed extraction leaves the downloaded archive in place.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pattern: FilePattern,
    download_dir: PathBuf,
    extract_dir: PathBuf,
}

impl Pipeline {
    pub fn new(pattern: FilePattern, download_dir: PathBuf, extract_dir: PathBuf) -> Self {
        Pipeline {
            pattern,
            download_dir,
            extract_dir,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Pipeline::new(
            settings.file_pattern(),
            settings.download_dir.clone(),
            settings.extract_dir.clone(),
        )
    }

    pub fn run<C>(
        &self,
        connector: &C,
        confirm: &mut dyn Confirm,
        reporter: &mut dyn Reporter,
    ) -> Outcome
    where
        C: Connector,
    {
        let res = with_session(connector, |remote| {
            let location = connector.describe();
            reporter.report(Event::Connected {
                location: &location,
            });
            self.run_connected(remote, &mut *confirm, &mut *reporter)
        });

        match res {
            Ok(outcome) => outcome,
            Err(err) => fail(reporter, Stage::Connect, err.to_string()),
        }
    }

    fn run_connected<RA>(
        &self,
        remote: &mut RA,
        confirm: &mut dyn Confirm,
        reporter: &mut dyn Reporter,
    ) -> Outcome
    where
        RA: RemoteArchive + ?Sized,
    {
        let entries = match remote.list_filenames() {
            Ok(entries) => entries,
            Err(err) => {
                let reason = err.to_string();
                reporter.report(Event::ListingFailed { reason: &reason });
                Vec::new()
            }
        };

        let selection = selector::scan(&entries, &self.pattern);
        for (name, error) in &selection.rejected {
            reporter.report(Event::Excluded { name, error });
        }
        reporter.report(Event::Listed {
            entries: entries.len(),
            candidates: selection.candidates.len(),
        });

        let candidate = match selection.most_recent() {
            Some(candidate) => candidate,
            None => {
                reporter.report(Event::NothingToDo);
                return Outcome::NothingToDo;
            }
        };
        reporter.report(Event::Selected { candidate });

        let file = candidate.name.clone();
        if !confirm.confirm(&format!("Download {}?", file)) {
            reporter.report(Event::Cancelled { name: &file });
            return Outcome::Cancelled { file };
        }

        if let Err(err) = fs::create_dir_all(&self.download_dir) {
            let reason = format!("could not create {:?}: {}", self.download_dir, err);
            return fail(reporter, Stage::Download, reason);
        }

        let archive = self.download_dir.join(&file);
        let bytes = match transfer::download(remote, &file, &archive) {
            Ok(bytes) => bytes,
            Err(err) => return fail(reporter, Stage::Download, err.to_string()),
        };
        reporter.report(Event::Downloaded {
            name: &file,
            path: &archive,
            bytes,
        });

        let entries = match unpack::extract(&archive, &self.extract_dir) {
            Ok(entries) => entries,
            Err(err) => return fail(reporter, Stage::Extract, err.to_string()),
        };
        reporter.report(Event::Extracted {
            target: &self.extract_dir,
            entries,
        });

        Outcome::Completed {
            file,
            archive,
            extracted_to: self.extract_dir.clone(),
            entries,
        }
    }
}

fn fail(reporter: &mut dyn Reporter, stage: Stage, reason: String) -> Outcome {
    reporter.report(Event::Failed {
        stage,
        reason: &reason,
    });
    Outcome::Failed { stage, reason }
}

use std::path::Path;

use crate::{error::PeriodError, pipeline::Stage, selector::Candidate};

/// Significant things that happen during a run.
#[derive(Debug)]
pub enum Event<'a> {
    Connected { location: &'a str },
    ListingFailed { reason: &'a str },
    Listed { entries: usize, candidates: usize },
    Excluded { name: &'a str, error: &'a PeriodError },
    Selected { candidate: &'a Candidate },
    NothingToDo,
    Cancelled { name: &'a str },
    Downloaded { name: &'a str, path: &'a Path, bytes: u64 },
    Extracted { target: &'a Path, entries: usize },
    Failed { stage: Stage, reason: &'a str },
}

/// Receives pipeline events. Passed into the pipeline rather than reached through globals.
pub trait Reporter {
    fn report(&mut self, event: Event<'_>);
}

/// Forwards every event to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, event: Event<'_>) {
        match event {
            Event::Connected { location } => log::info!("Connected to {}", location),
            Event::ListingFailed { reason } => log::error!("Listing failed: {}", reason),
            Event::Listed {
                entries,
                candidates,
            } => log::info!("Listed {} entries, {} candidates", entries, candidates),
            Event::Excluded { name, error } => {
                log::warn!("Skipping {}: could not parse date: {}", name, error)
            }
            Event::Selected { candidate } => log::info!(
                "Most recent file: {} ({})",
                candidate.name,
                candidate.period
            ),
            Event::NothingToDo => log::info!("No matching file found, nothing to do"),
            Event::Cancelled { name } => log::info!("Download of {} cancelled by user", name),
            Event::Downloaded { name, path, bytes } => {
                log::info!("Downloaded {} to {:?} ({} bytes)", name, path, bytes)
            }
            Event::Extracted { target, entries } => {
                log::info!("Extracted {} entries to {:?}", entries, target)
            }
            Event::Failed { stage, reason } => log::error!("{} failed: {}", stage, reason),
        }
    }
}

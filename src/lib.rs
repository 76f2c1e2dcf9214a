/**************************************************************************************************
 *                                           Public API
 *************************************************************************************************/
pub use crate::{
    config::Settings,
    confirm::{AutoConfirm, Confirm, ConsolePrompt},
    error::{
        ConfigError, ConnectionError, ExtractError, ListingError, PeriodError, TransferError,
    },
    ftp_remote::{FtpConnector, FtpRemote},
    period::Period,
    pipeline::{Outcome, Pipeline, Stage},
    remote::{Connector, RemoteArchive},
    report::{Event, LogReporter, Reporter},
    selector::{scan, select, Candidate, FilePattern, Selection},
    session::with_session,
    transfer::{download, TransferOutcome},
    unpack::{extract, ExtractionOutcome},
};

pub mod logging;
/**************************************************************************************************
 *                                      Private Implementation
 *************************************************************************************************/
mod config;
mod confirm;
mod error;
mod ftp_remote;
mod period;
mod pipeline;
mod remote;
mod report;
mod selector;
mod session;
mod transfer;
mod unpack;

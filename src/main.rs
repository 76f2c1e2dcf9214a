use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use cnes_fetch::{
    logging, AutoConfirm, Confirm, ConsolePrompt, FtpConnector, LogReporter, Pipeline, Settings,
};
use log::{error, info};

/// Download and extract the most recent CNES database archive from the DATASUS FTP server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Download and extract without asking for confirmation
    #[arg(long)]
    auto: bool,

    /// FTP server host
    #[arg(long)]
    host: Option<String>,

    /// FTP server port
    #[arg(long)]
    port: Option<u16>,

    /// Remote directory holding the archives
    #[arg(long)]
    remote_dir: Option<String>,

    /// Where the archive is saved
    #[arg(long)]
    download_dir: Option<PathBuf>,

    /// Where the archive is extracted
    #[arg(long)]
    extract_dir: Option<PathBuf>,

    /// Append-only log file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Network timeout in seconds, 0 disables it
    #[arg(long)]
    timeout: Option<u64>,
}

impl Args {
    fn apply(self, settings: &mut Settings) {
        settings.unattended = self.auto;
        if let Some(host) = self.host {
            settings.host = host;
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(dir) = self.remote_dir {
            settings.remote_dir = dir;
        }
        if let Some(dir) = self.download_dir {
            settings.download_dir = dir;
        }
        if let Some(dir) = self.extract_dir {
            settings.extract_dir = dir;
        }
        if let Some(file) = self.log_file {
            settings.log_file = file;
        }
        if let Some(secs) = self.timeout {
            settings.timeout = match secs {
                0 => None,
                n => Some(std::time::Duration::from_secs(n)),
            };
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _ = dotenvy::dotenv();

    let mut settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Configuration error: {}", err);
            return ExitCode::from(2);
        }
    };
    args.apply(&mut settings);

    if let Err(err) = logging::init(&settings.log_file) {
        eprintln!("Could not open log file {:?}: {}", settings.log_file, err);
        return ExitCode::from(2);
    }

    let connector = FtpConnector::new(&settings);
    let pipeline = Pipeline::from_settings(&settings);

    let mut confirm: Box<dyn Confirm> = if settings.unattended {
        Box::new(AutoConfirm)
    } else {
        Box::new(ConsolePrompt::stdio())
    };

    let outcome = pipeline.run(&connector, confirm.as_mut(), &mut LogReporter);

    if outcome.is_failure() {
        error!("Run failed: {:?}", outcome);
    } else {
        info!("Run finished: {:?}", outcome);
    }

    ExitCode::from(outcome.exit_code())
}

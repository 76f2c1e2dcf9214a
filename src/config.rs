use std::{env, path::PathBuf, time::Duration};

use crate::{error::ConfigError, selector::FilePattern};

pub const DEFAULT_HOST: &str = "ftp.datasus.gov.br";
pub const DEFAULT_REMOTE_DIR: &str = "cnes";
pub const FILE_PREFIX: &str = "BASE_DE_DADOS_CNES";
pub const FILE_EXTENSION: &str = "ZIP";

/// Everything a run needs to know. Paths are relative to the working directory unless
/// given as absolute paths.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub remote_dir: String,
    pub user: String,
    pub password: String,
    pub file_prefix: String,
    pub file_extension: String,
    pub download_dir: PathBuf,
    pub extract_dir: PathBuf,
    pub log_file: PathBuf,
    pub timeout: Option<Duration>,
    pub unattended: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: DEFAULT_HOST.into(),
            port: 21,
            remote_dir: DEFAULT_REMOTE_DIR.into(),
            user: "anonymous".into(),
            password: "anonymous@".into(),
            file_prefix: FILE_PREFIX.into(),
            file_extension: FILE_EXTENSION.into(),
            download_dir: PathBuf::from("Downloads"),
            extract_dir: PathBuf::from("CNES"),
            log_file: PathBuf::from("cnes_downloader.log"),
            timeout: Some(Duration::from_secs(60)),
            unattended: false,
        }
    }
}

impl Settings {
    /// Defaults overridden by any `CNES_*` variables present in the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(host) = lookup("CNES_FTP_HOST") {
            settings.host = host;
        }
        if let Some(port) = lookup("CNES_FTP_PORT") {
            settings.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "CNES_FTP_PORT",
                value: port,
            })?;
        }
        if let Some(dir) = lookup("CNES_FTP_DIR") {
            settings.remote_dir = dir;
        }
        if let Some(dir) = lookup("CNES_DOWNLOAD_DIR") {
            settings.download_dir = dir.into();
        }
        if let Some(dir) = lookup("CNES_EXTRACT_DIR") {
            settings.extract_dir = dir.into();
        }
        if let Some(file) = lookup("CNES_LOG_FILE") {
            settings.log_file = file.into();
        }
        if let Some(secs) = lookup("CNES_TIMEOUT_SECS") {
            settings.timeout = parse_timeout(&secs).ok_or(ConfigError::InvalidValue {
                key: "CNES_TIMEOUT_SECS",
                value: secs,
            })?;
        }

        Ok(settings)
    }

    pub fn file_pattern(&self) -> FilePattern {
        FilePattern::new(&self.file_prefix, &self.file_extension)
    }
}

/// `0` disables the timeout.
fn parse_timeout(secs: &str) -> Option<Option<Duration>> {
    match secs.trim().parse::<u64>().ok()? {
        0 => Some(None),
        n => Some(Some(Duration::from_secs(n))),
    }
}

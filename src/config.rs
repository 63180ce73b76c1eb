use core::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;

/// Environment variable that overrides the log level.
pub const LOG_ENV: &str = "FAT12_LOG";

#[derive(Debug)]
pub struct Config {
    pub image: PathBuf,
    /// Human file name to look up; `None` lists the root directory.
    pub target: Option<String>,
    pub log_level: LevelFilter,
}

#[derive(Debug)]
pub enum ConfigError {
    Usage(String),
    BadLogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Usage(program) => {
                write!(f, "Usage: {} <disk image> [file name]", program)
            }
            ConfigError::BadLogLevel(value) => write!(
                f,
                "{}={} is not one of off, error, warn, info, debug, trace",
                LOG_ENV, value
            ),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::parse(std::env::args(), std::env::var(LOG_ENV).ok())
    }

    pub fn parse<I>(args: I, log_env: Option<String>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let program = args.next().unwrap_or_else(|| "runner".to_string());

        let image = match args.next() {
            Some(path) => PathBuf::from(path),
            None => return Err(ConfigError::Usage(program)),
        };
        let target = args.next();
        if args.next().is_some() {
            return Err(ConfigError::Usage(program));
        }

        let log_level = match log_env {
            Some(value) => {
                LevelFilter::from_str(value.trim()).map_err(|_| ConfigError::BadLogLevel(value))?
            }
            None => default_level(),
        };

        Ok(Config {
            image,
            target,
            log_level,
        })
    }
}

/// Debug builds log at `Debug`, release builds at `Info`.
pub fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

//! Runtime settings read from the environment.
//!
//! | Variable              | Values                      | Default          |
//! |-----------------------|-----------------------------|------------------|
//! | `CRCSCREEN_LOG_MODE`  | `stderr`, `file`, `off`     | `stderr`         |
//! | `CRCSCREEN_LOG_FILE`  | path                        | `crcscreen.log`  |
//! | `CRCSCREEN_LANG`      | `en`, `es`                  | `en`             |
//! | `CRCSCREEN_TODAY`     | `YYYY-MM-DD`                | system date      |
//!
//! Command-line flags take precedence (see [`crate::cli`]).

use std::path::PathBuf;

use crate::adapters::FixedClock;
use crate::domain::Locale;
use crate::CrcScreenError;

const DEFAULT_LOG_FILE: &str = "crcscreen.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// Standard error, so stdout stays clean for the report
    #[default]
    Stderr,
    File,
    Off,
}

impl std::str::FromStr for LogMode {
    type Err = CrcScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stderr" | "auto" | "" => Ok(Self::Stderr),
            "file" => Ok(Self::File),
            "off" | "none" => Ok(Self::Off),
            other => Err(CrcScreenError::Config(format!(
                "CRCSCREEN_LOG_MODE '{other}' (expected stderr, file or off)"
            ))),
        }
    }
}

/// Settings resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    pub locale: Locale,
    /// Fixed evaluation date; `None` uses the system clock
    pub today: Option<FixedClock>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_mode: LogMode::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            locale: Locale::default(),
            today: None,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    /// Returns [`CrcScreenError::Config`] for unparseable values.
    pub fn from_env() -> Result<Self, CrcScreenError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup function.
    ///
    /// # Errors
    /// Returns [`CrcScreenError::Config`] for unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CrcScreenError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(mode) = lookup("CRCSCREEN_LOG_MODE") {
            settings.log_mode = mode.parse()?;
        }
        if let Some(path) = lookup("CRCSCREEN_LOG_FILE").filter(|p| !p.trim().is_empty()) {
            settings.log_file = PathBuf::from(path);
        }
        if let Some(lang) = lookup("CRCSCREEN_LANG") {
            settings.locale = lang.parse().map_err(CrcScreenError::Config)?;
        }
        if let Some(date) = lookup("CRCSCREEN_TODAY").filter(|d| !d.trim().is_empty()) {
            settings.today = Some(FixedClock::parse(&date).map_err(|e| {
                CrcScreenError::Config(format!("CRCSCREEN_TODAY '{date}': {e}"))
            })?);
        }

        Ok(settings)
    }
}

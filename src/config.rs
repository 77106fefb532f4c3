//! Runtime configuration from environment variables.
//!
//! | variable                   | default          |
//! |----------------------------|------------------|
//! | `HEARTSCOPE_DATASET_PATH`  | `heart.csv`      |
//! | `HEARTSCOPE_TEST_FRACTION` | `0.4`            |
//! | `HEARTSCOPE_SPLIT_SEED`    | `101`            |
//! | `HEARTSCOPE_LOG_MODE`      | `auto`           |
//! | `HEARTSCOPE_LOG_FILE`      | `heartscope.log` |

use std::path::PathBuf;

use crate::application::{TrainingOptions, DEFAULT_SPLIT_SEED, DEFAULT_TEST_FRACTION};

const DEFAULT_DATASET_PATH: &str = "heart.csv";
const DEFAULT_LOG_FILE: &str = "heartscope.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal (the TUI owns it), stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub test_fraction: f64,
    pub split_seed: u64,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            test_fraction: DEFAULT_TEST_FRACTION,
            split_seed: DEFAULT_SPLIT_SEED,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let test_fraction = match lookup("HEARTSCOPE_TEST_FRACTION") {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(v) if v > 0.0 && v < 1.0 => v,
                _ => {
                    tracing::warn!(
                        "Ignoring HEARTSCOPE_TEST_FRACTION={:?}; expected a number in (0, 1)",
                        raw
                    );
                    defaults.test_fraction
                }
            },
            None => defaults.test_fraction,
        };

        let split_seed = match lookup("HEARTSCOPE_SPLIT_SEED") {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!("Ignoring HEARTSCOPE_SPLIT_SEED={:?}; expected an integer", raw);
                defaults.split_seed
            }),
            None => defaults.split_seed,
        };

        Self {
            dataset_path: lookup("HEARTSCOPE_DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),
            test_fraction,
            split_seed,
            log_mode: lookup("HEARTSCOPE_LOG_MODE")
                .map(|v| LogMode::parse(&v))
                .unwrap_or(defaults.log_mode),
            log_file: lookup("HEARTSCOPE_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        }
    }

    /// Training options derived from these settings.
    #[must_use]
    pub fn training_options(&self) -> TrainingOptions {
        TrainingOptions {
            test_fraction: self.test_fraction,
            seed: self.split_seed,
            ..TrainingOptions::default()
        }
    }
}

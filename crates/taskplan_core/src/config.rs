//! Store location and write-policy configuration.
//!
//! # Responsibility
//! - Resolve where the store document lives and how it is written.
//!
//! # Invariants
//! - Resolution order: explicit value, then environment, then default.
//! - Resolution never touches the filesystem.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Well-known document file name used when nothing else is configured.
pub const DEFAULT_DOCUMENT_FILE_NAME: &str = "projects.json";
/// Environment variable overriding the document path.
pub const STORE_PATH_ENV: &str = "TASKPLAN_STORE";
/// Environment variable toggling atomic writes (`1|true|yes|on` / `0|false|no|off`).
pub const ATOMIC_WRITES_ENV: &str = "TASKPLAN_ATOMIC_WRITES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A configured path is empty after trim.
    EmptyPath { origin: &'static str },
    /// A boolean setting has an unrecognized value.
    InvalidFlag { name: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath { origin } => write!(f, "store path from {origin} must not be empty"),
            Self::InvalidFlag { name, value } => write!(
                f,
                "invalid value `{value}` for {name}; expected 1|true|yes|on|0|false|no|off"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Where and how the store document is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub document_path: PathBuf,
    /// Write to a sibling temp file and rename it over the document.
    pub atomic_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from(DEFAULT_DOCUMENT_FILE_NAME),
            atomic_writes: true,
        }
    }
}

impl StoreConfig {
    pub fn new(document_path: impl Into<PathBuf>) -> Self {
        Self {
            document_path: document_path.into(),
            ..Self::default()
        }
    }

    /// Resolves config from `explicit` and the process environment.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::resolve_with(explicit, |key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::resolve`] with an injectable variable lookup.
    pub fn resolve_with(
        explicit: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let document_path = match explicit {
            Some(path) if path.as_os_str().is_empty() => {
                return Err(ConfigError::EmptyPath { origin: "argument" });
            }
            Some(path) => path,
            None => match lookup(STORE_PATH_ENV) {
                Some(value) if value.trim().is_empty() => {
                    return Err(ConfigError::EmptyPath {
                        origin: STORE_PATH_ENV,
                    });
                }
                Some(value) => PathBuf::from(value),
                None => PathBuf::from(DEFAULT_DOCUMENT_FILE_NAME),
            },
        };

        let atomic_writes = match lookup(ATOMIC_WRITES_ENV) {
            Some(value) => parse_flag(&value).ok_or(ConfigError::InvalidFlag {
                name: ATOMIC_WRITES_ENV,
                value,
            })?,
            None => true,
        };

        Ok(Self {
            document_path,
            atomic_writes,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

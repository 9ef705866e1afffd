//! CLI configuration from environment variables

use std::env;

use tracing::debug;

use crate::error::CliError;

const DEFAULT_COLUMNS: usize = 80;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    /// PGN line width; `None` disables wrapping
    pub columns: Option<usize>,

    /// Plain text or a JSON record
    pub output: OutputFormat,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let columns = lookup("TCN_PGN_COLUMNS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_COLUMNS);

        let output = match lookup("TCN_OUTPUT").as_deref().map(str::trim) {
            None | Some("") | Some("text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some(other) => {
                return Err(CliError::Config(format!(
                    "TCN_OUTPUT must be 'text' or 'json', got '{other}'"
                )))
            }
        };

        let config = Self {
            columns: wrap_width(columns),
            output,
        };
        debug!(?config, "Config loaded");
        Ok(config)
    }
}

/// 0 means "never wrap".
pub fn wrap_width(columns: usize) -> Option<usize> {
    (columns > 0).then_some(columns)
}

//! Output formatters
//!
//! Every formatter is a pure function from lint outputs to a string.

pub mod human;
pub mod json;
pub mod rdjsonl;

use crate::error::LintResult;
use crate::lint::LintOutput;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    /// One review-tool diagnostic per line
    Rdjsonl,
}

impl OutputFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Json => "json",
            Self::Rdjsonl => "rdjsonl",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "rdjsonl" => Ok(Self::Rdjsonl),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}

/// Render lint outputs in the requested format
///
/// # Errors
/// Returns an error if JSON serialization fails
pub fn render(outputs: &[LintOutput], format: OutputFormat) -> LintResult<String> {
    match format {
        OutputFormat::Human => Ok(human::format(outputs)),
        OutputFormat::Json => json::format(outputs),
        OutputFormat::Rdjsonl => rdjsonl::format(outputs),
    }
}

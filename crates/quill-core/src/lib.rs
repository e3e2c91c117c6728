//! Quill Core - lint engines and instruction quality scoring
//!
//! This crate turns what the scanner discovers into diagnostics: the
//! skill, agent and instruction lint engines, the instruction quality
//! scorer, the rule severity filter and the output formatters. It never
//! touches the filesystem directly; everything goes through a
//! [`quill_scanner::Workspace`].

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::format_push_string
)]

pub mod config;
pub mod error;
pub mod lint;
pub mod output;
pub mod quality;
pub mod rules;
pub mod util;

pub use quill_scanner;

pub use config::{LintRulesConfig, RuleSeverity};
pub use error::{LintError, LintResult};
pub use lint::{LintDiagnostic, LintOutput, LintTarget, Severity};
pub use quality::{InstructionQualityResult, QualityAnalyzer};

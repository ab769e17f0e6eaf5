//! Error types for the nsprep CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::template::TemplateError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for nsprep operations.
///
/// Each variant maps to a specific process exit code. An unresolvable branch
/// is not an error at all: it falls back to the default binding.
#[derive(Error, Debug)]
pub enum PrepError {
    /// User provided invalid arguments or the environment is unusable.
    #[error("{0}")]
    UserError(String),

    /// Config file could not be read, parsed, or validated.
    #[error("{0}")]
    ConfigError(String),

    /// A placeholder references a field the active binding does not define.
    #[error(
        "template '{template}' line {line}: field '{field}' is not defined by the active binding"
    )]
    MissingField {
        field: String,
        line: usize,
        template: PathBuf,
    },

    /// A placeholder is syntactically malformed.
    #[error("template '{template}' line {line}: {source}")]
    TemplateError {
        line: usize,
        template: PathBuf,
        #[source]
        source: TemplateError,
    },

    /// The template file could not be opened or read.
    #[error("cannot read template '{path}': {source}")]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be written.
    #[error("cannot write output '{path}': {reason}")]
    OutputUnwritable { path: PathBuf, reason: String },

    /// Git operation failed. Only raised by `git::run_git`; branch and
    /// repository lookups recover from it, so it exits as a user error if
    /// it ever surfaces.
    #[error("Git operation failed: {0}")]
    GitError(String),
}

impl PrepError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PrepError::UserError(_) | PrepError::ConfigError(_) | PrepError::GitError(_) => {
                exit_codes::USER_ERROR
            }
            PrepError::MissingField { .. } | PrepError::TemplateError { .. } => {
                exit_codes::RENDER_FAILURE
            }
            PrepError::TemplateNotFound { .. } | PrepError::OutputUnwritable { .. } => {
                exit_codes::IO_FAILURE
            }
        }
    }
}

/// Result type alias for nsprep operations.
pub type Result<T> = std::result::Result<T, PrepError>;

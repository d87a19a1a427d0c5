//! Error handling for the mutrate CLI

use std::path::PathBuf;
use thiserror::Error;

use mutrate_core::{AlignmentError, AnalysisError, FastaError};

/// Main error type for mutrate CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read FASTA: {message}")]
    Input { message: String },

    #[error("Reference sequence not found: {id}")]
    ReferenceNotFound { id: String },

    #[error("FASTA appears not aligned: {message}")]
    NotAligned { message: String },

    #[error("Failed to write output {path:?}: {message}")]
    Output { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Analysis error: {message}")]
    Analysis { message: String },
}

impl CliError {
    pub fn input<S: Into<String>>(message: S) -> Self {
        Self::Input { message: message.into() }
    }

    pub fn reference_not_found<S: Into<String>>(id: S) -> Self {
        Self::ReferenceNotFound { id: id.into() }
    }

    pub fn not_aligned<S: Into<String>>(message: S) -> Self {
        Self::NotAligned { message: message.into() }
    }

    pub fn output<S: Into<String>>(path: PathBuf, message: S) -> Self {
        Self::Output {
            path,
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Input { .. } => 1,
            Self::ReferenceNotFound { .. } => 2,
            Self::NotAligned { .. } => 3,
            Self::Output { .. } => 4,
            Self::Config { .. } => 5,
            // Only reachable if the alignment gate is bypassed.
            Self::Analysis { .. } => 3,
        }
    }
}

impl From<FastaError> for CliError {
    fn from(err: FastaError) -> Self {
        Self::input(err.to_string())
    }
}

impl From<AnalysisError> for CliError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::ReferenceNotFound(id) => Self::reference_not_found(id),
            AnalysisError::Alignment(AlignmentError::Mismatch { lengths }) => Self::not_aligned(format!(
                "sequences have different lengths ({})",
                lengths.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(", ")
            )),
            AnalysisError::Alignment(e) => Self::not_aligned(e.to_string()),
            e @ AnalysisError::Mutation { .. } => Self::Analysis { message: e.to_string() },
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::config(format!("{:#}", err))
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::Input { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check that the --input path is correct and readable\n\
                 • Compressed alignments must use the .gz extension\n\
                 • Ensure the file is UTF-8 text",
            );
        }

        CliError::ReferenceNotFound { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Pass the header text after '>' exactly, with surrounding whitespace removed\n\
                 • Identifiers are case-sensitive",
            );
        }

        CliError::NotAligned { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Run the sequences through an aligner first\n\
                 • Check for truncated or duplicated records",
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your mutrate.toml configuration file\n\
                 • Verify that all configuration values are valid",
            );
        }

        _ => {}
    }

    message
}

//! Error types for the KScript transpiler

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TranspileError>;

#[derive(Error, Debug)]
pub enum TranspileError {
    /// Quote-aware splitting hit an inconsistent state (e.g. an unterminated string)
    #[error("Split error on line {line}: {message}")]
    Split { line: usize, message: String },

    /// The expression reducer could not classify a value
    #[error("Value processing error on line {line}: {message}")]
    ValueProcessing { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Transpilation produced {} error(s):\n{}", .0.len(), .0.iter().map(|d| format!("  - {}", d)).collect::<Vec<_>>().join("\n"))]
    Diagnostics(Vec<Diagnostic>),
}

impl TranspileError {
    pub fn split(line: usize, message: impl Into<String>) -> Self {
        TranspileError::Split {
            line,
            message: message.into(),
        }
    }

    pub fn value(line: usize, message: impl Into<String>) -> Self {
        TranspileError::ValueProcessing {
            line,
            message: message.into(),
        }
    }

    /// Convert a statement-level error into a diagnostic record.
    ///
    /// Returns `None` for errors that cannot originate from a single statement.
    pub fn to_diagnostic(&self, statement: &str) -> Option<Diagnostic> {
        let (kind, line, message) = match self {
            TranspileError::Split { line, message } => (DiagnosticKind::Split, *line, message),
            TranspileError::ValueProcessing { line, message } => {
                (DiagnosticKind::ValueProcessing, *line, message)
            }
            _ => return None,
        };
        Some(Diagnostic {
            kind,
            line,
            message: message.clone(),
            statement: statement.to_string(),
        })
    }
}

/// Which stage of statement processing failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Split,
    ValueProcessing,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Split => "SplitError",
            DiagnosticKind::ValueProcessing => "ValueProcessingError",
        }
    }
}

/// A statement that failed to transpile and was replaced by a comment line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based source line
    pub line: usize,
    pub message: String,
    /// Original statement text, as written
    pub statement: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on line {}: {} (in `{}`)",
            self.kind.as_str(),
            self.line,
            self.message,
            self.statement
        )
    }
}

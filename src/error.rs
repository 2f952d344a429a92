//! Unified error handling
//!
//! The scanner itself never fails: illegal characters come back as tokens.
//! Callers that treat them as errors turn them into [`ScanError`]s here and
//! render them through codespan-reporting.

use crate::ast::Span;
use crate::lexer::{TokenKind, TokenWithPosition};
use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};
use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug, Clone)]
pub enum MonkeyError {
    /// Lexical error
    #[error("lexical error: {0}")]
    Scan(#[from] ScanError),

    /// File I/O error
    #[error("file error: {0}")]
    Io(String),

    /// Source bytes that are not valid UTF-8; they still scan, but render as `?`
    #[error("source is not valid UTF-8: {invalid_bytes} byte(s) shown as '?'")]
    Encoding { invalid_bytes: usize },

    #[error("{0}")]
    Other(String),
}

/// Lexical error details
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("illegal character '{literal}'")]
    IllegalCharacter { literal: String, span: Span },
}

impl ScanError {
    /// Lift an `Illegal` token into an error; any other kind yields `None`
    pub fn from_token(token: &TokenWithPosition) -> Option<Self> {
        (token.token.kind == TokenKind::Illegal).then(|| ScanError::IllegalCharacter {
            literal: token.token.literal.clone(),
            span: token.span,
        })
    }

    pub fn span(&self) -> Span {
        match self {
            ScanError::IllegalCharacter { span, .. } => *span,
        }
    }
}

/// Error bound to the file it was found in
#[derive(Debug, Clone)]
pub struct DiagnosticError {
    pub error: MonkeyError,
    pub file_id: usize,
}

impl DiagnosticError {
    pub fn new(error: MonkeyError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    /// Convert into a codespan-reporting diagnostic of the given severity
    pub fn to_diagnostic(&self, severity: Severity) -> Diagnostic<usize> {
        let (message, labels) = match &self.error {
            MonkeyError::Scan(ScanError::IllegalCharacter { literal, span }) => (
                format!("illegal character '{}'", literal.escape_default()),
                vec![Label::primary(self.file_id, span.start..span.end)
                    .with_message("this character is not part of the language")],
            ),
            MonkeyError::Io(message) => (format!("file error: {}", message), vec![]),
            MonkeyError::Encoding { .. } => (self.error.to_string(), vec![]),
            MonkeyError::Other(message) => (message.clone(), vec![]),
        };

        Diagnostic::new(severity)
            .with_message(message)
            .with_labels(labels)
    }
}

/// Accumulates errors across a scan so they can be reported together
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<DiagnosticError>,
    warnings: Vec<DiagnosticError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: MonkeyError, file_id: usize) {
        self.errors.push(DiagnosticError::new(error, file_id));
    }

    pub fn add_warning(&mut self, error: MonkeyError, file_id: usize) {
        self.warnings.push(DiagnosticError::new(error, file_id));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[DiagnosticError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[DiagnosticError] {
        &self.warnings
    }

    pub fn clear(&mut self) {
        self.errors.clear();
        self.warnings.clear();
    }
}

/// Result alias
pub type MonkeyResult<T> = Result<T, MonkeyError>;

impl From<std::io::Error> for MonkeyError {
    fn from(e: std::io::Error) -> Self {
        MonkeyError::Io(e.to_string())
    }
}

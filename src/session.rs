//! Scan session
//!
//! Holds one source file together with the bookkeeping needed to report
//! lexical errors against it.

use crate::error::{DiagnosticError, ErrorCollector, MonkeyError, MonkeyResult, ScanError};
use crate::lexer::{ScanOptions, Scanner, TokenWithPosition};
use codespan_reporting::diagnostic::Severity;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};
use std::fs;
use std::path::Path;

/// State for scanning a single source
pub struct ScanSession {
    pub source_name: String,
    /// Raw bytes as read; the scanner runs over these
    pub source: Vec<u8>,
    pub files: SimpleFiles<String, String>,
    pub file_id: usize,
    pub options: ScanOptions,
    pub error_collector: ErrorCollector,
}

impl ScanSession {
    /// Read a source file from disk
    pub fn new<P: AsRef<Path>>(source_file: P, options: ScanOptions) -> MonkeyResult<Self> {
        let source_name = source_file.as_ref().display().to_string();
        let source = fs::read(source_file.as_ref())?;

        Ok(Self::from_source(&source_name, source, options))
    }

    /// Build a session around in-memory text (stdin, REPL lines, tests)
    pub fn from_source(name: &str, source: impl Into<Vec<u8>>, options: ScanOptions) -> Self {
        let source = source.into();
        let (text, invalid_bytes) = display_text(&source);

        let mut files = SimpleFiles::new();
        let file_id = files.add(name.to_string(), text);

        let mut error_collector = ErrorCollector::new();
        if invalid_bytes > 0 {
            error_collector.add_warning(MonkeyError::Encoding { invalid_bytes }, file_id);
        }

        Self {
            source_name: name.to_string(),
            source,
            files,
            file_id,
            options,
            error_collector,
        }
    }

    /// Scan the whole source, recording one error per illegal token
    pub fn scan(&mut self) -> Vec<TokenWithPosition> {
        log::debug!("scanning {} ({} bytes)", self.source_name, self.source.len());

        let tokens = Scanner::with_options(&self.source, self.options).collect_tokens();
        for token in &tokens {
            if let Some(error) = ScanError::from_token(token) {
                self.add_error(error.into());
            }
        }

        log::debug!(
            "scanned {} tokens, {} illegal",
            tokens.len(),
            self.error_collector.error_count()
        );
        tokens
    }

    pub fn add_error(&mut self, error: MonkeyError) {
        self.error_collector.add_error(error, self.file_id);
    }

    /// Render collected diagnostics to stderr
    pub fn report_diagnostics(&self) -> MonkeyResult<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let mut lock = writer.lock();
        self.emit_diagnostics(&mut lock)
    }

    /// Render collected diagnostics to an arbitrary writer
    pub fn emit_diagnostics(&self, writer: &mut dyn WriteColor) -> MonkeyResult<()> {
        let config = codespan_reporting::term::Config::default();
        let errors = self.errors().iter().map(|e| e.to_diagnostic(Severity::Error));
        let warnings = self.warnings().iter().map(|w| w.to_diagnostic(Severity::Warning));

        for diagnostic in errors.chain(warnings) {
            codespan_reporting::term::emit(writer, &config, &self.files, &diagnostic)
                .map_err(|e| MonkeyError::Io(format!("failed to emit diagnostic: {}", e)))?;
        }

        Ok(())
    }

    pub fn has_errors(&self) -> bool {
        self.error_collector.has_errors()
    }

    pub fn error_count(&self) -> usize {
        self.error_collector.error_count()
    }

    pub fn errors(&self) -> &[DiagnosticError] {
        self.error_collector.errors()
    }

    pub fn warnings(&self) -> &[DiagnosticError] {
        self.error_collector.warnings()
    }
}

/// Text for rendering diagnostics. Bytes of invalid UTF-8 sequences become
/// `?` one for one, so token spans index the text unchanged.
fn display_text(source: &[u8]) -> (String, usize) {
    let mut text = String::with_capacity(source.len());
    let mut invalid_bytes = 0;
    let mut rest = source;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                text.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                text.push_str(std::str::from_utf8(valid).unwrap_or_default());
                let bad = e.error_len().unwrap_or(after.len());
                text.extend(std::iter::repeat('?').take(bad));
                invalid_bytes += bad;
                rest = &after[bad..];
            }
        }
    }

    (text, invalid_bytes)
}

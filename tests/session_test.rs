//! Scan session tests
//!
//! File loading, error collection for illegal characters and diagnostic
//! rendering.

#[cfg(test)]
mod tests {
    use codespan_reporting::term::termcolor::NoColor;
    use monkeyscan::error::{MonkeyError, ScanError};
    use monkeyscan::lexer::{Grammar, ScanOptions, TokenKind};
    use monkeyscan::{ScanSession, Span};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_clean_source_has_no_errors() {
        let mut session =
            ScanSession::from_source("clean.mk", "let x = 5;".to_string(), ScanOptions::new());
        let tokens = session.scan();

        assert_eq!(tokens.len(), 6);
        assert!(!session.has_errors());
    }

    #[test]
    fn test_illegal_characters_are_collected() {
        let mut session =
            ScanSession::from_source("bad.mk", "let x = @;\n$".to_string(), ScanOptions::new());
        let tokens = session.scan();

        assert_eq!(tokens.last().map(|t| t.token.kind), Some(TokenKind::Eof));
        assert_eq!(session.error_count(), 2);

        let spans: Vec<Span> = session
            .errors()
            .iter()
            .map(|e| match &e.error {
                MonkeyError::Scan(err) => err.span(),
                other => panic!("unexpected error {other:?}"),
            })
            .collect();
        assert_eq!(spans, vec![Span::new(8, 9), Span::new(11, 12)]);
    }

    #[test]
    fn test_diagnostics_render_source_location() {
        let mut session =
            ScanSession::from_source("bad.mk", "let a = 1;\nlet b = #;".to_string(), ScanOptions::new());
        session.scan();

        let mut out = NoColor::new(Vec::new());
        session.emit_diagnostics(&mut out).expect("emit should succeed");
        let rendered = String::from_utf8(out.into_inner()).expect("utf8");

        assert!(rendered.contains("illegal character '#'"));
        assert!(rendered.contains("bad.mk:2:9"));
    }

    #[test]
    fn test_session_reads_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "return five;").expect("write");

        let options = ScanOptions::new().grammar(Grammar::Core);
        let mut session = ScanSession::new(file.path(), options).expect("load");
        let tokens = session.scan();

        // `return` is not reserved in the core grammar
        assert_eq!(tokens[0].token.kind, TokenKind::Ident);
        assert!(!session.has_errors());
    }

    #[test]
    fn test_report_diagnostics_to_stderr() {
        let mut session =
            ScanSession::from_source("bad.mk", "x = !;\n~".to_string(), ScanOptions::new());
        session.scan();

        assert_eq!(session.error_count(), 1);
        assert!(session.report_diagnostics().is_ok());
    }

    #[test]
    fn test_latin1_file_scans_with_illegal_byte() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(b"let x = \xE9;").expect("write");

        let mut session = ScanSession::new(file.path(), ScanOptions::new()).expect("load");
        let tokens = session.scan();

        let kinds: Vec<_> = tokens.iter().map(|t| t.token.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Let,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Illegal,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        assert_eq!(session.error_count(), 1);
        assert_eq!(session.warnings().len(), 1);

        let mut out = NoColor::new(Vec::new());
        session.emit_diagnostics(&mut out).expect("emit should succeed");
        let rendered = String::from_utf8(out.into_inner()).expect("utf8");

        assert!(rendered.contains("error: illegal character '\\u{e9}'"));
        assert!(rendered.contains(":1:9"));
        assert!(rendered.contains("let x = ?;"));
        assert!(rendered.contains("warning: source is not valid UTF-8: 1 byte(s) shown as '?'"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = ScanSession::new(dir.path().join("missing.mk"), ScanOptions::new());

        assert!(matches!(result, Err(MonkeyError::Io(_))));
    }

    #[test]
    fn test_scan_error_from_token_only_for_illegal() {
        let mut session =
            ScanSession::from_source("x.mk", "a?".to_string(), ScanOptions::new());
        let tokens = session.scan();

        let errors: Vec<_> = tokens.iter().filter_map(ScanError::from_token).collect();
        assert_eq!(
            errors,
            vec![ScanError::IllegalCharacter {
                literal: "?".to_string(),
                span: Span::new(1, 2),
            }]
        );
    }
}

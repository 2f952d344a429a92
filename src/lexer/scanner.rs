//! Hand-written scanner: one byte of lookahead, one token per call

use std::iter::FusedIterator;

use crate::ast::Span;

use super::token::{lookup_ident, Grammar, Token, TokenKind};

/// Token together with the byte range it was scanned from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenWithPosition {
    pub token: Token,
    pub span: Span,
}

/// Scanner configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanOptions {
    /// Reserved-word set to resolve identifiers against
    pub grammar: Grammar,
    /// Accept digits after the first letter of an identifier
    pub alphanumeric_identifiers: bool,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = grammar;
        self
    }

    pub fn alphanumeric_identifiers(mut self, enabled: bool) -> Self {
        self.alphanumeric_identifiers = enabled;
        self
    }
}

/// Scanner for Monkey source text
///
/// Each call to [`Scanner::next_token`] produces exactly one token. Once the
/// input is exhausted every further call returns an EOF token. Bytes outside
/// the vocabulary come back as `Illegal` tokens; scanning itself never fails.
/// Input is raw bytes, so text that is not valid UTF-8 scans too.
pub struct Scanner<'a> {
    input: &'a [u8],
    /// Offset of `ch`
    position: usize,
    /// Offset of the byte after `ch`
    read_position: usize,
    /// Byte under examination, 0 once past the end
    ch: u8,
    options: ScanOptions,
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new<S: AsRef<[u8]> + ?Sized>(input: &'a S) -> Self {
        Self::with_options(input, ScanOptions::default())
    }

    pub fn with_options<S: AsRef<[u8]> + ?Sized>(input: &'a S, options: ScanOptions) -> Self {
        let mut scanner = Self {
            input: input.as_ref(),
            position: 0,
            read_position: 0,
            ch: 0,
            options,
            finished: false,
        };
        scanner.read_char();
        scanner
    }

    /// Produce the next token, dropping its span
    pub fn next_token(&mut self) -> Token {
        self.next_spanned().token
    }

    /// Produce the next token with the byte range it covers
    pub fn next_spanned(&mut self) -> TokenWithPosition {
        self.skip_whitespace();

        let start = self.position;
        if self.is_at_end() {
            return TokenWithPosition {
                token: Token::eof(),
                span: Span::new(start, start),
            };
        }

        let token = match self.ch {
            b'=' => self.make_two_char_token(b'=', TokenKind::Eq, TokenKind::Assign),
            b'!' => self.make_two_char_token(b'=', TokenKind::NotEq, TokenKind::Bang),
            b'<' => self.make_two_char_token(b'=', TokenKind::Le, TokenKind::Lt),
            b'>' => self.make_two_char_token(b'=', TokenKind::Ge, TokenKind::Gt),
            b';' => Token::from_byte(TokenKind::Semicolon, self.ch),
            b',' => Token::from_byte(TokenKind::Comma, self.ch),
            b'(' => Token::from_byte(TokenKind::LParen, self.ch),
            b')' => Token::from_byte(TokenKind::RParen, self.ch),
            b'{' => Token::from_byte(TokenKind::LBrace, self.ch),
            b'}' => Token::from_byte(TokenKind::RBrace, self.ch),
            b'+' => Token::from_byte(TokenKind::Plus, self.ch),
            b'-' => Token::from_byte(TokenKind::Minus, self.ch),
            b'*' => Token::from_byte(TokenKind::Asterisk, self.ch),
            b'/' => Token::from_byte(TokenKind::Slash, self.ch),
            ch if is_letter(ch) => {
                // Identifier and number runs leave the cursor on the byte after the run
                let literal = self.read_identifier();
                let kind = lookup_ident(self.options.grammar, literal);
                return self.finish(Token::new(kind, literal), start);
            }
            ch if is_digit(ch) => {
                let literal = self.read_number();
                return self.finish(Token::new(TokenKind::Int, literal), start);
            }
            ch => {
                log::trace!("illegal byte {:#04x} at offset {}", ch, start);
                Token::from_byte(TokenKind::Illegal, ch)
            }
        };

        self.read_char();
        self.finish(token, start)
    }

    /// Collect every token up to and including EOF
    pub fn collect_tokens(self) -> Vec<TokenWithPosition> {
        self.collect()
    }

    fn finish(&self, token: Token, start: usize) -> TokenWithPosition {
        TokenWithPosition {
            token,
            span: Span::new(start, self.position),
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn read_char(&mut self) {
        self.ch = self.byte_at(self.read_position);
        self.position = self.read_position.min(self.input.len());
        self.read_position = self.position + 1;
    }

    fn peek_char(&self) -> u8 {
        self.byte_at(self.read_position)
    }

    fn byte_at(&self, offset: usize) -> u8 {
        self.input.get(offset).copied().unwrap_or(0)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    fn make_two_char_token(&mut self, expected: u8, two: TokenKind, one: TokenKind) -> Token {
        let first = self.ch;
        if self.peek_char() == expected {
            self.read_char();
            let mut literal = String::with_capacity(2);
            literal.push(char::from(first));
            literal.push(char::from(self.ch));
            Token::new(two, literal)
        } else {
            Token::from_byte(one, first)
        }
    }

    fn read_identifier(&mut self) -> &'a str {
        let input = self.input;
        let start = self.position;
        let alphanumeric = self.options.alphanumeric_identifiers;
        while is_letter(self.ch) || (alphanumeric && is_digit(self.ch)) {
            self.read_char();
        }
        ascii_run(&input[start..self.position])
    }

    fn read_number(&mut self) -> &'a str {
        let input = self.input;
        let start = self.position;
        while is_digit(self.ch) {
            self.read_char();
        }
        ascii_run(&input[start..self.position])
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = TokenWithPosition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_spanned();
        self.finished = token.token.is_eof();
        Some(token)
    }
}

impl FusedIterator for Scanner<'_> {}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

/// Identifier and number runs only ever contain ASCII bytes
fn ascii_run(run: &[u8]) -> &str {
    std::str::from_utf8(run).unwrap_or_default()
}

/// Tokenize a whole source with default options
pub fn tokenize<S: AsRef<[u8]> + ?Sized>(input: &S) -> Vec<TokenWithPosition> {
    Scanner::new(input).collect_tokens()
}

/// Debug rendering of a token stream, one token per line
pub fn format_tokens(tokens: &[TokenWithPosition]) -> String {
    tokens
        .iter()
        .map(|t| format!("{} @ {}..{}", t.token, t.span.start, t.span.end))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.token.kind).collect()
    }

    #[test]
    fn test_let_statement() {
        let tokens: Vec<Token> = tokenize("let five = 5;").into_iter().map(|t| t.token).collect();

        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Let, "let"),
                Token::new(TokenKind::Ident, "five"),
                Token::new(TokenKind::Assign, "="),
                Token::new(TokenKind::Int, "5"),
                Token::new(TokenKind::Semicolon, ";"),
                Token::eof(),
            ]
        );
    }

    #[test]
    fn test_two_char_operators_back_to_back() {
        assert_eq!(kinds("!=<="), vec![TokenKind::NotEq, TokenKind::Le, TokenKind::Eof]);
        assert_eq!(
            kinds("== = ! < >"),
            vec![
                TokenKind::Eq,
                TokenKind::Assign,
                TokenKind::Bang,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_trailing_operator_does_not_read_past_end() {
        let mut scanner = Scanner::new("=");
        assert_eq!(scanner.next_token(), Token::new(TokenKind::Assign, "="));
        assert!(scanner.next_token().is_eof());
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut scanner = Scanner::new("x");
        assert_eq!(scanner.next_token().kind, TokenKind::Ident);
        for _ in 0..3 {
            assert_eq!(scanner.next_token(), Token::eof());
        }
    }

    #[test]
    fn test_cursor_invariant() {
        let mut scanner = Scanner::new("a >= 1");
        loop {
            assert_eq!(scanner.read_position, scanner.position + 1);
            if scanner.next_token().is_eof() {
                break;
            }
        }
        assert_eq!(scanner.read_position, scanner.position + 1);
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("let x >= 10");
        let spans: Vec<_> = tokens.iter().map(|t| (t.span.start, t.span.end)).collect();
        assert_eq!(spans, vec![(0, 3), (4, 5), (6, 8), (9, 11), (11, 11)]);
    }

    #[test]
    fn test_embedded_nul_is_illegal() {
        let tokens = tokenize("a\0b");
        assert_eq!(tokens[1].token, Token::new(TokenKind::Illegal, "\0"));
        assert_eq!(tokens[2].token, Token::new(TokenKind::Ident, "b"));
        assert!(tokens[3].token.is_eof());
    }

    #[test]
    fn test_iterator_yields_eof_once() {
        let mut scanner = Scanner::new("1");
        assert!(scanner.next().is_some());
        assert!(scanner.next().is_some_and(|t| t.token.is_eof()));
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_invalid_utf8_bytes_are_illegal() {
        let tokens = tokenize(b"let x = \xE9\xFF;".as_slice());
        let kinds: Vec<_> = tokens.iter().map(|t| t.token.kind).collect();

        assert_eq!(
            kinds,
            vec![
                TokenKind::Let,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Illegal,
                TokenKind::Illegal,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[3].token.literal, "\u{e9}");
        assert_eq!(tokens[3].span, Span::new(8, 9));
        assert_eq!(tokens[4].token.literal, "\u{ff}");
    }

    #[test]
    fn test_format_tokens() {
        assert_eq!(
            format_tokens(&tokenize("+")),
            "+(\"+\") @ 0..1\nEOF(\"\") @ 1..1"
        );
    }
}

//! Token vocabulary and keyword tables

use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of token kinds the scanner can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Special
    Illegal,
    Eof,

    // Identifiers and literals
    Ident,
    Int,

    // Operators
    Assign,
    Eq,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Bang,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,

    // Delimiters
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl TokenKind {
    /// Stable name used by `Display` and token dumps
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Assign => "=",
            TokenKind::Eq => "==",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Bang => "!",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Function
                | TokenKind::Let
                | TokenKind::True
                | TokenKind::False
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Return
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token: its kind plus the exact source text that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }

    /// Single-byte token; non-ASCII bytes map to their Latin-1 code point
    pub(crate) fn from_byte(kind: TokenKind, byte: u8) -> Self {
        Self {
            kind,
            literal: char::from(byte).to_string(),
        }
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "")
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.literal)
    }
}

static CORE_KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "fn" => TokenKind::Function,
    "let" => TokenKind::Let,
};

static EXTENDED_KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "fn" => TokenKind::Function,
    "let" => TokenKind::Let,
    "true" => TokenKind::True,
    "false" => TokenKind::False,
    "if" => TokenKind::If,
    "else" => TokenKind::Else,
    "return" => TokenKind::Return,
};

/// Grammar version, which decides the reserved-word set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Grammar {
    /// `fn` and `let` only
    Core,
    /// Core plus `true`, `false`, `if`, `else` and `return`
    #[default]
    Extended,
}

impl Grammar {
    fn keywords(self) -> &'static phf::Map<&'static str, TokenKind> {
        match self {
            Grammar::Core => &CORE_KEYWORDS,
            Grammar::Extended => &EXTENDED_KEYWORDS,
        }
    }

    /// Reserved spellings of this grammar
    pub fn reserved_words(self) -> impl Iterator<Item = &'static str> {
        self.keywords().keys().copied()
    }
}

/// Resolve an identifier run to its reserved kind, or `Ident` when it is not reserved
pub fn lookup_ident(grammar: Grammar, ident: &str) -> TokenKind {
    grammar
        .keywords()
        .get(ident)
        .copied()
        .unwrap_or(TokenKind::Ident)
}

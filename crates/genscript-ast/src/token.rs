// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token definitions for the lexer.

use crate::Span;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// The source text this token was lexed from.
    pub fn text(&self) -> &str {
        match &self.kind {
            TokenKind::Hash => "#",
            TokenKind::At => "@",
            TokenKind::Equal => "=",
            TokenKind::Identifier(s)
            | TokenKind::Symbol(s)
            | TokenKind::Number(s)
            | TokenKind::String(s) => s,
            TokenKind::Eof => "",
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Sigils
    Hash,
    At,
    Equal,

    /// Lowercase-leading name (macro, command, or plain identifier argument).
    Identifier(String),
    /// Uppercase-leading constant name.
    Symbol(String),
    /// Decimal or `0x` hexadecimal digits, kept as written.
    Number(String),
    /// Quoted text, quotes included.
    String(String),

    Eof,
}

impl TokenKind {
    /// Returns the name used for this token kind in messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Hash => "hash",
            TokenKind::At => "at",
            TokenKind::Equal => "equal",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::Symbol(_) => "symbol",
            TokenKind::Number(_) => "number",
            TokenKind::String(_) => "string",
            TokenKind::Eof => "end of input",
        }
    }
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The lexer implementation using logos.

use genscript_ast::token::{Token, TokenKind};
use genscript_ast::Span;
use logos::Logos;
use tracing::{debug, trace};

/// Raw token type for logos - text is copied into `TokenKind` afterwards.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    // === Sigils ===
    #[token("#")]
    Hash,
    #[token("@")]
    At,
    #[token("=")]
    Equal,

    // === Names ===
    #[regex(r"[a-z][A-Za-z0-9_]*")]
    Identifier,
    #[regex(r"[A-Z][A-Za-z0-9_]*")]
    Symbol,

    // === Literals ===
    // Only the second character selects hex, so `1x10` is a hex number too.
    #[regex(r"[0-9]x[0-9a-fA-F]*")]
    HexNumber,
    #[regex(r"[0-9]+")]
    DecNumber,

    // Unterminated strings run to the end of input.
    #[regex(r#""[^"]*"?"#)]
    #[regex(r"'[^']*'?")]
    String,
}

/// The lexer for genscript source text.
pub struct Lexer<'a> {
    source: &'a str,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self { source, errors: Vec::new() }
    }

    /// Tokenize the entire source. Never stops early: every unexpected
    /// character is reported and skipped.
    pub fn tokenize(&mut self) -> LexResult {
        let mut tokens = Vec::new();
        let mut logos_lexer = RawToken::lexer(self.source);

        while let Some(result) = logos_lexer.next() {
            let span = logos_lexer.span();
            let slice = logos_lexer.slice();

            let kind = match result {
                Ok(raw) => convert_token(raw, slice),
                Err(()) => {
                    let stray = slice
                        .char_indices()
                        .filter(|(_, ch)| !matches!(ch, ' ' | '\t' | '\r' | '\n'));
                    for (i, ch) in stray {
                        trace!(offset = span.start + i, ?ch, "unexpected character");
                        self.errors.push(LexError::unexpected_char(ch, span.start + i));
                    }
                    continue;
                }
            };

            tokens.push(Token {
                kind,
                span: Span::new(span.start, span.end),
            });
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::empty(self.source.len()),
        });

        debug!(tokens = tokens.len(), errors = self.errors.len(), "tokenized");

        LexResult {
            tokens,
            errors: std::mem::take(&mut self.errors),
        }
    }
}

/// Convert a raw logos token to our TokenKind.
fn convert_token(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        RawToken::Hash => TokenKind::Hash,
        RawToken::At => TokenKind::At,
        RawToken::Equal => TokenKind::Equal,
        RawToken::Identifier => TokenKind::Identifier(slice.to_string()),
        RawToken::Symbol => TokenKind::Symbol(slice.to_string()),
        RawToken::HexNumber | RawToken::DecNumber => TokenKind::Number(slice.to_string()),
        RawToken::String => TokenKind::String(slice.to_string()),
    }
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> LexResult {
    Lexer::new(source).tokenize()
}

/// Result of lexing: tokens plus any errors found.
#[derive(Debug)]
pub struct LexResult {
    /// Always ends with a single `Eof` token.
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexResult {
    /// Returns true if lexing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A lexer error with location and friendly message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct LexError {
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl LexError {
    fn unexpected_char(ch: char, pos: usize) -> Self {
        let hint = match ch {
            ';' | '/' => Some("comments are not part of the language".to_string()),
            '$' => Some("hex numbers are written as `0x1F`".to_string()),
            _ => None,
        };
        Self {
            span: Span::new(pos, pos + ch.len_utf8()),
            message: format!("Unexpected character \"{}\".", ch),
            hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn sigils_and_names() {
        assert_eq!(
            kinds("#org @main\nmsgbox MSG_FACE"),
            vec![
                TokenKind::Hash,
                TokenKind::Identifier("org".into()),
                TokenKind::At,
                TokenKind::Identifier("main".into()),
                TokenKind::Identifier("msgbox".into()),
                TokenKind::Symbol("MSG_FACE".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(
            kinds("0xA00000 233 0x 1x1F"),
            vec![
                TokenKind::Number("0xA00000".into()),
                TokenKind::Number("233".into()),
                TokenKind::Number("0x".into()),
                TokenKind::Number("1x1F".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn hex_stops_at_non_hex_digit() {
        assert_eq!(
            kinds("0xAG"),
            vec![
                TokenKind::Number("0xA".into()),
                TokenKind::Symbol("G".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn strings_keep_quotes() {
        let result = tokenize("= \"hi there\" 'x'");
        assert!(result.is_ok());
        assert_eq!(result.tokens[1].kind, TokenKind::String("\"hi there\"".into()));
        assert_eq!(result.tokens[1].span, Span::new(2, 12));
        assert_eq!(result.tokens[2].kind, TokenKind::String("'x'".into()));
    }

    #[test]
    fn unterminated_string_runs_to_end() {
        let result = tokenize("= \"hi\nthere");
        assert!(result.is_ok());
        assert_eq!(result.tokens[1].kind, TokenKind::String("\"hi\nthere".into()));
        assert_eq!(result.tokens.len(), 3);
    }

    #[test]
    fn unexpected_character_is_skipped() {
        let result = tokenize("#org &1");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].message, "Unexpected character \"&\".");
        assert_eq!(result.errors[0].span, Span::new(5, 6));
        assert_eq!(
            result.tokens.iter().map(|t| t.text()).collect::<Vec<_>>(),
            vec!["#", "org", "1", ""]
        );
    }

    #[test]
    fn every_bad_character_reported() {
        let result = tokenize("&& end");
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[1].span, Span::new(1, 2));
        assert_eq!(result.tokens[0].kind, TokenKind::Identifier("end".into()));
    }

    #[test]
    fn multibyte_character_span() {
        let result = tokenize("é");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].span, Span::new(0, 2));
    }

    #[test]
    fn eof_at_source_end() {
        let result = tokenize("  \n\t");
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].span, Span::empty(4));
    }
}

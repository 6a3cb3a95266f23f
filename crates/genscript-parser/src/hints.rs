// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.
//!
//! Kept separate from the main parser to avoid clutter.

use genscript_ast::token::TokenKind;

/// Get a hint for a missing name after `sigil`, based on what was found instead.
pub fn for_sigil(sigil: &TokenKind, found: &TokenKind) -> Option<&'static str> {
    match (sigil, found) {
        // Macro names
        (TokenKind::Hash, TokenKind::Number(_)) => Some("macro names start with a lowercase letter"),
        (TokenKind::Hash, TokenKind::Symbol(_)) => Some("macro names are lowercase, like `#define`"),
        (TokenKind::Hash, TokenKind::Eof) => Some("add a macro name such as `#org`"),
        (TokenKind::Hash, TokenKind::Hash) => Some("remove the extra '#'"),

        // Dynamic labels
        (TokenKind::At, TokenKind::String(_)) => Some("labels are written without quotes, like `@main`"),
        (TokenKind::At, TokenKind::Symbol(_)) => Some("labels start with a lowercase letter or a digit"),
        (TokenKind::At, TokenKind::Eof) => Some("add a label name such as `@main`"),
        (TokenKind::At, TokenKind::At) => Some("remove the extra '@'"),

        _ => None,
    }
}

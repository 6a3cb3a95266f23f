// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from stage error types to `Diagnostic`.
//!
//! The diagnostic message is always the error's own message, so the
//! `{message, offset, length}` view of a diagnostic matches the error it
//! came from.

use crate::{Diagnostic, ToDiagnostic};
use genscript_check::{CheckError, CheckErrorKind};

// ============================================================================
// Lex Errors
// ============================================================================

impl ToDiagnostic for genscript_lexer::LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(&self.message)
            .with_code("E0001")
            .with_primary(self.span, "unexpected character");

        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

impl ToDiagnostic for genscript_parser::ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(&self.message)
            .with_code("E0100")
            .with_primary(self.span, "name expected here");

        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }

        diag
    }
}

// ============================================================================
// Check Errors
// ============================================================================

impl ToDiagnostic for CheckError {
    fn to_diagnostic(&self) -> Diagnostic {
        use CheckErrorKind::*;

        let diag = Diagnostic::error(self.to_string());
        match &self.kind {
            NotInBlock { .. } => diag
                .with_code("E0200")
                .with_primary(self.span, "outside any block")
                .with_help("start a block with `#org` before this command"),

            UnexpectedRootNode { .. } => diag
                .with_code("E0201")
                .with_primary(self.span, "nothing takes this argument")
                .with_note("arguments must follow the macro or command they belong to"),

            DuplicateDynamic { previous, .. } => diag
                .with_code("E0210")
                .with_primary(self.span, "redefined here")
                .with_secondary(*previous, "first defined here"),

            UndefinedDynamic { .. } => diag
                .with_code("E0211")
                .with_primary(self.span, "no `#org` defines this offset"),

            UndefinedSymbol { name } => diag
                .with_code("E0212")
                .with_primary(self.span, "not defined")
                .with_help(format!("declare it first with `#define {} <value>`", name)),

            UnknownMacro { .. } => diag
                .with_code("E0300")
                .with_primary(self.span, "unknown macro"),

            ArgumentCount { expected, found } => {
                let label = if found > expected {
                    format!("{} extra argument(s)", found - expected)
                } else {
                    format!("{} argument(s) missing", expected - found)
                };
                diag.with_code("E0301").with_primary(self.span, label)
            }

            ArgumentType { expected, .. } => diag
                .with_code("E0302")
                .with_primary(self.span, format!("expected {}", expected)),

            ValueNotAllowed { argument, .. } => diag
                .with_code("E0303")
                .with_primary(self.span, format!("not a valid `{}`", argument)),

            DynamicNotAllowed { .. } => diag
                .with_code("E0304")
                .with_primary(self.span, "dynamic offset")
                .with_help("use a static address such as `0x800000`"),

            InvalidNumber { .. } => diag
                .with_code("E0305")
                .with_primary(self.span, "no digits after `0x`"),

            DanglingRawTag { .. } => diag
                .with_code("E0306")
                .with_primary(self.span, "no value follows")
                .with_help("add a value after the tag or remove it"),
        }
    }
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The whole front end in one call: lex, parse, check, convert.

use genscript_ast::node::Root;
use genscript_check::{CheckError, CheckErrorKind, CheckResult, Checker};
use genscript_templates::Registry;

use crate::suggestions::closest;
use crate::{Diagnostic, ToDiagnostic};

/// Everything known about one source text.
#[derive(Debug)]
pub struct Analysis {
    pub root: Root,
    pub check: CheckResult,
    /// Lexical, then syntactic, then semantic diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Analyze `text` against the built-in registry.
pub fn analyze(text: &str) -> Analysis {
    analyze_with(text, Registry::builtin())
}

pub fn analyze_with(text: &str, registry: &Registry) -> Analysis {
    let parsed = genscript_parser::parse_with(text, registry);
    let check = Checker::new(registry).check(&parsed.root);

    let mut diagnostics: Vec<Diagnostic> = parsed.lex_errors.iter().map(ToDiagnostic::to_diagnostic).collect();
    diagnostics.extend(parsed.errors.iter().map(ToDiagnostic::to_diagnostic));
    diagnostics.extend(
        check
            .errors
            .iter()
            .map(|error| suggest(error.to_diagnostic(), error, registry, &check)),
    );

    Analysis { root: parsed.root, check, diagnostics }
}

/// Add a did-you-mean help to name errors when a close match exists.
fn suggest(diag: Diagnostic, error: &CheckError, registry: &Registry, check: &CheckResult) -> Diagnostic {
    let (candidate, replacement) = match &error.kind {
        CheckErrorKind::UnknownMacro { name } => {
            let Some(candidate) = closest(name, registry.macro_names()) else {
                return diag;
            };
            (candidate, candidate.to_string())
        }
        CheckErrorKind::UndefinedDynamic { name } => {
            let Some(candidate) = closest(name, check.dynamics.keys().map(String::as_str)) else {
                return diag;
            };
            (candidate, format!("@{}", candidate))
        }
        CheckErrorKind::UndefinedSymbol { name } => {
            let defined = check.symbols.keys().map(String::as_str);
            let builtin = registry.constants().map(|constant| constant.name);
            let Some(candidate) = closest(name, defined.chain(builtin)) else {
                return diag;
            };
            (candidate, candidate.to_string())
        }
        _ => return diag,
    };

    diag.with_help(format!("did you mean `{}`?", candidate))
        .with_suggestion(error.span, replacement)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(analysis: &Analysis) -> Vec<(&str, usize, usize)> {
        analysis
            .diagnostics
            .iter()
            .map(|d| (d.message.as_str(), d.offset(), d.length()))
            .collect()
    }

    #[test]
    fn stages_in_order() {
        let analysis = analyze("#org &1\nmsgbox 0xA 0x300\nmsgbox 0xA @");
        let codes: Vec<_> = analysis
            .diagnostics
            .iter()
            .filter_map(|d| d.code.as_ref().map(|c| c.0.as_str()))
            .collect();
        assert_eq!(codes, vec!["E0001", "E0100", "E0211", "E0302"]);
    }

    #[test]
    fn clean_script() {
        let analysis = analyze("#dynamic 0xA00000\n#org @1\nmsgbox @2 MSG_FACE\nend\n#org @2\n= \"hi\"");
        assert!(analysis.is_ok());
        assert_eq!(analysis.check.dynamics.len(), 2);
    }

    #[test]
    fn unknown_macro_suggestion() {
        let analysis = analyze("#orgg 0x800000");
        assert_eq!(contract(&analysis), vec![("Unknown macro \"orgg\".", 1, 4)]);
        let help = analysis.diagnostics[0].help.as_ref().map(|h| h.message.as_str());
        assert_eq!(help, Some("did you mean `org`?"));
    }

    #[test]
    fn undefined_symbol_suggests_constant() {
        let analysis = analyze("#org 0xA msgbox 0xB MSG_FATE end");
        assert_eq!(contract(&analysis), vec![("Symbol \"MSG_FATE\" is not defined.", 20, 8)]);
        let suggestion = analysis.diagnostics[0]
            .help
            .as_ref()
            .and_then(|h| h.suggestion.as_ref())
            .map(|s| s.replacement.as_str());
        assert_eq!(suggestion, Some("MSG_FACE"));
    }

    #[test]
    fn undefined_dynamic_keeps_sigil() {
        let analysis = analyze("#org @main\ngoto @mian\nend");
        let suggestion = analysis.diagnostics[0]
            .help
            .as_ref()
            .and_then(|h| h.suggestion.as_ref())
            .map(|s| (s.span.start, s.replacement.as_str()));
        assert_eq!(suggestion, Some((16, "@main")));
    }
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Properties over arbitrary token soups.

use genscript_ast::node::Parent;
use genscript_ast::visit::{self, NodeRef};
use genscript_ast::{NodeId, Span};
use genscript_check::{check, CheckErrorKind, CheckResult};
use genscript_parser::parse;
use genscript_templates::{allowed_types, ArgumentType};
use proptest::prelude::*;

fn word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "#org", "#dynamic", "#define", "#raw", "#break", "#seek", "#unknown", "#", "@", "@1", "@2", "@main",
        "msgbox", "end", "trainerbattle", "if", "=", "0x0", "0x3", "0x6", "0xA00000", "0x", "233", "word",
        "pointer", "MSG_FACE", "KIND", "\"hi\"", "'x", "&", "identifier",
    ])
}

fn script() -> impl Strategy<Value = String> {
    prop::collection::vec((word(), prop::sample::select(vec![" ", "\n", "  "])), 0..24).prop_map(|parts| {
        parts.into_iter().flat_map(|(word, gap)| [word, gap]).collect()
    })
}

/// A name node the checker should have either linked or reported.
#[derive(Debug)]
enum Use {
    Dynamic(NodeId, Span),
    Symbol(NodeId, Span),
}

fn is_first(parent: &Parent, id: NodeId) -> bool {
    parent.arguments.first().map(|argument| argument.id()) == Some(id)
}

/// Every dynamic and symbol that is not in defining position.
fn uses(text: &str) -> (Vec<Use>, CheckResult) {
    let parsed = parse(text);
    let result = check(&parsed.root);
    let mut found = Vec::new();
    visit::walk(&parsed.root, &mut |node, ancestors| {
        let directive = match ancestors.last() {
            Some(NodeRef::Macro(parent)) => Some(*parent),
            _ => None,
        };
        match node {
            NodeRef::Dynamic(dynamic) => {
                let defining = directive.map_or(false, |p| p.canonical == "org" && is_first(p, dynamic.id));
                if !defining {
                    found.push(Use::Dynamic(dynamic.id, dynamic.span()));
                }
            }
            NodeRef::Symbol(symbol) => {
                let defining = directive.map_or(false, |p| {
                    p.canonical == "define" && p.arguments.len() >= 2 && is_first(p, symbol.id)
                });
                if !defining {
                    found.push(Use::Symbol(symbol.id, symbol.span));
                }
            }
            _ => {}
        }
    });
    (found, result)
}

proptest! {
    #[test]
    fn diagnostic_spans_stay_inside_text(text in script()) {
        let parsed = parse(&text);
        let result = check(&parsed.root);
        let spans = parsed
            .lex_errors
            .iter()
            .map(|e| e.span)
            .chain(parsed.errors.iter().map(|e| e.span))
            .chain(result.errors.iter().map(|e| e.span));
        for span in spans {
            prop_assert!(span.start <= span.end);
            prop_assert!(span.end <= text.len(), "{:?} outside {:?}", span, text);
        }
    }

    #[test]
    fn checking_twice_gives_the_same_answer(text in script()) {
        let parsed = parse(&text);
        let first = check(&parsed.root);
        let second = check(&parsed.root);
        prop_assert_eq!(first.errors, second.errors);
        prop_assert_eq!(first.dynamics, second.dynamics);
        prop_assert_eq!(first.symbols, second.symbols);
        prop_assert_eq!(first.resolved_values, second.resolved_values);
    }

    #[test]
    fn references_never_point_at_definitions(text in script()) {
        let parsed = parse(&text);
        let result = check(&parsed.root);
        for entry in result.dynamics.values() {
            prop_assert!(entry.references.iter().all(|site| site.id != entry.definition.id));
        }
        for entry in result.symbols.values() {
            if let Some(definition) = entry.definition() {
                prop_assert!(entry.references.iter().all(|site| site.id != definition.id));
            }
        }
    }

    #[test]
    fn every_use_is_linked_or_reported(text in script()) {
        let (found, result) = uses(&text);
        for name in found {
            let (linked, reported) = match name {
                Use::Dynamic(id, span) => (
                    result.dynamics.values().flat_map(|e| &e.references).filter(|site| site.id == id).count(),
                    result
                        .errors
                        .iter()
                        .filter(|e| e.span == span && matches!(e.kind, CheckErrorKind::UndefinedDynamic { .. }))
                        .count(),
                ),
                Use::Symbol(id, span) => (
                    result.symbols.values().flat_map(|e| &e.references).filter(|site| site.id == id).count(),
                    result
                        .errors
                        .iter()
                        .filter(|e| e.span == span && matches!(e.kind, CheckErrorKind::UndefinedSymbol { .. }))
                        .count(),
                ),
            };
            prop_assert_eq!(linked + reported, 1, "{:?} in {:?}", name, text);
        }
    }

    #[test]
    fn narrower_numbers_stay_allowed(a in any::<u64>(), b in any::<u64>()) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let declared = [ArgumentType::for_number(large)];
        prop_assert!(allowed_types(&declared).contains(ArgumentType::for_number(small)));
    }
}

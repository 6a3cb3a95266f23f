// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! End-to-end checks: parse then check real snippets and compare the
//! collected diagnostics by message, offset and length.

use genscript_ast::node::Argument;
use genscript_ast::visit::{self, NodeRef};
use genscript_ast::Span;
use genscript_check::query::{definition_at, references_at, rename_at, TextEdit};
use genscript_check::{check, CheckErrorKind, CheckResult, SymbolOrigin};
use genscript_parser::{parse, ParseResult};
use genscript_templates::{ArgumentType, Value};

/// (message, offset, length) for every diagnostic: lexical, then syntactic, then semantic.
fn diagnostics(text: &str) -> Vec<(String, usize, usize)> {
    let parsed = parse(text);
    let checked = check(&parsed.root);
    let lexical = parsed.lex_errors.iter().map(|e| (e.message.clone(), e.span));
    let syntactic = parsed.errors.iter().map(|e| (e.message.clone(), e.span));
    let semantic = checked.errors.iter().map(|e| (e.to_string(), e.span));
    lexical
        .chain(syntactic)
        .chain(semantic)
        .map(|(message, span)| (message, span.start, span.len()))
        .collect()
}

fn only(text: &str) -> (String, usize, usize) {
    let mut all = diagnostics(text);
    assert_eq!(all.len(), 1, "expected one diagnostic for {:?}, got {:?}", text, all);
    all.remove(0)
}

fn first(text: &str) -> (String, usize, usize) {
    diagnostics(text).into_iter().next().unwrap_or_else(|| panic!("no diagnostics for {:?}", text))
}

fn d(message: &str, offset: usize, length: usize) -> (String, usize, usize) {
    (message.to_string(), offset, length)
}

fn checked(text: &str) -> (ParseResult, CheckResult) {
    let parsed = parse(text);
    let result = check(&parsed.root);
    (parsed, result)
}

const SCENARIO_A: &str = "#dynamic 0xA00000\n\n#org @1\nmsgbox @2 MSG_FACE\nend\n\n#org @2\n= \"hi\"";

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn valid_script_has_no_diagnostics() {
    assert_eq!(diagnostics(SCENARIO_A), vec![]);

    let (parsed, result) = checked(SCENARIO_A);
    assert_eq!(result.dynamics.len(), 2);
    assert_eq!(result.dynamics["1"].references.len(), 0);
    assert_eq!(result.dynamics["2"].references.len(), 1);
    assert_eq!(result.dynamics["2"].references[0].span, Span::new(34, 36));

    let face = &result.symbols["MSG_FACE"];
    assert_eq!(face.origin, SymbolOrigin::Builtin);
    assert_eq!(face.ty, ArgumentType::Byte);
    assert_eq!(face.value, Value::Number(2));
    assert_eq!(face.references.len(), 1);

    let face_id = face.references[0].id;
    assert_eq!(result.resolved_values.get(&face_id), Some(&Value::Number(2)));
    assert!(parsed.is_ok());
}

#[test]
fn duplicate_dynamic() {
    assert_eq!(
        only("#dynamic 0xA\n#org @1\n#org @1"),
        d("Dynamic offset \"@1\" is already defined.", 26, 2)
    );
    assert_eq!(
        only("#dynamic 0xA #org @1 #org @1"),
        d("Dynamic offset \"@1\" is already defined.", 26, 2)
    );
}

#[test]
fn undefined_symbol_is_reported_once() {
    assert_eq!(
        only("#org 0xA msgbox 0xB MSG_FATE end"),
        d("Symbol \"MSG_FATE\" is not defined.", 20, 8)
    );
}

#[test]
fn command_outside_block() {
    assert_eq!(only("msgbox 0xA 0x2"), d("Command \"msgbox\" is not inside a block.", 0, 14));
}

#[test]
fn argument_at_root() {
    assert_eq!(
        only("0xA"),
        d("Expected \"macro\" or \"command\" node at the root, got \"number\"", 0, 3)
    );
}

#[test]
fn unknown_macro() {
    assert_eq!(only("#unknown 0xA"), d("Unknown macro \"unknown\".", 1, 7));
}

// =========================================================================
// Lexical and syntactic errors flow through
// =========================================================================

#[test]
fn unexpected_character() {
    assert_eq!(only("#org &1"), d("Unexpected character \"&\".", 5, 1));
}

#[test]
fn missing_names() {
    assert_eq!(
        diagnostics("#233"),
        vec![
            d("Expected \"identifier\" token after \"#\", got \"number\".", 1, 3),
            d("Unknown macro \"\".", 1, 0),
        ]
    );
    assert_eq!(
        first("#org @\"233\""),
        d("Expected \"identifier\" or \"number\" token after \"@\", got \"string\".", 6, 5)
    );
}

#[test]
fn nameless_dynamic_is_still_a_reference() {
    let text = "#org 0xA goto @\n= \"x\"";
    assert_eq!(
        diagnostics(text),
        vec![
            d("Expected \"identifier\" or \"number\" token after \"@\", got \"equal\".", 16, 1),
            d("Dynamic offset \"@\" is not defined.", 14, 1),
        ]
    );

    let (_, result) = checked(text);
    assert!(result.dynamics.is_empty());
    assert!(matches!(
        result.errors.as_slice(),
        [e] if matches!(&e.kind, CheckErrorKind::UndefinedDynamic { name } if name.is_empty())
    ));
}

#[test]
fn nameless_dynamic_skips_type_check() {
    // `type` is a byte; the nameless dynamic gets no mismatch on top of its own error.
    let text = "#org 0xA msgbox 0xB @";
    let (parsed, result) = checked(text);
    assert_eq!(parsed.errors.len(), 1);
    assert!(matches!(
        result.errors.as_slice(),
        [e] if matches!(e.kind, CheckErrorKind::UndefinedDynamic { .. })
    ));
}

#[test]
fn nameless_macro_is_validated() {
    assert_eq!(
        diagnostics("# 0xA 0xB"),
        vec![
            d("Expected \"identifier\" token after \"#\", got \"number\".", 2, 3),
            d("Unknown macro \"\".", 1, 0),
        ]
    );
}

#[test]
fn break_stops_everything() {
    assert_eq!(diagnostics("#break #org identifier"), vec![]);
}

// =========================================================================
// Macros
// =========================================================================

#[test]
fn macro_argument_count() {
    assert_eq!(only("#org 0xA 0xB"), d("Expected 1 argument(s), got 2.", 9, 3));
}

#[test]
fn macro_argument_type() {
    assert_eq!(
        only("#org identifier"),
        d("Expected argument type \"pointer\", got \"identifier\".", 5, 10)
    );
}

#[test]
fn aliases_open_blocks() {
    assert_eq!(diagnostics("#seek 0x800000 msgbox 0xB 0x2 end"), vec![]);
}

#[test]
fn freespace_enumeration() {
    assert_eq!(diagnostics("#freespace 0xFF"), vec![]);
    assert_eq!(
        only("#freespace 0x1"),
        d("Value \"0x1\" is not allowed for argument \"byte\".", 11, 3)
    );
}

#[test]
fn dynamic_where_static_offset_required() {
    assert_eq!(
        only("#org @1 end\n#erase @1 0x10"),
        d("Dynamic offset is not allowed for argument \"offset\".", 19, 2)
    );
}

#[test]
fn bare_hex_prefix() {
    assert_eq!(only("#org 0x"), d("Invalid number \"0x\".", 5, 2));
}

#[test]
fn wide_number_fits_pointer() {
    assert_eq!(diagnostics("#dynamic 0x8000000"), vec![]);
    assert_eq!(
        only("#reserve 0x10000"),
        d("Expected argument type \"word\", got \"dword\".", 9, 7)
    );
}

// =========================================================================
// Commands
// =========================================================================

#[test]
fn command_argument_count() {
    assert_eq!(only("#org 0xA msgbox 0xB 0x2 0xC"), d("Expected 2 argument(s), got 3.", 24, 3));
}

#[test]
fn command_argument_type() {
    assert_eq!(
        only("#org 0xA msgbox 0xB identifier"),
        d("Expected argument type \"byte\", got \"identifier\".", 20, 10)
    );
}

#[test]
fn command_missing_arguments_span_whole_command() {
    assert_eq!(only("#org 0xA msgbox 0xB"), d("Expected 2 argument(s), got 1.", 9, 10));
}

#[test]
fn trainerbattle_conditional_arguments() {
    assert_eq!(
        only("#org 0xA trainerbattle 0x3 0x0 0x0 0x0 0x0"),
        d("Expected 4 argument(s), got 5.", 39, 3)
    );
    assert_eq!(
        only("#org 0xA trainerbattle 0x6 0x0 0x0 0x0 0x0"),
        d("Expected 7 argument(s), got 5.", 9, 33)
    );
    assert_eq!(diagnostics("#org 0xA trainerbattle 0x0 0x1 0x0 @1 @2\n#org @1 end\n#org @2 end"), vec![]);
}

#[test]
fn command_aliases() {
    assert_eq!(diagnostics("#org 0xA if 0x1 0x800000 end"), vec![]);
    assert_eq!(only("#org 0xA if 0x1 end"), d("Expected 2 argument(s), got 1.", 9, 6));
}

// =========================================================================
// Dynamics and symbols
// =========================================================================

#[test]
fn undefined_dynamic() {
    assert_eq!(
        only("#dynamic 0xA #org @1 msgbox @2 0x2 end"),
        d("Dynamic offset \"@2\" is not defined.", 28, 2)
    );
}

#[test]
fn dynamics_and_symbols_are_separate_tables() {
    let (_, result) = checked("#dynamic 0xA\n#define KIND 0x1\n#org @main\nmsgbox @main KIND end");
    assert!(result.is_ok(), "{:?}", result.errors);
    assert_eq!(result.dynamics.keys().collect::<Vec<_>>(), vec!["main"]);
    assert_eq!(result.symbols.keys().collect::<Vec<_>>(), vec!["KIND"]);
    assert_eq!(result.dynamics["main"].references.len(), 1);
    assert_eq!(result.symbols["KIND"].references.len(), 1);
}

#[test]
fn define_substitutes_value() {
    let text = "#define KIND 0x3\n#org 0xA msgbox 0xB KIND end";
    assert_eq!(diagnostics(text), vec![]);

    let (_, result) = checked(text);
    let kind = &result.symbols["KIND"];
    assert!(matches!(kind.origin, SymbolOrigin::Define { .. }));
    assert_eq!(kind.value, Value::Number(3));
    assert_eq!(kind.ty, ArgumentType::Byte);
    assert_eq!(kind.references.len(), 1);
}

#[test]
fn symbol_redefinition_moves_definition_only() {
    let text = "#define KIND 0x3\n#define KIND 0x300\n#org 0xA msgbox 0xB KIND end";
    assert_eq!(diagnostics(text), vec![]);

    let (_, result) = checked(text);
    let kind = &result.symbols["KIND"];
    assert_eq!(kind.value, Value::Number(3));
    assert_eq!(kind.ty, ArgumentType::Byte);
    assert_eq!(kind.definition().map(|site| site.span), Some(Span::new(25, 29)));
    assert_eq!(kind.references.len(), 1);
}

#[test]
fn user_definition_shadows_constant() {
    let (_, result) = checked("#define MSG_FACE 0x7\n#org 0xA msgbox 0xB MSG_FACE end");
    assert!(result.is_ok());
    assert_eq!(result.symbols["MSG_FACE"].value, Value::Number(7));
}

// =========================================================================
// Raw
// =========================================================================

#[test]
fn raw_tags_select_width() {
    assert_eq!(diagnostics("#org @1 end\n#raw 0x1 word 0x200 0x300 pointer @1"), vec![]);
    assert_eq!(only("#raw 0x200"), d("Expected argument type \"byte\", got \"word\".", 5, 5));
}

#[test]
fn raw_dangling_and_unknown_tags() {
    assert_eq!(only("#raw 0x1 word"), d("Type tag \"word\" is not followed by a value.", 9, 4));
    assert_eq!(
        first("#raw word byte 0x1"),
        d("Type tag \"word\" is not followed by a value.", 5, 4)
    );
    assert_eq!(only("#raw foo 0x1"), d("Value \"foo\" is not allowed for argument \"type\".", 5, 3));
    assert_eq!(only("#raw"), d("Expected 1 argument(s), got 0.", 0, 4));
}

// =========================================================================
// Resolution
// =========================================================================

#[test]
fn resolved_values_cover_arguments() {
    let (parsed, result) = checked("#org 0xA msgbox 0x10 MSG_SIGN end");
    let mut seen = Vec::new();
    visit::walk(&parsed.root, &mut |node, _| {
        if let NodeRef::Number(number) | NodeRef::Symbol(number) = node {
            seen.push(result.resolved_values.get(&number.id).cloned());
        }
    });
    assert_eq!(
        seen,
        vec![Some(Value::Number(0xA)), Some(Value::Number(0x10)), Some(Value::Number(3))]
    );
}

#[test]
fn check_is_idempotent() {
    let parsed = parse(SCENARIO_A);
    let first = check(&parsed.root);
    let second = check(&parsed.root);
    assert_eq!(first.errors, second.errors);
    assert_eq!(first.dynamics, second.dynamics);
    assert_eq!(first.symbols, second.symbols);
    assert_eq!(first.resolved_values, second.resolved_values);
}

#[test]
fn error_kinds_are_matchable() {
    let (_, result) = checked("#org 0xA msgbox @9 0x2 end");
    assert!(matches!(
        result.errors.as_slice(),
        [e] if matches!(&e.kind, CheckErrorKind::UndefinedDynamic { name } if name == "9")
    ));
}

// =========================================================================
// Queries
// =========================================================================

#[test]
fn go_to_dynamic_definition() {
    let (parsed, result) = checked(SCENARIO_A);
    // Cursor on the `2` of `msgbox @2`.
    let definition = definition_at(&parsed.root, &result, 35).map(|site| site.span);
    assert_eq!(definition, Some(Span::new(56, 58)));

    let references = references_at(&parsed.root, &result, 57);
    assert_eq!(references.iter().map(|site| site.span).collect::<Vec<_>>(), vec![Span::new(34, 36)]);
}

#[test]
fn builtin_constants_have_no_definition() {
    let (parsed, result) = checked(SCENARIO_A);
    assert_eq!(definition_at(&parsed.root, &result, 38), None);
    assert_eq!(references_at(&parsed.root, &result, 38).len(), 1);
}

#[test]
fn rename_builtin_is_refused() {
    let (parsed, result) = checked("#org 0xA msgbox 0xB MSG_FACE end");
    assert_eq!(result.symbols["MSG_FACE"].origin, SymbolOrigin::Builtin);
    assert!(rename_at(&parsed.root, &result, 22, "MY_FACE").is_empty());

    // A user definition of the same name can be renamed.
    let (parsed, result) = checked("#define MSG_FACE 0x7\n#org 0xA msgbox 0xB MSG_FACE end");
    assert_eq!(rename_at(&parsed.root, &result, 42, "MY_FACE").len(), 2);
}

#[test]
fn rename_keeps_sigil() {
    let (parsed, result) = checked(SCENARIO_A);
    let edits = rename_at(&parsed.root, &result, 35, "intro");
    assert_eq!(
        edits,
        vec![
            TextEdit { span: Span::new(35, 36), new_text: "intro".into() },
            TextEdit { span: Span::new(57, 58), new_text: "intro".into() },
        ]
    );
}

#[test]
fn rename_symbol() {
    let text = "#define KIND 0x3\n#org 0xA msgbox 0xB KIND end";
    let (parsed, result) = checked(text);
    let edits = rename_at(&parsed.root, &result, 37, "STYLE");
    let spans: Vec<_> = edits.iter().map(|edit| edit.span).collect();
    assert_eq!(spans, vec![Span::new(8, 12), Span::new(37, 41)]);
}

#[test]
fn nothing_under_cursor() {
    let (parsed, result) = checked(SCENARIO_A);
    assert_eq!(definition_at(&parsed.root, &result, 0), None);
    assert!(rename_at(&parsed.root, &result, 0, "x").is_empty());
}

#[test]
fn dynamic_argument_spans_include_sigil() {
    let parsed = parse("#org @main");
    let org = visit::statements(&parsed.root).next().map(|s| s.parent().clone());
    let span = org.and_then(|org| match org.arguments.first() {
        Some(Argument::Dynamic(dynamic)) => Some(dynamic.span()),
        _ => None,
    });
    assert_eq!(span, Some(Span::new(5, 10)));
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Editor queries over a checked tree: go to definition, find references, rename.

use genscript_ast::node::Root;
use genscript_ast::visit::{self, NodeRef};
use genscript_ast::Span;

use crate::tables::{CheckResult, Site, SymbolOrigin};

/// Replace the text at `span` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub span: Span,
    pub new_text: String,
}

/// A dynamic or symbol name under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Name<'a> {
    Dynamic(&'a str),
    Symbol(&'a str),
}

fn name_at(root: &Root, offset: usize) -> Option<Name<'_>> {
    visit::path_at(root, offset).into_iter().rev().find_map(|node| match node {
        NodeRef::Dynamic(dynamic) => Some(Name::Dynamic(dynamic.name.value.as_str())),
        NodeRef::Symbol(symbol) => Some(Name::Symbol(symbol.value.as_str())),
        _ => None,
    })
}

/// Definition site of the name at `offset`. Built-in constants have none.
pub fn definition_at(root: &Root, result: &CheckResult, offset: usize) -> Option<Site> {
    match name_at(root, offset)? {
        Name::Dynamic(name) => result.dynamics.get(name).map(|entry| entry.definition),
        Name::Symbol(name) => result.symbols.get(name).and_then(|entry| entry.definition()),
    }
}

/// Every reference to the name at `offset`, in source order. The definition
/// itself is not included.
pub fn references_at(root: &Root, result: &CheckResult, offset: usize) -> Vec<Site> {
    let mut sites = match name_at(root, offset) {
        Some(Name::Dynamic(name)) => result
            .dynamics
            .get(name)
            .map(|entry| entry.references.clone())
            .unwrap_or_default(),
        Some(Name::Symbol(name)) => result
            .symbols
            .get(name)
            .map(|entry| entry.references.clone())
            .unwrap_or_default(),
        None => Vec::new(),
    };
    sites.sort_by_key(|site| site.span.start);
    sites
}

/// Edits renaming the name at `offset` everywhere it is defined or used.
/// Only the name is replaced; a dynamic keeps its `@`. Built-in constants
/// cannot be renamed, so they get no edits.
pub fn rename_at(root: &Root, result: &CheckResult, offset: usize, new_name: &str) -> Vec<TextEdit> {
    if let Some(Name::Symbol(name)) = name_at(root, offset) {
        if result.symbols.get(name).map_or(false, |entry| entry.origin == SymbolOrigin::Builtin) {
            return Vec::new();
        }
    }
    let definition = definition_at(root, result, offset);
    let mut edits: Vec<TextEdit> = definition
        .into_iter()
        .chain(references_at(root, result, offset))
        .map(|site| TextEdit { span: site.name_span, new_text: new_name.to_string() })
        .collect();
    edits.sort_by_key(|edit| edit.span.start);
    edits.dedup();
    edits
}

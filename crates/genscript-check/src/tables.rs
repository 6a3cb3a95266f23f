// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Resolution tables produced by the checker.
//!
//! Definitions and references are recorded as `Site`s rather than pointers
//! into the tree, so jumping between them is a table lookup.

use std::collections::HashMap;

use genscript_ast::node::{Dynamic, Literal, Parent};
use genscript_ast::{NodeId, Span};
use genscript_templates::{ArgumentType, Value};

use crate::CheckError;

/// Location of a node that takes part in a definition or reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Site {
    pub id: NodeId,
    /// The whole node, sigil included.
    pub span: Span,
    /// Just the name; what a rename replaces.
    pub name_span: Span,
}

impl Site {
    pub fn dynamic(dynamic: &Dynamic) -> Self {
        Self { id: dynamic.id, span: dynamic.span(), name_span: dynamic.name.span }
    }

    pub fn literal(literal: &Literal) -> Self {
        Self { id: literal.id, span: literal.span, name_span: literal.span }
    }

    pub fn directive(parent: &Parent) -> Self {
        Self { id: parent.id, span: parent.span(), name_span: parent.name.span }
    }
}

/// A dynamic offset: defined by the first argument of an `org` macro.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicEntry {
    /// The `#org` macro.
    pub directive: Site,
    /// The `@name` inside it.
    pub definition: Site,
    pub references: Vec<Site>,
}

/// Where a symbol's value comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolOrigin {
    /// `#define NAME value`; the latest one is the definition site.
    Define { directive: Site, definition: Site },
    /// A registry constant such as `MSG_FACE`.
    Builtin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolEntry {
    pub origin: SymbolOrigin,
    pub references: Vec<Site>,
    pub ty: ArgumentType,
    pub value: Value,
}

impl SymbolEntry {
    pub fn definition(&self) -> Option<Site> {
        match self.origin {
            SymbolOrigin::Define { definition, .. } => Some(definition),
            SymbolOrigin::Builtin => None,
        }
    }
}

/// Everything one `check` call produces.
#[derive(Debug, Default)]
pub struct CheckResult {
    pub errors: Vec<CheckError>,
    /// Concrete value of every argument the checker resolved.
    pub resolved_values: HashMap<NodeId, Value>,
    pub dynamics: HashMap<String, DynamicEntry>,
    pub symbols: HashMap<String, SymbolEntry>,
}

impl CheckResult {
    /// Returns true if checking completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

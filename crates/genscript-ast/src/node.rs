// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! AST nodes.
//!
//! Every node knows its start offset; ends are derived from children so a
//! parent grows as the parser appends arguments to it.

use crate::{NodeId, Span};

/// The whole translation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Root {
    pub id: NodeId,
    pub text: String,
    /// Only `Block` and `Macro` are valid here; anything else is reported by the checker.
    pub children: Vec<Item>,
}

impl Root {
    pub fn new(id: NodeId, text: impl Into<String>) -> Self {
        Self { id, text: text.into(), children: Vec::new() }
    }

    pub fn span(&self) -> Span {
        Span::new(0, self.text.len())
    }

    /// Source text covered by `span`, empty if the span is out of range.
    pub fn text_at(&self, span: Span) -> &str {
        self.text.get(span.start..span.end).unwrap_or("")
    }
}

/// A direct child of the root.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Block(Block),
    Macro(Parent),
    Command(Parent),
    Argument(Argument),
}

impl Item {
    pub fn id(&self) -> NodeId {
        match self {
            Item::Block(block) => block.id,
            Item::Macro(parent) | Item::Command(parent) => parent.id,
            Item::Argument(arg) => arg.id(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Item::Block(block) => block.span(),
            Item::Macro(parent) | Item::Command(parent) => parent.span(),
            Item::Argument(arg) => arg.span(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Item::Block(_) => "block",
            Item::Macro(_) => "macro",
            Item::Command(_) => "command",
            Item::Argument(arg) => arg.kind_name(),
        }
    }
}

/// One contiguous routine: an `org` label followed by its commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: NodeId,
    pub label: Parent,
    pub children: Vec<Parent>,
}

impl Block {
    pub fn new(id: NodeId, label: Parent) -> Self {
        Self { id, label, children: Vec::new() }
    }

    pub fn span(&self) -> Span {
        let end = match self.children.last() {
            Some(command) => command.end(),
            None => self.label.end(),
        };
        Span::new(self.label.offset, end)
    }
}

/// Shared shape of macros (`#name ...`) and commands (`name ...`).
#[derive(Debug, Clone, PartialEq)]
pub struct Parent {
    pub id: NodeId,
    pub offset: usize,
    pub name: Literal,
    /// Registry key after alias redirection; the raw name when unknown.
    pub canonical: String,
    pub arguments: Vec<Argument>,
}

impl Parent {
    pub fn new(id: NodeId, offset: usize, name: Literal, canonical: impl Into<String>) -> Self {
        Self { id, offset, name, canonical: canonical.into(), arguments: Vec::new() }
    }

    pub fn end(&self) -> usize {
        match self.arguments.last() {
            Some(arg) => arg.span().end,
            None => self.name.span.end,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.offset, self.end())
    }
}

/// `@name` reference to a dynamic offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dynamic {
    pub id: NodeId,
    pub offset: usize,
    pub name: Literal,
}

impl Dynamic {
    pub fn span(&self) -> Span {
        Span::new(self.offset, self.name.span.end)
    }
}

/// Leaf node holding its source text verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub id: NodeId,
    pub span: Span,
    pub value: String,
}

impl Literal {
    pub fn new(id: NodeId, offset: usize, value: impl Into<String>) -> Self {
        let value = value.into();
        let span = Span::new(offset, offset + value.len());
        Self { id, span, value }
    }
}

/// Anything that can follow a macro or command name.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Dynamic(Dynamic),
    Identifier(Literal),
    /// Uppercase constant name.
    Symbol(Literal),
    Number(Literal),
    String(Literal),
}

impl Argument {
    pub fn id(&self) -> NodeId {
        match self {
            Argument::Dynamic(dynamic) => dynamic.id,
            Argument::Identifier(lit)
            | Argument::Symbol(lit)
            | Argument::Number(lit)
            | Argument::String(lit) => lit.id,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Argument::Dynamic(dynamic) => dynamic.span(),
            Argument::Identifier(lit)
            | Argument::Symbol(lit)
            | Argument::Number(lit)
            | Argument::String(lit) => lit.span,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Argument::Dynamic(_) => "dynamic",
            Argument::Identifier(_) => "identifier",
            Argument::Symbol(_) => "symbol",
            Argument::Number(_) => "number",
            Argument::String(_) => "string",
        }
    }
}

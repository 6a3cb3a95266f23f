// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parent-aware traversal over the AST.

use crate::node::{Argument, Block, Dynamic, Item, Literal, Parent, Root};
use crate::{NodeId, Span};

/// Borrowed view of any node in the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Root(&'a Root),
    Block(&'a Block),
    Macro(&'a Parent),
    Command(&'a Parent),
    Dynamic(&'a Dynamic),
    Identifier(&'a Literal),
    Symbol(&'a Literal),
    Number(&'a Literal),
    String(&'a Literal),
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        match self {
            NodeRef::Root(root) => root.id,
            NodeRef::Block(block) => block.id,
            NodeRef::Macro(parent) | NodeRef::Command(parent) => parent.id,
            NodeRef::Dynamic(dynamic) => dynamic.id,
            NodeRef::Identifier(lit)
            | NodeRef::Symbol(lit)
            | NodeRef::Number(lit)
            | NodeRef::String(lit) => lit.id,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            NodeRef::Root(root) => root.span(),
            NodeRef::Block(block) => block.span(),
            NodeRef::Macro(parent) | NodeRef::Command(parent) => parent.span(),
            NodeRef::Dynamic(dynamic) => dynamic.span(),
            NodeRef::Identifier(lit)
            | NodeRef::Symbol(lit)
            | NodeRef::Number(lit)
            | NodeRef::String(lit) => lit.span,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeRef::Root(_) => "root",
            NodeRef::Block(_) => "block",
            NodeRef::Macro(_) => "macro",
            NodeRef::Command(_) => "command",
            NodeRef::Dynamic(_) => "dynamic",
            NodeRef::Identifier(_) => "identifier",
            NodeRef::Symbol(_) => "symbol",
            NodeRef::Number(_) => "number",
            NodeRef::String(_) => "string",
        }
    }
}

impl<'a> From<&'a Argument> for NodeRef<'a> {
    fn from(arg: &'a Argument) -> Self {
        match arg {
            Argument::Dynamic(dynamic) => NodeRef::Dynamic(dynamic),
            Argument::Identifier(lit) => NodeRef::Identifier(lit),
            Argument::Symbol(lit) => NodeRef::Symbol(lit),
            Argument::Number(lit) => NodeRef::Number(lit),
            Argument::String(lit) => NodeRef::String(lit),
        }
    }
}

impl<'a> From<&'a Item> for NodeRef<'a> {
    fn from(item: &'a Item) -> Self {
        match item {
            Item::Block(block) => NodeRef::Block(block),
            Item::Macro(parent) => NodeRef::Macro(parent),
            Item::Command(parent) => NodeRef::Command(parent),
            Item::Argument(arg) => arg.into(),
        }
    }
}

/// Visit every node in pre-order. The callback receives the node and the
/// chain of its ancestors, outermost first (the last entry is the direct parent).
pub fn walk<'a>(root: &'a Root, visit: &mut impl FnMut(NodeRef<'a>, &[NodeRef<'a>])) {
    let mut ancestors = Vec::new();
    walk_node(NodeRef::Root(root), &mut ancestors, visit);
}

fn walk_node<'a>(
    node: NodeRef<'a>,
    ancestors: &mut Vec<NodeRef<'a>>,
    visit: &mut impl FnMut(NodeRef<'a>, &[NodeRef<'a>]),
) {
    visit(node, ancestors);

    ancestors.push(node);
    match node {
        NodeRef::Root(root) => {
            for child in &root.children {
                walk_node(child.into(), ancestors, visit);
            }
        }
        NodeRef::Block(block) => {
            walk_node(NodeRef::Macro(&block.label), ancestors, visit);
            for command in &block.children {
                walk_node(NodeRef::Command(command), ancestors, visit);
            }
        }
        NodeRef::Macro(parent) | NodeRef::Command(parent) => {
            walk_node(NodeRef::Identifier(&parent.name), ancestors, visit);
            for arg in &parent.arguments {
                walk_node(arg.into(), ancestors, visit);
            }
        }
        NodeRef::Dynamic(dynamic) => {
            walk_node(NodeRef::Identifier(&dynamic.name), ancestors, visit);
        }
        NodeRef::Identifier(_) | NodeRef::Symbol(_) | NodeRef::Number(_) | NodeRef::String(_) => {}
    }
    ancestors.pop();
}

/// A macro or command reachable from the root or from a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Statement<'a> {
    Macro(&'a Parent),
    Command(&'a Parent),
}

impl<'a> Statement<'a> {
    pub fn parent(&self) -> &'a Parent {
        match self {
            Statement::Macro(parent) | Statement::Command(parent) => parent,
        }
    }
}

/// Macros and commands in source order: block labels are followed by their commands.
pub fn statements<'a>(root: &'a Root) -> impl Iterator<Item = Statement<'a>> + 'a {
    root.children.iter().flat_map(|item| {
        let nested: Box<dyn Iterator<Item = Statement<'a>> + 'a> = match item {
            Item::Block(block) => Box::new(
                std::iter::once(Statement::Macro(&block.label))
                    .chain(block.children.iter().map(Statement::Command)),
            ),
            Item::Macro(parent) => Box::new(std::iter::once(Statement::Macro(parent))),
            Item::Command(parent) => Box::new(std::iter::once(Statement::Command(parent))),
            Item::Argument(_) => Box::new(std::iter::empty()),
        };
        nested
    })
}

/// Nodes enclosing `offset`, outermost first. The last entry is the innermost node.
pub fn path_at(root: &Root, offset: usize) -> Vec<NodeRef<'_>> {
    let mut path: Vec<NodeRef<'_>> = Vec::new();
    walk(root, &mut |node, ancestors| {
        if !node.span().contains(offset) {
            return;
        }
        // Only extend a chain we are already inside of, so siblings that
        // merely touch at a boundary do not interleave.
        let parent_matches = match (ancestors.last(), path.last()) {
            (None, _) => true,
            (Some(parent), Some(last)) => parent.id() == last.id(),
            (Some(_), None) => false,
        };
        if parent_matches {
            path.push(node);
        }
    });
    path
}

/// Find any node by id.
pub fn find(root: &Root, id: NodeId) -> Option<NodeRef<'_>> {
    let mut found = None;
    walk(root, &mut |node, _| {
        if found.is_none() && node.id() == id {
            found = Some(node);
        }
    });
    found
}

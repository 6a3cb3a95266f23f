// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Syntax tree types for genscript.
//!
//! This crate defines the tokens and AST nodes shared between the lexer,
//! parser, checker, and editor tooling.

pub mod span;
pub mod token;
pub mod node;
pub mod visit;

pub use span::{Span, LineMap};

/// Unique identifier for AST nodes.
///
/// Used by the checker to key resolution tables without holding references
/// into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    pub const DUMMY: NodeId = NodeId(u32::MAX);
}

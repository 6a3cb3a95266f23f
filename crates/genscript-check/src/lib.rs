// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Semantic checking for genscript.
//!
//! Validates a parsed tree against the Template Registry, builds the dynamic
//! and symbol tables, and resolves every argument to a concrete value.

mod checker;
mod error;
pub mod query;
mod tables;

pub use checker::{parse_number, Checker};
pub use error::{CheckError, CheckErrorKind};
pub use tables::{CheckResult, DynamicEntry, Site, SymbolEntry, SymbolOrigin};

use genscript_ast::node::Root;
use genscript_templates::Registry;

/// Check `root` against the built-in registry.
pub fn check(root: &Root) -> CheckResult {
    Checker::new(Registry::builtin()).check(root)
}

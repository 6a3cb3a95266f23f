// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Template Registry for genscript.
//!
//! Static argument specifications for every built-in macro and command,
//! the `#raw` type tags, and the constants scripts may use without a
//! `#define`. The checker validates instructions against these templates;
//! editor tooling reads them directly to render documentation.

mod commands;
mod constants;
mod macros;
pub mod registry;
pub mod template;
pub mod types;

pub use constants::{Constant, RAW_TAGS};
pub use registry::Registry;
pub use template::{CommandArgument, CommandTemplate, Condition, Example, MacroArgument, MacroTemplate};
pub use types::{allowed_types, describe_types, ArgumentType, EnumValue, TypeSet, Value};

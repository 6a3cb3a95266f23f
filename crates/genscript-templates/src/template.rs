// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Template shapes for macros and commands.

use crate::types::{ArgumentType, EnumValue, Value};

/// Predicate over the values resolved so far for the same instruction.
pub type Condition = fn(&[Value]) -> bool;

/// Usage example shown alongside a macro's documentation.
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub content: &'static str,
    pub description: &'static str,
}

/// Static description of a `#macro`.
#[derive(Debug, Clone, Copy)]
pub struct MacroTemplate {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub example: Option<Example>,
    /// Takes effect for the whole file regardless of position.
    pub hoisting: bool,
    pub arguments: &'static [MacroArgument],
}

impl MacroTemplate {
    pub fn signature(&self) -> String {
        let mut out = format!("#{}", self.name);
        for arg in self.arguments {
            out.push_str(&format!(" [{}]", arg.name));
        }
        out
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MacroArgument {
    pub name: &'static str,
    pub types: &'static [ArgumentType],
    pub enum_values: Option<&'static [EnumValue]>,
    /// Whether a defined symbol may stand in for the value.
    pub can_symbol: bool,
    pub can_dynamic: bool,
}

impl MacroArgument {
    pub const fn new(name: &'static str, types: &'static [ArgumentType]) -> Self {
        Self { name, types, enum_values: None, can_symbol: true, can_dynamic: true }
    }

    pub const fn one_of(mut self, values: &'static [EnumValue]) -> Self {
        self.enum_values = Some(values);
        self
    }

    pub const fn no_dynamic(mut self) -> Self {
        self.can_dynamic = false;
        self
    }

    pub const fn no_symbol(mut self) -> Self {
        self.can_symbol = false;
        self
    }
}

/// Static description of an in-block command.
#[derive(Debug, Clone, Copy)]
pub struct CommandTemplate {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Opcode byte; `None` for compound commands the compiler expands.
    pub opcode: Option<u8>,
    pub description: &'static str,
    /// Encoded size; `None` when it depends on the arguments.
    pub bytes: Option<u8>,
    /// Control never falls through past this command.
    pub ending: bool,
    pub arguments: &'static [CommandArgument],
}

impl CommandTemplate {
    pub fn signature(&self) -> String {
        let mut out = self.name.to_string();
        for arg in self.arguments {
            match arg.when {
                Some(_) => out.push_str(&format!(" [{}?]", arg.name)),
                None => out.push_str(&format!(" [{}]", arg.name)),
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CommandArgument {
    pub name: &'static str,
    pub ty: ArgumentType,
    pub description: &'static str,
    /// Present only when this holds for the preceding values.
    pub when: Option<Condition>,
}

impl CommandArgument {
    pub const fn new(name: &'static str, ty: ArgumentType, description: &'static str) -> Self {
        Self { name, ty, description, when: None }
    }

    pub const fn when(mut self, condition: Condition) -> Self {
        self.when = Some(condition);
        self
    }

    pub fn is_present(&self, values: &[Value]) -> bool {
        self.when.map_or(true, |condition| condition(values))
    }
}

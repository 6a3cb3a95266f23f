// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Name lookup over the built-in templates.
//!
//! Aliases are stored as redirects to their canonical entry so a lookup by
//! any spelling lands on the same template.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::commands::COMMANDS;
use crate::constants::{Constant, CONSTANTS, RAW_TAGS};
use crate::macros::MACROS;
use crate::template::{CommandTemplate, MacroTemplate};
use crate::types::ArgumentType;

#[derive(Debug, Clone, Copy)]
enum Entry<T: 'static> {
    Template(&'static T),
    Redirect(&'static str),
}

/// Immutable lookup tables for macros, commands, raw tags and constants.
#[derive(Debug)]
pub struct Registry {
    macros: HashMap<&'static str, Entry<MacroTemplate>>,
    commands: HashMap<&'static str, Entry<CommandTemplate>>,
    constants: HashMap<&'static str, &'static Constant>,
}

impl Registry {
    /// The process-wide registry, built on first use.
    pub fn builtin() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(|| Registry::new(MACROS, COMMANDS, CONSTANTS))
    }

    pub fn new(
        macros: &'static [MacroTemplate],
        commands: &'static [CommandTemplate],
        constants: &'static [Constant],
    ) -> Self {
        let mut registry = Registry {
            macros: HashMap::new(),
            commands: HashMap::new(),
            constants: HashMap::new(),
        };
        for template in macros {
            registry.macros.insert(template.name, Entry::Template(template));
            for alias in template.aliases {
                registry.macros.insert(*alias, Entry::Redirect(template.name));
            }
        }
        for template in commands {
            registry.commands.insert(template.name, Entry::Template(template));
            for alias in template.aliases {
                registry.commands.insert(*alias, Entry::Redirect(template.name));
            }
        }
        for constant in constants {
            registry.constants.insert(constant.name, constant);
        }
        registry
    }

    /// Canonical macro name for `name`, following one alias redirect.
    pub fn canonical_macro(&self, name: &str) -> Option<&'static str> {
        resolve(&self.macros, name).map(|template| template.name)
    }

    pub fn macro_template(&self, name: &str) -> Option<&'static MacroTemplate> {
        resolve(&self.macros, name)
    }

    pub fn canonical_command(&self, name: &str) -> Option<&'static str> {
        resolve(&self.commands, name).map(|template| template.name)
    }

    pub fn command_template(&self, name: &str) -> Option<&'static CommandTemplate> {
        resolve(&self.commands, name)
    }

    /// Whether `name` opens a command, aliases included.
    pub fn is_command(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Width selected by a `#raw` type tag.
    pub fn raw_tag(&self, name: &str) -> Option<ArgumentType> {
        RAW_TAGS.iter().find(|(tag, _)| *tag == name).map(|(_, ty)| *ty)
    }

    pub fn constant(&self, name: &str) -> Option<&'static Constant> {
        self.constants.get(name).copied()
    }

    /// One-line usage summary: `#org [offset]` or `msgbox [offset] [type]`.
    pub fn signature(&self, name: &str) -> Option<String> {
        match name.strip_prefix('#') {
            Some(name) => self.macro_template(name).map(MacroTemplate::signature),
            None => self
                .command_template(name)
                .map(CommandTemplate::signature)
                .or_else(|| self.macro_template(name).map(MacroTemplate::signature)),
        }
    }

    /// Canonical macro names, sorted.
    pub fn macro_names(&self) -> Vec<&'static str> {
        sorted_names(&self.macros)
    }

    /// Canonical command names, sorted.
    pub fn command_names(&self) -> Vec<&'static str> {
        sorted_names(&self.commands)
    }

    pub fn constants(&self) -> impl Iterator<Item = &'static Constant> + '_ {
        self.constants.values().copied()
    }
}

fn resolve<T: 'static>(table: &HashMap<&'static str, Entry<T>>, name: &str) -> Option<&'static T> {
    match table.get(name)? {
        Entry::Template(template) => Some(*template),
        Entry::Redirect(target) => match table.get(target)? {
            Entry::Template(template) => Some(*template),
            Entry::Redirect(_) => None,
        },
    }
}

fn sorted_names<T: 'static>(table: &HashMap<&'static str, Entry<T>>) -> Vec<&'static str> {
    let mut names: Vec<_> = table
        .iter()
        .filter(|(_, entry)| matches!(entry, Entry::Template(_)))
        .map(|(name, _)| *name)
        .collect();
    names.sort_unstable();
    names
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The four checking passes.
//!
//! 1. Root shape: only macros and blocks may sit at the root.
//! 2. Names: classify every dynamic and symbol as a definition or a
//!    reference, then link references to definitions.
//! 3. Instructions: match macro and command arguments against templates.
//! 4. Values: resolve each argument to a concrete type and value, on demand
//!    from passes 2 and 3 and memoized per node.

use std::collections::HashMap;

use genscript_ast::node::{Argument, Dynamic, Item, Literal, Parent, Root};
use genscript_ast::visit::{self, NodeRef, Statement};
use genscript_ast::NodeId;
use genscript_templates::{
    allowed_types, describe_types, ArgumentType, CommandArgument, EnumValue, MacroArgument, Registry, Value,
};
use tracing::{debug, trace};

use crate::tables::{CheckResult, DynamicEntry, Site, SymbolEntry, SymbolOrigin};
use crate::CheckError;

/// What one argument position accepts.
struct Expectation<'a> {
    name: &'a str,
    types: &'a [ArgumentType],
    enum_values: Option<&'a [EnumValue]>,
    can_symbol: bool,
    can_dynamic: bool,
}

impl<'a> From<&'a MacroArgument> for Expectation<'a> {
    fn from(argument: &'a MacroArgument) -> Self {
        Self {
            name: argument.name,
            types: argument.types,
            enum_values: argument.enum_values,
            can_symbol: argument.can_symbol,
            can_dynamic: argument.can_dynamic,
        }
    }
}

impl<'a> From<&'a CommandArgument> for Expectation<'a> {
    fn from(argument: &'a CommandArgument) -> Self {
        Self {
            name: argument.name,
            types: std::slice::from_ref(&argument.ty),
            enum_values: None,
            can_symbol: true,
            can_dynamic: true,
        }
    }
}

/// Semantic checker over one parsed tree.
pub struct Checker<'r> {
    registry: &'r Registry,
    errors: Vec<CheckError>,
    resolved_values: HashMap<NodeId, Value>,
    /// Resolutions that do not depend on the argument position.
    memo: HashMap<NodeId, (ArgumentType, Value)>,
    dynamics: HashMap<String, DynamicEntry>,
    symbols: HashMap<String, SymbolEntry>,
}

impl<'r> Checker<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            errors: Vec::new(),
            resolved_values: HashMap::new(),
            memo: HashMap::new(),
            dynamics: HashMap::new(),
            symbols: HashMap::new(),
        }
    }

    /// Run every pass. The tree is only read.
    pub fn check(mut self, root: &Root) -> CheckResult {
        self.check_root_shape(root);
        self.resolve_names(root);

        for statement in visit::statements(root) {
            match statement {
                Statement::Macro(directive) => self.check_macro(directive),
                Statement::Command(command) => self.check_command(command),
            }
        }

        debug!(
            errors = self.errors.len(),
            dynamics = self.dynamics.len(),
            symbols = self.symbols.len(),
            "checked"
        );

        CheckResult {
            errors: self.errors,
            resolved_values: self.resolved_values,
            dynamics: self.dynamics,
            symbols: self.symbols,
        }
    }

    // =========================================================================
    // Pass 1: root shape
    // =========================================================================

    fn check_root_shape(&mut self, root: &Root) {
        for item in &root.children {
            match item {
                Item::Macro(_) | Item::Block(_) => {}
                Item::Command(command) => {
                    self.errors.push(CheckError::not_in_block(&command.name.value, command.span()));
                }
                Item::Argument(argument) => {
                    self.errors.push(CheckError::unexpected_root_node(argument.kind_name(), argument.span()));
                }
            }
        }
    }

    // =========================================================================
    // Pass 2: names
    // =========================================================================

    fn resolve_names(&mut self, root: &Root) {
        let mut dynamic_refs: Vec<(String, Site)> = Vec::new();
        let mut symbol_refs: Vec<(String, Site)> = Vec::new();

        visit::walk(root, &mut |node, ancestors| {
            let directive = match ancestors.last() {
                Some(NodeRef::Macro(parent)) => Some(*parent),
                _ => None,
            };
            match node {
                NodeRef::Dynamic(dynamic) => {
                    let defining = directive
                        .filter(|parent| parent.canonical == "org" && is_first_argument(parent, dynamic.id));
                    match defining {
                        Some(parent) => self.define_dynamic(parent, dynamic),
                        None => dynamic_refs.push((dynamic.name.value.clone(), Site::dynamic(dynamic))),
                    }
                }
                NodeRef::Symbol(symbol) => {
                    let defining = directive.filter(|parent| {
                        parent.canonical == "define"
                            && parent.arguments.len() >= 2
                            && is_first_argument(parent, symbol.id)
                    });
                    match defining {
                        Some(parent) => self.define_symbol(parent, symbol),
                        None => symbol_refs.push((symbol.value.clone(), Site::literal(symbol))),
                    }
                }
                _ => {}
            }
        });

        for (name, site) in dynamic_refs {
            match self.dynamics.get_mut(&name) {
                Some(entry) => entry.references.push(site),
                None => self.errors.push(CheckError::undefined_dynamic(&name, site.span)),
            }
        }

        for (name, site) in symbol_refs {
            if let Some(entry) = self.symbols.get_mut(&name) {
                entry.references.push(site);
                continue;
            }
            match self.registry.constant(&name) {
                Some(constant) => {
                    trace!(name = %name, value = constant.value, "builtin constant");
                    self.symbols.insert(
                        name,
                        SymbolEntry {
                            origin: SymbolOrigin::Builtin,
                            references: vec![site],
                            ty: ArgumentType::for_number(constant.value),
                            value: Value::Number(constant.value),
                        },
                    );
                }
                None => self.errors.push(CheckError::undefined_symbol(&name, site.span)),
            }
        }
    }

    fn define_dynamic(&mut self, directive: &Parent, dynamic: &Dynamic) {
        let name = &dynamic.name.value;
        if let Some(existing) = self.dynamics.get(name) {
            let previous = existing.definition.span;
            self.errors.push(CheckError::duplicate_dynamic(name, dynamic.span(), previous));
            return;
        }
        trace!(name = %name, offset = dynamic.offset, "dynamic");
        self.dynamics.insert(
            name.clone(),
            DynamicEntry {
                directive: Site::directive(directive),
                definition: Site::dynamic(dynamic),
                references: Vec::new(),
            },
        );
    }

    /// Redefinition moves the definition site. The first type and value stay,
    /// and so do the references.
    fn define_symbol(&mut self, directive: &Parent, symbol: &Literal) {
        let Some(value_argument) = directive.arguments.get(1) else {
            return;
        };
        let (ty, value) = self.resolve(value_argument, true);
        trace!(name = %symbol.value, %ty, %value, "define");

        let origin = SymbolOrigin::Define {
            directive: Site::directive(directive),
            definition: Site::literal(symbol),
        };
        match self.symbols.get_mut(&symbol.value) {
            Some(entry) => {
                trace!(name = %symbol.value, "redefined");
                entry.origin = origin;
            }
            None => {
                self.symbols.insert(
                    symbol.value.clone(),
                    SymbolEntry { origin, references: Vec::new(), ty, value },
                );
            }
        }
    }

    // =========================================================================
    // Pass 3: instructions
    // =========================================================================

    /// A macro whose name the parser had to synthesize is unknown under `""`.
    fn check_macro(&mut self, directive: &Parent) {
        let Some(template) = self.registry.macro_template(&directive.canonical) else {
            self.errors.push(CheckError::unknown_macro(&directive.name.value, directive.name.span));
            return;
        };

        if template.name == "raw" {
            if let [tag, value] = template.arguments {
                self.check_raw(directive, tag, value);
                return;
            }
        }

        for (argument, position) in directive.arguments.iter().zip(template.arguments) {
            self.check_argument(argument, &Expectation::from(position));
        }
        self.check_count(directive, template.arguments.len());
    }

    /// Conditional positions whose predicate fails for the values seen so far
    /// are skipped and not counted.
    fn check_command(&mut self, command: &Parent) {
        let Some(template) = self.registry.command_template(&command.canonical) else {
            return;
        };

        let mut values = Vec::new();
        let mut expected = 0;
        let mut arguments = command.arguments.iter();
        for position in template.arguments {
            if !position.is_present(&values) {
                trace!(command = template.name, argument = position.name, "skipped");
                continue;
            }
            expected += 1;
            let Some(argument) = arguments.next() else {
                continue;
            };
            let value = self.check_argument(argument, &Expectation::from(position));
            values.push(value);
        }
        self.check_count(command, expected);
    }

    /// `#raw` arguments are values, each optionally preceded by a type tag
    /// that sets the width of every value after it.
    fn check_raw(&mut self, directive: &Parent, tag: &MacroArgument, value: &MacroArgument) {
        let mut selected: Option<ArgumentType> = None;
        let mut pending: Option<&Literal> = None;

        for argument in &directive.arguments {
            if let Argument::Identifier(word) = argument {
                let listed = tag.enum_values.map_or(true, |values| {
                    values.iter().any(|v| *v == Value::Text(word.value.clone()))
                });
                match self.registry.raw_tag(&word.value).filter(|_| listed) {
                    Some(ty) => {
                        if let Some(previous) = pending.replace(word) {
                            self.errors.push(CheckError::dangling_raw_tag(&previous.value, previous.span));
                        }
                        selected = Some(ty);
                        self.resolved_values.insert(word.id, Value::Text(word.value.clone()));
                    }
                    None => {
                        self.errors.push(CheckError::value_not_allowed(word.value.clone(), tag.name, word.span));
                    }
                }
                continue;
            }

            pending = None;
            let single;
            let types: &[ArgumentType] = match selected {
                Some(ty) => {
                    single = [ty];
                    &single
                }
                None => value.types,
            };
            let expectation = Expectation {
                name: value.name,
                types,
                enum_values: value.enum_values,
                can_symbol: value.can_symbol,
                can_dynamic: value.can_dynamic,
            };
            self.check_argument(argument, &expectation);
        }

        if let Some(word) = pending {
            self.errors.push(CheckError::dangling_raw_tag(&word.value, word.span));
        }
        if directive.arguments.is_empty() {
            self.errors.push(CheckError::argument_count(1, 0, directive.span()));
        }
    }

    /// Check one argument against its position and return its resolved value.
    fn check_argument(&mut self, argument: &Argument, expected: &Expectation<'_>) -> Value {
        let allowed = allowed_types(expected.types);
        let can_symbol = expected.can_symbol && !allowed.contains(ArgumentType::Symbol);
        let (ty, value) = self.resolve(argument, can_symbol);

        if matches!(argument, Argument::Dynamic(_)) && !expected.can_dynamic {
            self.errors.push(CheckError::dynamic_not_allowed(expected.name, argument.span()));
            return value;
        }
        if self.already_reported(argument) {
            return value;
        }

        match expected.enum_values {
            Some(values) => {
                if !values.iter().any(|v| *v == value) {
                    self.errors.push(CheckError::value_not_allowed(value.to_string(), expected.name, argument.span()));
                }
            }
            None => {
                if !allowed.contains(ty) {
                    self.errors.push(CheckError::argument_type(describe_types(expected.types), ty, argument.span()));
                }
            }
        }
        value
    }

    /// Too many arguments: span the extras. Too few: span the whole instruction.
    fn check_count(&mut self, parent: &Parent, expected: usize) {
        let found = parent.arguments.len();
        if found == expected {
            return;
        }
        let span = match (parent.arguments.get(expected), parent.arguments.last()) {
            (Some(first_extra), Some(last)) => first_extra.span().to(last.span()),
            _ => parent.span(),
        };
        self.errors.push(CheckError::argument_count(expected, found, span));
    }

    /// Undefined symbols, malformed numbers and nameless dynamics already have
    /// a diagnostic of their own.
    fn already_reported(&self, argument: &Argument) -> bool {
        match argument {
            Argument::Dynamic(dynamic) => dynamic.name.value.is_empty(),
            Argument::Symbol(symbol) => {
                !self.symbols.contains_key(&symbol.value) && self.registry.constant(&symbol.value).is_none()
            }
            Argument::Number(number) => parse_number(&number.value).is_none(),
            _ => false,
        }
    }

    // =========================================================================
    // Pass 4: values
    // =========================================================================

    fn resolve(&mut self, argument: &Argument, can_symbol: bool) -> (ArgumentType, Value) {
        let id = argument.id();
        if let Some(hit) = self.memo.get(&id) {
            return hit.clone();
        }

        let resolved = match argument {
            Argument::Identifier(identifier) => (ArgumentType::Identifier, Value::Text(identifier.value.clone())),
            Argument::Symbol(symbol) => {
                // Depends on `can_symbol`, so never memoized.
                let resolved = self.resolve_symbol(&symbol.value, can_symbol);
                self.resolved_values.insert(id, resolved.1.clone());
                return resolved;
            }
            Argument::Number(number) => match parse_number(&number.value) {
                Some(n) => (ArgumentType::for_number(n), Value::Number(n)),
                None => {
                    self.errors.push(CheckError::invalid_number(&number.value, number.span));
                    (ArgumentType::Number, Value::Number(0))
                }
            },
            Argument::String(string) => (ArgumentType::String, Value::Text(string.value.clone())),
            Argument::Dynamic(dynamic) => (ArgumentType::Pointer, Value::Text(dynamic.name.value.clone())),
        };

        self.resolved_values.insert(id, resolved.1.clone());
        self.memo.insert(id, resolved.clone());
        resolved
    }

    /// A defined symbol substitutes its value; otherwise it stays a bare symbol.
    fn resolve_symbol(&self, name: &str, can_symbol: bool) -> (ArgumentType, Value) {
        if can_symbol {
            if let Some(entry) = self.symbols.get(name) {
                return (entry.ty, entry.value.clone());
            }
            if let Some(constant) = self.registry.constant(name) {
                return (ArgumentType::for_number(constant.value), Value::Number(constant.value));
            }
        }
        (ArgumentType::Symbol, Value::Text(name.to_string()))
    }
}

fn is_first_argument(parent: &Parent, id: NodeId) -> bool {
    parent.arguments.first().map(Argument::id) == Some(id)
}

/// `0x`-prefixed hex, otherwise the leading decimal digits. Saturates on
/// overflow. `None` for a bare `0x`.
pub fn parse_number(text: &str) -> Option<u64> {
    if let Some(digits) = text.strip_prefix("0x") {
        if digits.is_empty() {
            return None;
        }
        let mut value: u64 = 0;
        for ch in digits.chars() {
            let digit = ch.to_digit(16)?;
            value = value.saturating_mul(16).saturating_add(u64::from(digit));
        }
        return Some(value);
    }

    let mut value: u64 = 0;
    let mut any = false;
    for digit in text.chars().map_while(|ch| ch.to_digit(10)) {
        any = true;
        value = value.saturating_mul(10).saturating_add(u64::from(digit));
    }
    any.then_some(value)
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Reference commands: explain, templates.

use std::process::ExitCode;

use colored::Colorize;
use genscript_diagnostics::codes::ErrorCodeRegistry;
use genscript_templates::{CommandTemplate, MacroTemplate, Registry};

use crate::output;

pub fn cmd_explain(code: &str) -> ExitCode {
    let registry = ErrorCodeRegistry::default();
    let code = code.to_ascii_uppercase();

    let Some(info) = registry.get(&code) else {
        eprintln!("{}: unknown error code `{}`", output::error_label(), code);
        eprintln!();
        eprintln!("Error codes use the format E0NNN (e.g., E0210, E0302).");
        return ExitCode::FAILURE;
    };

    println!("{}[{}]: {}", "error".red().bold(), info.code.red().bold(), info.title.bold());
    println!();
    println!("  Category: {}", info.category);
    println!();
    for line in info.description.lines() {
        println!("  {}", line);
    }
    println!();
    if !info.example.is_empty() {
        println!("  {}:", "Example".bold());
        println!();
        for line in info.example.lines() {
            println!("    {}", line);
        }
        println!();
    }
    println!("  Run `genscript check <file>` to see this error in context.");
    ExitCode::SUCCESS
}

/// Without a name, list every macro and command. With one, describe it.
/// `#name` only matches macros.
pub fn cmd_templates(name: Option<&str>) -> ExitCode {
    let registry = Registry::builtin();

    let Some(name) = name else {
        list_templates(registry);
        return ExitCode::SUCCESS;
    };

    let macro_name = name.strip_prefix('#');
    let found_macro = registry.macro_template(macro_name.unwrap_or(name));
    let found_command = macro_name.is_none().then(|| registry.command_template(name)).flatten();

    match (found_command, found_macro) {
        (Some(template), _) => describe_command(template),
        (None, Some(template)) => describe_macro(template),
        (None, None) => {
            eprintln!("{}: no macro or command named `{}`", output::error_label(), name);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn list_templates(registry: &Registry) {
    println!("{}", output::section_header("Macros:"));
    for name in registry.macro_names() {
        if let Some(signature) = registry.signature(&format!("#{}", name)) {
            println!("  {}", output::command(&signature));
        }
    }
    println!();
    println!("{}", output::section_header("Commands:"));
    for name in registry.command_names() {
        if let Some(signature) = registry.signature(name) {
            println!("  {}", output::command(&signature));
        }
    }
}

fn describe_macro(template: &MacroTemplate) {
    println!("{}", output::title(&template.signature()));
    println!();
    println!("  {}", template.description);
    if !template.aliases.is_empty() {
        println!("  Aliases: {}", template.aliases.join(", "));
    }

    if !template.arguments.is_empty() {
        println!();
        println!("  {}", "Arguments:".bold());
        for argument in template.arguments {
            let types: Vec<&str> = argument.types.iter().map(|ty| ty.name()).collect();
            let mut line = format!("    {:<10} {}", output::arg(argument.name), types.join(" | "));
            if let Some(values) = argument.enum_values {
                let values: Vec<String> = values.iter().map(ToString::to_string).collect();
                line.push_str(&format!(" (one of {})", values.join(", ")));
            }
            if !argument.can_dynamic {
                line.push_str(" (static only)");
            }
            println!("{}", line);
        }
    }

    if let Some(example) = template.example {
        println!();
        println!("  {}:", "Example".bold());
        for line in example.content.lines() {
            println!("    {}", line);
        }
        if !example.description.is_empty() {
            println!("  {}", example.description.dimmed());
        }
    }
}

fn describe_command(template: &CommandTemplate) {
    println!("{}", output::title(&template.signature()));
    println!();
    println!("  {}", template.description);
    if !template.aliases.is_empty() {
        println!("  Aliases: {}", template.aliases.join(", "));
    }
    if let Some(opcode) = template.opcode {
        println!("  Opcode: 0x{:02X}", opcode);
    }
    if let Some(bytes) = template.bytes {
        println!("  Size: {} byte(s)", bytes);
    }
    if template.ending {
        println!("  Ends the script.");
    }

    if !template.arguments.is_empty() {
        println!();
        println!("  {}", "Arguments:".bold());
        for argument in template.arguments {
            let conditional = if argument.when.is_some() { " (conditional)" } else { "" };
            println!(
                "    {:<12} {:<8} {}{}",
                output::arg(argument.name),
                argument.ty.name(),
                argument.description,
                conditional.dimmed()
            );
        }
    }
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Analysis commands: lex, parse, check.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use genscript_ast::node::Item;
use genscript_diagnostics::{Diagnostic, ToDiagnostic};
use tracing::debug;

use crate::{output, show_diagnostics, Format};

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Report diagnostics and pick the exit code.
fn finish(diags: &[Diagnostic], source: &str, path: &Path, phase: &str, format: Format) -> ExitCode {
    let file = path.display().to_string();
    if format == Format::Json {
        show_diagnostics(diags, source, &file, format);
    } else if diags.is_empty() {
        println!("\n{}", output::banner_ok(phase));
    } else {
        show_diagnostics(diags, source, &file, format);
        eprintln!("{}", output::banner_fail(phase, diags.len()));
    }

    if diags.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub fn cmd_lex(path: &Path, format: Format) -> Result<ExitCode> {
    let source = read_source(path)?;
    let result = genscript_lexer::tokenize(&source);

    if format == Format::Human {
        println!("{} Tokens ({}) {}\n", "===".dimmed(), result.tokens.len(), "===".dimmed());
        for tok in &result.tokens {
            println!("{:4}:{:<4} {:?}", tok.span.start, tok.span.end, tok.kind);
        }
    }

    let diags: Vec<Diagnostic> = result.errors.iter().map(|e| e.to_diagnostic()).collect();
    Ok(finish(&diags, &source, path, "Lex", format))
}

pub fn cmd_parse(path: &Path, format: Format) -> Result<ExitCode> {
    let source = read_source(path)?;
    let result = genscript_parser::parse(&source);

    if format == Format::Human {
        println!("{} Tree ({} items) {}\n", "===".dimmed(), result.root.children.len(), "===".dimmed());
        for item in &result.root.children {
            let span = item.span();
            let summary = match item {
                Item::Block(block) => format!("block `{}` ({} commands)", source_line(&source, span.start), block.children.len()),
                Item::Macro(parent) => format!("macro #{}", parent.name.value),
                Item::Command(parent) => format!("command {}", parent.name.value),
                Item::Argument(argument) => format!("stray {}", argument.kind_name()),
            };
            println!("{:4}:{:<4} {}", span.start, span.end, summary);
        }
    }

    let diags: Vec<Diagnostic> = result
        .lex_errors
        .iter()
        .map(|e| e.to_diagnostic())
        .chain(result.errors.iter().map(|e| e.to_diagnostic()))
        .collect();
    Ok(finish(&diags, &source, path, "Parse", format))
}

pub fn cmd_check(path: &Path, format: Format) -> Result<ExitCode> {
    let source = read_source(path)?;
    let analysis = genscript_diagnostics::analyze(&source);
    debug!(diagnostics = analysis.diagnostics.len(), "analyzed {}", path.display());

    if format == Format::Human {
        let mut dynamics: Vec<_> = analysis.check.dynamics.iter().collect();
        dynamics.sort_by_key(|(_, entry)| entry.definition.span.start);
        println!("{} Dynamic offsets ({}) {}\n", "===".dimmed(), dynamics.len(), "===".dimmed());
        for (name, entry) in dynamics {
            println!("  @{:<16} {} reference(s)", name, entry.references.len());
        }

        let mut symbols: Vec<_> = analysis.check.symbols.iter().collect();
        symbols.sort_by(|a, b| a.0.cmp(b.0));
        println!("\n{} Symbols ({}) {}\n", "===".dimmed(), symbols.len(), "===".dimmed());
        for (name, entry) in symbols {
            println!("  {:<17} {} = {}", name, entry.ty, entry.value);
        }
    }

    Ok(finish(&analysis.diagnostics, &source, path, "Check", format))
}

/// First line of source starting at `offset`.
fn source_line(source: &str, offset: usize) -> &str {
    let rest = source.get(offset..).unwrap_or("");
    rest.lines().next().unwrap_or("").trim_end()
}

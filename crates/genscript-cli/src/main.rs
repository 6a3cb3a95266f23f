// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! genscript CLI: lex, parse and check event scripts.

mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use genscript_diagnostics::formatter::DiagnosticFormatter;
use genscript_diagnostics::json::{to_json_report, to_json_string};
use genscript_diagnostics::Diagnostic;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "genscript")]
#[command(version)]
#[command(about = "Front end for gen-3 event scripts: lexer, parser and checker")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Diagnostic output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    format: Format,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Human,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Tokenize a script and print the tokens
    Lex { file: PathBuf },
    /// Parse a script and print the tree
    Parse { file: PathBuf },
    /// Run every check and report diagnostics
    Check { file: PathBuf },
    /// Explain an error code such as E0302
    Explain { code: String },
    /// List macros and commands, or describe one
    Templates { name: Option<String> },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    output::init(cli.no_color);

    let result = match cli.command {
        Command::Lex { file } => commands::analysis::cmd_lex(&file, cli.format),
        Command::Parse { file } => commands::analysis::cmd_parse(&file, cli.format),
        Command::Check { file } => commands::analysis::cmd_check(&file, cli.format),
        Command::Explain { code } => Ok(commands::tools::cmd_explain(&code)),
        Command::Templates { name } => Ok(commands::tools::cmd_templates(name.as_deref())),
    };

    result.unwrap_or_else(|err| {
        eprintln!("{}: {:#}", output::error_label(), err);
        ExitCode::FAILURE
    })
}

/// Print diagnostics in the requested format. Human output goes to stderr,
/// the JSON report to stdout.
pub fn show_diagnostics(diagnostics: &[Diagnostic], source: &str, file: &str, format: Format) {
    match format {
        Format::Human => {
            let formatter = DiagnosticFormatter::new(source).with_file_name(file);
            for diagnostic in diagnostics {
                eprintln!("{}", formatter.format(diagnostic));
            }
        }
        Format::Json => {
            let report = to_json_report(diagnostics, source, file);
            println!("{}", to_json_string(&report));
        }
    }
}

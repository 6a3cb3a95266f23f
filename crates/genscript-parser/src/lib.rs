// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for genscript.
//!
//! Transforms a token stream into an abstract syntax tree.

mod hints;
mod parser;

pub use parser::{parse, parse_with, ParseError, ParseResult, Parser};

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Semantic error types.

use genscript_ast::Span;
use genscript_templates::ArgumentType;
use thiserror::Error;

/// A semantic error found by the checker.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct CheckError {
    pub kind: CheckErrorKind,
    pub span: Span,
}

impl CheckError {
    pub fn new(kind: CheckErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn not_in_block(name: &str, span: Span) -> Self {
        Self::new(CheckErrorKind::NotInBlock { name: name.to_string() }, span)
    }

    pub fn unexpected_root_node(kind: &'static str, span: Span) -> Self {
        Self::new(CheckErrorKind::UnexpectedRootNode { kind }, span)
    }

    pub fn duplicate_dynamic(name: &str, span: Span, previous: Span) -> Self {
        Self::new(CheckErrorKind::DuplicateDynamic { name: name.to_string(), previous }, span)
    }

    pub fn undefined_dynamic(name: &str, span: Span) -> Self {
        Self::new(CheckErrorKind::UndefinedDynamic { name: name.to_string() }, span)
    }

    pub fn undefined_symbol(name: &str, span: Span) -> Self {
        Self::new(CheckErrorKind::UndefinedSymbol { name: name.to_string() }, span)
    }

    pub fn unknown_macro(name: &str, span: Span) -> Self {
        Self::new(CheckErrorKind::UnknownMacro { name: name.to_string() }, span)
    }

    pub fn argument_count(expected: usize, found: usize, span: Span) -> Self {
        Self::new(CheckErrorKind::ArgumentCount { expected, found }, span)
    }

    pub fn argument_type(expected: String, found: ArgumentType, span: Span) -> Self {
        Self::new(CheckErrorKind::ArgumentType { expected, found }, span)
    }

    pub fn value_not_allowed(value: String, argument: &str, span: Span) -> Self {
        Self::new(CheckErrorKind::ValueNotAllowed { value, argument: argument.to_string() }, span)
    }

    pub fn dynamic_not_allowed(argument: &str, span: Span) -> Self {
        Self::new(CheckErrorKind::DynamicNotAllowed { argument: argument.to_string() }, span)
    }

    pub fn invalid_number(text: &str, span: Span) -> Self {
        Self::new(CheckErrorKind::InvalidNumber { text: text.to_string() }, span)
    }

    pub fn dangling_raw_tag(tag: &str, span: Span) -> Self {
        Self::new(CheckErrorKind::DanglingRawTag { tag: tag.to_string() }, span)
    }
}

/// The kind of semantic error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckErrorKind {
    // Structure
    #[error("Command \"{name}\" is not inside a block.")]
    NotInBlock { name: String },

    #[error("Expected \"macro\" or \"command\" node at the root, got \"{kind}\"")]
    UnexpectedRootNode { kind: &'static str },

    // Identifiers
    #[error("Dynamic offset \"@{name}\" is already defined.")]
    DuplicateDynamic { name: String, previous: Span },

    #[error("Dynamic offset \"@{name}\" is not defined.")]
    UndefinedDynamic { name: String },

    #[error("Symbol \"{name}\" is not defined.")]
    UndefinedSymbol { name: String },

    // Instructions
    #[error("Unknown macro \"{name}\".")]
    UnknownMacro { name: String },

    #[error("Expected {expected} argument(s), got {found}.")]
    ArgumentCount { expected: usize, found: usize },

    /// `expected` is already quoted, e.g. `"number" or "string"`.
    #[error("Expected argument type {expected}, got \"{found}\".")]
    ArgumentType { expected: String, found: ArgumentType },

    #[error("Value \"{value}\" is not allowed for argument \"{argument}\".")]
    ValueNotAllowed { value: String, argument: String },

    #[error("Dynamic offset is not allowed for argument \"{argument}\".")]
    DynamicNotAllowed { argument: String },

    #[error("Invalid number \"{text}\".")]
    InvalidNumber { text: String },

    #[error("Type tag \"{tag}\" is not followed by a value.")]
    DanglingRawTag { tag: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let span = Span::new(0, 1);
        assert_eq!(
            CheckError::unexpected_root_node("number", span).to_string(),
            "Expected \"macro\" or \"command\" node at the root, got \"number\""
        );
        assert_eq!(
            CheckError::argument_type("\"byte\"".into(), ArgumentType::Identifier, span).to_string(),
            "Expected argument type \"byte\", got \"identifier\"."
        );
        assert_eq!(
            CheckError::duplicate_dynamic("1", span, span).to_string(),
            "Dynamic offset \"@1\" is already defined."
        );
        assert_eq!(
            CheckError::argument_count(2, 3, span).to_string(),
            "Expected 2 argument(s), got 3."
        );
    }
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The parser: a single left-to-right pass driven by a stack of open parents.
//!
//! Macros and commands never close explicitly. The most recently opened
//! parent receives every following argument until another one opens, so the
//! stack only ever grows and its top is the attachment point.

use genscript_ast::node::{Argument, Block, Dynamic, Item, Literal, Parent, Root};
use genscript_ast::token::{Token, TokenKind};
use genscript_ast::{NodeId, Span};
use genscript_lexer::LexError;
use genscript_templates::Registry;
use tracing::{debug, trace};

/// Where an open parent lives inside the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParentSlot {
    /// `root.children[i]` is a `Macro`.
    RootMacro(usize),
    /// `root.children[i]` is a `Command` outside any block.
    RootCommand(usize),
    /// Label of the block at `root.children[i]`.
    BlockLabel(usize),
    /// `children[j]` of the block at `root.children[i]`.
    BlockCommand(usize, usize),
}

/// The parser for genscript token streams.
pub struct Parser<'r> {
    tokens: Vec<Token>,
    pos: usize,
    registry: &'r Registry,
    root: Root,
    /// Open parents, most recent last.
    parents: Vec<ParentSlot>,
    /// Index into `root.children` of the block commands attach to.
    current_block: Option<usize>,
    /// Collected errors during parsing
    errors: Vec<ParseError>,
    /// Counter for generating unique NodeIds
    next_node_id: u32,
}

impl<'r> Parser<'r> {
    pub fn new(tokens: Vec<Token>, text: &str, registry: &'r Registry) -> Self {
        Self {
            tokens,
            pos: 0,
            registry,
            root: Root::new(NodeId(0), text),
            parents: Vec::new(),
            current_block: None,
            errors: Vec::new(),
            next_node_id: 1,
        }
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// The token after the current one, ignoring the implicit end of input.
    fn lookahead(&self) -> Option<&Token> {
        self.tokens
            .get(self.pos + 1)
            .filter(|token| !matches!(token.kind, TokenKind::Eof))
    }

    // =========================================================================
    // Main loop
    // =========================================================================

    /// Parse the whole token stream. Never stops on an error; only `#break`
    /// or the end of input ends the pass.
    pub fn parse(mut self) -> ParseResult {
        while let Some(token) = self.current().cloned() {
            match token.kind {
                TokenKind::Hash => {
                    if self.parse_macro(&token) {
                        break;
                    }
                }
                TokenKind::At => self.parse_dynamic(&token),
                TokenKind::Equal => {
                    let name = Literal::new(self.next_id(), token.span.start, "=");
                    self.open_command(name, "=".to_string());
                    self.pos += 1;
                }
                TokenKind::Identifier(ref value) => {
                    let name = Literal::new(self.next_id(), token.span.start, value.as_str());
                    match self.registry.canonical_command(value) {
                        Some(canonical) => self.open_command(name, canonical.to_string()),
                        None => self.attach(Argument::Identifier(name)),
                    }
                    self.pos += 1;
                }
                TokenKind::Symbol(ref value) => {
                    let symbol = Literal::new(self.next_id(), token.span.start, value.as_str());
                    self.attach(Argument::Symbol(symbol));
                    self.pos += 1;
                }
                TokenKind::Number(ref value) => {
                    let number = Literal::new(self.next_id(), token.span.start, value.as_str());
                    self.attach(Argument::Number(number));
                    self.pos += 1;
                }
                TokenKind::String(ref value) => {
                    let string = Literal::new(self.next_id(), token.span.start, value.as_str());
                    self.attach(Argument::String(string));
                    self.pos += 1;
                }
                TokenKind::Eof => break,
            }
        }

        debug!(
            children = self.root.children.len(),
            nodes = self.next_node_id,
            errors = self.errors.len(),
            "parsed"
        );

        ParseResult {
            root: self.root,
            lex_errors: Vec::new(),
            errors: self.errors,
        }
    }

    /// `#name`. Returns true when the macro stops parsing.
    fn parse_macro(&mut self, hash: &Token) -> bool {
        let id = self.next_id();
        let name = self.expect_name(hash, |kind| matches!(kind, TokenKind::Identifier(_)));
        let canonical = self
            .registry
            .canonical_macro(&name.value)
            .map(str::to_string)
            .unwrap_or_else(|| name.value.clone());
        trace!(name = %name.value, %canonical, offset = hash.span.start, "macro");

        let stop = canonical == "break";
        let label = Parent::new(id, hash.span.start, name, canonical);
        let index = self.root.children.len();

        if label.canonical == "org" {
            let block = Block::new(self.next_id(), label);
            self.root.children.push(Item::Block(block));
            self.current_block = Some(index);
            self.parents.push(ParentSlot::BlockLabel(index));
        } else {
            self.root.children.push(Item::Macro(label));
            self.current_block = None;
            self.parents.push(ParentSlot::RootMacro(index));
        }

        if stop {
            debug!(offset = hash.span.start, "stopped at #break");
        }
        stop
    }

    /// `@name`.
    fn parse_dynamic(&mut self, at: &Token) {
        let id = self.next_id();
        let name = self.expect_name(at, |kind| {
            matches!(kind, TokenKind::Identifier(_) | TokenKind::Number(_))
        });
        self.attach(Argument::Dynamic(Dynamic { id, offset: at.span.start, name }));
    }

    /// Consume the sigil and the name after it. When the name is missing the
    /// offending token is left in place and an empty name is synthesized at
    /// the end of the sigil.
    fn expect_name(&mut self, sigil: &Token, accepts: impl Fn(&TokenKind) -> bool) -> Literal {
        let next = self.lookahead().cloned();
        match next {
            Some(token) if accepts(&token.kind) => {
                self.pos += 2;
                Literal::new(self.next_id(), token.span.start, token.text())
            }
            found => {
                self.errors.push(ParseError::expected_after(&sigil.kind, sigil.span, found.as_ref()));
                self.pos += 1;
                Literal::new(self.next_id(), sigil.span.end, "")
            }
        }
    }

    // =========================================================================
    // Attachment
    // =========================================================================

    /// Open a command inside the current block, or at the root when no block is open.
    fn open_command(&mut self, name: Literal, canonical: String) {
        let command = Parent::new(self.next_id(), name.span.start, name, canonical);
        trace!(name = %command.name.value, offset = command.offset, "command");

        let block = self.current_block.and_then(|index| match self.root.children.get_mut(index) {
            Some(Item::Block(block)) => Some((index, block)),
            _ => None,
        });
        let slot = match block {
            Some((index, block)) => {
                block.children.push(command);
                ParentSlot::BlockCommand(index, block.children.len() - 1)
            }
            None => {
                self.root.children.push(Item::Command(command));
                ParentSlot::RootCommand(self.root.children.len() - 1)
            }
        };
        self.parents.push(slot);
    }

    /// Append to the most recently opened parent, or to the root when none is open.
    fn attach(&mut self, argument: Argument) {
        let top = self.parents.last().copied();
        match top.and_then(|slot| self.parent_mut(slot)) {
            Some(parent) => parent.arguments.push(argument),
            None => self.root.children.push(Item::Argument(argument)),
        }
    }

    fn parent_mut(&mut self, slot: ParentSlot) -> Option<&mut Parent> {
        match slot {
            ParentSlot::RootMacro(i) | ParentSlot::RootCommand(i) => match self.root.children.get_mut(i)? {
                Item::Macro(parent) | Item::Command(parent) => Some(parent),
                _ => None,
            },
            ParentSlot::BlockLabel(i) => match self.root.children.get_mut(i)? {
                Item::Block(block) => Some(&mut block.label),
                _ => None,
            },
            ParentSlot::BlockCommand(i, j) => match self.root.children.get_mut(i)? {
                Item::Block(block) => block.children.get_mut(j),
                _ => None,
            },
        }
    }
}

/// Tokenize and parse `text` against the built-in registry.
pub fn parse(text: &str) -> ParseResult {
    parse_with(text, Registry::builtin())
}

/// Tokenize and parse `text` against `registry`.
pub fn parse_with(text: &str, registry: &Registry) -> ParseResult {
    let lexed = genscript_lexer::tokenize(text);
    let mut result = Parser::new(lexed.tokens, text, registry).parse();
    result.lex_errors = lexed.errors;
    result
}

/// Result of parsing: the tree plus every error found on the way.
#[derive(Debug)]
pub struct ParseResult {
    pub root: Root,
    pub lex_errors: Vec<LexError>,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Returns true if lexing and parsing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.lex_errors.is_empty() && self.errors.is_empty()
    }
}

/// A parser error with location and friendly message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl ParseError {
    /// A sigil not followed by a usable name. Points at the offending token,
    /// or at the end of the sigil when the input ran out.
    fn expected_after(sigil: &TokenKind, sigil_span: Span, found: Option<&Token>) -> Self {
        let expected = match sigil {
            TokenKind::At => "\"identifier\" or \"number\"",
            _ => "\"identifier\"",
        };
        let sigil_text = match sigil {
            TokenKind::At => "@",
            _ => "#",
        };
        let (message, span) = match found {
            Some(token) => (
                format!(
                    "Expected {} token after \"{}\", got \"{}\".",
                    expected,
                    sigil_text,
                    token.kind.display_name()
                ),
                token.span,
            ),
            None => (
                format!("Expected {} token after \"{}\".", expected, sigil_text),
                Span::empty(sigil_span.end),
            ),
        };
        let found_kind = found.map(|token| &token.kind).unwrap_or(&TokenKind::Eof);
        let hint = crate::hints::for_sigil(sigil, found_kind).map(String::from);
        Self { span, message, hint }
    }
}

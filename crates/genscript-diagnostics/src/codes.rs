// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error code registry.
//!
//! Maps error codes (E0001, E0302, etc.) to titles, categories and
//! explanations. Used by `genscript explain <code>` and for error display.

use std::collections::HashMap;

/// Registry of all known error codes.
pub struct ErrorCodeRegistry {
    codes: HashMap<&'static str, ErrorCodeInfo>,
}

/// Information about a single error code.
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
    pub description: &'static str,
    /// Offending snippet; empty when there is nothing useful to show.
    pub example: &'static str,
}

/// Error category for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Structure,
    Resolution,
    Instruction,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexical => write!(f, "Lexical"),
            ErrorCategory::Syntax => write!(f, "Syntax"),
            ErrorCategory::Structure => write!(f, "Structure"),
            ErrorCategory::Resolution => write!(f, "Resolution"),
            ErrorCategory::Instruction => write!(f, "Instruction"),
        }
    }
}

macro_rules! register_codes {
    ($($code:literal => ($title:literal, $cat:expr, $desc:literal, $example:literal)),* $(,)?) => {{
        let mut map = HashMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
                description: $desc,
                example: $example,
            });
        )*
        map
    }};
}

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                // Lexer errors (E00xx)
                "E0001" => ("unexpected character", Lexical,
                    "The character cannot start any token. Comments are not part of the\nlanguage, so `;` and `//` are rejected too.",
                    "#org &1"),

                // Parser errors (E01xx)
                "E0100" => ("missing name after sigil", Syntax,
                    "`#` must be followed by a macro name and `@` by a label made of\nletters or digits.",
                    "#org @\"main\""),

                // Structure (E020x)
                "E0200" => ("command outside a block", Structure,
                    "Commands only make sense inside a block, which starts at an `#org`\nmacro and runs until the next macro.",
                    "msgbox 0xA 0x2"),
                "E0201" => ("argument at the root", Structure,
                    "A value appeared before any macro or command could take it.",
                    "0xA\n#org 0x800000"),

                // Resolution (E021x)
                "E0210" => ("duplicate dynamic offset", Resolution,
                    "Each `@label` may be the target of exactly one `#org`.",
                    "#org @main\nend\n#org @main"),
                "E0211" => ("undefined dynamic offset", Resolution,
                    "The `@label` is used but no `#org @label` defines it.",
                    "#org @main\ncall @helper\nend"),
                "E0212" => ("undefined symbol", Resolution,
                    "The constant is neither built in nor declared with `#define`.",
                    "#org 0x800000\nmsgbox 0x880000 MSG_FATE"),

                // Instructions (E03xx)
                "E0300" => ("unknown macro", Instruction,
                    "No macro with this name or alias exists.",
                    "#orgg 0x800000"),
                "E0301" => ("wrong number of arguments", Instruction,
                    "The instruction takes a fixed number of arguments. For commands with\nconditional arguments, such as `trainerbattle`, the count depends on\nearlier argument values.",
                    "#org 0x800000\nmsgbox 0x880000 0x2 0x3"),
                "E0302" => ("mismatched argument type", Instruction,
                    "Numbers are classified by range: up to 0xFF is a byte, up to 0xFFFF a\nword, up to 0xFFFFFFFF a dword. Wider types accept narrower values.",
                    "#org 0x800000\nmsgbox 0x880000 0x200"),
                "E0303" => ("value not allowed", Instruction,
                    "The argument only accepts a fixed set of values.",
                    "#freespace 0x1"),
                "E0304" => ("dynamic offset not allowed", Instruction,
                    "This argument must be a static address known before compilation.",
                    "#erase @main 0x10"),
                "E0305" => ("invalid number", Instruction,
                    "A hexadecimal number needs at least one digit after `0x`.",
                    "#org 0x"),
                "E0306" => ("type tag without value", Instruction,
                    "In `#raw`, a type tag sets the width of the values after it, so it\nmust be followed by at least one value.",
                    "#raw 0x1 word"),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }

    pub fn all(&self) -> impl Iterator<Item = &ErrorCodeInfo> {
        self.codes.values()
    }
}

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Raw type tags and built-in constants.

use crate::types::{ArgumentType, EnumValue};

/// Type tags accepted inside `#raw`, abbreviations included.
pub const RAW_TAGS: &[(&str, ArgumentType)] = &[
    ("byte", ArgumentType::Byte),
    ("b", ArgumentType::Byte),
    ("word", ArgumentType::Word),
    ("w", ArgumentType::Word),
    ("half", ArgumentType::Word),
    ("dword", ArgumentType::Dword),
    ("d", ArgumentType::Dword),
    ("long", ArgumentType::Dword),
    ("l", ArgumentType::Dword),
    ("pointer", ArgumentType::Pointer),
    ("ptr", ArgumentType::Pointer),
    ("p", ArgumentType::Pointer),
];

pub(crate) const RAW_TAG_VALUES: &[EnumValue] = &[
    EnumValue::Text("byte"),
    EnumValue::Text("b"),
    EnumValue::Text("word"),
    EnumValue::Text("w"),
    EnumValue::Text("half"),
    EnumValue::Text("dword"),
    EnumValue::Text("d"),
    EnumValue::Text("long"),
    EnumValue::Text("l"),
    EnumValue::Text("pointer"),
    EnumValue::Text("ptr"),
    EnumValue::Text("p"),
];

/// A symbol every script can use without `#define`.
#[derive(Debug, Clone, Copy)]
pub struct Constant {
    pub name: &'static str,
    pub value: u64,
    pub description: &'static str,
}

pub(crate) const CONSTANTS: &[Constant] = &[
    // msgbox types
    Constant { name: "MSG_OBTAIN", value: 0x0, description: "Item obtained message box" },
    Constant { name: "MSG_FIND", value: 0x1, description: "Item found message box" },
    Constant { name: "MSG_FACE", value: 0x2, description: "Faces the player, locks movement while shown" },
    Constant { name: "MSG_SIGN", value: 0x3, description: "Sign post message box" },
    Constant { name: "MSG_KEEPOPEN", value: 0x4, description: "Stays open after the text ends" },
    Constant { name: "MSG_YESNO", value: 0x5, description: "Asks a yes/no question" },
    Constant { name: "MSG_NORMAL", value: 0x6, description: "Plain message box" },
    // Script variables
    Constant { name: "PLAYERFACING", value: 0x800C, description: "Direction the player faces" },
    Constant { name: "LASTRESULT", value: 0x800D, description: "Result of the last command" },
    Constant { name: "LASTTALKED", value: 0x800F, description: "Last person talked to" },
    // Answers
    Constant { name: "NO", value: 0x0, description: "LASTRESULT after answering no" },
    Constant { name: "YES", value: 0x1, description: "LASTRESULT after answering yes" },
];

// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Built-in `#macro` templates.

use crate::constants::RAW_TAG_VALUES;
use crate::template::{Example, MacroArgument, MacroTemplate};
use crate::types::{ArgumentType::*, EnumValue};

const FREESPACE_BYTES: &[EnumValue] = &[EnumValue::Number(0x00), EnumValue::Number(0xFF)];

pub(crate) const MACROS: &[MacroTemplate] = &[
    MacroTemplate {
        name: "dynamic",
        aliases: &[],
        description: "Sets the base address the compiler searches from when placing dynamic offsets.",
        example: Some(Example {
            content: "#dynamic 0x720000",
            description: "Free space is searched for starting at 0x720000.",
        }),
        hoisting: true,
        arguments: &[MacroArgument::new("offset", &[Pointer]).no_dynamic()],
    },
    MacroTemplate {
        name: "org",
        aliases: &["seek"],
        description: "Starts a block of commands at a static address or at a dynamic `@label`.",
        example: Some(Example {
            content: "#org 0x800000\n#org @main",
            description: "The first block is written at 0x800000; the second gets an address assigned to the label `main`.",
        }),
        hoisting: false,
        arguments: &[MacroArgument::new("offset", &[Pointer])],
    },
    MacroTemplate {
        name: "define",
        aliases: &[],
        description: "Declares a symbolic constant usable anywhere a value of its type is accepted.",
        example: Some(Example {
            content: "#define LOCAL_FLAG 0x200",
            description: "`LOCAL_FLAG` can now stand in for 0x200.",
        }),
        hoisting: true,
        arguments: &[
            MacroArgument::new("name", &[Symbol]).no_symbol().no_dynamic(),
            MacroArgument::new("value", &[Number, String]),
        ],
    },
    MacroTemplate {
        name: "include",
        aliases: &[],
        description: "Includes a header file of definitions.",
        example: Some(Example { content: "#include \"stditems.rbh\"", description: "" }),
        hoisting: true,
        arguments: &[MacroArgument::new("file", &[String]).no_dynamic()],
    },
    MacroTemplate {
        name: "raw",
        aliases: &["db"],
        description: "Writes values verbatim. Each value takes the width of the last type tag before it.",
        example: Some(Example {
            content: "#raw 0x1 word 0x200 0x300 pointer @main",
            description: "One byte, two words and one pointer.",
        }),
        hoisting: false,
        arguments: &[
            MacroArgument::new("type", &[Identifier]).one_of(RAW_TAG_VALUES),
            MacroArgument::new("value", &[Byte]),
        ],
    },
    MacroTemplate {
        name: "break",
        aliases: &[],
        description: "Stops compilation here; everything after it is ignored.",
        example: None,
        hoisting: false,
        arguments: &[],
    },
    MacroTemplate {
        name: "erase",
        aliases: &[],
        description: "Fills a range of the ROM with the free space byte.",
        example: Some(Example { content: "#erase 0x800000 0x40", description: "" }),
        hoisting: false,
        arguments: &[
            MacroArgument::new("offset", &[Pointer]).no_dynamic(),
            MacroArgument::new("length", &[Number]),
        ],
    },
    MacroTemplate {
        name: "freespace",
        aliases: &[],
        description: "Sets the byte that marks free space in the ROM.",
        example: Some(Example { content: "#freespace 0xFF", description: "" }),
        hoisting: true,
        arguments: &[MacroArgument::new("byte", &[Byte]).one_of(FREESPACE_BYTES)],
    },
    MacroTemplate {
        name: "reserve",
        aliases: &[],
        description: "Reserves a number of bytes at the current position.",
        example: None,
        hoisting: false,
        arguments: &[MacroArgument::new("length", &[Word])],
    },
    MacroTemplate {
        name: "remove",
        aliases: &[],
        description: "Removes the script at an offset.",
        example: None,
        hoisting: false,
        arguments: &[MacroArgument::new("offset", &[Pointer]).no_dynamic()],
    },
    MacroTemplate {
        name: "removeall",
        aliases: &[],
        description: "Removes the script at an offset along with all the data it points to.",
        example: None,
        hoisting: false,
        arguments: &[MacroArgument::new("offset", &[Pointer]).no_dynamic()],
    },
];

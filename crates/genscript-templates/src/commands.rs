// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Built-in command templates.
//!
//! Opcodes and sizes follow the generation-3 script engine. Compound commands
//! (`msgbox`, `giveitem`) have no opcode of their own; the compiler expands
//! them into several primitive commands.

use crate::template::{CommandArgument as Arg, CommandTemplate};
use crate::types::{ArgumentType::*, Value};

// ---------------------------------------------------------------------------
// Conditional arguments
// ---------------------------------------------------------------------------

fn battle_kind(values: &[Value]) -> Option<u64> {
    values.first().and_then(Value::as_number)
}

fn has_intro(values: &[Value]) -> bool {
    battle_kind(values).map_or(true, |kind| kind != 3 && kind != 9)
}

fn has_not_enough(values: &[Value]) -> bool {
    battle_kind(values).map_or(false, |kind| matches!(kind, 4 | 6 | 7 | 8))
}

fn has_continue(values: &[Value]) -> bool {
    battle_kind(values).map_or(false, |kind| matches!(kind, 1 | 2 | 6 | 8))
}

const fn op(
    name: &'static str,
    opcode: u8,
    bytes: u8,
    description: &'static str,
    arguments: &'static [Arg],
) -> CommandTemplate {
    CommandTemplate {
        name,
        aliases: &[],
        opcode: Some(opcode),
        description,
        bytes: Some(bytes),
        ending: false,
        arguments,
    }
}

const fn ending(mut template: CommandTemplate) -> CommandTemplate {
    template.ending = true;
    template
}

const fn alias(mut template: CommandTemplate, aliases: &'static [&'static str]) -> CommandTemplate {
    template.aliases = aliases;
    template
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

pub(crate) const COMMANDS: &[CommandTemplate] = &[
    CommandTemplate {
        name: "=",
        aliases: &[],
        opcode: None,
        description: "Raw text inserter. The text is converted to the game's encoding when written.",
        bytes: None,
        ending: false,
        arguments: &[Arg::new("text", String, "Text to insert")],
    },
    // Flow control
    op("nop", 0x00, 1, "Does nothing.", &[]),
    op("nop1", 0x01, 1, "Does nothing.", &[]),
    ending(op("end", 0x02, 1, "Ends the execution of the script.", &[])),
    ending(op("return", 0x03, 1, "Jumps back to after the last-executed call statement.", &[])),
    op("call", 0x04, 5, "Continues script execution from another point. Can be returned to.", &[
        Arg::new("offset", Pointer, "Script to call"),
    ]),
    ending(op("goto", 0x05, 5, "Continues script execution from another point.", &[
        Arg::new("offset", Pointer, "Script to jump to"),
    ])),
    alias(op("if1", 0x06, 6, "If the last comparison returned a certain value, jumps to another script.", &[
        Arg::new("condition", Byte, "Comparison result to test for"),
        Arg::new("offset", Pointer, "Script to jump to"),
    ]), &["if"]),
    op("if2", 0x07, 6, "If the last comparison returned a certain value, calls another script.", &[
        Arg::new("condition", Byte, "Comparison result to test for"),
        Arg::new("offset", Pointer, "Script to call"),
    ]),
    ending(op("gotostd", 0x08, 2, "Jumps to a built-in function.", &[
        Arg::new("function", Byte, "Function index"),
    ])),
    op("callstd", 0x09, 2, "Calls a built-in function.", &[
        Arg::new("function", Byte, "Function index"),
    ]),
    op("gotostdif", 0x0A, 3, "Jumps to a built-in function, conditional version.", &[
        Arg::new("condition", Byte, "Comparison result to test for"),
        Arg::new("function", Byte, "Function index"),
    ]),
    op("callstdif", 0x0B, 3, "Calls a built-in function, conditional version.", &[
        Arg::new("condition", Byte, "Comparison result to test for"),
        Arg::new("function", Byte, "Function index"),
    ]),
    op("jumpram", 0x0C, 1, "Jumps to a default RAM location, executing the script stored there.", &[]),
    ending(op("killscript", 0x0D, 1, "Kills the script and resets the script RAM.", &[])),
    // Memory
    op("setbyte", 0x0E, 2, "Sets a predefined address to the specified byte value.", &[
        Arg::new("value", Byte, "Byte value to use"),
    ]),
    op("loadpointer", 0x0F, 6, "Loads a pointer into the script RAM so other commands can use it.", &[
        Arg::new("bank", Byte, "Memory bank to use"),
        Arg::new("offset", Pointer, "Pointer to load"),
    ]),
    op("setbyte2", 0x10, 3, "Sets a memory bank to the specified byte value.", &[
        Arg::new("bank", Byte, "Memory bank to use"),
        Arg::new("value", Byte, "Byte value to use"),
    ]),
    op("writebytetooffset", 0x11, 6, "Sets the byte at the specified offset to a certain value.", &[
        Arg::new("value", Byte, "Byte value to write"),
        Arg::new("offset", Pointer, "Location to write to"),
    ]),
    op("loadbytefrompointer", 0x12, 6, "Loads the byte found at a pointer into the script RAM.", &[
        Arg::new("bank", Byte, "Memory bank to use"),
        Arg::new("offset", Pointer, "Location to read from"),
    ]),
    op("setfarbyte", 0x13, 6, "Sets the byte in a memory bank to the specified offset.", &[
        Arg::new("bank", Byte, "Memory bank to use"),
        Arg::new("offset", Pointer, "Location to write to"),
    ]),
    op("copyscriptbanks", 0x14, 3, "Copies one script bank to another.", &[
        Arg::new("destination", Byte, "Bank to copy to"),
        Arg::new("source", Byte, "Bank to copy from"),
    ]),
    op("copybyte", 0x15, 9, "Copies a byte value from one place to another.", &[
        Arg::new("destination", Pointer, "Location to copy to"),
        Arg::new("source", Pointer, "Location to copy from"),
    ]),
    // Variables
    op("setvar", 0x16, 5, "Sets variable A to any value.", &[
        Arg::new("variable", Word, "Variable to set"),
        Arg::new("value", Word, "Value to set it to"),
    ]),
    op("addvar", 0x17, 5, "Adds any value to variable A.", &[
        Arg::new("variable", Word, "Variable to add to"),
        Arg::new("value", Word, "Value to add"),
    ]),
    op("subvar", 0x18, 5, "Subtracts any value from variable A.", &[
        Arg::new("variable", Word, "Variable to subtract from"),
        Arg::new("value", Word, "Value to subtract"),
    ]),
    op("copyvar", 0x19, 5, "Copies variable B to A.", &[
        Arg::new("destination", Word, "Variable to copy to"),
        Arg::new("source", Word, "Variable to copy from"),
    ]),
    op("copyvarifnotzero", 0x1A, 5, "Sets variable B to A, but only if B is higher than zero.", &[
        Arg::new("destination", Word, "Variable to copy to"),
        Arg::new("source", Word, "Variable or value to copy"),
    ]),
    op("compare", 0x21, 5, "Compares a variable to a value.", &[
        Arg::new("variable", Word, "Variable to compare"),
        Arg::new("value", Word, "Value to compare against"),
    ]),
    op("comparevars", 0x22, 5, "Compares two variables.", &[
        Arg::new("a", Word, "First variable"),
        Arg::new("b", Word, "Second variable"),
    ]),
    op("callasm", 0x23, 5, "Calls a custom ASM routine.", &[
        Arg::new("offset", Pointer, "Routine to call, plus one for thumb code"),
    ]),
    op("special", 0x25, 3, "Calls a special event.", &[
        Arg::new("event", Word, "Event index"),
    ]),
    op("special2", 0x26, 5, "Calls a special event and stores its result in a variable.", &[
        Arg::new("variable", Word, "Variable to store the result in"),
        Arg::new("event", Word, "Event index"),
    ]),
    op("waitstate", 0x27, 1, "Sets the script to a wait state, useful for some specials.", &[]),
    op("pause", 0x28, 3, "Pauses the script for a certain number of frames.", &[
        Arg::new("delay", Word, "Frames to wait"),
    ]),
    // Flags
    op("setflag", 0x29, 3, "Sets a flag for later use.", &[
        Arg::new("flag", Word, "Flag number"),
    ]),
    op("clearflag", 0x2A, 3, "Clears the value of a flag.", &[
        Arg::new("flag", Word, "Flag number"),
    ]),
    op("checkflag", 0x2B, 3, "Checks the value of a flag.", &[
        Arg::new("flag", Word, "Flag number"),
    ]),
    op("resetvars", 0x2E, 1, "Resets the values of variables 0x8000, 0x8001 and 0x8002.", &[]),
    // Sound
    op("sound", 0x2F, 3, "Plays a sound.", &[
        Arg::new("sound", Word, "Sound number"),
    ]),
    op("checksound", 0x30, 1, "Waits for the current sound to finish.", &[]),
    op("fanfare", 0x31, 3, "Plays a fanfare.", &[
        Arg::new("fanfare", Word, "Fanfare number"),
    ]),
    op("waitfanfare", 0x32, 1, "Waits for a fanfare to finish.", &[]),
    op("playsong", 0x33, 4, "Switches to another song.", &[
        Arg::new("song", Word, "Song number"),
        Arg::new("loop", Byte, "Whether the song repeats"),
    ]),
    op("fadedefault", 0x35, 1, "Fades back to the map's default song.", &[]),
    op("fadesong", 0x36, 3, "Fades to another song.", &[
        Arg::new("song", Word, "Song number"),
    ]),
    // World
    op("warp", 0x39, 8, "Warps the player to another map.", &[
        Arg::new("bank", Byte, "Map bank"),
        Arg::new("map", Byte, "Map number"),
        Arg::new("warp", Byte, "Warp number"),
        Arg::new("x", Word, "X coordinate"),
        Arg::new("y", Word, "Y coordinate"),
    ]),
    op("additem", 0x44, 5, "Adds an item to the bag.", &[
        Arg::new("item", Word, "Item number"),
        Arg::new("quantity", Word, "How many to add"),
    ]),
    op("removeitem", 0x45, 5, "Removes an item from the bag.", &[
        Arg::new("item", Word, "Item number"),
        Arg::new("quantity", Word, "How many to remove"),
    ]),
    op("checkitemspace", 0x46, 5, "Checks whether the bag has room for an item.", &[
        Arg::new("item", Word, "Item number"),
        Arg::new("quantity", Word, "How many to fit"),
    ]),
    op("checkitem", 0x47, 5, "Checks whether the player has an item.", &[
        Arg::new("item", Word, "Item number"),
        Arg::new("quantity", Word, "How many are required"),
    ]),
    op("applymovement", 0x4F, 7, "Applies a movement list to a sprite.", &[
        Arg::new("person", Word, "Person event number"),
        Arg::new("movements", Pointer, "Movement list"),
    ]),
    op("waitmovement", 0x51, 3, "Waits for a movement list to finish.", &[
        Arg::new("person", Word, "Person event number, or 0 for all"),
    ]),
    op("hidesprite", 0x53, 3, "Hides a sprite.", &[
        Arg::new("person", Word, "Person event number"),
    ]),
    op("showsprite", 0x55, 3, "Shows a previously hidden sprite.", &[
        Arg::new("person", Word, "Person event number"),
    ]),
    op("faceplayer", 0x5A, 1, "Turns the caller towards the player.", &[]),
    // Battles
    CommandTemplate {
        name: "trainerbattle",
        aliases: &[],
        opcode: Some(0x5C),
        description: "Starts a trainer battle. The kind decides which pointers follow.",
        bytes: None,
        ending: false,
        arguments: &[
            Arg::new("kind", Byte, "Battle kind"),
            Arg::new("trainer", Word, "Trainer number"),
            Arg::new("reserved", Word, "Unused"),
            Arg::new("intro", Pointer, "Text shown before the battle").when(has_intro),
            Arg::new("defeat", Pointer, "Text shown when the trainer is defeated"),
            Arg::new("not_enough", Pointer, "Text shown when the player lacks two Pokémon").when(has_not_enough),
            Arg::new("continue", Pointer, "Script run after the battle").when(has_continue),
        ],
    },
    op("repeattrainerbattle", 0x5D, 1, "Repeats the last trainer battle.", &[]),
    op("endtrainerbattle", 0x5E, 1, "Returns from a trainer battle script.", &[]),
    op("checkgender", 0xA0, 1, "Stores the player's gender in LASTRESULT.", &[]),
    op("setwildbattle", 0xB6, 6, "Prepares a wild battle.", &[
        Arg::new("species", Word, "Pokémon species"),
        Arg::new("level", Byte, "Level"),
        Arg::new("item", Word, "Held item"),
    ]),
    op("dowildbattle", 0xB7, 1, "Starts the prepared wild battle.", &[]),
    // Messages
    op("waitmsg", 0x66, 1, "Waits for preparemsg to finish.", &[]),
    alias(op("preparemsg", 0x67, 5, "Prepares a message box to be shown.", &[
        Arg::new("text", Pointer, "Text to show"),
    ]), &["message"]),
    op("closeonkeypress", 0x68, 1, "Closes the message box once a key is pressed.", &[]),
    op("lockall", 0x69, 1, "Locks down all movement.", &[]),
    op("lock", 0x6A, 1, "Locks down movement of the caller.", &[]),
    op("releaseall", 0x6B, 1, "Resumes normal movement for everyone.", &[]),
    op("release", 0x6C, 1, "Resumes normal movement for the caller.", &[]),
    op("waitkeypress", 0x6D, 1, "Waits until a key is pressed.", &[]),
    op("yesnobox", 0x6E, 3, "Displays a yes/no box.", &[
        Arg::new("x", Byte, "Left edge"),
        Arg::new("y", Byte, "Top edge"),
    ]),
    op("multichoice", 0x6F, 5, "Shows a list of choices.", &[
        Arg::new("x", Byte, "Left edge"),
        Arg::new("y", Byte, "Top edge"),
        Arg::new("list", Byte, "Choice list number"),
        Arg::new("cancel", Byte, "Whether B is disabled"),
    ]),
    CommandTemplate {
        name: "msgbox",
        aliases: &[],
        opcode: None,
        description: "Loads a pointer into memory and displays the message with the given box type.",
        bytes: Some(8),
        ending: false,
        arguments: &[
            Arg::new("offset", Pointer, "Pointer to load into memory"),
            Arg::new("type", Byte, "Message type"),
        ],
    },
    CommandTemplate {
        name: "giveitem",
        aliases: &[],
        opcode: None,
        description: "Gives the player an item and shows the matching message.",
        bytes: Some(12),
        ending: false,
        arguments: &[
            Arg::new("item", Word, "Item number"),
            Arg::new("quantity", Word, "How many to give"),
            Arg::new("type", Byte, "Message type"),
        ],
    },
    // Pokémon
    op("givepokemon", 0x79, 15, "Gives the player a Pokémon.", &[
        Arg::new("species", Word, "Pokémon species"),
        Arg::new("level", Byte, "Level"),
        Arg::new("item", Word, "Held item"),
        Arg::new("filler1", Dword, "Unused"),
        Arg::new("filler2", Dword, "Unused"),
        Arg::new("filler3", Byte, "Unused"),
    ]),
    op("giveegg", 0x7A, 3, "Gives the player an egg.", &[
        Arg::new("species", Word, "Pokémon species"),
    ]),
    op("bufferpokemon", 0x7D, 4, "Stores a Pokémon's name in a buffer.", &[
        Arg::new("buffer", Byte, "Buffer number"),
        Arg::new("species", Word, "Pokémon species"),
    ]),
    op("bufferfirstpokemon", 0x7E, 2, "Stores the first Pokémon in the party in a buffer.", &[
        Arg::new("buffer", Byte, "Buffer number"),
    ]),
    op("bufferitem", 0x80, 4, "Stores an item's name in a buffer.", &[
        Arg::new("buffer", Byte, "Buffer number"),
        Arg::new("item", Word, "Item number"),
    ]),
    // Screen
    op("fadescreen", 0x97, 2, "Fades the screen in or out.", &[
        Arg::new("effect", Byte, "Fade effect"),
    ]),
    op("doanimation", 0x9C, 3, "Plays a field animation.", &[
        Arg::new("animation", Word, "Animation number"),
    ]),
];

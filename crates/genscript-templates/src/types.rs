// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Argument types, runtime values, and type widening.

use std::fmt;

/// Type an argument can have at runtime or declare in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentType {
    Byte,
    Word,
    Dword,
    Pointer,
    /// Universal numeric supertype; also what out-of-range literals resolve to.
    Number,
    String,
    Identifier,
    Symbol,
}

impl ArgumentType {
    pub const ALL: [ArgumentType; 8] = [
        ArgumentType::Byte,
        ArgumentType::Word,
        ArgumentType::Dword,
        ArgumentType::Pointer,
        ArgumentType::Number,
        ArgumentType::String,
        ArgumentType::Identifier,
        ArgumentType::Symbol,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ArgumentType::Byte => "byte",
            ArgumentType::Word => "word",
            ArgumentType::Dword => "dword",
            ArgumentType::Pointer => "pointer",
            ArgumentType::Number => "number",
            ArgumentType::String => "string",
            ArgumentType::Identifier => "identifier",
            ArgumentType::Symbol => "symbol",
        }
    }

    /// Narrowest type whose range holds `value`.
    pub fn for_number(value: u64) -> ArgumentType {
        match value {
            0..=0xFF => ArgumentType::Byte,
            0x100..=0xFFFF => ArgumentType::Word,
            0x1_0000..=0xFFFF_FFFF => ArgumentType::Dword,
            _ => ArgumentType::Number,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Small set of argument types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeSet(u8);

impl TypeSet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, ty: ArgumentType) {
        self.0 |= ty.bit();
    }

    pub fn contains(&self, ty: ArgumentType) -> bool {
        self.0 & ty.bit() != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ArgumentType> + '_ {
        ArgumentType::ALL.into_iter().filter(|ty| self.contains(*ty))
    }
}

impl FromIterator<ArgumentType> for TypeSet {
    fn from_iter<I: IntoIterator<Item = ArgumentType>>(iter: I) -> Self {
        let mut set = TypeSet::new();
        for ty in iter {
            set.insert(ty);
        }
        set
    }
}

/// Expand declared types with everything they subsume.
///
/// `word` also accepts `byte`; `number`, `dword`, and `pointer` accept every
/// numeric width and pointers.
pub fn allowed_types(declared: &[ArgumentType]) -> TypeSet {
    let mut set: TypeSet = declared.iter().copied().collect();
    let wide = [ArgumentType::Number, ArgumentType::Dword, ArgumentType::Pointer];
    if wide.iter().any(|ty| set.contains(*ty)) {
        for ty in [ArgumentType::Byte, ArgumentType::Word, ArgumentType::Dword, ArgumentType::Pointer] {
            set.insert(ty);
        }
    } else if set.contains(ArgumentType::Word) {
        set.insert(ArgumentType::Byte);
    }
    set
}

/// Render declared types as `"byte"` or `"number" or "string"`.
pub fn describe_types(declared: &[ArgumentType]) -> String {
    let quoted: Vec<String> = declared.iter().map(|ty| format!("\"{}\"", ty)).collect();
    match quoted.split_last() {
        None => String::from("\"\""),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

/// A concrete argument value after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Number(u64),
    /// Identifier, symbol, dynamic, or string text.
    Text(String),
}

impl Value {
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Number(_) => None,
            Value::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "0x{:X}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Value listed in a template enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumValue {
    Number(u64),
    Text(&'static str),
}

impl PartialEq<Value> for EnumValue {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (EnumValue::Number(a), Value::Number(b)) => a == b,
            (EnumValue::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::Number(n) => write!(f, "0x{:X}", n),
            EnumValue::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ArgumentType::*;

    #[test]
    fn number_ranges() {
        assert_eq!(ArgumentType::for_number(0), Byte);
        assert_eq!(ArgumentType::for_number(0xFF), Byte);
        assert_eq!(ArgumentType::for_number(0x100), Word);
        assert_eq!(ArgumentType::for_number(0xFFFF), Word);
        assert_eq!(ArgumentType::for_number(0x10000), Dword);
        assert_eq!(ArgumentType::for_number(0xFFFF_FFFF), Dword);
        assert_eq!(ArgumentType::for_number(0x1_0000_0000), Number);
    }

    #[test]
    fn word_widens_to_byte_only() {
        let set = allowed_types(&[Word]);
        assert!(set.contains(Byte));
        assert!(set.contains(Word));
        assert!(!set.contains(Dword));
        assert!(!set.contains(Pointer));
    }

    #[test]
    fn wide_types_accept_all_numeric_widths() {
        for declared in [Number, Dword, Pointer] {
            let set = allowed_types(&[declared]);
            for ty in [Byte, Word, Dword, Pointer] {
                assert!(set.contains(ty), "{} should accept {}", declared, ty);
            }
            assert!(!set.contains(String));
        }
    }

    #[test]
    fn byte_stays_narrow() {
        let set = allowed_types(&[Byte]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Byte]);
    }

    #[test]
    fn describe_joins_with_or() {
        assert_eq!(describe_types(&[Pointer]), "\"pointer\"");
        assert_eq!(describe_types(&[Number, String]), "\"number\" or \"string\"");
        assert_eq!(describe_types(&[Byte, Word, String]), "\"byte\", \"word\" or \"string\"");
    }

    #[test]
    fn enum_values_compare_with_runtime_values() {
        assert_eq!(EnumValue::Number(0xFF), Value::Number(0xFF));
        assert_eq!(EnumValue::Text("word"), Value::Text("word".into()));
        assert_ne!(EnumValue::Number(1), Value::Text("1".into()));
        assert_eq!(Value::Number(10).to_string(), "0xA");
    }
}

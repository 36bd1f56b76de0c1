//! Key name table
//!
//! Static mapping from lowercase key names to native key codes, built once.
//! [`resolve`] implements both lookup paths of the host surface: a
//! single ASCII-alphanumeric character passes through as its byte value
//! without consulting the table; every other name goes through the table.
//! A miss is an absent result, not an error — the caller reports "no such
//! key" as null.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Name → native key code, in the engine's declaration order.
const KEY_NAMES: &[(&str, u8)] = &[
    ("pad0", 128),
    ("pad1", 129),
    ("pad2", 130),
    ("pad3", 131),
    ("pad4", 132),
    ("pad5", 133),
    ("pad6", 134),
    ("pad7", 135),
    ("pad8", 136),
    ("pad9", 137),
    ("padmul", 138),
    ("padadd", 139),
    ("padenter", 140),
    ("padsub", 141),
    ("paddot", 142),
    ("paddiv", 143),
    ("f1", 144),
    ("f2", 145),
    ("f3", 146),
    ("f4", 147),
    ("f5", 148),
    ("f6", 149),
    ("f7", 150),
    ("f8", 151),
    ("f9", 152),
    ("f10", 153),
    ("f11", 154),
    ("f12", 155),
    ("backspace", 156),
    ("tab", 157),
    ("return", 158),
    ("shift", 159),
    ("control", 160),
    ("alt", 161),
    ("pause", 162),
    ("capslock", 163),
    ("escape", 164),
    ("space", 165),
    ("pageup", 166),
    ("pagedn", 167),
    ("end", 168),
    ("home", 169),
    ("left", 170),
    ("up", 171),
    ("right", 172),
    ("down", 173),
    ("insert", 174),
    ("delete", 175),
    ("lwin", 176),
    ("rwin", 177),
    ("numlock", 178),
    ("scroll", 179),
    ("lshift", 180),
    ("rshift", 181),
    ("lcontrol", 182),
    ("rcontrol", 183),
    ("lalt", 184),
    ("ralt", 185),
    ("semicolon", 186),
    ("equals", 187),
    ("comma", 188),
    ("minus", 189),
    ("dot", 190),
    ("slash", 191),
    ("backtick", 192),
    ("lsquare", 193),
    ("backslash", 194),
    ("rsquare", 195),
    ("tick", 196),
];

static TABLE: Lazy<HashMap<&'static str, u8>> =
    Lazy::new(|| KEY_NAMES.iter().copied().collect());

/// Resolve a host key name to a native key code.
///
/// Fast path: a 1-character ASCII-alphanumeric name is its own code
/// (letters keep their case as typed). Everything else is a table lookup.
pub fn resolve(name: &str) -> Option<u8> {
    let bytes = name.as_bytes();
    if bytes.len() == 1 && bytes[0].is_ascii_alphanumeric() {
        return Some(bytes[0]);
    }
    TABLE.get(name).copied()
}

//! Field name allocation
//!
//! Names run `a`, `_b`, `c`, `_d`, ... `_z`, then `aa` through `zz`. Every
//! second single-letter name is private (underscore-prefixed). Two-letter
//! combinations that are keywords are skipped, so the sequence is finite.

use crate::error::{Error, Result};

/// Keywords that may never be used as field names.
///
/// Generated records are consumed from Rust and mirrored into Python-style
/// schemas, so both keyword sets apply.
pub const RESERVED_WORDS: &[&str] = &[
    // Rust strict, reserved and edition keywords
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "gen", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
    // Python keywords
    "False", "None", "True", "and", "assert", "class", "def", "del", "elif", "except",
    "finally", "from", "global", "import", "is", "lambda", "nonlocal", "not", "or", "pass",
    "raise", "with",
];

/// Returns true if `name` is a reserved keyword
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Returns true if `name` is an ASCII identifier (`[A-Za-z_][A-Za-z0-9_]*`)
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

const LETTERS: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";
const SINGLE: usize = LETTERS.len();
const TOTAL: usize = SINGLE + SINGLE * SINGLE;

/// Deterministic, finite sequence of field names.
///
/// A fresh allocator is created for every record build and dropped after it.
#[derive(Debug, Clone, Default)]
pub struct AttrNames {
    pos: usize,
}

impl AttrNames {
    /// Create an allocator positioned at `a`
    #[must_use]
    pub const fn new() -> Self {
        Self { pos: 0 }
    }

    /// Total number of names the sequence yields
    #[must_use]
    pub fn capacity() -> usize {
        Self::new().count()
    }

    /// Take the first `count` names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NamesExhausted`] if the sequence is shorter than `count`.
    pub fn take_names(count: usize) -> Result<Vec<String>> {
        let names: Vec<String> = Self::new().take(count).collect();
        if names.len() < count {
            return Err(Error::NamesExhausted {
                requested: count,
                available: names.len(),
            });
        }
        Ok(names)
    }
}

impl Iterator for AttrNames {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.pos < TOTAL {
            let pos = self.pos;
            self.pos += 1;

            if pos < SINGLE {
                let letter = char::from(LETTERS[pos]);
                return Some(if pos % 2 == 1 {
                    format!("_{letter}")
                } else {
                    letter.to_string()
                });
            }

            let two = pos - SINGLE;
            let name: String = [LETTERS[two / SINGLE], LETTERS[two % SINGLE]]
                .iter()
                .map(|&b| char::from(b))
                .collect();
            if !is_reserved(&name) {
                return Some(name);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_first_names_alternate_private() {
        let names: Vec<String> = AttrNames::new().take(4).collect();
        assert_eq!(names, vec!["a", "_b", "c", "_d"]);
    }

    #[test]
    fn test_single_letters_end_with_private_z() {
        let names: Vec<String> = AttrNames::new().take(26).collect();
        assert_eq!(names[24], "y");
        assert_eq!(names[25], "_z");
    }

    #[test]
    fn test_two_letter_names_start_at_aa() {
        let names: Vec<String> = AttrNames::new().take(28).collect();
        assert_eq!(names[26], "aa");
        assert_eq!(names[27], "ab");
    }

    #[test]
    fn test_keywords_skipped() {
        let names: HashSet<String> = AttrNames::new().collect();
        for kw in ["as", "do", "fn", "if", "in", "is", "or"] {
            assert!(!names.contains(kw), "{kw} should be skipped");
        }
        assert!(names.contains("at"));
        assert!(names.contains("zz"));
    }

    #[test]
    fn test_sequence_is_finite_and_unique() {
        let names: Vec<String> = AttrNames::new().collect();
        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(names.len(), unique.len());
        assert_eq!(names.len(), 26 + 26 * 26 - 7);
        assert_eq!(AttrNames::capacity(), names.len());
    }

    #[test]
    fn test_sequence_is_deterministic() {
        let first: Vec<String> = AttrNames::new().take(60).collect();
        let second: Vec<String> = AttrNames::new().take(60).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_take_names_exhausted() {
        let err = AttrNames::take_names(AttrNames::capacity() + 1).unwrap_err();
        assert!(matches!(err, Error::NamesExhausted { .. }));
        assert_eq!(AttrNames::take_names(3).unwrap(), vec!["a", "_b", "c"]);
    }

    #[test]
    fn test_all_names_are_identifiers() {
        assert!(AttrNames::new().all(|n| is_identifier(&n) && !is_reserved(&n)));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("HypClass"));
        assert!(is_identifier("_b"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1a"));
        assert!(!is_identifier("a-b"));
    }
}

use alloc::format;
use alloc::string::{String, ToString};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Leading character of a script that replaces the whole word.
pub const IRREGULAR_MARKER: char = '*';

/// The two halves of an encoded transformation.
///
/// `front` holds a prefix rule (`<literal`). `midback` holds the back rule,
/// the middle rules, or an irregular replacement. Either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct EditScript {
    pub front: String,
    pub midback: String,
}

impl EditScript {
    pub fn new(front: impl Into<String>, midback: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            midback: midback.into(),
        }
    }

    pub fn irregular(replacement: &str) -> Self {
        Self {
            front: String::new(),
            midback: format!("{}{}", IRREGULAR_MARKER, replacement),
        }
    }

    /// True when applying the script leaves the base unchanged.
    pub fn is_identity(&self) -> bool {
        self.front.is_empty() && self.midback.is_empty()
    }

    pub fn is_irregular(&self) -> bool {
        self.midback.starts_with(IRREGULAR_MARKER)
    }

    /// Comma-joined label, the form consumed by `apply`.
    pub fn label(&self) -> String {
        match (self.front.is_empty(), self.midback.is_empty()) {
            (true, _) => self.midback.clone(),
            (false, true) => self.front.clone(),
            (false, false) => format!("{},{}", self.front, self.midback),
        }
    }

    /// Space-joined key under which the suffix table stores the script.
    pub fn table_key(&self) -> String {
        format!("{} {}", self.front, self.midback).trim().to_string()
    }
}

use alloc::string::{String, ToString};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Separator between script (or lemma) and tag in the textual layout.
/// Reserved: never produced inside a script or tag.
pub const KEY_SEPARATOR: char = '|';

/// Tag given to unknown words starting with a non-word character.
pub const PUNCTUATION_TAG: &str = "Z:-------------";

/// Tag given to any other unknown word.
pub const UNKNOWN_TAG: &str = "X@-------------";

/// An edit script observed together with a tag.
///
/// This is the inner key of the suffix table; `script|tag` is only its
/// persisted spelling.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct RuleKey {
    pub script: String,
    pub tag: String,
}

impl RuleKey {
    pub fn new(script: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            tag: tag.into(),
        }
    }

    /// Splits `script|tag` at the first separator.
    pub fn parse(text: &str) -> Option<Self> {
        text.split_once(KEY_SEPARATOR)
            .map(|(script, tag)| Self::new(script, tag))
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.script, KEY_SEPARATOR, self.tag)
    }
}

/// One analysis of a word form: a lemma and its tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Analysis {
    pub lemma: String,
    pub tag: String,
}

impl Analysis {
    pub fn new(lemma: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            tag: tag.into(),
        }
    }

    /// Fallback for a word no table entry could explain.
    pub fn fallback(word: &str) -> Self {
        let starts_with_non_word = word
            .chars()
            .next()
            .map_or(false, |c| !(c.is_ascii_alphanumeric() || c == '_'));
        let tag = if starts_with_non_word {
            PUNCTUATION_TAG
        } else {
            UNKNOWN_TAG
        };
        Self::new(word, tag.to_string())
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.lemma, KEY_SEPARATOR, self.tag)
    }
}

use std::fmt;

use inflecta_align::AlignError;
use thiserror::Error;

/// The three rule slots of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Front,
    Back,
    Middle,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Front => write!(f, "front"),
            RuleKind::Back => write!(f, "back"),
            RuleKind::Middle => write!(f, "middle"),
        }
    }
}

/// Why a script could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformation {
    #[error("more than one {0} rule")]
    DuplicateRule(RuleKind),
    #[error("unrecognized rule `{0}`")]
    UnknownRule(String),
    #[error("cannot parse `{0}`")]
    Syntax(String),
    #[error("`{0}` does not occur in the search window")]
    NotFound(String),
    #[error("position {from_end} reaches before the start of a {len}-character base")]
    Underflow { from_end: usize, len: usize },
    #[error("span {start}..{end} runs past the end of a {len}-character form")]
    Overflow { start: usize, end: usize, len: usize },
    #[error("cannot chop {chop} characters from a {len}-character form")]
    Chop { chop: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Never raised for scripts produced by `encode`; seeing it means a
    /// hand-written or corrupted script.
    #[error("malformed edit script `{script}`: {reason}")]
    MalformedScript { script: String, reason: Malformation },
    #[error("invalid diff markup at byte {offset}")]
    InvalidMarkup { offset: usize },
    #[error(transparent)]
    Align(#[from] AlignError),
}

impl CodecError {
    pub(crate) fn malformed(script: &str, reason: Malformation) -> Self {
        CodecError::MalformedScript {
            script: script.to_string(),
            reason,
        }
    }
}

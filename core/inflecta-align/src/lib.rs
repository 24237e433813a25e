//! Character-level alignment of two strings.
//!
//! The [`Aligner`] fills a score/direction matrix, backtracks it into
//! [`AlignOp`]s and condenses those into a [`MergedDiff`], which the codec
//! turns into an edit script.

pub mod diff;
pub mod matrix;
pub mod path;
pub mod scoring;

pub use diff::{DiffChunk, MergedDiff};
pub use matrix::ScoreMatrix;
pub use path::AlignOp;
pub use scoring::{Levenshtein, RunScoring, Scoring};

use thiserror::Error;

/// Longest input (in characters) aligned by default.
pub const DEFAULT_MAX_LEN: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    #[error("input of {len} characters exceeds the alignment limit of {max}")]
    InputTooLong { len: usize, max: usize },
    #[error("direction matrix has no usable predecessor at ({i}, {j})")]
    Inconsistent { i: usize, j: usize },
    #[error("matrix of {rows}x{cols} does not fit the strings being aligned")]
    ShapeMismatch { rows: usize, cols: usize },
}

/// Aligns string pairs under one scoring model.
#[derive(Debug, Clone)]
pub struct Aligner<S = Levenshtein> {
    scoring: S,
    max_len: usize,
}

impl Default for Aligner<Levenshtein> {
    fn default() -> Self {
        Self::new(Levenshtein)
    }
}

impl<S: Scoring> Aligner<S> {
    pub fn new(scoring: S) -> Self {
        Self {
            scoring,
            max_len: DEFAULT_MAX_LEN,
        }
    }

    /// Caps the input length; longer strings are rejected, not truncated.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn scoring(&self) -> &S {
        &self.scoring
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    fn check_len(&self, seq: &[char]) -> Result<(), AlignError> {
        if seq.len() > self.max_len {
            return Err(AlignError::InputTooLong {
                len: seq.len(),
                max: self.max_len,
            });
        }
        Ok(())
    }

    pub fn matrix(&self, s: &[char], t: &[char]) -> Result<ScoreMatrix, AlignError> {
        self.check_len(s)?;
        self.check_len(t)?;
        Ok(ScoreMatrix::build(s, t, &self.scoring))
    }

    /// Full left-to-right alignment of `s` against `t`.
    pub fn align(&self, s: &str, t: &str) -> Result<Vec<AlignOp>, AlignError> {
        let s: Vec<char> = s.chars().collect();
        let t: Vec<char> = t.chars().collect();
        let matrix = self.matrix(&s, &t)?;
        let ops = path::extract(&matrix, &s, &t)?;
        log::trace!("aligned {} x {} characters into {} ops", s.len(), t.len(), ops.len());
        Ok(ops)
    }

    pub fn merged_diff(&self, s: &str, t: &str) -> Result<MergedDiff, AlignError> {
        let ops = self.align(s, t)?;
        Ok(MergedDiff::from_ops(&ops))
    }

    /// Best alignment score of the pair.
    pub fn similarity(&self, s: &str, t: &str) -> Result<i32, AlignError> {
        let s: Vec<char> = s.chars().collect();
        let t: Vec<char> = t.chars().collect();
        Ok(self.matrix(&s, &t)?.final_score())
    }
}

/// Edit distance derived from unit-score similarity:
/// `max(|s|, |t|) - similarity(s, t)`.
pub fn levenshtein_distance(s: &str, t: &str) -> Result<usize, AlignError> {
    let longest = s.chars().count().max(t.chars().count());
    let similarity = Aligner::default().similarity(s, t)?;
    Ok(longest.saturating_sub(usize::try_from(similarity).unwrap_or(0)))
}

use std::fmt;

use inflecta_protocol::Dir;

use crate::matrix::ScoreMatrix;
use crate::AlignError;

/// One step of an alignment, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignOp {
    /// Diagonal step; the characters may differ (substitution).
    Match(char, char),
    /// Character present only in the source.
    Delete(char),
    /// Character present only in the target.
    Insert(char),
}

impl fmt::Display for AlignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignOp::Match(a, b) => write!(f, "{}={}", a, b),
            AlignOp::Delete(a) => write!(f, "-{}", a),
            AlignOp::Insert(b) => write!(f, "+{}", b),
        }
    }
}

/// Backtracks `matrix` from the bottom-right corner to the origin.
///
/// At every cell DIAG wins over UP, which wins over LEFT.
pub fn extract(matrix: &ScoreMatrix, s: &[char], t: &[char]) -> Result<Vec<AlignOp>, AlignError> {
    if matrix.rows() != s.len() + 1 || matrix.cols() != t.len() + 1 {
        return Err(AlignError::ShapeMismatch {
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }

    let (mut i, mut j) = (s.len(), t.len());
    let mut ops = Vec::with_capacity(i.max(j));

    while i > 0 || j > 0 {
        let step = matrix.dir(i, j).preferred();
        if step == Some(Dir::DIAG) && i > 0 && j > 0 {
            i -= 1;
            j -= 1;
            ops.push(AlignOp::Match(s[i], t[j]));
        } else if step == Some(Dir::UP) && i > 0 {
            i -= 1;
            ops.push(AlignOp::Delete(s[i]));
        } else if step == Some(Dir::LEFT) && j > 0 {
            j -= 1;
            ops.push(AlignOp::Insert(t[j]));
        } else {
            return Err(AlignError::Inconsistent { i, j });
        }
    }

    ops.reverse();
    Ok(ops)
}

use std::fmt;

use inflecta_protocol::Dir;

use crate::scoring::Scoring;

/// Score and direction grids of one string pair, `(|s|+1) x (|t|+1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    rows: usize,
    cols: usize,
    scores: Vec<i32>,
    dirs: Vec<Dir>,
}

impl ScoreMatrix {
    /// Fills both grids. Every direction whose candidate ties for the best
    /// score is kept.
    pub fn build<S: Scoring + ?Sized>(s: &[char], t: &[char], scoring: &S) -> Self {
        let rows = s.len() + 1;
        let cols = t.len() + 1;
        let mut matrix = Self {
            rows,
            cols,
            scores: vec![0; rows * cols],
            dirs: vec![Dir::empty(); rows * cols],
        };

        for i in 0..rows {
            for j in 0..cols {
                if i == 0 && j == 0 {
                    continue;
                }

                let up = (i > 0).then(|| {
                    let continuation = matrix.dir(i - 1, j).contains(Dir::UP);
                    (matrix.score(i - 1, j) + scoring.gap(s, i - 1, continuation), Dir::UP)
                });
                let left = (j > 0).then(|| {
                    let continuation = matrix.dir(i, j - 1).contains(Dir::LEFT);
                    (matrix.score(i, j - 1) + scoring.gap(t, j - 1, continuation), Dir::LEFT)
                });
                let diag = (i > 0 && j > 0).then(|| {
                    (matrix.score(i - 1, j - 1) + scoring.matched(s, t, i - 1, j - 1), Dir::DIAG)
                });

                let candidates = [up, left, diag];
                let Some(best) = candidates.iter().flatten().map(|(score, _)| *score).max() else {
                    continue;
                };
                let dir = candidates
                    .iter()
                    .flatten()
                    .filter(|(score, _)| *score == best)
                    .fold(Dir::empty(), |acc, (_, flag)| acc | *flag);

                let idx = matrix.index(i, j);
                matrix.scores[idx] = best;
                matrix.dirs[idx] = dir;
            }
        }

        matrix
    }

    fn index(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn score(&self, i: usize, j: usize) -> i32 {
        self.scores[self.index(i, j)]
    }

    pub fn dir(&self, i: usize, j: usize) -> Dir {
        self.dirs[self.index(i, j)]
    }

    /// Best score of the full alignment, `H[|s|][|t|]`.
    pub fn final_score(&self) -> i32 {
        self.score(self.rows - 1, self.cols - 1)
    }
}

impl fmt::Display for ScoreMatrix {
    /// Scores first, then direction bits (UP=1, LEFT=2, DIAG=4).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            let row: Vec<String> = (0..self.cols).map(|j| format!("{:3}", self.score(i, j))).collect();
            writeln!(f, "[{}]", row.join(" "))?;
        }
        for i in 0..self.rows {
            let row: Vec<String> = (0..self.cols).map(|j| format!("{:3}", self.dir(i, j).bits())).collect();
            writeln!(f, "[{}]", row.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Levenshtein, RunScoring};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_empty_strings() {
        let m = ScoreMatrix::build(&[], &[], &Levenshtein);
        assert_eq!((m.rows(), m.cols()), (1, 1));
        assert_eq!(m.final_score(), 0);
        assert!(m.dir(0, 0).is_empty());
    }

    #[test]
    fn test_borders_are_gaps() {
        let m = ScoreMatrix::build(&chars("ab"), &chars("c"), &Levenshtein);
        assert_eq!(m.dir(1, 0), Dir::UP);
        assert_eq!(m.dir(2, 0), Dir::UP);
        assert_eq!(m.dir(0, 1), Dir::LEFT);
    }

    #[test]
    fn test_ties_are_kept() {
        let m = ScoreMatrix::build(&chars("a"), &chars("b"), &Levenshtein);
        assert_eq!(m.dir(1, 1), Dir::UP | Dir::LEFT | Dir::DIAG);
        assert_eq!(m.final_score(), 0);
    }

    #[test]
    fn test_score_is_common_subsequence_length() {
        let m = ScoreMatrix::build(&chars("kitten"), &chars("sitting"), &Levenshtein);
        assert_eq!(m.final_score(), 4);
        assert_eq!(m.dir(6, 7), Dir::LEFT);
    }

    #[test]
    fn test_affine_gap_uses_continuation() {
        // Opening costs -2, continuing along the border is free
        let m = ScoreMatrix::build(&chars("abc"), &[], &RunScoring);
        assert_eq!(m.score(1, 0), -2);
        assert_eq!(m.score(2, 0), -2);
        assert_eq!(m.score(3, 0), -2);
    }

    #[test]
    fn test_every_reachable_cell_has_a_direction() {
        let m = ScoreMatrix::build(&chars("lemma"), &chars("dilemmas"), &RunScoring);
        for i in 0..m.rows() {
            for j in 0..m.cols() {
                assert_eq!(m.dir(i, j).is_empty(), i == 0 && j == 0);
            }
        }
    }
}

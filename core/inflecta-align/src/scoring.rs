//! Match and gap scoring models for the alignment engine.

/// Scores used to fill the alignment matrix.
///
/// The engine maximizes the cumulative score, so higher is better.
pub trait Scoring {
    /// Score for aligning `s[i]` with `t[j]`.
    fn matched(&self, s: &[char], t: &[char], i: usize, j: usize) -> i32;

    /// Score for leaving `seq[i]` unaligned. `continuation` is set when the
    /// previous step along the same axis was a gap too.
    fn gap(&self, seq: &[char], i: usize, continuation: bool) -> i32;
}

/// Unit scoring: one point per identical pair, gaps are free.
///
/// Maximizing this is the longest common subsequence, which gives the
/// Levenshtein-style alignment used for all persisted scripts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein;

impl Scoring for Levenshtein {
    fn matched(&self, s: &[char], t: &[char], i: usize, j: usize) -> i32 {
        i32::from(s[i] == t[j])
    }

    fn gap(&self, _seq: &[char], _i: usize, _continuation: bool) -> i32 {
        0
    }
}

/// Run-oriented scoring with an affine gap.
///
/// Continuing a run of matches is rewarded, isolated matches near a word
/// end are penalized, and so is pairing the end of one word with the start
/// of the other. Opening a gap costs 2, extending it is free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunScoring;

impl RunScoring {
    const GAP_OPEN: i32 = -2;

    /// True when `pos` lies in the last 40 % of a word of length `len`.
    fn in_tail(pos: usize, len: usize) -> bool {
        pos * 10 >= len * 6
    }
}

impl Scoring for RunScoring {
    fn matched(&self, s: &[char], t: &[char], i: usize, j: usize) -> i32 {
        let after_match = i == 0 || j == 0 || s[i - 1] == t[j - 1];

        if s[i] == t[j] && after_match {
            if (Self::in_tail(i, s.len()) && j == 0) || (Self::in_tail(j, t.len()) && i == 0) {
                return -3;
            }
            return 2;
        }
        if s[i] == t[j] {
            if i + 2 >= s.len() || j + 2 >= t.len() {
                return -3;
            }
            return -1;
        }
        if after_match {
            return -1;
        }
        0
    }

    fn gap(&self, _seq: &[char], _i: usize, continuation: bool) -> i32 {
        if continuation {
            0
        } else {
            Self::GAP_OPEN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_levenshtein_scores() {
        let (s, t) = (chars("ab"), chars("ac"));
        assert_eq!(Levenshtein.matched(&s, &t, 0, 0), 1);
        assert_eq!(Levenshtein.matched(&s, &t, 1, 1), 0);
        assert_eq!(Levenshtein.gap(&s, 0, false), 0);
        assert_eq!(Levenshtein.gap(&s, 1, true), 0);
    }

    #[test]
    fn test_run_scoring_rewards_continuation() {
        let (s, t) = (chars("abcdef"), chars("abcxef"));
        // Start of both words
        assert_eq!(RunScoring.matched(&s, &t, 0, 0), 2);
        // Continuing run
        assert_eq!(RunScoring.matched(&s, &t, 2, 2), 2);
        // Mismatch right after a match
        assert_eq!(RunScoring.matched(&s, &t, 3, 3), -1);
        // Isolated match at the word end
        assert_eq!(RunScoring.matched(&s, &t, 4, 4), -3);
    }

    #[test]
    fn test_run_scoring_penalizes_end_to_start() {
        let (s, t) = (chars("abcde"), chars("eab"));
        // s[4] == t[0], s position is in the tail and t position is the start
        assert_eq!(RunScoring.matched(&s, &t, 4, 0), -3);
    }

    #[test]
    fn test_run_scoring_affine_gap() {
        let s = chars("abc");
        assert_eq!(RunScoring.gap(&s, 0, false), -2);
        assert_eq!(RunScoring.gap(&s, 1, true), 0);
    }
}

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

bitflags! {
    /// Predecessor directions of one alignment matrix cell.
    ///
    /// Several bits may be set when predecessors tie for the best score;
    /// the tie is broken only when the path is extracted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct Dir: u8 {
        /// Consume a character of the source only (deletion).
        const UP = 1;
        /// Consume a character of the target only (insertion).
        const LEFT = 2;
        /// Consume one character of each (match or substitution).
        const DIAG = 4;
    }
}

impl Dir {
    /// Picks the single direction to follow when backtracking.
    ///
    /// Priority is DIAG, then UP, then LEFT. Persisted scripts depend on
    /// this order, so it must not change.
    pub fn preferred(self) -> Option<Dir> {
        [Dir::DIAG, Dir::UP, Dir::LEFT]
            .into_iter()
            .find(|flag| self.contains(*flag))
    }
}

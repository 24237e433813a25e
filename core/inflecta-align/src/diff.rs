use std::fmt;
use std::mem;

use crate::path::AlignOp;

pub const REMOVED_OPEN: char = '`';
pub const REMOVED_CLOSE: char = '\'';
pub const ADDED_OPEN: char = '<';
pub const ADDED_CLOSE: char = '>';

/// A piece of a merged diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffChunk {
    /// Character shared by both strings.
    Same(char),
    /// Characters only in the source (`removed`) and only in the target
    /// (`added`) between two shared characters. At least one is non-empty.
    Changed { removed: String, added: String },
}

impl DiffChunk {
    /// Number of source characters covered by the chunk.
    pub fn source_len(&self) -> usize {
        match self {
            DiffChunk::Same(_) => 1,
            DiffChunk::Changed { removed, .. } => removed.chars().count(),
        }
    }

    pub fn is_change(&self) -> bool {
        matches!(self, DiffChunk::Changed { .. })
    }
}

/// Alignment condensed into shared characters and change spans.
///
/// Rendered with `Display` it is the textual merged diff, e.g.
/// `` s`i'<a>ng `` for *sing* -> *sang*.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedDiff {
    chunks: Vec<DiffChunk>,
}

impl MergedDiff {
    /// Merges consecutive deletions, insertions and substitutions.
    pub fn from_ops(ops: &[AlignOp]) -> Self {
        let mut diff = Self::default();
        let mut removed = String::new();
        let mut added = String::new();

        for op in ops {
            match *op {
                AlignOp::Match(a, b) if a == b => {
                    diff.flush(&mut removed, &mut added);
                    diff.chunks.push(DiffChunk::Same(a));
                }
                AlignOp::Match(a, b) => {
                    removed.push(a);
                    added.push(b);
                }
                AlignOp::Delete(a) => removed.push(a),
                AlignOp::Insert(b) => added.push(b),
            }
        }
        diff.flush(&mut removed, &mut added);

        diff
    }

    /// Builds a diff from chunks, joining adjacent changes and dropping
    /// empty ones.
    pub fn from_chunks<I: IntoIterator<Item = DiffChunk>>(chunks: I) -> Self {
        let mut diff = Self::default();
        for chunk in chunks {
            diff.push(chunk);
        }
        diff
    }

    pub fn push(&mut self, chunk: DiffChunk) {
        match chunk {
            DiffChunk::Changed { removed, added } if removed.is_empty() && added.is_empty() => {}
            DiffChunk::Changed { removed, added } => {
                if let Some(DiffChunk::Changed {
                    removed: last_removed,
                    added: last_added,
                }) = self.chunks.last_mut()
                {
                    last_removed.push_str(&removed);
                    last_added.push_str(&added);
                } else {
                    self.chunks.push(DiffChunk::Changed { removed, added });
                }
            }
            same => self.chunks.push(same),
        }
    }

    fn flush(&mut self, removed: &mut String, added: &mut String) {
        self.push(DiffChunk::Changed {
            removed: mem::take(removed),
            added: mem::take(added),
        });
    }

    pub fn chunks(&self) -> &[DiffChunk] {
        &self.chunks
    }

    pub fn has_changes(&self) -> bool {
        self.chunks.iter().any(DiffChunk::is_change)
    }

    /// The string the diff starts from.
    pub fn source(&self) -> String {
        self.chunks
            .iter()
            .map(|chunk| match chunk {
                DiffChunk::Same(c) => c.to_string(),
                DiffChunk::Changed { removed, .. } => removed.clone(),
            })
            .collect()
    }

    /// The string the diff leads to.
    pub fn target(&self) -> String {
        self.chunks
            .iter()
            .map(|chunk| match chunk {
                DiffChunk::Same(c) => c.to_string(),
                DiffChunk::Changed { added, .. } => added.clone(),
            })
            .collect()
    }
}

impl fmt::Display for MergedDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in &self.chunks {
            match chunk {
                DiffChunk::Same(c) => write!(f, "{}", c)?,
                DiffChunk::Changed { removed, added } => {
                    if !removed.is_empty() {
                        write!(f, "{}{}{}", REMOVED_OPEN, removed, REMOVED_CLOSE)?;
                    }
                    if !added.is_empty() {
                        write!(f, "{}{}{}", ADDED_OPEN, added, ADDED_CLOSE)?;
                    }
                }
            }
        }
        Ok(())
    }
}

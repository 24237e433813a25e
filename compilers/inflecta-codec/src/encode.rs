use inflecta_align::{DiffChunk, MergedDiff};
use inflecta_protocol::EditScript;

/// Which way a script points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Lemma to form. A leading deletion makes the script irregular; a
    /// leading insertion becomes the front rule.
    #[default]
    Forward,
    /// Form to lemma. A leading insertion makes the script irregular; a
    /// leading deletion becomes the front rule (a prefix to strip).
    Inverse,
}

/// Encodes a merged diff as front and middle/back rules.
pub fn encode(diff: &MergedDiff, direction: Direction) -> EditScript {
    let chunks = diff.chunks();
    if !diff.has_changes() {
        return EditScript::default();
    }

    if is_irregular(chunks, direction) {
        log::trace!("irregular {:?} diff {}", direction, diff);
        return EditScript::irregular(&diff.target());
    }

    let back = match chunks.last() {
        Some(DiffChunk::Changed { removed, added }) => {
            Some(format!(">{}{}", removed.chars().count(), added))
        }
        _ => None,
    };
    let middle = middle_rules(chunks);

    let midback = match back {
        Some(back) if middle.is_empty() => back,
        Some(back) => format!("{},{}", back, middle),
        None => middle,
    };

    EditScript::new(front_rule(chunks, direction).unwrap_or_default(), midback)
}

fn is_irregular(chunks: &[DiffChunk], direction: Direction) -> bool {
    match (chunks.first(), direction) {
        (Some(DiffChunk::Changed { removed, .. }), Direction::Forward) => !removed.is_empty(),
        (Some(DiffChunk::Changed { added, .. }), Direction::Inverse) => !added.is_empty(),
        _ => false,
    }
}

/// One `from_end:len-replacement` token per change enclosed by shared
/// characters, rightmost first. `from_end` counts source characters.
fn middle_rules(chunks: &[DiffChunk]) -> String {
    let mut tokens = Vec::new();
    let mut tail = 0;

    for (idx, chunk) in chunks.iter().enumerate().rev() {
        if let DiffChunk::Changed { removed, added } = chunk {
            let enclosed = idx > 0
                && idx + 1 < chunks.len()
                && !chunks[idx - 1].is_change()
                && !chunks[idx + 1].is_change();
            if enclosed {
                let orig_len = removed.chars().count();
                tokens.push(format!("{}:{}-{}", tail + orig_len, orig_len, added));
            }
        }
        tail += chunk.source_len();
    }

    tokens.join(" ")
}

fn front_rule(chunks: &[DiffChunk], direction: Direction) -> Option<String> {
    // A lone change is already covered by the back rule
    if chunks.len() < 2 {
        return None;
    }
    match (chunks.first()?, direction) {
        (DiffChunk::Changed { added, .. }, Direction::Forward) => Some(format!("<{}", added)),
        (DiffChunk::Changed { removed, .. }, Direction::Inverse) => Some(format!("<{}", removed)),
        _ => None,
    }
}

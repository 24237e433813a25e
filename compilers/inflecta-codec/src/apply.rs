use inflecta_protocol::IRREGULAR_MARKER;

use crate::error::{CodecError, Malformation, RuleKind};
use crate::grammar::{parse_back_rule, parse_middle_token, Anchor};

/// The rule pieces of a comma-separated script, sorted into slots.
#[derive(Debug, Default, PartialEq, Eq)]
struct Rules<'a> {
    front: Option<&'a str>,
    back: Option<&'a str>,
    middle: Option<&'a str>,
}

impl<'a> Rules<'a> {
    fn classify(script: &'a str) -> Result<Self, Malformation> {
        let mut rules = Rules::default();
        for piece in script.split(',') {
            let (slot, kind) = if piece.starts_with('<') {
                (&mut rules.front, RuleKind::Front)
            } else if piece.starts_with('>') {
                (&mut rules.back, RuleKind::Back)
            } else if piece.contains('-') {
                (&mut rules.middle, RuleKind::Middle)
            } else {
                return Err(Malformation::UnknownRule(piece.to_string()));
            };
            if slot.replace(piece).is_some() {
                return Err(Malformation::DuplicateRule(kind));
            }
        }
        Ok(rules)
    }
}

/// Applies `script` to `base` and returns the resulting string.
pub fn apply(base: &str, script: &str) -> Result<String, CodecError> {
    if let Some(replacement) = script.strip_prefix(IRREGULAR_MARKER) {
        return Ok(replacement.to_string());
    }
    if script.is_empty() {
        return Ok(base.to_string());
    }

    let rules = Rules::classify(script).map_err(|reason| CodecError::malformed(script, reason))?;
    let original: Vec<char> = base.chars().collect();
    let mut form = original.clone();

    let mut add_back = "";
    if let Some(back) = rules.back {
        let (chop, add) = parse_back_rule(back)
            .ok_or_else(|| CodecError::malformed(script, Malformation::Syntax(back.to_string())))?;
        if chop > form.len() {
            return Err(CodecError::malformed(
                script,
                Malformation::Chop {
                    chop,
                    len: form.len(),
                },
            ));
        }
        form.truncate(form.len() - chop);
        add_back = add;
    }

    if let Some(middle) = rules.middle {
        apply_middle(&mut form, original.len(), middle)
            .map_err(|reason| CodecError::malformed(script, reason))?;
    }

    let mut result = String::with_capacity(base.len() + script.len());
    if let Some(front) = rules.front {
        result.push_str(&front[1..]);
    }
    result.extend(form);
    result.push_str(add_back);

    log::trace!("applied `{}` to `{}`: `{}`", script, base, result);
    Ok(result)
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Right-most start of `needle` in `haystack`; an empty needle matches at
/// the end.
fn rfind(haystack: &[char], needle: &[char]) -> Option<usize> {
    let last = haystack.len().checked_sub(needle.len())?;
    (0..=last)
        .rev()
        .find(|&i| haystack[i..i + needle.len()] == *needle)
}

/// Applies space-separated middle tokens in order. Each replacement
/// shrinks the literal search window to the text before it.
fn apply_middle(form: &mut Vec<char>, base_len: usize, middle: &str) -> Result<(), Malformation> {
    let mut window: Vec<char> = form[..form.len().saturating_sub(1)]
        .iter()
        .copied()
        .map(fold)
        .collect();

    for token in middle.split(' ') {
        let token = parse_middle_token(token).ok_or_else(|| Malformation::Syntax(token.to_string()))?;

        // `None` is a zero-width splice before the first character: one
        // position past the start, or the empty-window literal on an empty form
        let (start, len) = match token.anchor {
            Anchor::Position { from_end, len } => match base_len.checked_sub(from_end) {
                Some(start) => (Some(start), len),
                None if from_end == base_len + 1 => (None, 0),
                None => {
                    return Err(Malformation::Underflow {
                        from_end,
                        len: base_len,
                    })
                }
            },
            Anchor::Literal(orig) => {
                let needle: Vec<char> = orig.chars().map(fold).collect();
                if !window.is_empty() {
                    let start = rfind(&window, &needle)
                        .ok_or_else(|| Malformation::NotFound(orig.to_string()))?;
                    (Some(start), needle.len())
                } else {
                    (form.len().checked_sub(1), needle.len())
                }
            }
        };

        match start {
            Some(start) => {
                let end = start + len;
                if end > form.len() {
                    return Err(Malformation::Overflow {
                        start,
                        end,
                        len: form.len(),
                    });
                }
                let tail = form.split_off(end);
                form.truncate(start);
                form.extend(token.replacement.chars());
                form.extend(tail);
                window.truncate(start);
            }
            None => {
                let tail = std::mem::take(form);
                form.extend(token.replacement.chars());
                form.extend(tail);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(base: &str, script: &str) -> Malformation {
        match apply(base, script) {
            Err(CodecError::MalformedScript { reason, .. }) => reason,
            other => panic!("expected a malformed script, got {:?}", other),
        }
    }

    #[test]
    fn test_identity_and_irregular() {
        assert_eq!(apply("walk", "").unwrap(), "walk");
        assert_eq!(apply("cat", "*dog").unwrap(), "dog");
        assert_eq!(apply("cat", "*").unwrap(), "");
    }

    #[test]
    fn test_back_rule() {
        assert_eq!(apply("cat", ">0s").unwrap(), "cats");
        assert_eq!(apply("walk", ">1ked").unwrap(), "walked");
        assert_eq!(apply("a", ">1").unwrap(), "");
    }

    #[test]
    fn test_positional_middle() {
        assert_eq!(apply("sing", "3:1-a").unwrap(), "sang");
        assert_eq!(apply("abcde", "2:1-X 4:1-Y").unwrap(), "aYcXe");
        assert_eq!(apply("abcde", "1:0-y 4:1-x").unwrap(), "axcdye");
    }

    #[test]
    fn test_position_counts_from_original_base() {
        assert_eq!(apply("abcde", ">2,4:1-Y").unwrap(), "aYc");
        assert_eq!(apply("mutter", ">2,5:1-ü").unwrap(), "mütt");
    }

    #[test]
    fn test_front_and_back() {
        assert_eq!(apply("happy", "<un").unwrap(), "unhappy");
        assert_eq!(apply("sagen", "<ge,>2t").unwrap(), "gesagt");
        // Pieces are classified by shape, not by order
        assert_eq!(apply("sagen", ">2t,<ge").unwrap(), "gesagt");
    }

    #[test]
    fn test_literal_middle_is_case_insensitive() {
        assert_eq!(apply("sing", "i-a").unwrap(), "sang");
        assert_eq!(apply("SING", "i-a").unwrap(), "SaNG");
    }

    #[test]
    fn test_literal_search_window_shrinks() {
        // Second token must match before the first replacement
        assert_eq!(apply("abcbd", "b-X b-Y").unwrap(), "aYcXd");
        // ... so a literal only present after it is not found
        assert_eq!(reason("abab", "b-X b-Y"), Malformation::NotFound("b".to_string()));
    }

    #[test]
    fn test_literal_on_short_forms() {
        // Empty window: the last character of the form is replaced
        assert_eq!(apply("a", "q-x").unwrap(), "x");
        // Empty form: zero-width splice at the start
        assert_eq!(apply("", "q-x").unwrap(), "x");
    }

    #[test]
    fn test_position_before_start() {
        // One past the start splices without removing anything
        assert_eq!(apply("ab", "3:0-x").unwrap(), "xab");
        assert_eq!(apply("ab", "3:1-x").unwrap(), "xab");
        assert_eq!(apply("", "1:0-x").unwrap(), "x");
        assert_eq!(reason("ab", "4:0-x"), Malformation::Underflow { from_end: 4, len: 2 });
    }

    #[test]
    fn test_malformed_scripts() {
        assert_eq!(reason("ab", ">1,>2"), Malformation::DuplicateRule(RuleKind::Back));
        assert_eq!(reason("ab", "<x,<y"), Malformation::DuplicateRule(RuleKind::Front));
        assert_eq!(reason("ab", "plain"), Malformation::UnknownRule("plain".to_string()));
        assert_eq!(reason("ab", ">z"), Malformation::Syntax(">z".to_string()));
        assert_eq!(reason("ab", ">3"), Malformation::Chop { chop: 3, len: 2 });
        assert_eq!(reason("ab", "5:1-x"), Malformation::Underflow { from_end: 5, len: 2 });
        assert_eq!(
            reason("ab", "1:2-x"),
            Malformation::Overflow {
                start: 1,
                end: 3,
                len: 2
            }
        );
        assert_eq!(reason("sing", "x-a"), Malformation::NotFound("x".to_string()));
    }
}

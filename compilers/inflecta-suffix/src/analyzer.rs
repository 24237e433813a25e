use inflecta_codec::apply;
use inflecta_codec::grammar::leading_number;
use inflecta_protocol::{Analysis, IRREGULAR_MARKER};

use crate::config::SuffixConfig;
use crate::table::{suffix, SuffixKey, SuffixTable};

/// Read-only lemmatizer over a trained table.
#[derive(Debug, Clone)]
pub struct Analyzer {
    table: SuffixTable,
    max_suf: usize,
    lowercase: bool,
}

impl Analyzer {
    pub fn new(table: SuffixTable, config: &SuffixConfig) -> Self {
        Self {
            table,
            max_suf: config.max_suf,
            lowercase: config.lowercase,
        }
    }

    pub fn table(&self) -> &SuffixTable {
        &self.table
    }

    pub fn analyze(&self, word: &str) -> Vec<Analysis> {
        analyze(&self.table, word, self.max_suf, self.lowercase)
    }
}

/// Lemma and tag candidates for `word`.
///
/// Irregular entries for the whole word come first. Then the longest ending
/// present in the table supplies the regular candidates; shorter endings are
/// not consulted. A word nothing explains gets a single fallback analysis.
pub fn analyze(table: &SuffixTable, word: &str, max_suf: usize, lowercase: bool) -> Vec<Analysis> {
    let word = if lowercase {
        word.to_lowercase()
    } else {
        word.to_string()
    };
    let mut analyses = Vec::new();

    if let Some(rules) = table.rules(SuffixKey::Irregular, &word) {
        for rule in rules.keys() {
            let lemma = rule.script.strip_prefix(IRREGULAR_MARKER).unwrap_or(&rule.script);
            analyses.push(Analysis::new(lemma, rule.tag.clone()));
        }
    }

    for len in (1..=max_suf).rev() {
        let Some(rules) = table.rules(SuffixKey::Length(len), suffix(&word, len)) else {
            continue;
        };
        for rule in rules.keys() {
            if let Some(lemma) = apply_candidate(&word, &rule.script) {
                analyses.push(Analysis::new(lemma, rule.tag.clone()));
            }
        }
        log::debug!("{:?}: ending of {} gave {} analyses", word, len, analyses.len());
        break;
    }

    if analyses.is_empty() {
        analyses.push(Analysis::fallback(&word));
    }
    analyses
}

fn apply_candidate(word: &str, script: &str) -> Option<String> {
    let (stem, script) = match script.strip_prefix('<') {
        Some(rest) => {
            let (prefix, rest) = rest.split_once(' ').unwrap_or((rest, ""));
            (word.strip_prefix(prefix)?, rest)
        }
        None => (word, script),
    };

    let stem_len = stem.chars().count();
    let too_short = script
        .split(',')
        .filter_map(leading_number)
        .any(|n| stem_len <= n);
    if too_short {
        log::trace!("{:?} too short for {:?}", stem, script);
        return None;
    }

    match apply(stem, script) {
        Ok(lemma) => Some(lemma),
        Err(e) => {
            log::trace!("skipping {:?} for {:?}: {}", script, stem, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inflecta_protocol::{RuleKey, PUNCTUATION_TAG, UNKNOWN_TAG};

    fn table() -> SuffixTable {
        let mut table = SuffixTable::new();
        table.add(SuffixKey::Length(1), "s", RuleKey::new(">1", "N"), 4);
        table.add(SuffixKey::Length(1), "s", RuleKey::new(">1", "V"), 2);
        table.add(SuffixKey::Length(2), "es", RuleKey::new(">2", "N"), 2);
        table.add(SuffixKey::Length(3), "ppy", RuleKey::new("<un", "A"), 2);
        table.add(SuffixKey::Length(3), "ing", RuleKey::new(">3", "N"), 2);
        table.add(SuffixKey::Length(3), "ing", RuleKey::new(">3,1:1-a", "V"), 2);
        table.add(SuffixKey::Irregular, "went", RuleKey::new("*go", "V"), 3);
        table
    }

    fn render(analyses: &[Analysis]) -> Vec<String> {
        analyses.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_longest_ending_wins() {
        assert_eq!(render(&analyze(&table(), "boxes", 3, false)), ["box|N"]);
        assert_eq!(render(&analyze(&table(), "cats", 3, false)), ["cat|N", "cat|V"]);
    }

    #[test]
    fn test_irregular_first() {
        let mut table = table();
        table.add(SuffixKey::Length(1), "t", RuleKey::new(">0", "N"), 2);
        assert_eq!(render(&analyze(&table, "went", 2, false)), ["go|V", "went|N"]);
    }

    #[test]
    fn test_prefix_rule() {
        assert_eq!(render(&analyze(&table(), "unhappy", 3, false)), ["happy|A"]);
        // Ending matches but the prefix does not
        assert_eq!(render(&analyze(&table(), "snappy", 3, false)), [format!("snappy|{}", UNKNOWN_TAG)]);
    }

    #[test]
    fn test_short_stem_rejected() {
        // ">2" needs at least three characters
        assert_eq!(render(&analyze(&table(), "es", 2, false)), [format!("es|{}", UNKNOWN_TAG)]);
        assert_eq!(render(&analyze(&table(), "as", 2, false)), ["a|N", "a|V"]);
    }

    #[test]
    fn test_failed_apply_skipped() {
        // The middle rule points past the chopped stem
        assert_eq!(render(&analyze(&table(), "swing", 3, false)), ["sw|N"]);
    }

    #[test]
    fn test_fallback_tags() {
        let empty = SuffixTable::new();
        assert_eq!(render(&analyze(&empty, ",", 4, false)), [format!(",|{}", PUNCTUATION_TAG)]);
        assert_eq!(render(&analyze(&empty, "xyz", 4, false)), [format!("xyz|{}", UNKNOWN_TAG)]);
        assert_eq!(render(&analyze(&empty, "", 4, false)), [format!("|{}", UNKNOWN_TAG)]);
    }

    #[test]
    fn test_lowercase_lookup() {
        let analyzer = Analyzer::new(
            table(),
            &SuffixConfig {
                max_suf: 3,
                lowercase: true,
                ..SuffixConfig::default()
            },
        );
        assert_eq!(render(&analyzer.analyze("WENT")), ["go|V"]);
        assert_eq!(render(&analyze(&table(), "WENT", 3, false)), [format!("WENT|{}", UNKNOWN_TAG)]);
    }
}

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use inflecta_protocol::{RuleKey, IRREGULAR_MARKER};
use serde::{Deserialize, Serialize};

use crate::error::SuffixError;

/// Observed rules for one ending, with their counts.
pub type RuleCounts = BTreeMap<RuleKey, u32>;

/// Endings of one suffix length.
pub type Bucket = BTreeMap<String, RuleCounts>;

/// Top-level key of a suffix table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SuffixKey {
    /// Whole irregular words, spelled `*`.
    Irregular,
    /// Endings of this many characters.
    Length(usize),
}

impl fmt::Display for SuffixKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuffixKey::Irregular => write!(f, "{}", IRREGULAR_MARKER),
            SuffixKey::Length(len) => write!(f, "{}", len),
        }
    }
}

impl FromStr for SuffixKey {
    type Err = SuffixError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.len() == 1 && text.starts_with(IRREGULAR_MARKER) {
            return Ok(SuffixKey::Irregular);
        }
        match text.parse::<usize>() {
            Ok(len) if len > 0 => Ok(SuffixKey::Length(len)),
            _ => Err(SuffixError::InvalidKey(text.to_string())),
        }
    }
}

/// The last `len` characters of `word`, or all of it when it is shorter.
pub fn suffix(word: &str, len: usize) -> &str {
    let Some(skip) = len.checked_sub(1) else {
        return &word[word.len()..];
    };
    word.char_indices()
        .rev()
        .nth(skip)
        .map_or(word, |(idx, _)| &word[idx..])
}

/// Word endings mapped to the scripts and tags observed with them.
///
/// Serializes as `{"*" | "<len>": {ending: {"script|tag": count}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawTable", try_from = "RawTable")]
pub struct SuffixTable {
    buckets: BTreeMap<SuffixKey, Bucket>,
}

impl SuffixTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn bucket(&self, key: SuffixKey) -> Option<&Bucket> {
        self.buckets.get(&key)
    }

    pub fn rules(&self, key: SuffixKey, ending: &str) -> Option<&RuleCounts> {
        self.buckets.get(&key)?.get(ending)
    }

    pub fn buckets(&self) -> impl Iterator<Item = (SuffixKey, &Bucket)> {
        self.buckets.iter().map(|(key, bucket)| (*key, bucket))
    }

    /// Longest indexed suffix length.
    pub fn max_suffix_len(&self) -> usize {
        self.buckets
            .keys()
            .filter_map(|key| match key {
                SuffixKey::Length(len) => Some(*len),
                SuffixKey::Irregular => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Number of (ending, rule) entries across all buckets.
    pub fn rule_count(&self) -> usize {
        self.buckets
            .values()
            .flat_map(|bucket| bucket.values())
            .map(|rules| rules.len())
            .sum()
    }

    pub fn add(&mut self, key: SuffixKey, ending: &str, rule: RuleKey, count: u32) {
        let counts = self
            .buckets
            .entry(key)
            .or_default()
            .entry(ending.to_string())
            .or_default();
        *counts.entry(rule).or_insert(0) += count;
    }

    /// Drops rules seen `threshold` times or fewer, then any ending or
    /// bucket left empty. Returns how many rules were dropped.
    pub fn prune(&mut self, threshold: u32) -> usize {
        let mut dropped = 0;
        for bucket in self.buckets.values_mut() {
            for rules in bucket.values_mut() {
                let before = rules.len();
                rules.retain(|_, count| *count > threshold);
                dropped += before - rules.len();
            }
            bucket.retain(|_, rules| !rules.is_empty());
        }
        self.buckets.retain(|_, bucket| !bucket.is_empty());
        dropped
    }

    pub fn to_json(&self) -> Result<String, SuffixError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SuffixError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SuffixError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SuffixError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// String-keyed spelling of a table, as stored in JSON.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct RawTable(BTreeMap<String, BTreeMap<String, BTreeMap<String, u32>>>);

impl From<SuffixTable> for RawTable {
    fn from(table: SuffixTable) -> Self {
        let raw = table
            .buckets
            .into_iter()
            .map(|(key, bucket)| {
                let bucket = bucket
                    .into_iter()
                    .map(|(ending, rules)| {
                        let rules = rules
                            .into_iter()
                            .map(|(rule, count)| (rule.to_string(), count))
                            .collect();
                        (ending, rules)
                    })
                    .collect();
                (key.to_string(), bucket)
            })
            .collect();
        RawTable(raw)
    }
}

impl TryFrom<RawTable> for SuffixTable {
    type Error = SuffixError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let mut table = SuffixTable::new();
        for (key, bucket) in raw.0 {
            let key: SuffixKey = key.parse()?;
            for (ending, rules) in bucket {
                for (rule, count) in rules {
                    if count == 0 {
                        return Err(SuffixError::ZeroCount(rule));
                    }
                    let parsed = RuleKey::parse(&rule).ok_or(SuffixError::InvalidRule(rule))?;
                    table.add(key, &ending, parsed, count);
                }
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SuffixTable {
        let mut table = SuffixTable::new();
        table.add(SuffixKey::Length(1), "s", RuleKey::new(">1", "N"), 2);
        table.add(SuffixKey::Length(1), "s", RuleKey::new(">1", "V"), 1);
        table.add(SuffixKey::Length(2), "ts", RuleKey::new(">1", "N"), 1);
        table.add(SuffixKey::Irregular, "went", RuleKey::new("*go", "V"), 3);
        table
    }

    #[test]
    fn test_suffix() {
        assert_eq!(suffix("cats", 1), "s");
        assert_eq!(suffix("cats", 3), "ats");
        assert_eq!(suffix("cats", 9), "cats");
        assert_eq!(suffix("cats", 0), "");
        assert_eq!(suffix("myší", 2), "ší");
        assert_eq!(suffix("", 2), "");
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!("*".parse::<SuffixKey>().unwrap(), SuffixKey::Irregular);
        assert_eq!("12".parse::<SuffixKey>().unwrap(), SuffixKey::Length(12));
        for bad in ["0", "-1", "x", "**", ""] {
            assert!(matches!(bad.parse::<SuffixKey>(), Err(SuffixError::InvalidKey(_))));
        }
        assert!(SuffixKey::Irregular < SuffixKey::Length(1));
    }

    #[test]
    fn test_add_accumulates() {
        let mut table = sample();
        table.add(SuffixKey::Length(1), "s", RuleKey::new(">1", "N"), 1);
        assert_eq!(table.rules(SuffixKey::Length(1), "s").unwrap()[&RuleKey::new(">1", "N")], 3);
        assert_eq!(table.rule_count(), 4);
        assert_eq!(table.max_suffix_len(), 2);
    }

    #[test]
    fn test_prune_removes_empty_buckets() {
        let mut table = sample();
        assert_eq!(table.prune(1), 2);
        assert!(table.bucket(SuffixKey::Length(2)).is_none());
        assert_eq!(table.rules(SuffixKey::Length(1), "s").unwrap().len(), 1);
        assert!(table.rules(SuffixKey::Irregular, "went").is_some());

        assert_eq!(table.prune(10), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_json_layout() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["*"]["went"]["*go|V"], 3);
        assert_eq!(value["1"]["s"][">1|N"], 2);
        assert_eq!(value["2"]["ts"][">1|N"], 1);
    }

    #[test]
    fn test_json_reload() {
        let table = sample();
        let reloaded = SuffixTable::from_json(&table.to_json().unwrap()).unwrap();
        assert_eq!(reloaded, table);
        assert!(reloaded.bucket(SuffixKey::Length(2)).is_some());
    }

    #[test]
    fn test_json_rejects_bad_entries() {
        assert!(matches!(
            SuffixTable::from_json(r#"{"two": {"s": {">1|N": 1}}}"#),
            Err(SuffixError::Json(_))
        ));
        assert!(SuffixTable::from_json(r#"{"1": {"s": {">1": 1}}}"#).is_err());
        assert!(SuffixTable::from_json(r#"{"1": {"s": {">1|N": 0}}}"#).is_err());
        assert!(SuffixTable::from_json("{}").unwrap().is_empty());
    }
}

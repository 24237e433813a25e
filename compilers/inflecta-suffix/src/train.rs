use inflecta_align::Aligner;
use inflecta_codec::Codec;
use inflecta_protocol::{RuleKey, IRREGULAR_MARKER};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::SuffixConfig;
use crate::error::SuffixError;
use crate::table::{suffix, SuffixKey, SuffixTable};

/// One annotated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub form: String,
    pub lemma: String,
    pub tag: String,
}

impl Record {
    pub fn new(form: impl Into<String>, lemma: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            lemma: lemma.into(),
            tag: tag.into(),
        }
    }
}

/// Builds a pruned suffix table from annotated tokens.
///
/// Each record contributes the script turning its form back into its lemma,
/// computed case-insensitively. `lowercase` only decides whether forms are
/// keyed in lowercase.
/// Irregular scripts are keyed by the whole form; all others are counted
/// under every ending of length `1..=max_suf`.
pub fn train(records: &[Record], config: &SuffixConfig) -> Result<SuffixTable, SuffixError> {
    let codec = Codec::new(Aligner::default().with_max_len(config.max_len)).ignore_case(true);

    #[cfg(feature = "parallel")]
    let observations = records
        .par_iter()
        .map(|record| observe(&codec, record, config.lowercase))
        .collect::<Result<Vec<_>, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let observations = records
        .iter()
        .map(|record| observe(&codec, record, config.lowercase))
        .collect::<Result<Vec<_>, _>>()?;

    let mut table = SuffixTable::new();
    for (form, rule) in observations {
        if rule.script.starts_with(IRREGULAR_MARKER) {
            table.add(SuffixKey::Irregular, &form, rule, 1);
            continue;
        }
        for len in 1..=config.max_suf {
            table.add(SuffixKey::Length(len), suffix(&form, len), rule.clone(), 1);
        }
    }

    let seen = table.rule_count();
    let dropped = table.prune(config.threshold);
    log::info!(
        "trained on {} records: kept {} of {} rules (threshold {})",
        records.len(),
        seen - dropped,
        seen,
        config.threshold
    );
    Ok(table)
}

fn observe(codec: &Codec, record: &Record, lowercase: bool) -> Result<(String, RuleKey), SuffixError> {
    let form = if lowercase {
        record.form.to_lowercase()
    } else {
        record.form.clone()
    };
    let script = codec
        .inverse_edit_script(&record.form, &record.lemma)
        .map_err(|source| SuffixError::Record {
            form: record.form.clone(),
            lemma: record.lemma.clone(),
            source,
        })?;
    log::trace!("{} -> {}: {:?}", record.form, record.lemma, script);
    Ok((form, RuleKey::new(script.table_key(), record.tag.clone())))
}

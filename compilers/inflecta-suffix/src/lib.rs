//! Suffix-indexed lemmatizer: learns form-to-lemma edit scripts keyed by
//! word endings and applies them to unseen words.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod image;
pub mod table;
pub mod train;

pub use analyzer::{analyze, Analyzer};
pub use config::SuffixConfig;
pub use error::SuffixError;
pub use table::{suffix, Bucket, RuleCounts, SuffixKey, SuffixTable};
pub use train::{train, Record};

use std::io;

use inflecta_codec::CodecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuffixError {
    #[error("invalid table key {0:?}: expected \"*\" or a positive suffix length")]
    InvalidKey(String),

    #[error("invalid rule {0:?}: expected script|tag")]
    InvalidRule(String),

    #[error("rule {0:?} has a zero count")]
    ZeroCount(String),

    #[error("cannot encode {form:?} -> {lemma:?}: {source}")]
    Record {
        form: String,
        lemma: String,
        #[source]
        source: CodecError,
    },

    #[error("table image version {found} is not supported (expected {expected})")]
    ImageVersion { found: u32, expected: u32 },

    #[error("invalid table image: {0}")]
    Archive(String),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

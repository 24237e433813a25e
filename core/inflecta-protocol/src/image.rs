use rkyv::{Archive, Deserialize, Serialize};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Bumped whenever the archived layout changes.
pub const TABLE_IMAGE_VERSION: u32 = 1;

/// `suffix_len` value of the bucket holding whole irregular words.
pub const IRREGULAR_BUCKET: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct ImageRule {
    pub script: String,
    pub tag: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct ImageBucket {
    /// Suffix length, or `IRREGULAR_BUCKET` for whole words.
    pub suffix_len: u32,
    pub ending: String,
    pub rules: Vec<ImageRule>,
}

/// Flat binary image of a suffix table, loaded by the browser engine.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct TableImage {
    pub version: u32,
    pub buckets: Vec<ImageBucket>,
}

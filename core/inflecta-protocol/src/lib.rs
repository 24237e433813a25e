#![no_std] // Shared with the WASM engine

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod direction;
pub mod image;
pub mod rule;
pub mod script;

// Re-export core types for convenience
pub use direction::Dir;
pub use rule::{Analysis, RuleKey, KEY_SEPARATOR, PUNCTUATION_TAG, UNKNOWN_TAG};
pub use script::{EditScript, IRREGULAR_MARKER};

pub use image::*;

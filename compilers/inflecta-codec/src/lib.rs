pub mod apply;
pub mod encode;
pub mod error;
pub mod grammar;

pub use apply::apply;
pub use encode::{encode, Direction};
pub use error::{CodecError, Malformation, RuleKind};
pub use grammar::parse_markup;
pub use inflecta_protocol::EditScript;

use inflecta_align::{Aligner, Levenshtein, MergedDiff, Scoring};

/// Turns string pairs into edit scripts.
#[derive(Debug, Clone)]
pub struct Codec<S = Levenshtein> {
    aligner: Aligner<S>,
    ignore_case: bool,
}

impl Default for Codec<Levenshtein> {
    fn default() -> Self {
        Self::new(Aligner::default())
    }
}

impl<S: Scoring> Codec<S> {
    pub fn new(aligner: Aligner<S>) -> Self {
        Self {
            aligner,
            ignore_case: false,
        }
    }

    /// Lowercases both strings before aligning them.
    pub fn ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    pub fn aligner(&self) -> &Aligner<S> {
        &self.aligner
    }

    pub fn diff(&self, source: &str, target: &str) -> Result<MergedDiff, CodecError> {
        let diff = if self.ignore_case {
            self.aligner
                .merged_diff(&source.to_lowercase(), &target.to_lowercase())?
        } else {
            self.aligner.merged_diff(source, target)?
        };
        Ok(diff)
    }

    pub fn script(&self, source: &str, target: &str, direction: Direction) -> Result<EditScript, CodecError> {
        let diff = self.diff(source, target)?;
        Ok(encode(&diff, direction))
    }

    /// Script turning `lemma` into `form`.
    pub fn edit_script(&self, lemma: &str, form: &str) -> Result<EditScript, CodecError> {
        self.script(lemma, form, Direction::Forward)
    }

    /// Script turning `form` back into `lemma`.
    pub fn inverse_edit_script(&self, form: &str, lemma: &str) -> Result<EditScript, CodecError> {
        self.script(form, lemma, Direction::Inverse)
    }
}

pub fn edit_script(lemma: &str, form: &str) -> Result<EditScript, CodecError> {
    Codec::default().edit_script(lemma, form)
}

pub fn inverse_edit_script(form: &str, lemma: &str) -> Result<EditScript, CodecError> {
    Codec::default().inverse_edit_script(form, lemma)
}

/// Encodes a textual merged diff such as `` s`i'<a>ng ``.
pub fn encode_markup(markup: &str, direction: Direction) -> Result<EditScript, CodecError> {
    Ok(encode(&parse_markup(markup)?, direction))
}

/// Label for a `(lemma, form)` pair: front and middle/back rules joined by a comma.
pub fn compute_label(lemma: &str, form: &str) -> Result<String, CodecError> {
    Ok(edit_script(lemma, form)?.label())
}

/// Rebuilds the form from a lemma and a label produced by [`compute_label`].
pub fn apply_label(lemma: &str, label: &str) -> Result<String, CodecError> {
    apply(lemma, label)
}

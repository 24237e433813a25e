use inflecta_codec::{apply, Codec};
use inflecta_protocol::Analysis;
use inflecta_suffix::{Analyzer, SuffixConfig, SuffixTable};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Script pair sent back to JavaScript.
#[derive(Debug, Serialize)]
pub struct ScriptReport {
    pub front: String,
    pub midback: String,
    pub label: String,
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Lemmatizer running in the browser over a compiled table image
/// (fetched by JS and passed in as bytes).
#[wasm_bindgen]
pub struct InflectaEngine {
    analyzer: Analyzer,
}

impl InflectaEngine {
    fn from_image(data: &[u8], max_suf: usize, lowercase: bool) -> Result<Self, String> {
        let table = SuffixTable::from_bytes(data).map_err(|e| e.to_string())?;
        let config = SuffixConfig {
            max_suf,
            lowercase,
            ..SuffixConfig::default()
        };
        Ok(Self {
            analyzer: Analyzer::new(table, &config),
        })
    }

    fn analyses(&self, word: &str) -> Vec<Analysis> {
        self.analyzer.analyze(word)
    }
}

#[wasm_bindgen]
impl InflectaEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(data: Vec<u8>, max_suf: usize, lowercase: bool) -> Result<InflectaEngine, JsValue> {
        Self::from_image(&data, max_suf, lowercase).map_err(to_js_error)
    }

    /// `[{lemma, tag}, ...]` for one word.
    pub fn analyze(&self, word: &str) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.analyses(word)).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = ruleCount)]
    pub fn rule_count(&self) -> usize {
        self.analyzer.table().rule_count()
    }
}

fn script_report(lemma: &str, form: &str) -> Result<ScriptReport, String> {
    let script = Codec::default()
        .edit_script(lemma, form)
        .map_err(|e| e.to_string())?;
    Ok(ScriptReport {
        label: script.label(),
        front: script.front,
        midback: script.midback,
    })
}

/// Edit script turning `lemma` into `form`.
#[wasm_bindgen(js_name = editScript)]
pub fn edit_script(lemma: &str, form: &str) -> Result<JsValue, JsValue> {
    let report = script_report(lemma, form).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&report).map_err(to_js_error)
}

#[wasm_bindgen(js_name = applyScript)]
pub fn apply_script(lemma: &str, script: &str) -> Result<String, JsValue> {
    apply(lemma, script).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inflecta_protocol::RuleKey;
    use inflecta_suffix::SuffixKey;

    fn image() -> Vec<u8> {
        let mut table = SuffixTable::new();
        table.add(SuffixKey::Length(1), "s", RuleKey::new(">1", "N"), 2);
        table.add(SuffixKey::Irregular, "mice", RuleKey::new("*mouse", "N"), 2);
        table.to_bytes().unwrap()
    }

    #[test]
    fn test_engine_analyzes() {
        let engine = InflectaEngine::from_image(&image(), 4, true).unwrap();
        assert_eq!(engine.analyses("Cats"), [Analysis::new("cat", "N")]);
        assert_eq!(engine.analyses("mice"), [Analysis::new("mouse", "N")]);
        assert_eq!(engine.analyses("?")[0].tag, "Z:-------------");
    }

    #[test]
    fn test_rejects_bad_image() {
        assert!(InflectaEngine::from_image(&[0, 1, 2], 4, false).is_err());
    }

    #[test]
    fn test_script_report() {
        let report = script_report("sing", "sangs").unwrap();
        assert_eq!(report.label, ">0s,3:1-a");
        assert_eq!(report.front, "");
        assert_eq!(apply("sing", &report.label).unwrap(), "sangs");
    }
}

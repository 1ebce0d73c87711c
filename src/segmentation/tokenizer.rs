use std::path::Path;

use vibrato::Tokenizer;
use wana_kana::ConvertJapanese;

use super::{
    annotation::{
        ToReading,
        Tokenize,
    },
    token_models::{
        AnalyzedToken,
        VibratoToken,
    },
};
use crate::{
    core::{
        utils::contains_kanji,
        YomireiError,
    },
    dictionary::{
        ensure_dictionary,
        load_dictionary,
        DictType,
    },
};

/// Morphological analysis and kanji readings backed by a vibrato dictionary.
///
/// The tokenizer is immutable and shared; each call borrows its own worker.
pub struct VibratoAnalyzer {
    tokenizer: Tokenizer,
    dict_type: DictType,
}

impl VibratoAnalyzer {
    pub fn new(tokenizer: Tokenizer, dict_type: DictType) -> Self {
        Self { tokenizer, dict_type }
    }

    fn vibrato_tokens(&self, text: &str) -> Vec<VibratoToken> {
        let mut worker = self.tokenizer.new_worker();
        worker.reset_sentence(text);
        worker.tokenize();
        worker.token_iter().map(VibratoToken::from).collect()
    }
}

impl Tokenize for VibratoAnalyzer {
    fn tokenize(&self, text: &str) -> Vec<AnalyzedToken> {
        self.vibrato_tokens(text).iter().map(|token| token.analyze(&self.dict_type)).collect()
    }
}

impl ToReading for VibratoAnalyzer {
    fn to_reading(&self, text: &str) -> String {
        self.vibrato_tokens(text)
            .into_iter()
            .map(|token| {
                if !contains_kanji(&token.surface) {
                    return token.surface;
                }
                token.reading(&self.dict_type).map(|r| r.to_hiragana()).unwrap_or(token.surface)
            })
            .collect()
    }
}

pub fn init_vibrato(
    dict_type: &DictType,
    dictionary_path: Option<&Path>,
) -> Result<Tokenizer, YomireiError> {
    let dict_path = match dictionary_path {
        Some(path) => path.to_path_buf(),
        None => ensure_dictionary(dict_type)?,
    };
    tracing::info!("Loading tokenizer dictionary {:?}", dict_path);
    let dict = load_dictionary(&dict_path)?;
    Ok(Tokenizer::new(dict))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::segmentation::annotation::annotate;

    /// Tests against a real dictionary only run when `VIBRATO_DICT` points at a
    /// UniDic `system.dic`.
    fn load_test_analyzer() -> Option<VibratoAnalyzer> {
        let path = PathBuf::from(std::env::var("VIBRATO_DICT").ok()?);
        match init_vibrato(&DictType::Unidic, Some(path.as_path())) {
            Ok(tokenizer) => Some(VibratoAnalyzer::new(tokenizer, DictType::Unidic)),
            Err(e) => {
                eprintln!("Couldn't load dictionary for tests: {e}");
                None
            }
        }
    }

    #[test]
    fn test_missing_dictionary_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = init_vibrato(&DictType::Unidic, Some(dir.path().join("system.dic").as_path()));
        assert!(result.is_err());
    }

    #[test]
    fn test_kanji_reading() {
        let Some(analyzer) = load_test_analyzer() else {
            return;
        };
        assert_eq!(analyzer.to_reading("電車"), "でんしゃ");
        assert_eq!(analyzer.to_reading("テレビ"), "テレビ");
        assert_eq!(analyzer.to_reading("ひらがな"), "ひらがな");
    }

    #[test]
    fn test_annotate_sentence() {
        let Some(analyzer) = load_test_analyzer() else {
            return;
        };
        let annotated = annotate(&analyzer, "電車に乗る");
        assert!(annotated.starts_with("電車(でんしゃ) に"), "got {annotated}");
    }
}

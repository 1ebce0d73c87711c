use std::sync::Arc;

use crate::{
    core::{
        AppConfig,
        YomireiError,
    },
    dataset::Dataset,
    segmentation::{
        init_vibrato,
        Analyzer,
        VibratoAnalyzer,
    },
};

/// Everything a request needs, built once at startup and never mutated.
pub struct AppContext {
    pub dataset: Dataset,
    pub analyzer: Arc<dyn Analyzer>,
}

impl AppContext {
    pub fn new(dataset: Dataset, analyzer: Arc<dyn Analyzer>) -> Self {
        Self { dataset, analyzer }
    }

    /// Reads both tables and prepares the tokenizer. Blocking: may download the
    /// tokenizer dictionary on first run.
    pub fn load(config: &AppConfig) -> Result<Self, YomireiError> {
        let dataset = Dataset::load(&config.sentences_path, &config.navigation_path)?;
        let tokenizer = init_vibrato(&config.dictionary_type, config.dictionary_path.as_deref())?;
        let analyzer = VibratoAnalyzer::new(tokenizer, config.dictionary_type);
        Ok(Self::new(dataset, Arc::new(analyzer)))
    }
}

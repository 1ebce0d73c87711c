pub mod annotation;

pub mod token_models;

pub mod tokenizer;

pub use annotation::{
    annotate,
    Analyzer,
    ToReading,
    Tokenize,
};
pub use tokenizer::{
    init_vibrato,
    VibratoAnalyzer,
};

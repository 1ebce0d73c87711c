use super::token_models::AnalyzedToken;

/// Splits text into morphological tokens.
pub trait Tokenize {
    fn tokenize(&self, text: &str) -> Vec<AnalyzedToken>;
}

/// Converts kanji in `text` to hiragana, leaving all other script untouched.
pub trait ToReading {
    fn to_reading(&self, text: &str) -> String;
}

/// Both linguistic capabilities, shareable across request threads.
pub trait Analyzer: Tokenize + ToReading + Send + Sync {}

impl<T: Tokenize + ToReading + Send + Sync> Analyzer for T {}

/// Renders `text` with inline furigana: `電車(でんしゃ) に 乗る(のる)`.
///
/// Tokens without a reading attribute, and tokens whose reading equals their
/// surface (kana, latin, punctuation), are emitted bare.
pub fn annotate<A: Tokenize + ToReading + ?Sized>(analyzer: &A, text: &str) -> String {
    analyzer
        .tokenize(text)
        .into_iter()
        .map(|token| {
            let reading = if token.has_reading {
                analyzer.to_reading(&token.surface)
            } else {
                token.surface.clone()
            };

            if reading == token.surface {
                token.surface
            } else {
                format!("{}({})", token.surface, reading)
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

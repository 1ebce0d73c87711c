use crate::dictionary::DictType;

/// A token as produced by the morphological analyzer, before any reading
/// conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedToken {
    pub surface: String,
    pub has_reading: bool,
}

/// Owned copy of a vibrato token, decoupled from the worker's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VibratoToken {
    pub surface: String,
    pub features: String,
}

impl From<vibrato::token::Token<'_, '_>> for VibratoToken {
    fn from(value: vibrato::token::Token) -> Self {
        Self {
            surface: value.surface().into(),
            features: value.feature().into(),
        }
    }
}

impl VibratoToken {
    /// Katakana reading from the feature columns, if the dictionary knows one.
    /// `*` marks an unset column.
    pub fn reading(&self, dict_type: &DictType) -> Option<&str> {
        self.features
            .split(',')
            .nth(dict_type.reading_index())
            .map(str::trim)
            .filter(|r| !r.is_empty() && *r != "*")
    }

    pub fn analyze(&self, dict_type: &DictType) -> AnalyzedToken {
        AnalyzedToken {
            surface: self.surface.clone(),
            has_reading: self.reading(dict_type).is_some(),
        }
    }
}

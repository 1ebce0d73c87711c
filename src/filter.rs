use regex::{
    Regex,
    RegexBuilder,
};

use crate::{
    core::{
        Record,
        YomireiError,
    },
    dataset::SentenceTable,
};

pub const PAGE_SIZE: usize = 50;

// Large word lists compile into big alternations
const PATTERN_SIZE_LIMIT: usize = 64 * (1 << 20);

/// One case-insensitive alternation over `words`, each matched literally.
/// `None` when there is nothing to match.
pub fn word_pattern(words: &[&str]) -> Result<Option<Regex>, YomireiError> {
    if words.is_empty() {
        return Ok(None);
    }

    let alternation = words.iter().map(|w| regex::escape(w)).collect::<Vec<String>>().join("|");
    let regex = RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()?;
    Ok(Some(regex))
}

/// Sentence rows whose text contains any of `words`, in table order.
pub fn matching_sentences<'a>(
    table: &'a SentenceTable,
    words: &[&str],
) -> Result<Vec<&'a Record>, YomireiError> {
    let Some(pattern) = word_pattern(words)? else {
        return Ok(Vec::new());
    };

    Ok(table
        .rows()
        .iter()
        .filter(|row| table.sentence(row).is_some_and(|text| pattern.is_match(text)))
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based, after clamping.
    pub page: usize,
    pub total_rows: usize,
    pub total_pages: usize,
}

impl Pagination {
    /// Page numbers below 1 are clamped to 1. Pages past the end are kept as
    /// requested and select nothing.
    pub fn new(requested: i64, total_rows: usize) -> Self {
        let page = usize::try_from(requested.max(1)).unwrap_or(usize::MAX);
        Self { page, total_rows, total_pages: total_rows.div_ceil(PAGE_SIZE) }
    }

    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(PAGE_SIZE)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(PAGE_SIZE).min(items.len());
        &items[start..end]
    }
}

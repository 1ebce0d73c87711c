use std::{
    fs::File,
    io::Read,
    path::Path,
};

use crate::core::{
    utils::is_truthy,
    Record,
    Table,
    YomireiError,
};

pub const SENTENCE_COLUMN: &str = "Sentence";
pub const WORD_COLUMN: &str = "Word";

/// Example sentences. Column 0 is a row identifier that is never displayed.
#[derive(Debug, Clone)]
pub struct SentenceTable {
    table: Table,
    sentence_col: usize,
}

impl SentenceTable {
    pub fn new(table: Table) -> Result<Self, YomireiError> {
        let sentence_col = table.require_column(SENTENCE_COLUMN)?;
        Ok(Self { table, sentence_col })
    }

    pub fn headers(&self) -> &[String] {
        &self.table.headers
    }

    pub fn rows(&self) -> &[Record] {
        &self.table.rows
    }

    pub fn sentence<'a>(&self, row: &'a Record) -> Option<&'a str> {
        row.get(self.sentence_col).and_then(|c| c.as_deref())
    }
}

/// Vocabulary words with one membership flag column per category.
#[derive(Debug, Clone)]
pub struct NavigationTable {
    table: Table,
    word_col: usize,
    categories: Vec<String>,
}

impl NavigationTable {
    pub fn new(table: Table) -> Result<Self, YomireiError> {
        let word_col = table.require_column(WORD_COLUMN)?;
        let categories = table
            .headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != word_col)
            .map(|(_, header)| header.clone())
            .collect();
        Ok(Self { table, word_col, categories })
    }

    /// Category names in header order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Words flagged for `category`, in table order, or `None` for an unknown
    /// category. Blank words are skipped.
    pub fn words_in(&self, category: &str) -> Option<Vec<&str>> {
        let col = self.table.column(category).filter(|col| *col != self.word_col)?;

        Some(
            self.table
                .rows
                .iter()
                .filter(|row| is_truthy(row[col].as_deref()))
                .filter_map(|row| row[self.word_col].as_deref())
                .map(str::trim)
                .filter(|word| !word.is_empty())
                .collect(),
        )
    }
}

/// Both startup tables. Built once, then only read.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub sentences: SentenceTable,
    pub navigation: NavigationTable,
}

impl Dataset {
    pub fn load(sentences_path: &Path, navigation_path: &Path) -> Result<Self, YomireiError> {
        let sentences = open(sentences_path)?;
        let navigation = open(navigation_path)?;
        let dataset = Self::from_readers(
            &sentences_path.display().to_string(),
            sentences,
            &navigation_path.display().to_string(),
            navigation,
        )?;

        tracing::info!(
            sentences = dataset.sentences.rows().len(),
            categories = dataset.navigation.categories().len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }

    pub fn from_readers<S: Read, N: Read>(
        sentences_name: &str,
        sentences: S,
        navigation_name: &str,
        navigation: N,
    ) -> Result<Self, YomireiError> {
        Ok(Self {
            sentences: SentenceTable::new(Table::from_reader(sentences_name, sentences)?)?,
            navigation: NavigationTable::new(Table::from_reader(navigation_name, navigation)?)?,
        })
    }
}

fn open(path: &Path) -> Result<File, YomireiError> {
    File::open(path)
        .map_err(|e| YomireiError::Custom(format!("Failed to open {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const NAVIGATION: &str = "Word,Travel,Food\n電車,1,0\nラーメン,0,1\n寿司,0,1\n,1,1\n";
    const SENTENCES: &str = "id,Sentence,Translation\n1,電車に乗る,Ride the train\n2,,No sentence\n";

    fn dataset() -> Dataset {
        Dataset::from_readers("s", SENTENCES.as_bytes(), "n", NAVIGATION.as_bytes()).unwrap()
    }

    #[test]
    fn test_categories_are_non_word_headers_in_order() {
        let nav = "Travel,Word,Food\n電車,1,0\n";
        let dataset = Dataset::from_readers("s", SENTENCES.as_bytes(), "n", nav.as_bytes()).unwrap();
        assert_eq!(dataset.navigation.categories(), ["Travel", "Food"]);
    }

    #[test]
    fn test_words_in_category() {
        let dataset = dataset();
        assert_eq!(dataset.navigation.words_in("Travel"), Some(vec!["電車"]));
        assert_eq!(dataset.navigation.words_in("Food"), Some(vec!["ラーメン", "寿司"]));
        assert_eq!(dataset.navigation.words_in("Word"), None);
        assert_eq!(dataset.navigation.words_in("Music"), None);
    }

    #[test]
    fn test_only_exact_one_or_true_marks_membership() {
        let nav = "Word,Travel\n電車,2\n猫,x\n駅,1.0\n旅行,TRUE\n";
        let dataset = Dataset::from_readers("s", SENTENCES.as_bytes(), "n", nav.as_bytes()).unwrap();
        assert_eq!(dataset.navigation.words_in("Travel"), Some(vec!["駅", "旅行"]));
    }

    #[test]
    fn test_sentence_accessor() {
        let dataset = dataset();
        let rows = dataset.sentences.rows();
        assert_eq!(dataset.sentences.sentence(&rows[0]), Some("電車に乗る"));
        assert_eq!(dataset.sentences.sentence(&rows[1]), None);
    }

    #[test]
    fn test_missing_required_columns() {
        let err = Dataset::from_readers("s", "id,Text\n".as_bytes(), "n", NAVIGATION.as_bytes())
            .unwrap_err();
        assert!(matches!(err, YomireiError::MissingColumn { ref column, .. } if column == "Sentence"));

        let err = Dataset::from_readers("s", SENTENCES.as_bytes(), "n", "Term,Food\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, YomireiError::MissingColumn { ref column, .. } if column == "Word"));
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let sentences = dir.path().join("sentence.csv");
        let navigation = dir.path().join("navigation.csv");
        fs::write(&sentences, SENTENCES).unwrap();
        fs::write(&navigation, NAVIGATION).unwrap();

        let dataset = Dataset::load(&sentences, &navigation).unwrap();
        assert_eq!(dataset.sentences.rows().len(), 2);
        assert_eq!(dataset.sentences.headers(), ["id", "Sentence", "Translation"]);

        assert!(Dataset::load(&dir.path().join("missing.csv"), &navigation).is_err());
    }
}

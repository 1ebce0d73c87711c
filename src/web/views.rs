use rayon::prelude::*;

use crate::{
    context::AppContext,
    core::{
        Cell,
        DisplayRow,
        Record,
        YomireiError,
    },
    dataset::SENTENCE_COLUMN,
    filter::{
        matching_sentences,
        Pagination,
    },
    segmentation::{
        annotate,
        Analyzer,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePage {
    pub category: String,
    pub current_page: usize,
    pub total_pages: usize,
    pub rows: Vec<DisplayRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryView {
    NotFound,
    Page(SentencePage),
}

pub fn index_view(ctx: &AppContext) -> &[String] {
    ctx.dataset.navigation.categories()
}

/// One page of annotated sentences for `category`. `page` defaults to 1.
pub fn category_view(
    ctx: &AppContext,
    category: &str,
    page: Option<i64>,
) -> Result<CategoryView, YomireiError> {
    let Some(words) = ctx.dataset.navigation.words_in(category) else {
        return Ok(CategoryView::NotFound);
    };

    let sentences = &ctx.dataset.sentences;
    let matches = matching_sentences(sentences, &words)?;
    let pagination = Pagination::new(page.unwrap_or(1), matches.len());

    let headers = sentences.headers();
    let analyzer = ctx.analyzer.as_ref();
    let rows = pagination
        .slice(&matches)
        .par_iter()
        .map(|row| present_row(headers, row, analyzer))
        .collect();

    Ok(CategoryView::Page(SentencePage {
        category: category.to_string(),
        current_page: pagination.page,
        total_pages: pagination.total_pages,
        rows,
    }))
}

/// Drops the identifier column and empty cells, keeps the sentence text raw and
/// annotates every other column.
fn present_row(headers: &[String], row: &Record, analyzer: &dyn Analyzer) -> DisplayRow {
    let cells = headers
        .iter()
        .zip(row.iter())
        .skip(1)
        .filter_map(|(column, value)| {
            let value = value.as_deref()?;
            let value = if column == SENTENCE_COLUMN {
                value.to_string()
            } else {
                annotate(analyzer, value)
            };
            Some(Cell { column: column.clone(), value })
        })
        .collect();

    DisplayRow { cells }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        dataset::Dataset,
        segmentation::annotation::tests::FakeAnalyzer,
    };

    pub fn context(sentences: &str, navigation: &str) -> AppContext {
        let dataset =
            Dataset::from_readers("s", sentences.as_bytes(), "n", navigation.as_bytes()).unwrap();
        let analyzer = FakeAnalyzer::new(&[("乗る", "のる"), ("電車", "でんしゃ")]);
        AppContext::new(dataset, Arc::new(analyzer))
    }

    const NAVIGATION: &str = "Word,Travel,Food\n電車,1,0\nラーメン,0,1\n";
    const SENTENCES: &str = "id,Sentence,Reading,Note\n\
        1,電車に乗る,電車 に 乗る,\n\
        2,ラーメンを食べる,,\n\
        3,電車でラーメン,,both\n";

    fn page(view: CategoryView) -> SentencePage {
        match view {
            CategoryView::Page(page) => page,
            CategoryView::NotFound => panic!("expected a page"),
        }
    }

    #[test]
    fn test_index_lists_categories() {
        let ctx = context(SENTENCES, NAVIGATION);
        assert_eq!(index_view(&ctx), ["Travel", "Food"]);
    }

    #[test]
    fn test_unknown_category() {
        let ctx = context(SENTENCES, NAVIGATION);
        assert_eq!(category_view(&ctx, "Music", None).unwrap(), CategoryView::NotFound);
        assert_eq!(category_view(&ctx, "Word", Some(2)).unwrap(), CategoryView::NotFound);
    }

    #[test]
    fn test_category_membership() {
        let ctx = context(SENTENCES, NAVIGATION);

        let travel = page(category_view(&ctx, "Travel", None).unwrap());
        let sentences: Vec<_> = travel.rows.iter().filter_map(|r| r.get("Sentence")).collect();
        assert_eq!(sentences, vec!["電車に乗る", "電車でラーメン"]);

        let food = page(category_view(&ctx, "Food", None).unwrap());
        let sentences: Vec<_> = food.rows.iter().filter_map(|r| r.get("Sentence")).collect();
        assert_eq!(sentences, vec!["ラーメンを食べる", "電車でラーメン"]);
    }

    #[test]
    fn test_row_presentation() {
        let ctx = context(SENTENCES, NAVIGATION);
        let travel = page(category_view(&ctx, "Travel", None).unwrap());

        let first = &travel.rows[0];
        assert_eq!(first.get("id"), None);
        assert_eq!(first.get("Sentence"), Some("電車に乗る"));
        assert_eq!(first.get("Reading"), Some("電車(でんしゃ) に 乗る(のる)"));
        assert_eq!(first.get("Note"), None);
        assert_eq!(first.cells.len(), 2);

        let second = &travel.rows[1];
        assert_eq!(second.get("Reading"), None);
        assert_eq!(second.get("Note"), Some("both"));
    }

    #[test]
    fn test_pagination_metadata() {
        let mut sentences = String::from("id,Sentence\n");
        for i in 0..120 {
            sentences.push_str(&format!("{i},電車 {i}\n"));
        }
        let ctx = context(&sentences, NAVIGATION);

        let third = page(category_view(&ctx, "Travel", Some(3)).unwrap());
        assert_eq!(third.total_pages, 3);
        assert_eq!(third.current_page, 3);
        assert_eq!(third.rows.len(), 20);
        assert_eq!(third.rows[0].get("Sentence"), Some("電車 100"));

        let beyond = page(category_view(&ctx, "Travel", Some(5)).unwrap());
        assert!(beyond.rows.is_empty());
        assert_eq!(beyond.total_pages, 3);

        let clamped = page(category_view(&ctx, "Travel", Some(0)).unwrap());
        assert_eq!(clamped.current_page, 1);
        assert_eq!(clamped.rows.len(), 50);
    }

    #[test]
    fn test_category_view_is_idempotent() {
        let ctx = context(SENTENCES, NAVIGATION);
        let first = category_view(&ctx, "Travel", Some(1)).unwrap();
        let second = category_view(&ctx, "Travel", Some(1)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_category_without_words_is_empty() {
        let ctx = context(SENTENCES, "Word,Travel,Empty\n電車,1,0\n");
        let empty = page(category_view(&ctx, "Empty", None).unwrap());
        assert!(empty.rows.is_empty());
        assert_eq!(empty.total_pages, 0);
    }
}

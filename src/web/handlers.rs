use axum::{
    extract::{
        Path,
        Query,
        State,
    },
    response::{
        Html,
        IntoResponse,
        Response,
    },
};
use askama::Template;
use serde::Deserialize;

use super::{
    templates::{
        CategoryLink,
        NavigationTemplate,
        SentencesTemplate,
    },
    views::{
        category_view,
        index_view,
        CategoryView,
    },
    SharedContext,
    WebError,
};

pub const NOT_FOUND_MESSAGE: &str = "Category not found";

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

/// GET /
pub async fn index(State(ctx): State<SharedContext>) -> Result<Html<String>, WebError> {
    let template = NavigationTemplate {
        categories: index_view(&ctx).iter().map(|c| CategoryLink::new(c)).collect(),
    };
    Ok(Html(template.render()?))
}

/// GET /category/:category?page=n
pub async fn category(
    State(ctx): State<SharedContext>,
    Path(category): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, WebError> {
    let name = category.clone();
    let view = tokio::task::spawn_blocking(move || category_view(&ctx, &name, query.page))
        .await??;

    let page = match view {
        CategoryView::NotFound => {
            tracing::debug!(%category, "unknown category requested");
            return Ok(NOT_FOUND_MESSAGE.into_response());
        }
        CategoryView::Page(page) => page,
    };

    let template = SentencesTemplate {
        category: &page.category,
        category_path: urlencoding::encode(&page.category).into_owned(),
        current_page: page.current_page,
        total_pages: page.total_pages,
        rows: &page.rows,
    };
    Ok(Html(template.render()?).into_response())
}

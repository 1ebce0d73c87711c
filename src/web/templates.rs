use askama::Template;

use crate::core::DisplayRow;

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="ja">
<head>
  <meta charset="utf-8">
  <title>Categories</title>
</head>
<body>
  <h1>Categories</h1>
  <ul class="categories">
  {%- for category in categories %}
    <li><a href="/category/{{ category.path }}">{{ category.name }}</a></li>
  {%- endfor %}
  </ul>
</body>
</html>"#,
    ext = "html"
)]
pub struct NavigationTemplate<'a> {
    pub categories: Vec<CategoryLink<'a>>,
}

pub struct CategoryLink<'a> {
    pub name: &'a str,
    pub path: String,
}

impl<'a> CategoryLink<'a> {
    pub fn new(name: &'a str) -> Self {
        Self { name, path: urlencoding::encode(name).into_owned() }
    }
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="ja">
<head>
  <meta charset="utf-8">
  <title>{{ category }} - page {{ current_page }}</title>
</head>
<body>
  <p><a href="/">All categories</a></p>
  <h1>{{ category }}</h1>
  {%- for row in rows %}
  <dl class="sentence">
    {%- for cell in row.cells %}
    <dt>{{ cell.column }}</dt>
    <dd>{{ cell.value }}</dd>
    {%- endfor %}
  </dl>
  {%- endfor %}
  <nav class="pagination">
    {%- if current_page > 1 %}
    <a href="/category/{{ category_path }}?page={{ current_page - 1 }}">Previous</a>
    {%- endif %}
    <span>Page {{ current_page }} of {{ total_pages }}</span>
    {%- if current_page < total_pages %}
    <a href="/category/{{ category_path }}?page={{ current_page + 1 }}">Next</a>
    {%- endif %}
  </nav>
</body>
</html>"#,
    ext = "html"
)]
pub struct SentencesTemplate<'a> {
    pub category: &'a str,
    pub category_path: String,
    pub current_page: usize,
    pub total_pages: usize,
    pub rows: &'a [DisplayRow],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cell;

    #[test]
    fn test_navigation_escapes_and_encodes() {
        let template = NavigationTemplate {
            categories: vec![CategoryLink::new("食べ物"), CategoryLink::new("<b>")],
        };
        let html = template.render().unwrap();
        assert!(html.contains("/category/%E9%A3%9F%E3%81%B9%E7%89%A9"));
        assert!(html.contains(">食べ物</a>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_sentences_pagination_links() {
        let rows = vec![DisplayRow {
            cells: vec![Cell { column: "Sentence".to_string(), value: "電車に乗る".to_string() }],
        }];
        let template = SentencesTemplate {
            category: "Travel",
            category_path: "Travel".to_string(),
            current_page: 2,
            total_pages: 3,
            rows: &rows,
        };
        let html = template.render().unwrap();
        assert!(html.contains("<dd>電車に乗る</dd>"));
        assert!(html.contains("?page=1\">Previous"));
        assert!(html.contains("?page=3\">Next"));
        assert!(html.contains("Page 2 of 3"));
    }

    #[test]
    fn test_single_page_has_no_links() {
        let template = SentencesTemplate {
            category: "Travel",
            category_path: "Travel".to_string(),
            current_page: 1,
            total_pages: 1,
            rows: &[],
        };
        let html = template.render().unwrap();
        assert!(!html.contains("Previous"));
        assert!(!html.contains("Next"));
    }
}

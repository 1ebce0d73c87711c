use wana_kana::IsJapaneseChar;

/// Interprets a category indicator cell. A cell is set when it is numerically
/// equal to 1 (`1`, `1.0`) or a boolean `true`; everything else is unset.
pub fn is_truthy(cell: Option<&str>) -> bool {
    let value = match cell {
        Some(v) => v.trim(),
        None => return false,
    };

    if value.is_empty() {
        return false;
    }

    if let Ok(number) = value.parse::<f64>() {
        return number == 1.0;
    }

    value.eq_ignore_ascii_case("true")
}

pub fn contains_kanji(text: &str) -> bool {
    text.chars().any(|c| c.is_kanji())
}

/// Treats empty and whitespace-only cells as missing.
pub fn non_empty(cell: &str) -> Option<String> {
    if cell.trim().is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

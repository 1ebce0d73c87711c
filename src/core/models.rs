use std::io::Read;

use super::{
    utils::non_empty,
    YomireiError,
};

/// One CSV row, cells positionally aligned with the owning table's headers.
/// Empty cells are stored as `None`.
pub type Record = Vec<Option<String>>;

/// A header-driven in-memory CSV table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Record>,
}

impl Table {
    /// Parses CSV text with a header row. `name` is only used in error messages.
    pub fn from_reader<R: Read>(name: &str, mut reader: R) -> Result<Self, YomireiError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        // Spreadsheet exports often carry a BOM
        let text = text.trim_start_matches('\u{FEFF}');

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> =
            csv_reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(YomireiError::EmptyHeader { table: name.to_string() });
        }

        for (idx, header) in headers.iter().enumerate() {
            if headers[..idx].contains(header) {
                return Err(YomireiError::DuplicateColumn {
                    table: name.to_string(),
                    column: header.clone(),
                });
            }
        }

        let mut rows = Vec::new();
        for (line, result) in csv_reader.records().enumerate() {
            let record = result?;
            if record.len() > headers.len() {
                return Err(YomireiError::Custom(format!(
                    "{}: record {} has {} fields but the header has {}",
                    name,
                    line + 1,
                    record.len(),
                    headers.len()
                )));
            }

            let mut row: Record = record.iter().map(non_empty).collect();
            row.resize(headers.len(), None);
            rows.push(row);
        }

        Ok(Table { name: name.to_string(), headers, rows })
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, YomireiError> {
        self.column(name).ok_or_else(|| YomireiError::MissingColumn {
            table: self.name.clone(),
            column: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A cell that survived presentation filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub column: String,
    pub value: String,
}

/// A sentence row prepared for display, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayRow {
    pub cells: Vec<Cell>,
}

impl DisplayRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.iter().find(|c| c.column == column).map(|c| c.value.as_str())
    }
}

use std::collections::HashSet;

use crate::{ClientError, ClientResult};

const UTF8_BOM: &str = "\u{feff}";

/// Cell spellings treated as a missing value, as spreadsheet and pandas
/// exports write them.
const MISSING_MARKERS: [&str; 12] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "null", "NULL", "None", "<NA>", "#N/A",
];

pub fn is_missing(value: &str) -> bool {
    let trimmed = value.trim();
    MISSING_MARKERS.iter().any(|marker| *marker == trimmed)
}

/// An uploaded CSV held in memory: the header row plus string cells.
///
/// Rows always have exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> ClientResult<Self> {
        let mut seen = HashSet::new();
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(ClientError::duplicate_header(header));
            }
        }

        for (index, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(ClientError::invalid_csv(&format!(
                    "Row {} has {} fields; the header has {}.",
                    index + 1,
                    row.len(),
                    headers.len()
                )));
            }
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Cells of one column in row order.
    pub fn column<'a>(&'a self, index: usize) -> impl Iterator<Item = &'a str> + 'a {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }

    /// Same headers, only the rows whose mask entry is `true`.
    pub(crate) fn retain_mask(&self, mask: &[bool]) -> Self {
        let rows = self
            .rows
            .iter()
            .zip(mask.iter())
            .filter(|(_, keep)| **keep)
            .map(|(row, _)| row.clone())
            .collect::<Vec<Vec<String>>>();
        Self {
            headers: self.headers.clone(),
            rows,
        }
    }
}

pub fn read_csv(bytes: &[u8]) -> ClientResult<Table> {
    let content = std::str::from_utf8(bytes)
        .map_err(|_| ClientError::invalid_csv("CSV input is not valid UTF-8."))?;
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    if content.trim().is_empty() {
        return Err(ClientError::invalid_csv("CSV input is empty."));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| ClientError::invalid_csv("CSV header row is missing or unreadable."))?
        .iter()
        .map(std::string::ToString::to_string)
        .collect::<Vec<String>>();

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record = result_row.map_err(|error| {
            ClientError::invalid_csv(&format!(
                "CSV row {} is malformed: {error}",
                row_index + 1
            ))
        })?;
        rows.push(record.iter().map(std::string::ToString::to_string).collect());
    }

    log::debug!(
        "read CSV with {} columns and {} rows",
        headers.len(),
        rows.len()
    );
    Table::new(headers, rows)
}

pub fn write_csv(table: &Table) -> ClientResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(table.headers())
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    for row in table.rows() {
        writer
            .write_record(row)
            .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))
}

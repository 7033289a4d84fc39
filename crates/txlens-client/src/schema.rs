//! Header-level schema inference: which columns become filters, and which
//! header stands in for each canonical transaction field.

use serde::Serialize;

use crate::config::{AnalysisConfig, DATE_FIELD, FieldAliases};

const DATE_SUBSTRING: &str = "date";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnClassification {
    /// Columns offered as multi-value filters, in header order.
    pub categorical: Vec<String>,
    /// Columns that may become numeric range filters once their values are checked.
    pub numeric_range_candidates: Vec<String>,
}

/// Classifies headers by case-insensitive substring match against the
/// configured keywords. `type` matches any header containing it, not only
/// `operationType`.
pub fn classify_columns(headers: &[String], config: &AnalysisConfig) -> ColumnClassification {
    let keywords = config
        .filter_keywords
        .iter()
        .map(|keyword| keyword.to_lowercase())
        .collect::<Vec<String>>();

    let categorical = headers
        .iter()
        .filter(|header| {
            let lowered = header.to_lowercase();
            keywords.iter().any(|keyword| lowered.contains(keyword.as_str()))
        })
        .cloned()
        .collect::<Vec<String>>();

    let numeric_range_candidates = headers
        .iter()
        .filter(|header| config.range_columns.iter().any(|name| name == *header))
        .cloned()
        .collect::<Vec<String>>();

    ColumnClassification {
        categorical,
        numeric_range_candidates,
    }
}

/// Returns the header to use for `canonical`: the first alias present
/// verbatim, otherwise the first header equal to an alias ignoring case.
pub fn resolve_field(headers: &[String], canonical: &str, aliases: &[String]) -> Option<String> {
    let mut candidates = aliases.to_vec();
    if !candidates.iter().any(|alias| alias == canonical) {
        candidates.push(canonical.to_string());
    }

    for candidate in &candidates {
        if let Some(header) = headers.iter().find(|header| *header == candidate) {
            return Some(header.clone());
        }
    }

    for candidate in &candidates {
        if let Some(header) = headers
            .iter()
            .find(|header| header.eq_ignore_ascii_case(candidate))
        {
            return Some(header.clone());
        }
    }

    None
}

/// A configured alias, then the literal `dateTime`, else the first header
/// containing `date` in any case.
pub fn resolve_date_column(headers: &[String], aliases: &FieldAliases) -> Option<String> {
    let mut candidates = aliases.aliases_for(DATE_FIELD);
    if !candidates.iter().any(|alias| alias == DATE_FIELD) {
        candidates.push(DATE_FIELD.to_string());
    }
    for candidate in &candidates {
        if let Some(header) = headers.iter().find(|header| *header == candidate) {
            return Some(header.clone());
        }
    }

    headers
        .iter()
        .find(|header| header.to_lowercase().contains(DATE_SUBSTRING))
        .cloned()
}

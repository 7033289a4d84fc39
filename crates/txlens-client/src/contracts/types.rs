use serde::Serialize;

use crate::balances::BalanceReport;

#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub rows_read: usize,
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnsData {
    pub source: SourceSummary,
    pub categorical: Vec<CategoricalColumn>,
    pub numeric_ranges: Vec<NumericRangeColumn>,
    pub unfilterable: Vec<UnfilterableColumn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoricalColumn {
    pub name: String,
    pub options: Vec<String>,
}

/// Observed bounds; both are `None` when every cell in the column is empty.
#[derive(Debug, Clone, Serialize)]
pub struct NumericRangeColumn {
    pub name: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnfilterableColumn {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterData {
    pub source: SourceSummary,
    pub rows_matched: usize,
    pub applied: AppliedFilters,
    pub skipped_ranges: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    /// Filtered rows as CSV text, present when no output file was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AppliedFilters {
    pub categorical: Vec<AppliedCategorical>,
    pub ranges: Vec<AppliedRange>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppliedCategorical {
    pub column: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppliedRange {
    pub column: String,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalancesData {
    pub source: SourceSummary,
    #[serde(flatten)]
    pub report: BalanceReport,
}

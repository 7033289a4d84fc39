use std::path::Path;

use crate::ClientResult;
use crate::config::AnalysisConfig;
use crate::contracts::types::SourceSummary;
use crate::source::{LoadedSource, load_table};

pub(crate) struct CommandInput {
    pub(crate) config: AnalysisConfig,
    pub(crate) loaded: LoadedSource,
}

/// Loads configuration before input, so a bad config fails fast even when
/// stdin is empty.
pub(crate) fn load_input(
    command: &str,
    path: Option<&str>,
    config_path: Option<&Path>,
    stdin_override: Option<&[u8]>,
) -> ClientResult<CommandInput> {
    let config = AnalysisConfig::load(config_path)?;
    let loaded = load_table(path, stdin_override, command)?;
    log::debug!(
        "{command}: read {} rows from {}",
        loaded.table.row_count(),
        loaded.source_ref.as_deref().unwrap_or("stdin")
    );
    Ok(CommandInput { config, loaded })
}

pub(crate) fn source_summary(loaded: &LoadedSource) -> SourceSummary {
    SourceSummary {
        kind: loaded.source_kind.as_str().to_string(),
        path: loaded.source_ref.clone(),
        rows_read: loaded.table.row_count(),
        headers: loaded.table.headers().to_vec(),
    }
}

//! Analysis configuration.
//!
//! Resolution order:
//!
//! 1. an explicit path passed by the caller (`--config`)
//! 2. `TXLENS_CONFIG`
//! 3. `~/.txlens/config.json`, only if the file exists
//! 4. built-in defaults
//!
//! Every field is optional in the file; omitted fields keep their defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ClientError, ClientResult};

pub const CONFIG_ENV_VAR: &str = "TXLENS_CONFIG";

pub const WALLET_FIELD: &str = "walletName";
pub const ASSET_FIELD: &str = "asset";
pub const FEE_ASSET_FIELD: &str = "feeAsset";
pub const OPERATION_FIELD: &str = "operation";
pub const ASSET_AMOUNT_FIELD: &str = "assetAmount";
pub const FEE_AMOUNT_FIELD: &str = "feeAmount";
pub const DATE_FIELD: &str = "dateTime";

const DEFAULT_FILTER_KEYWORDS: [&str; 5] = ["wallet", "asset", "categorisation", "operation", "type"];
const DEFAULT_RANGE_COLUMNS: [&str; 2] = ["assetvalueInBaseCurrency", "assetAmount"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Lower-case substrings that mark a column as a categorical filter.
    pub filter_keywords: Vec<String>,
    /// Exact column names offered as numeric range filters.
    pub range_columns: Vec<String>,
    pub field_aliases: FieldAliases,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            filter_keywords: DEFAULT_FILTER_KEYWORDS
                .iter()
                .map(|value| value.to_string())
                .collect(),
            range_columns: DEFAULT_RANGE_COLUMNS
                .iter()
                .map(|value| value.to_string())
                .collect(),
            field_aliases: FieldAliases::default(),
        }
    }
}

/// Canonical field name -> ordered list of header names accepted for it.
///
/// The first alias present in a table wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldAliases(BTreeMap<String, Vec<String>>);

impl Default for FieldAliases {
    fn default() -> Self {
        let entries: [(&str, &[&str]); 7] = [
            (WALLET_FIELD, &["walletName"]),
            (ASSET_FIELD, &["assetTicker", "asset"]),
            (FEE_ASSET_FIELD, &["feeAsset"]),
            (OPERATION_FIELD, &["operation", "operationType"]),
            (ASSET_AMOUNT_FIELD, &["assetAmount"]),
            (FEE_AMOUNT_FIELD, &["feeAmount"]),
            (DATE_FIELD, &["dateTime"]),
        ];

        Self(
            entries
                .iter()
                .map(|(canonical, aliases)| {
                    (
                        canonical.to_string(),
                        aliases.iter().map(|value| value.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }
}

impl FieldAliases {
    /// Aliases for `canonical`. A field without an entry is matched by its own name.
    pub fn aliases_for(&self, canonical: &str) -> Vec<String> {
        match self.0.get(canonical) {
            Some(aliases) if !aliases.is_empty() => aliases.clone(),
            _ => vec![canonical.to_string()],
        }
    }

    pub fn set(&mut self, canonical: &str, aliases: Vec<String>) {
        self.0.insert(canonical.to_string(), aliases);
    }
}

impl AnalysisConfig {
    pub fn load(path_override: Option<&Path>) -> ClientResult<Self> {
        let Some(path) = resolve_config_path(path_override) else {
            log::debug!("no config file found; using defaults");
            return Ok(Self::default());
        };
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> ClientResult<Self> {
        let body = fs::read_to_string(path)
            .map_err(|error| ClientError::invalid_config(path, &error.to_string()))?;
        let mut config = serde_json::from_str::<AnalysisConfig>(&body)
            .map_err(|error| ClientError::invalid_config(path, &error.to_string()))?;

        // Merge partial alias tables over the defaults.
        let mut aliases = FieldAliases::default();
        for (canonical, names) in config.field_aliases.0 {
            aliases.set(&canonical, names);
        }
        config.field_aliases = aliases;

        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

fn resolve_config_path(path_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = path_override {
        return Some(path.to_path_buf());
    }

    if let Some(env_path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(env_path));
    }

    let default_path = home::home_dir()?.join(".txlens").join("config.json");
    if default_path.is_file() {
        return Some(default_path);
    }
    None
}

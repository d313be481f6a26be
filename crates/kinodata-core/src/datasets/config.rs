use super::table::TableLayout;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

fn default_ph() -> f64 {
    7.0
}

/// Everything a provider needs to load a dataset: where the two sheets
/// live, how the data sheet is laid out, and the assay pH.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProviderConfig {
    /// Path to the percentage-displacement data sheet (CSV).
    pub data_sheet: PathBuf,
    /// Path to the kinase name-to-sequence reference sheet (CSV).
    pub reference_sheet: PathBuf,
    /// Column layout of the data sheet; defaults to the PKIS2 layout.
    #[serde(default)]
    pub layout: TableLayout,
    /// Assay pH; KINOMEscan panels run at 7.0.
    #[serde(default = "default_ph")]
    pub ph: f64,
}

impl ProviderConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct ProviderConfigBuilder {
    data_sheet: Option<PathBuf>,
    reference_sheet: Option<PathBuf>,
    layout: Option<TableLayout>,
    ph: Option<f64>,
}

impl ProviderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data_sheet(mut self, path: PathBuf) -> Self {
        self.data_sheet = Some(path);
        self
    }

    pub fn reference_sheet(mut self, path: PathBuf) -> Self {
        self.reference_sheet = Some(path);
        self
    }

    pub fn layout(mut self, layout: TableLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn ph(mut self, ph: f64) -> Self {
        self.ph = Some(ph);
        self
    }

    pub fn build(self) -> Result<ProviderConfig, ConfigError> {
        Ok(ProviderConfig {
            data_sheet: self
                .data_sheet
                .ok_or(ConfigError::MissingParameter("data-sheet"))?,
            reference_sheet: self
                .reference_sheet
                .ok_or(ConfigError::MissingParameter("reference-sheet"))?,
            layout: self.layout.unwrap_or_default(),
            ph: self.ph.unwrap_or_else(default_ph),
        })
    }
}

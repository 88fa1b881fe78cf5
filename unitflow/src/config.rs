//! Converter configuration

use serde::Deserialize;
use unitflow_core::{ConvertError, Result};

use crate::convert::DEFAULT_PRECISION;
use crate::UnitTable;

/// How to set up a `Converter`
///
/// ```json
/// {"precision": 2, "groups": ["power", "energy"], "units": {"power": {"TW": {"factor": "1e9"}}}}
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Decimal places kept by `to` and `value`
    pub precision: u32,
    /// Library groups to load; `None` loads the whole library
    pub groups: Option<Vec<String>>,
    /// Extra units loaded after `groups`
    pub units: Option<UnitTable>,
    /// Let `units` replace already-loaded names
    pub overwrite: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            precision: DEFAULT_PRECISION,
            groups: None,
            units: None,
            overwrite: false,
        }
    }
}

impl ConverterConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConvertError::invalid_table(e.to_string()))
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_groups<S: Into<String>>(mut self, groups: impl IntoIterator<Item = S>) -> Self {
        self.groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }
}

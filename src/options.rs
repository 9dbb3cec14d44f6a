// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Knobs controlling which checks run. Defaults reproduce the stock behavior.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InspectionOptions {
    /// Report `$x{0}` and skip further checks of that access.
    pub promote_square_brackets: bool,
    /// Check index types against the types the container accepts.
    pub check_index_types: bool,
    /// Use scope inference for the container of `$x[] = value`.
    pub analyze_array_push: bool,
    /// Short names of inspections to skip.
    pub disabled: Vec<String>,
}

impl Default for InspectionOptions {
    fn default() -> Self {
        Self {
            promote_square_brackets: true,
            check_index_types: true,
            analyze_array_push: true,
            disabled: vec![],
        }
    }
}

impl InspectionOptions {
    pub fn is_enabled(&self, short_name: &str) -> bool {
        !self.disabled.iter().any(|d| d == short_name)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => bail!(
                "Unsupported options file `{}`. Must be json or yaml.",
                path.display()
            ),
        }
    }
}

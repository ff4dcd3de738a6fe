//! Configuration schema for template extraction.
//!
//! This module defines the configuration structure and validation logic for the
//! host-tunable settings of the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration structure.
///
/// All settings can be supplied by the host under the "curl-template" key.
/// Missing settings fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    /// Maximum nesting depth walked when enumerating body fields.
    ///
    /// Bounds the work done on pathological payloads. Defaults to 5.
    ///
    /// Must be greater than 0.
    #[serde(default = "default_max_body_depth")]
    pub max_body_depth: usize,

    /// Header names never offered as candidates, in addition to the built-in
    /// transport headers. Compared case-insensitively.
    #[serde(default)]
    pub excluded_headers: Vec<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            max_body_depth: default_max_body_depth(),
            excluded_headers: Vec::new(),
        }
    }
}

impl TemplateConfig {
    /// Validates the configuration and returns errors if any settings are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_body_depth == 0 {
            return Err("maxBodyDepth must be greater than 0".to_string());
        }

        if self.excluded_headers.iter().any(|h| h.trim().is_empty()) {
            return Err("excludedHeaders must not contain empty names".to_string());
        }

        Ok(())
    }

    /// True when `name` is in the configured extra deny-list.
    pub fn is_excluded_header(&self, name: &str) -> bool {
        self.excluded_headers
            .iter()
            .any(|h| h.trim().eq_ignore_ascii_case(name))
    }

    /// Merges this configuration with another, using values from `other`.
    pub fn merge(&self, other: &TemplateConfig) -> Self {
        Self {
            max_body_depth: other.max_body_depth,
            excluded_headers: other.excluded_headers.clone(),
        }
    }
}

fn default_max_body_depth() -> usize {
    5
}

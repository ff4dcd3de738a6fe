//! Selection of modifiable fields.
//!
//! [`SelectionState`] is the only mutable state of an editing session. Every
//! operation returns a new state and leaves the receiver untouched. After every
//! operation no selected location lies beneath another selected location.
//!
//! ```
//! use curl_template::curl::parse_curl_command;
//! use curl_template::fields::identify_candidates;
//! use curl_template::selection::SelectionState;
//!
//! let request = parse_curl_command(r#"curl https://example.com -d '{"point":{"a":1,"b":2}}'"#).unwrap();
//! let candidates = identify_candidates(&request);
//!
//! // Toggling a composite selects its leaves, never the composite itself.
//! let state = SelectionState::new().toggle(&candidates[0], &candidates);
//! let names: Vec<&str> = state.fields().iter().map(|f| f.name.as_str()).collect();
//! assert_eq!(names, vec!["a", "b"]);
//! ```

use crate::models::template::{CandidateField, ModifiableField};
use crate::pointer::LocationPath;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Errors returned by [`SelectionState::rename`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The new name is empty after trimming.
    EmptyName,
    /// Another selected field already uses the name.
    DuplicateName(String),
    /// No selected field has the given location.
    UnknownField(String),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::EmptyName => write!(f, "Argument name must not be empty"),
            SelectionError::DuplicateName(name) => {
                write!(f, "Argument name '{}' is already in use", name)
            }
            SelectionError::UnknownField(path) => write!(f, "No selected field at {}", path),
        }
    }
}

impl std::error::Error for SelectionError {}

/// The set of selected fields, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    fields: Vec<ModifiableField>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[ModifiableField] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<ModifiableField> {
        self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when exactly this location is selected.
    pub fn is_selected(&self, path: &LocationPath) -> bool {
        self.fields.iter().any(|f| &f.location_path == path)
    }

    /// Toggles a candidate.
    ///
    /// `candidates` is the full candidate list the candidate came from; it is
    /// used to find the leaves beneath a composite.
    ///
    /// - A selected location is deselected together with anything beneath it.
    /// - If anything beneath the location is selected, all of that is
    ///   deselected (collapsing an expanded composite).
    /// - A non-empty list or map with leaves beneath it selects those leaves.
    /// - Anything else is selected itself.
    ///
    /// Selections overlapping the newly added locations are dropped first.
    pub fn toggle(&self, candidate: &CandidateField, candidates: &[CandidateField]) -> Self {
        let target = &candidate.location_path;

        if self.is_selected(target) {
            debug!("deselecting {}", target);
            return self.retain(|p| p != target && !target.is_ancestor_of(p));
        }

        if self.fields.iter().any(|f| target.is_ancestor_of(&f.location_path)) {
            debug!("collapsing selections beneath {}", target);
            return self.retain(|p| !target.is_ancestor_of(p));
        }

        let leaves = if is_non_empty_composite(&candidate.example_value) {
            leaves_beneath(target, candidates)
        } else {
            Vec::new()
        };

        if !leaves.is_empty() {
            debug!("expanding {} into {} fields", target, leaves.len());
            let mut next = self.retain(|p| !leaves.iter().any(|leaf| leaf.location_path.overlaps(p)));
            for leaf in leaves {
                next.push_candidate(leaf);
            }
            return next;
        }

        debug!("selecting {}", target);
        let mut next = self.retain(|p| !p.overlaps(target));
        next.push_candidate(candidate);
        next
    }

    /// Renames the field at `path`. The name is trimmed and must be non-empty
    /// and not used by any other selected field.
    pub fn rename(&self, path: &LocationPath, new_name: &str) -> Result<Self, SelectionError> {
        let name = new_name.trim();
        if name.is_empty() {
            return Err(SelectionError::EmptyName);
        }

        let position = self
            .fields
            .iter()
            .position(|f| &f.location_path == path)
            .ok_or_else(|| SelectionError::UnknownField(path.to_string()))?;

        if self
            .fields
            .iter()
            .enumerate()
            .any(|(i, f)| i != position && f.name == name)
        {
            return Err(SelectionError::DuplicateName(name.to_string()));
        }

        let mut next = self.clone();
        next.fields[position].name = name.to_string();
        Ok(next)
    }

    /// Deselects exactly the field at `path`.
    pub fn remove(&self, path: &LocationPath) -> Self {
        self.retain(|p| p != path)
    }

    fn retain<F>(&self, keep: F) -> Self
    where
        F: Fn(&LocationPath) -> bool,
    {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|f| keep(&f.location_path))
                .cloned()
                .collect(),
        }
    }

    fn push_candidate(&mut self, candidate: &CandidateField) {
        let name = self.unique_name(&candidate.suggested_name);
        self.fields.push(ModifiableField::from_candidate(candidate, name));
    }

    /// Returns `base`, or `base_2`, `base_3`, ... if already taken.
    fn unique_name(&self, base: &str) -> String {
        let taken = |name: &str| self.fields.iter().any(|f| f.name == name);
        if !taken(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{}_{}", base, n))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}

fn is_non_empty_composite(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => false,
    }
}

/// Candidates strictly beneath `root` that have no candidate beneath them.
fn leaves_beneath<'a>(root: &LocationPath, candidates: &'a [CandidateField]) -> Vec<&'a CandidateField> {
    let below: Vec<&CandidateField> = candidates
        .iter()
        .filter(|c| root.is_ancestor_of(&c.location_path))
        .collect();

    below
        .iter()
        .filter(|c| {
            !below
                .iter()
                .any(|other| c.location_path.is_ancestor_of(&other.location_path))
        })
        .copied()
        .collect()
}

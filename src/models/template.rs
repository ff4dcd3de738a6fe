//! Field and template data models.
//!
//! Candidates are derived from a request, modifiable fields are the user's
//! chosen subset, and templates/schemas are compiled from both.

use super::request::Request;
use crate::pointer::{LocationPath, Namespace};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An addressable location in a parsed request that could be made variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateField {
    pub location_path: LocationPath,
    pub namespace: Namespace,
    /// Identifier-like name proposed for the argument.
    pub suggested_name: String,
    /// The value found at this location in the example request.
    pub example_value: Value,
    /// Short human-readable label for the location.
    pub description: String,
}

/// A candidate the user chose to parameterize, with an argument name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiableField {
    pub location_path: LocationPath,
    pub namespace: Namespace,
    pub name: String,
    pub example_value: Value,
}

impl ModifiableField {
    /// Creates a field from a candidate under the given argument name.
    pub fn from_candidate(candidate: &CandidateField, name: String) -> Self {
        Self {
            location_path: candidate.location_path.clone(),
            namespace: candidate.namespace,
            name,
            example_value: candidate.example_value.clone(),
        }
    }
}

/// The compiled, parameterized representation of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// The command text the request was parsed from.
    pub original_command: String,
    /// Full copy of the example request, unselected values included.
    pub request_skeleton: Request,
    /// Selected fields, in selection order.
    pub fields: Vec<ModifiableField>,
    /// URL with `{name}` placeholders for selected path segments.
    pub url_template: String,
}

impl Template {
    /// Looks up a field by argument name.
    pub fn field(&self, name: &str) -> Option<&ModifiableField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Argument names in field order.
    pub fn parameter_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }
}

/// JSON type of a parameter as reported to the execution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl ValueType {
    /// Classifies a JSON value. `null` is reported as a string.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null | Value::String(_) => ValueType::String,
            Value::Bool(_) => ValueType::Boolean,
            Value::Number(_) => ValueType::Number,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, ValueType::Object | ValueType::Array)
    }
}

/// One parameter entry of the wire schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaParameter {
    pub parameter_name: String,
    pub json_pointer: LocationPath,
    pub location: Namespace,
    /// Strings verbatim, other values as compact JSON.
    pub example_value: String,
    pub value_type: ValueType,
    /// The example value itself, only for objects and arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_structure: Option<Value>,
}

/// Wire format describing a template for an external execution engine.
///
/// Field names are a stable interface and serialize exactly as declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSchema {
    pub original_curl: String,
    pub method: String,
    pub base_url: String,
    pub url_template: String,
    pub original_headers: Vec<(String, String)>,
    pub original_body: String,
    pub parameters: Vec<SchemaParameter>,
    pub parameter_names: Vec<String>,
}

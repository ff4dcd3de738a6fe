//! Template compilation and instantiation.
//!
//! [`compile`] combines a parsed request with the selected fields into a
//! [`Template`]; [`to_backend_schema`] turns a template into the wire format
//! read by the execution engine; [`instantiate`] goes the other way, writing
//! argument values back into a copy of the example request.
//!
//! For any template, instantiating with every field bound to its own example
//! value reproduces the original request.

pub mod access;
pub mod instantiate;

pub use access::resolve;
pub use instantiate::{instantiate, InstantiationError};

use crate::models::request::{render_pathname, render_query, Request};
use crate::models::template::{
    BackendSchema, ModifiableField, SchemaParameter, Template, ValueType,
};
use crate::pointer::Namespace;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Errors raised when the selected fields do not fit the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A field's location does not exist in the request.
    UnresolvedField(String),
    /// Two fields share an argument name.
    DuplicateName(String),
    /// One field's location lies beneath another's.
    OverlappingFields(String, String),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::UnresolvedField(path) => {
                write!(f, "Field location {} does not exist in the request", path)
            }
            CompileError::DuplicateName(name) => {
                write!(f, "Argument name '{}' is used by more than one field", name)
            }
            CompileError::OverlappingFields(a, b) => {
                write!(f, "Field locations {} and {} overlap", a, b)
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// Compiles a request and its selected fields into a template.
///
/// Selected path segments become `{name}` placeholders in `url_template`,
/// replaced by index so equal text elsewhere in the path is left alone.
/// Unselected query parameters stay in the template URL literally.
pub fn compile(
    original_command: &str,
    request: &Request,
    fields: &[ModifiableField],
) -> Result<Template, CompileError> {
    validate_fields(request, fields)?;

    let segments: Vec<String> = request
        .path_segments
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            fields
                .iter()
                .find(|f| {
                    f.location_path.namespace() == Namespace::PathSegments
                        && f.location_path.last_token() == Some(index.to_string().as_str())
                })
                .map(|f| format!("{{{}}}", f.name))
                .unwrap_or_else(|| segment.clone())
        })
        .collect();

    let unselected_query = request.query_params.iter().filter(|(key, _)| {
        !fields.iter().any(|f| {
            f.location_path.namespace() == Namespace::QueryParams
                && f.location_path.last_token() == Some(key.as_str())
        })
    });

    let url_template = format!(
        "{}{}{}",
        request.base_url,
        render_pathname(&segments, request.trailing_slash),
        render_query(unselected_query)
    );

    Ok(Template {
        original_command: original_command.to_string(),
        request_skeleton: request.clone(),
        fields: fields.to_vec(),
        url_template,
    })
}

fn validate_fields(request: &Request, fields: &[ModifiableField]) -> Result<(), CompileError> {
    let mut names = HashSet::new();
    for (i, field) in fields.iter().enumerate() {
        if resolve(request, &field.location_path).is_none() {
            return Err(CompileError::UnresolvedField(field.location_path.to_string()));
        }
        if !names.insert(field.name.as_str()) {
            return Err(CompileError::DuplicateName(field.name.clone()));
        }
        if let Some(other) = fields[i + 1..]
            .iter()
            .find(|other| other.location_path.overlaps(&field.location_path))
        {
            return Err(CompileError::OverlappingFields(
                field.location_path.to_string(),
                other.location_path.to_string(),
            ));
        }
    }
    Ok(())
}

/// Builds the wire schema for a template.
pub fn to_backend_schema(template: &Template) -> BackendSchema {
    let skeleton = &template.request_skeleton;

    let parameters = template
        .fields
        .iter()
        .map(|field| {
            let value_type = ValueType::of(&field.example_value);
            SchemaParameter {
                parameter_name: field.name.clone(),
                json_pointer: field.location_path.clone(),
                location: field.namespace,
                example_value: serialize_example(&field.example_value),
                value_type,
                example_structure: value_type
                    .is_composite()
                    .then(|| field.example_value.clone()),
            }
        })
        .collect();

    BackendSchema {
        original_curl: template.original_command.clone(),
        method: skeleton.method.as_str().to_string(),
        base_url: skeleton.base_url.clone(),
        url_template: template.url_template.clone(),
        original_headers: skeleton
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        original_body: skeleton
            .body
            .as_ref()
            .map(|b| b.to_text())
            .unwrap_or_default(),
        parameters,
        parameter_names: template.parameter_names(),
    }
}

fn serialize_example(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

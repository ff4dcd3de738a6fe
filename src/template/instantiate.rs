//! Template instantiation: the inverse of compilation.

use super::access::assign;
use crate::models::request::Request;
use crate::models::template::Template;
use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Errors that can occur while writing argument values into a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstantiationError {
    /// The parent of the target location exists but is not a list or map.
    NotAContainer {
        /// Rendered location path of the field being written
        location: String,
    },
    /// A path segment or list index is not a number or lies past the end.
    InvalidIndex {
        /// Rendered location path of the field being written
        location: String,
        /// The offending index token
        index: String,
    },
}

impl InstantiationError {
    /// Returns the location path the error refers to.
    pub fn location(&self) -> &str {
        match self {
            InstantiationError::NotAContainer { location } => location,
            InstantiationError::InvalidIndex { location, .. } => location,
        }
    }
}

impl fmt::Display for InstantiationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstantiationError::NotAContainer { location } => write!(
                f,
                "Cannot set {}: parent value is not an object or array",
                location
            ),
            InstantiationError::InvalidIndex { location, index } => {
                write!(f, "Cannot set {}: invalid index '{}'", location, index)
            }
        }
    }
}

impl std::error::Error for InstantiationError {}

/// Builds a concrete request from a template and argument values.
///
/// Works on a copy of the template's skeleton. A field with no argument keeps
/// its example value. Arguments that name no field are ignored.
///
/// # Examples
///
/// ```
/// use curl_template::curl::parse_curl_command;
/// use curl_template::models::ModifiableField;
/// use curl_template::pointer::{LocationPath, Namespace};
/// use curl_template::template::{compile, instantiate};
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let command = "curl https://api.example.com/users/42";
/// let request = parse_curl_command(command).unwrap();
/// let field = ModifiableField {
///     location_path: LocationPath::path_segment(1),
///     namespace: Namespace::PathSegments,
///     name: "userId".to_string(),
///     example_value: json!("42"),
/// };
/// let template = compile(command, &request, &[field]).unwrap();
///
/// let args = HashMap::from([("userId".to_string(), json!("99"))]);
/// let concrete = instantiate(&template, &args).unwrap();
/// assert_eq!(concrete.url, "https://api.example.com/users/99");
/// ```
pub fn instantiate(
    template: &Template,
    args_by_name: &HashMap<String, Value>,
) -> Result<Request, InstantiationError> {
    let mut request = template.request_skeleton.clone();

    for field in &template.fields {
        let value = match args_by_name.get(&field.name) {
            Some(value) => value.clone(),
            None => {
                debug!(
                    "no argument for '{}', using example value",
                    field.name
                );
                field.example_value.clone()
            }
        };
        assign(&mut request, &field.location_path, value)?;
    }

    for name in args_by_name.keys() {
        if template.field(name).is_none() {
            debug!("ignoring argument '{}' with no matching field", name);
        }
    }

    request.rebuild_url();
    Ok(request)
}

//! Reading and writing request values by location path.

use super::instantiate::InstantiationError;
use crate::models::request::{Request, RequestBody};
use crate::pointer::{LocationPath, Namespace};
use serde_json::{Map, Value};

/// Returns the value at `path`, or `None` if nothing lives there.
pub fn resolve(request: &Request, path: &LocationPath) -> Option<Value> {
    let tokens = path.tokens();
    match path.namespace() {
        Namespace::PathSegments => {
            let index = tokens.first()?.parse::<usize>().ok()?;
            request
                .path_segments
                .get(index)
                .map(|s| Value::String(s.clone()))
        }
        Namespace::QueryParams => request
            .query_params
            .get(tokens.first()?)
            .map(|v| Value::String(v.clone())),
        Namespace::Headers => request
            .headers
            .get(tokens.first()?)
            .map(|v| Value::String(v.clone())),
        Namespace::Body => {
            let mut node = request.body.as_ref()?.as_json()?;
            for token in tokens {
                node = match node {
                    Value::Object(map) => map.get(token)?,
                    Value::Array(items) => items.get(token.parse::<usize>().ok()?)?,
                    Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                        return None
                    }
                };
            }
            Some(node.clone())
        }
    }
}

/// Writes `value` at `path`, creating missing body containers on the way.
///
/// URL parts are stored as text: strings verbatim, anything else as JSON.
/// Callers rebuild the URL afterwards.
pub fn assign(request: &mut Request, path: &LocationPath, value: Value) -> Result<(), InstantiationError> {
    let tokens = path.tokens();
    match path.namespace() {
        Namespace::PathSegments => {
            let token = tokens.first().map(String::as_str).unwrap_or_default();
            let index = parse_index(token, path)?;
            let text = stringify(value);
            match index.cmp(&request.path_segments.len()) {
                std::cmp::Ordering::Less => request.path_segments[index] = text,
                std::cmp::Ordering::Equal => request.path_segments.push(text),
                std::cmp::Ordering::Greater => return Err(invalid_index(token, path)),
            }
        }
        Namespace::QueryParams => {
            let key = tokens.first().cloned().unwrap_or_default();
            request.query_params.insert(key, stringify(value));
        }
        Namespace::Headers => {
            let name = tokens.first().cloned().unwrap_or_default();
            request.headers.insert(name, stringify(value));
        }
        Namespace::Body => {
            if tokens.is_empty() {
                request.body = Some(RequestBody::Json(value));
                return Ok(());
            }
            let body = request
                .body
                .get_or_insert_with(|| RequestBody::Json(Value::Object(Map::new())));
            match body {
                RequestBody::Json(root) => set_in(root, tokens, value, path)?,
                RequestBody::Raw(_) => {
                    return Err(InstantiationError::NotAContainer {
                        location: path.to_string(),
                    })
                }
            }
        }
    }
    Ok(())
}

fn set_in(
    node: &mut Value,
    tokens: &[String],
    value: Value,
    path: &LocationPath,
) -> Result<(), InstantiationError> {
    let Some((head, rest)) = tokens.split_first() else {
        *node = value;
        return Ok(());
    };

    let child = match node {
        Value::Object(map) => {
            if rest.is_empty() {
                map.insert(head.clone(), value);
                return Ok(());
            }
            map.entry(head.clone())
                .or_insert_with(|| Value::Object(Map::new()))
        }
        Value::Array(items) => {
            let index = parse_index(head, path)?;
            if index == items.len() {
                items.push(Value::Object(Map::new()));
            }
            items
                .get_mut(index)
                .ok_or_else(|| invalid_index(head, path))?
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            return Err(InstantiationError::NotAContainer {
                location: path.to_string(),
            })
        }
    };

    set_in(child, rest, value, path)
}

fn parse_index(token: &str, path: &LocationPath) -> Result<usize, InstantiationError> {
    token.parse::<usize>().map_err(|_| invalid_index(token, path))
}

fn invalid_index(token: &str, path: &LocationPath) -> InstantiationError {
    InstantiationError::InvalidIndex {
        location: path.to_string(),
        index: token.to_string(),
    }
}

/// Text form used for URL parts and headers.
pub(crate) fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

//! Candidate field discovery.
//!
//! Walks a parsed [`Request`] and lists every location that could be turned
//! into an argument, in a fixed order: path segments by index, query parameters
//! and headers in insertion order, then a depth-first walk of a JSON body.
//!
//! ```
//! use curl_template::curl::parse_curl_command;
//! use curl_template::fields::identify_candidates;
//!
//! let request = parse_curl_command("curl https://api.example.com/users/42?limit=10").unwrap();
//! let candidates = identify_candidates(&request);
//!
//! assert_eq!(candidates[1].location_path.to_string(), "/pathSegments/1");
//! assert_eq!(candidates[1].suggested_name, "id");
//! assert_eq!(candidates[2].location_path.to_string(), "/queryParams/limit");
//! ```

use crate::config::TemplateConfig;
use crate::models::request::{Request, RequestBody};
use crate::models::template::CandidateField;
use crate::pointer::{LocationPath, Namespace};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Transport-level headers that are never offered as candidates.
pub const EXCLUDED_HEADERS: &[&str] = &[
    "content-type",
    "accept",
    "user-agent",
    "host",
    "connection",
    "cache-control",
    "accept-encoding",
    "accept-language",
    "origin",
    "referer",
    "content-length",
    "transfer-encoding",
    "upgrade",
    "via",
    "warning",
];

/// Matches `{name}` and `:name` placeholder segments.
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|:([A-Za-z_][A-Za-z0-9_]*))$")
        .expect("Failed to compile placeholder regex")
});

/// Lists candidates using the default configuration.
///
/// The result depends only on `request`.
pub fn identify_candidates(request: &Request) -> Vec<CandidateField> {
    identify_candidates_with(request, &TemplateConfig::default())
}

/// Lists candidates for `request` under an explicit configuration.
pub fn identify_candidates_with(request: &Request, config: &TemplateConfig) -> Vec<CandidateField> {
    let mut candidates = Vec::new();

    for (index, segment) in request.path_segments.iter().enumerate() {
        candidates.push(CandidateField {
            location_path: LocationPath::path_segment(index),
            namespace: Namespace::PathSegments,
            suggested_name: suggest_segment_name(segment, index),
            example_value: Value::String(segment.clone()),
            description: format!("Path segment {} ('{}')", index + 1, segment),
        });
    }

    for (key, value) in &request.query_params {
        candidates.push(CandidateField {
            location_path: LocationPath::query_param(key.as_str()),
            namespace: Namespace::QueryParams,
            suggested_name: sanitize_identifier(key),
            example_value: Value::String(value.clone()),
            description: format!("Query parameter '{}'", key),
        });
    }

    for (name, value) in &request.headers {
        if is_excluded_header(name, config) {
            continue;
        }
        candidates.push(CandidateField {
            location_path: LocationPath::header(name.as_str()),
            namespace: Namespace::Headers,
            suggested_name: sanitize_identifier(name).to_lowercase(),
            example_value: Value::String(value.clone()),
            description: format!("Header '{}'", name),
        });
    }

    if let Some(RequestBody::Json(body)) = &request.body {
        let mut walker = BodyWalker {
            max_depth: config.max_body_depth,
            out: &mut candidates,
        };
        walker.walk(body, &LocationPath::body(Vec::<String>::new()), "item", 0);
    }

    candidates
}

/// True for built-in transport headers and configured exclusions.
pub fn is_excluded_header(name: &str, config: &TemplateConfig) -> bool {
    EXCLUDED_HEADERS
        .iter()
        .any(|excluded| name.eq_ignore_ascii_case(excluded))
        || config.is_excluded_header(name)
}

struct BodyWalker<'a> {
    max_depth: usize,
    out: &'a mut Vec<CandidateField>,
}

impl BodyWalker<'_> {
    /// Emits the children of `value`, recursing into maps and into map
    /// elements of lists. Elements that are themselves lists are emitted but
    /// not entered.
    fn walk(&mut self, value: &Value, path: &LocationPath, hint: &str, depth: usize) {
        if depth >= self.max_depth {
            return;
        }

        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let child_path = path.child(key.as_str());
                    let name = sanitize_identifier(key);
                    self.emit(&child_path, &name, child);
                    if matches!(child, Value::Object(_) | Value::Array(_)) {
                        self.walk(child, &child_path, &name, depth + 1);
                    }
                }
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let item_path = path.child(index.to_string());
                    let name = format!("{}_{}", hint, index);
                    self.emit(&item_path, &name, item);
                    if let Value::Object(_) = item {
                        self.walk(item, &item_path, &name, depth + 1);
                    }
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
    }

    fn emit(&mut self, path: &LocationPath, name: &str, value: &Value) {
        self.out.push(CandidateField {
            location_path: path.clone(),
            namespace: Namespace::Body,
            suggested_name: name.to_string(),
            example_value: value.clone(),
            description: format!("Body field '{}'", path.tokens().join(".")),
        });
    }
}

/// Proposes an argument name for a path segment.
///
/// Placeholders keep their inner name, numeric segments become `id`,
/// UUIDs become `uuid`, and anything else is named by 1-based position.
pub fn suggest_segment_name(segment: &str, index: usize) -> String {
    if let Some(caps) = PLACEHOLDER_REGEX.captures(segment) {
        if let Some(name) = caps.get(1).or_else(|| caps.get(2)) {
            return name.as_str().to_string();
        }
    }

    if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
        return "id".to_string();
    }

    if segment.len() == 36 && uuid::Uuid::parse_str(segment).is_ok() {
        return "uuid".to_string();
    }

    format!("argument{}", index + 1)
}

/// Replaces every character outside `[A-Za-z0-9_]` with `_`.
fn sanitize_identifier(raw: &str) -> String {
    let mut name: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.is_empty() {
        name.push_str("field");
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curl::parse_curl_command;
    use serde_json::json;

    fn paths(candidates: &[CandidateField]) -> Vec<String> {
        candidates
            .iter()
            .map(|c| c.location_path.to_string())
            .collect()
    }

    #[test]
    fn test_order_across_namespaces() {
        let request = parse_curl_command(
            r#"curl 'https://api.example.com/v1/users/42?limit=10&sort=asc' -H 'Content-Type: application/json' -H 'X-Api-Key: abc' -d '{"name":"n"}'"#,
        )
        .unwrap();
        let candidates = identify_candidates_with(&request, &TemplateConfig::default());

        assert_eq!(
            paths(&candidates),
            vec![
                "/pathSegments/0",
                "/pathSegments/1",
                "/pathSegments/2",
                "/queryParams/limit",
                "/queryParams/sort",
                "/headers/X-Api-Key",
                "/body/name",
            ]
        );
        assert_eq!(candidates[5].suggested_name, "x_api_key");
        assert_eq!(candidates[5].example_value, json!("abc"));
    }

    #[test]
    fn test_standard_headers_excluded_case_insensitively() {
        let request = parse_curl_command(
            "curl https://example.com -H 'content-type: text/plain' -H 'HOST: example.com' -H 'User-Agent: x' -H 'Authorization: Bearer t'",
        )
        .unwrap();
        let candidates = identify_candidates_with(&request, &TemplateConfig::default());

        assert_eq!(paths(&candidates), vec!["/headers/Authorization"]);
    }

    #[test]
    fn test_configured_header_exclusions() {
        let request =
            parse_curl_command("curl https://example.com -H 'X-Request-Id: 1' -H 'X-Tenant: a'")
                .unwrap();
        let config = TemplateConfig {
            excluded_headers: vec!["x-request-id".to_string()],
            ..Default::default()
        };

        assert_eq!(
            paths(&identify_candidates_with(&request, &config)),
            vec!["/headers/X-Tenant"]
        );
    }

    #[test]
    fn test_candidates_depend_only_on_the_request() {
        let request = parse_curl_command(
            r#"curl https://example.com/a/b -H 'X-Request-Id: 1' -d '{"a":{"b":{"c":1}}}'"#,
        )
        .unwrap();
        let before = identify_candidates(&request);

        let narrow = TemplateConfig {
            max_body_depth: 1,
            excluded_headers: vec!["X-Request-Id".to_string()],
        };
        assert_ne!(identify_candidates_with(&request, &narrow), before);
        crate::config::load_config(Some(json!({
            "curl-template": { "maxBodyDepth": 1, "excludedHeaders": ["X-Request-Id"] }
        })))
        .unwrap();

        assert_eq!(identify_candidates(&request), before);
        assert_eq!(
            identify_candidates_with(&request, &TemplateConfig::default()),
            before
        );
    }

    #[test]
    fn test_body_walk_emits_containers_once_and_recurses() {
        let request = parse_curl_command(
            r#"curl https://example.com -d '{"user":{"name":"a","tags":["x",["y"],{"k":1}]},"ok":true}'"#,
        )
        .unwrap();
        let candidates = identify_candidates_with(&request, &TemplateConfig::default());

        assert_eq!(
            paths(&candidates),
            vec![
                "/body/user",
                "/body/user/name",
                "/body/user/tags",
                "/body/user/tags/0",
                "/body/user/tags/1",
                "/body/user/tags/2",
                "/body/user/tags/2/k",
                "/body/ok",
            ]
        );
        assert_eq!(candidates[3].suggested_name, "tags_0");
        assert_eq!(candidates[0].example_value, json!({"name":"a","tags":["x",["y"],{"k":1}]}));
    }

    #[test]
    fn test_top_level_list_body() {
        let request = parse_curl_command(r#"curl https://example.com -d '[{"id":1},2]'"#).unwrap();
        let candidates = identify_candidates_with(&request, &TemplateConfig::default());

        assert_eq!(paths(&candidates), vec!["/body/0", "/body/0/id", "/body/1"]);
        assert_eq!(candidates[2].suggested_name, "item_1");
    }

    #[test]
    fn test_depth_cap() {
        let request = parse_curl_command(
            r#"curl https://example.com -d '{"a":{"b":{"c":{"d":{"e":{"f":1}}}}}}'"#,
        )
        .unwrap();

        let default_paths = paths(&identify_candidates_with(&request, &TemplateConfig::default()));
        assert_eq!(default_paths.len(), 5);
        assert_eq!(default_paths.last().unwrap(), "/body/a/b/c/d/e");

        let shallow = TemplateConfig {
            max_body_depth: 2,
            ..Default::default()
        };
        assert_eq!(
            paths(&identify_candidates_with(&request, &shallow)),
            vec!["/body/a", "/body/a/b"]
        );
    }

    #[test]
    fn test_raw_body_not_addressable() {
        let request = parse_curl_command("curl https://example.com -d 'a=1&b=2'").unwrap();
        assert!(identify_candidates_with(&request, &TemplateConfig::default()).is_empty());
    }

    #[test]
    fn test_slash_in_body_key_is_escaped() {
        let request = parse_curl_command(r#"curl https://example.com -d '{"a/b":1}'"#).unwrap();
        let candidates = identify_candidates_with(&request, &TemplateConfig::default());
        assert_eq!(paths(&candidates), vec!["/body/a~1b"]);
        assert_eq!(candidates[0].suggested_name, "a_b");
    }

    #[test]
    fn test_suggest_segment_name() {
        assert_eq!(suggest_segment_name("{userId}", 1), "userId");
        assert_eq!(suggest_segment_name(":org", 0), "org");
        assert_eq!(suggest_segment_name("42", 1), "id");
        assert_eq!(
            suggest_segment_name("550e8400-e29b-41d4-a716-446655440000", 3),
            "uuid"
        );
        assert_eq!(suggest_segment_name("users", 0), "argument1");
        assert_eq!(suggest_segment_name("v2", 2), "argument3");
    }

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("page-size"), "page_size");
        assert_eq!(sanitize_identifier("1st"), "_1st");
        assert_eq!(sanitize_identifier(""), "field");
        assert_eq!(sanitize_identifier("userId"), "userId");
    }
}

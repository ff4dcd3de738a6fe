//! End-to-end scenarios: command text through to schema and back.

use super::{candidate, init_test_env};
use curl_template::models::ValueType;
use curl_template::{
    compile, identify_candidates, instantiate, parse_curl_command, redact, to_backend_schema,
    HttpMethod, LocationPath, Namespace, RequestBody, SelectionState,
};
use serde_json::json;
use std::collections::HashMap;

const API_KEY_COMMAND: &str = "curl -X GET 'https://api.example.com/users/42?limit=10' -H 'X-Api-Key: sk-ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789'";

#[test]
fn test_api_key_example_end_to_end() {
    init_test_env();

    let request = parse_curl_command(API_KEY_COMMAND).unwrap();
    assert_eq!(request.path_segments, vec!["users", "42"]);
    assert_eq!(request.query_params.len(), 1);
    assert_eq!(request.query_params["limit"], "10");

    let candidates = identify_candidates(&request);
    let id = candidate(&candidates, "/pathSegments/1");
    assert_eq!(id.suggested_name, "id");
    assert_eq!(id.example_value, json!("42"));
    let limit = candidate(&candidates, "/queryParams/limit");
    let key = candidate(&candidates, "/headers/X-Api-Key");

    let selection = SelectionState::new()
        .toggle(id, &candidates)
        .toggle(limit, &candidates);
    let template = compile(API_KEY_COMMAND, &request, selection.fields()).unwrap();

    assert_eq!(template.url_template, "https://api.example.com/users/{id}");
    let limit_field = template.field("limit").unwrap();
    assert_eq!(limit_field.namespace, Namespace::QueryParams);

    let schema = to_backend_schema(&template);
    assert_eq!(schema.method, "GET");
    assert_eq!(schema.parameter_names, vec!["id", "limit"]);
    assert_eq!(
        schema.original_headers,
        vec![(
            "X-Api-Key".to_string(),
            "sk-ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".to_string()
        )]
    );

    assert_eq!(
        redact(key.example_value.as_str().unwrap()),
        "sk-ABCDE...6789"
    );
}

#[test]
fn test_instantiation_changes_only_bound_segment() {
    init_test_env();

    let command = r#"curl https://api.example.com/v1/users/42/posts -H 'Authorization: Bearer t' -d '{"title":"x"}'"#;
    let request = parse_curl_command(command).unwrap();
    let candidates = identify_candidates(&request);

    let selection = SelectionState::new().toggle(candidate(&candidates, "/pathSegments/2"), &candidates);
    let selection = selection
        .rename(&LocationPath::path_segment(2), "userId")
        .unwrap();
    let template = compile(command, &request, selection.fields()).unwrap();
    assert_eq!(
        template.url_template,
        "https://api.example.com/v1/users/{userId}/posts"
    );

    let args = HashMap::from([("userId".to_string(), json!("99"))]);
    let concrete = instantiate(&template, &args).unwrap();

    assert_eq!(concrete.path_segments, vec!["v1", "users", "99", "posts"]);
    assert_eq!(concrete.url, "https://api.example.com/v1/users/99/posts");
    assert_eq!(concrete.headers, request.headers);
    assert_eq!(concrete.body, request.body);
    assert_eq!(concrete.method, HttpMethod::POST);
    assert_eq!(template.request_skeleton, request);
}

#[test]
fn test_composite_selection_flows_into_schema() {
    init_test_env();

    let command = r#"curl https://api.example.com/orders -H 'Content-Type: application/json' -d '{"customer":{"id":7,"email":"a@b.c"},"items":[{"sku":"X1","qty":2}],"gift":false}'"#;
    let request = parse_curl_command(command).unwrap();
    let candidates = identify_candidates(&request);

    assert!(candidates
        .iter()
        .all(|c| c.location_path != LocationPath::header("Content-Type")));

    let selection = SelectionState::new()
        .toggle(candidate(&candidates, "/body/customer"), &candidates)
        .toggle(candidate(&candidates, "/body/items/0/qty"), &candidates);
    let names: Vec<&str> = selection.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["id", "email", "qty"]);

    let template = compile(command, &request, selection.fields()).unwrap();
    let schema = to_backend_schema(&template);
    assert_eq!(schema.parameters[0].value_type, ValueType::Number);
    assert_eq!(schema.parameters[0].example_value, "7");
    assert_eq!(schema.parameters[1].example_value, "a@b.c");
    assert_eq!(
        schema.original_body,
        r#"{"customer":{"id":7,"email":"a@b.c"},"items":[{"sku":"X1","qty":2}],"gift":false}"#
    );

    let args = HashMap::from([
        ("id".to_string(), json!(8)),
        ("qty".to_string(), json!(5)),
    ]);
    let concrete = instantiate(&template, &args).unwrap();
    assert_eq!(
        concrete.body,
        Some(RequestBody::Json(json!({
            "customer": {"id": 8, "email": "a@b.c"},
            "items": [{"sku": "X1", "qty": 5}],
            "gift": false
        })))
    );
}

#[test]
fn test_whole_structure_as_one_parameter() {
    init_test_env();

    let command = r#"curl https://api.example.com/batch -d '{"ops":[],"meta":{"v":1}}'"#;
    let request = parse_curl_command(command).unwrap();
    let candidates = identify_candidates(&request);

    let selection = SelectionState::new().toggle(candidate(&candidates, "/body/ops"), &candidates);
    let template = compile(command, &request, selection.fields()).unwrap();
    let schema = to_backend_schema(&template);

    assert_eq!(schema.parameters[0].value_type, ValueType::Array);
    assert_eq!(schema.parameters[0].example_structure, Some(json!([])));

    let args = HashMap::from([("ops".to_string(), json!([{"op": "add"}]))]);
    let concrete = instantiate(&template, &args).unwrap();
    assert_eq!(
        concrete.body,
        Some(RequestBody::Json(json!({"ops": [{"op": "add"}], "meta": {"v": 1}})))
    );
}

//! Property tests for selection exclusivity and the compile/instantiate round trip.

use curl_template::{
    compile, generate_curl_command, identify_candidates, instantiate, parse_curl_command,
    CandidateField, SelectionState,
};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,4}", inner), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn json_body() -> impl Strategy<Value = Value> {
    prop::collection::vec(("[a-z]{1,4}", json_value()), 1..5)
        .prop_map(|entries| Value::Object(entries.into_iter().collect()))
}

fn command_for(body: &Value) -> String {
    format!(
        "curl 'https://api.example.com/v1/things/42?page=1&q=abc' -H 'X-Tenant: acme' -d '{}'",
        body
    )
}

fn toggle_sequence(candidates: &[CandidateField], picks: &[usize]) -> SelectionState {
    picks.iter().fold(SelectionState::new(), |state, pick| {
        state.toggle(&candidates[pick % candidates.len()], candidates)
    })
}

proptest! {
    #[test]
    fn selections_never_overlap(body in json_body(), picks in prop::collection::vec(0usize..64, 0..24)) {
        let request = parse_curl_command(&command_for(&body)).unwrap();
        let candidates = identify_candidates(&request);
        let state = toggle_sequence(&candidates, &picks);

        let fields = state.fields();
        for (i, a) in fields.iter().enumerate() {
            for b in &fields[i + 1..] {
                prop_assert!(!a.location_path.overlaps(&b.location_path),
                    "{} overlaps {}", a.location_path, b.location_path);
            }
        }

        let names: HashSet<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        prop_assert_eq!(names.len(), fields.len());
    }

    #[test]
    fn example_values_reproduce_request(body in json_body(), picks in prop::collection::vec(0usize..64, 0..24)) {
        let command = command_for(&body);
        let request = parse_curl_command(&command).unwrap();
        let candidates = identify_candidates(&request);
        let state = toggle_sequence(&candidates, &picks);

        let template = compile(&command, &request, state.fields()).unwrap();

        let explicit: HashMap<String, Value> = template
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.example_value.clone()))
            .collect();
        prop_assert_eq!(&instantiate(&template, &explicit).unwrap(), &request);
        prop_assert_eq!(&instantiate(&template, &HashMap::new()).unwrap(), &request);
    }

    #[test]
    fn normalized_command_reparses_equal(body in json_body()) {
        let request = parse_curl_command(&command_for(&body)).unwrap();
        let normalized = generate_curl_command(&request);
        prop_assert_eq!(parse_curl_command(&normalized).unwrap(), request);
    }
}

#[test]
fn test_composite_toggle_yields_exactly_its_leaves() {
    let command = r#"curl https://example.com -d '{"a":1,"b":2}'"#;
    let request = parse_curl_command(command).unwrap();
    let mut candidates = identify_candidates(&request);

    // The body root itself is not a candidate; offer it explicitly.
    let root = CandidateField {
        location_path: "/body".parse().unwrap(),
        namespace: curl_template::Namespace::Body,
        suggested_name: "body".to_string(),
        example_value: json!({"a": 1, "b": 2}),
        description: "Body".to_string(),
    };
    candidates.insert(0, root.clone());

    let state = SelectionState::new().toggle(&root, &candidates);
    let paths: Vec<String> = state
        .fields()
        .iter()
        .map(|f| f.location_path.to_string())
        .collect();
    assert_eq!(paths, vec!["/body/a", "/body/b"]);
}

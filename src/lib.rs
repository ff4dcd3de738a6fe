//! Request templates from example cURL commands.
//!
//! Paste one working cURL call; this crate finds every value in it that could
//! vary, lets the caller pick and name a subset of those locations, and compiles
//! the result into a reusable template that can later be filled in with
//! argument values.
//!
//! # Architecture
//!
//! - **curl**: parses a cURL command into a [`Request`] and renders it back
//! - **pointer**: [`LocationPath`], JSON-Pointer style addresses over path
//!   segments, query parameters, headers and the JSON body
//! - **fields**: enumerates [`CandidateField`]s in a request
//! - **selection**: [`SelectionState`], the user's chosen fields
//! - **template**: compiles a [`Template`] and its [`BackendSchema`], and
//!   instantiates templates back into requests
//! - **redact**: display-only masking of secret-looking values
//! - **config**: host-tunable settings
//!
//! # Pipeline
//!
//! ```
//! use curl_template::{
//!     compile, identify_candidates, instantiate, parse_curl_command, to_backend_schema,
//!     SelectionState,
//! };
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! let command = "curl -X GET 'https://api.example.com/users/42?limit=10' -H 'X-Api-Key: secret'";
//! let request = parse_curl_command(command).unwrap();
//! let candidates = identify_candidates(&request);
//!
//! let mut selection = SelectionState::new();
//! for candidate in &candidates[1..3] {
//!     selection = selection.toggle(candidate, &candidates);
//! }
//!
//! let template = compile(command, &request, selection.fields()).unwrap();
//! assert_eq!(template.url_template, "https://api.example.com/users/{id}");
//!
//! let schema = to_backend_schema(&template);
//! assert_eq!(schema.parameter_names, vec!["id", "limit"]);
//!
//! let args = HashMap::from([("id".to_string(), json!("7"))]);
//! let concrete = instantiate(&template, &args).unwrap();
//! assert_eq!(concrete.url, "https://api.example.com/users/7?limit=10");
//! ```
//!
//! Every function is a synchronous, in-memory transform with no shared state.
//! Host settings are loaded with [`config::load_config`] and passed explicitly
//! to [`fields::identify_candidates_with`].

pub mod config;
pub mod curl;
pub mod fields;
pub mod models;
pub mod pointer;
pub mod redact;
pub mod selection;
pub mod template;

pub use curl::{generate_curl_command, parse_curl_command, ParseError};
pub use fields::{identify_candidates, identify_candidates_with};
pub use models::{
    BackendSchema, CandidateField, HttpMethod, ModifiableField, Request, RequestBody, Template,
};
pub use pointer::{LocationPath, Namespace};
pub use redact::{looks_like_secret, redact};
pub use selection::{SelectionError, SelectionState};
pub use template::{compile, instantiate, to_backend_schema, CompileError, InstantiationError};

//! HTTP request data models.
//!
//! This module defines the structured form of a parsed cURL command: the method,
//! the URL broken into its addressable parts, headers, and an optional body.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP request method.
///
/// Represents all standard HTTP methods as defined in RFC 7231 and RFC 5789.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
    /// HTTP TRACE method - perform a message loop-back test
    TRACE,
    /// HTTP CONNECT method - establish a tunnel to the server
    CONNECT,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::TRACE => "TRACE",
            HttpMethod::CONNECT => "CONNECT",
        }
    }

    /// Parses a string into an HttpMethod, ignoring case.
    ///
    /// Returns `None` if the string is not a known HTTP method.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            "HEAD" => Some(HttpMethod::HEAD),
            "TRACE" => Some(HttpMethod::TRACE),
            "CONNECT" => Some(HttpMethod::CONNECT),
            _ => None,
        }
    }

    /// The method a command implies when it carries no explicit method flag.
    pub fn inferred(has_body: bool) -> Self {
        if has_body {
            HttpMethod::POST
        } else {
            HttpMethod::GET
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body as supplied on the command line.
///
/// Bodies that parse as JSON are kept as a structured value and are addressable
/// field by field. Anything else is kept verbatim and is opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum RequestBody {
    /// A body that parsed as JSON.
    Json(Value),
    /// A body that did not parse as JSON.
    Raw(String),
}

impl RequestBody {
    /// Parses body text, falling back to an opaque string when it is not JSON.
    pub fn from_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => RequestBody::Json(value),
            Err(_) => RequestBody::Raw(text.to_string()),
        }
    }

    /// Serializes the body back to the text that would be sent on the wire.
    pub fn to_text(&self) -> String {
        match self {
            RequestBody::Json(value) => value.to_string(),
            RequestBody::Raw(raw) => raw.clone(),
        }
    }

    /// Returns the JSON value if this body is structured.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            RequestBody::Json(value) => Some(value),
            RequestBody::Raw(_) => None,
        }
    }
}

/// A fully specified HTTP request, broken into addressable parts.
///
/// `url` is always the canonical rendering of `base_url`, `pathname` and
/// `query_params`; use [`Request::rebuild_url`] after changing any of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method (GET, POST, PUT, DELETE, etc.).
    pub method: HttpMethod,

    /// Canonical full URL, including the query string.
    pub url: String,

    /// Scheme, host and (non-default) port, e.g. `https://api.example.com`.
    pub base_url: String,

    /// Path portion of the URL, always starting with `/`.
    pub pathname: String,

    /// Non-empty path segments in order.
    pub path_segments: Vec<String>,

    /// Whether the original path ended with a `/` after its last segment.
    #[serde(default)]
    pub trailing_slash: bool,

    /// Decoded query parameters in the order they first appeared.
    pub query_params: IndexMap<String, String>,

    /// Request headers. A repeated name keeps its first position and last value.
    pub headers: IndexMap<String, String>,

    /// Optional request body.
    pub body: Option<RequestBody>,
}

impl Request {
    /// Builds a request from already-split URL parts and renders its URL.
    pub fn from_parts(
        method: HttpMethod,
        base_url: String,
        path_segments: Vec<String>,
        trailing_slash: bool,
        query_params: IndexMap<String, String>,
    ) -> Self {
        let mut request = Self {
            method,
            url: String::new(),
            base_url,
            pathname: String::new(),
            path_segments,
            trailing_slash,
            query_params,
            headers: IndexMap::new(),
            body: None,
        };
        request.rebuild_url();
        request
    }

    /// Recomputes `pathname` and `url` from the segment and query parts.
    pub fn rebuild_url(&mut self) {
        self.pathname = render_pathname(&self.path_segments, self.trailing_slash);
        self.url = format!(
            "{}{}{}",
            self.base_url,
            self.pathname,
            render_query(self.query_params.iter())
        );
    }

    /// Checks if the request has a body.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Gets the Content-Type header value if present, ignoring header name case.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }
}

/// Joins path segments into a pathname that always starts with `/`.
pub(crate) fn render_pathname<S: AsRef<str>>(segments: &[S], trailing_slash: bool) -> String {
    let mut pathname = String::from("/");
    let joined = segments
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("/");
    pathname.push_str(&joined);
    if trailing_slash && !segments.is_empty() {
        pathname.push('/');
    }
    pathname
}

/// Form-encodes query pairs into `?k=v&...`, or an empty string when there are none.
pub(crate) fn render_query<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in pairs {
        serializer.append_pair(key, value);
        any = true;
    }
    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}

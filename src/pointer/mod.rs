//! Location paths: JSON-Pointer style addresses over the four request namespaces.
//!
//! A location path is rooted at one of `/pathSegments`, `/queryParams`,
//! `/headers` or `/body` and continues with reference tokens escaped as in
//! RFC 6901 (`~` becomes `~0`, `/` becomes `~1`). Escaping keeps a body key
//! literally named `a/b` distinct from the nested field `a` → `b`.
//!
//! ```
//! use curl_template::pointer::{LocationPath, Namespace};
//!
//! let path = LocationPath::body(["user", "a/b"]);
//! assert_eq!(path.to_string(), "/body/user/a~1b");
//!
//! let parsed: LocationPath = "/body/user/a~1b".parse().unwrap();
//! assert_eq!(parsed, path);
//! assert_eq!(parsed.namespace(), Namespace::Body);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The part of a request a location path points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Namespace {
    /// Indexed URL path segments.
    PathSegments,
    /// Query string parameters, by key.
    QueryParams,
    /// Request headers, by name.
    Headers,
    /// Nodes of a JSON body.
    Body,
}

impl Namespace {
    /// Returns the root token used in rendered paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::PathSegments => "pathSegments",
            Namespace::QueryParams => "queryParams",
            Namespace::Headers => "headers",
            Namespace::Body => "body",
        }
    }

    fn from_root(root: &str) -> Option<Self> {
        match root {
            "pathSegments" => Some(Namespace::PathSegments),
            "queryParams" => Some(Namespace::QueryParams),
            "headers" => Some(Namespace::Headers),
            "body" => Some(Namespace::Body),
            _ => None,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced when parsing a rendered location path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    /// The path does not start with `/`.
    MissingLeadingSlash(String),
    /// The first token is not one of the four namespaces.
    UnknownNamespace(String),
    /// A `~` is followed by something other than `0` or `1`.
    InvalidEscape(String),
    /// A namespace other than `body` needs exactly one token.
    WrongArity(String),
}

impl fmt::Display for PointerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerError::MissingLeadingSlash(p) => {
                write!(f, "Location path '{}' must start with '/'", p)
            }
            PointerError::UnknownNamespace(p) => write!(
                f,
                "Location path '{}' must be rooted at pathSegments, queryParams, headers or body",
                p
            ),
            PointerError::InvalidEscape(p) => {
                write!(f, "Location path '{}' contains an invalid '~' escape", p)
            }
            PointerError::WrongArity(p) => write!(
                f,
                "Location path '{}' must address exactly one entry in its namespace",
                p
            ),
        }
    }
}

impl std::error::Error for PointerError {}

/// An address of one node inside a [`Request`](crate::models::Request).
///
/// Tokens are stored unescaped; escaping only happens when rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationPath {
    namespace: Namespace,
    tokens: Vec<String>,
}

impl LocationPath {
    /// Address of the path segment at `index`.
    pub fn path_segment(index: usize) -> Self {
        Self {
            namespace: Namespace::PathSegments,
            tokens: vec![index.to_string()],
        }
    }

    /// Address of the query parameter `key`.
    pub fn query_param(key: impl Into<String>) -> Self {
        Self {
            namespace: Namespace::QueryParams,
            tokens: vec![key.into()],
        }
    }

    /// Address of the header `name`.
    pub fn header(name: impl Into<String>) -> Self {
        Self {
            namespace: Namespace::Headers,
            tokens: vec![name.into()],
        }
    }

    /// Address of a node in the JSON body. An empty token list is the body root.
    pub fn body<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespace: Namespace::Body,
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a new path one level deeper.
    pub fn child(&self, token: impl Into<String>) -> Self {
        let mut tokens = self.tokens.clone();
        tokens.push(token.into());
        Self {
            namespace: self.namespace,
            tokens,
        }
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Unescaped reference tokens after the namespace root.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The last reference token, if any.
    pub fn last_token(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    /// True when `other` lies strictly beneath this path.
    ///
    /// Comparison is per token, so `/body/ab` is not beneath `/body/a`.
    pub fn is_ancestor_of(&self, other: &LocationPath) -> bool {
        self.namespace == other.namespace
            && other.tokens.len() > self.tokens.len()
            && other.tokens[..self.tokens.len()] == self.tokens[..]
    }

    /// True when the two paths are equal or one lies beneath the other.
    pub fn overlaps(&self, other: &LocationPath) -> bool {
        self == other || self.is_ancestor_of(other) || other.is_ancestor_of(self)
    }
}

fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn unescape_token(token: &str, whole: &str) -> Result<String, PointerError> {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(ch) = chars.next() {
        if ch == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return Err(PointerError::InvalidEscape(whole.to_string())),
            }
        } else {
            out.push(ch);
        }
    }
    Ok(out)
}

impl fmt::Display for LocationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.namespace)?;
        for token in &self.tokens {
            write!(f, "/{}", escape_token(token))?;
        }
        Ok(())
    }
}

impl FromStr for LocationPath {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix('/')
            .ok_or_else(|| PointerError::MissingLeadingSlash(s.to_string()))?;

        let mut parts = rest.split('/');
        let namespace = parts
            .next()
            .and_then(Namespace::from_root)
            .ok_or_else(|| PointerError::UnknownNamespace(s.to_string()))?;

        let tokens = parts
            .map(|part| unescape_token(part, s))
            .collect::<Result<Vec<_>, _>>()?;

        if namespace != Namespace::Body && tokens.len() != 1 {
            return Err(PointerError::WrongArity(s.to_string()));
        }

        Ok(Self { namespace, tokens })
    }
}

impl Serialize for LocationPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LocationPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

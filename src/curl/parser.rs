//! cURL command parser.
//!
//! This module parses a cURL command into a [`Request`], splitting the URL into
//! path segments and query parameters and attempting to read the body as JSON.

use crate::models::request::{HttpMethod, Request, RequestBody};
use indexmap::IndexMap;
use log::debug;

/// Errors that can occur during cURL parsing.
///
/// No partial request is ever produced alongside an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The input string is empty or contains only whitespace.
    EmptyInput,
    /// The command doesn't start with "curl".
    NotACurlCommand,
    /// No URL was found in the command.
    MissingUrl,
    /// The URL could not be parsed as an http(s) URL.
    InvalidUrl(String),
    /// Invalid HTTP method specified.
    InvalidMethod(String),
    /// Invalid header format.
    InvalidHeader(String),
    /// A flag that takes a value was the last token.
    MissingArgument(String),
    /// Quote mismatch in the command.
    UnbalancedQuotes,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyInput => write!(f, "Input is empty"),
            ParseError::NotACurlCommand => write!(f, "Command does not start with 'curl'"),
            ParseError::MissingUrl => write!(f, "No URL found in cURL command"),
            ParseError::InvalidUrl(u) => write!(f, "Invalid URL: {}", u),
            ParseError::InvalidMethod(m) => write!(f, "Invalid HTTP method: {}", m),
            ParseError::InvalidHeader(h) => write!(f, "Invalid header format: {}", h),
            ParseError::MissingArgument(flag) => write!(f, "Missing value after {}", flag),
            ParseError::UnbalancedQuotes => write!(f, "Unbalanced quotes in command"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a cURL command string into a [`Request`].
///
/// Without an explicit `-X`/`--request` flag the method is POST when a body is
/// present and GET otherwise. An explicit method always wins, even `-X GET`
/// combined with `-d`.
///
/// # Examples
///
/// ```
/// use curl_template::curl::parser::parse_curl_command;
/// use curl_template::models::HttpMethod;
///
/// let curl = r#"curl 'https://api.example.com/users/42?limit=10' -d '{"name":"John"}'"#;
/// let request = parse_curl_command(curl).unwrap();
/// assert_eq!(request.method, HttpMethod::POST);
/// assert_eq!(request.path_segments, vec!["users", "42"]);
/// assert_eq!(request.query_params["limit"], "10");
/// ```
pub fn parse_curl_command(curl_str: &str) -> Result<Request, ParseError> {
    let trimmed = curl_str.trim();

    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let tokens = tokenize(trimmed)?;
    if tokens.first().map(String::as_str) != Some("curl") {
        return Err(ParseError::NotACurlCommand);
    }

    parse_tokens(&tokens[1..])
}

/// Collapses backslash-newline continuations into a single space.
pub(crate) fn normalize_continuations(input: &str) -> String {
    input.replace("\\\r\n", " ").replace("\\\n", " ")
}

/// Tokenizes a cURL command, respecting quoted strings.
fn tokenize(input: &str) -> Result<Vec<String>, ParseError> {
    let cleaned = normalize_continuations(input);

    let mut tokens = Vec::new();
    let mut current_token = String::new();
    let mut in_token = false;
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut chars = cleaned.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            // Single quotes are literal up to the closing quote.
            _ if in_single_quote => {
                if ch == '\'' {
                    in_single_quote = false;
                } else {
                    current_token.push(ch);
                }
            }
            '\\' if in_double_quote => match chars.peek() {
                Some(&next) if matches!(next, '"' | '\\' | '$' | '`') => {
                    current_token.push(next);
                    chars.next();
                }
                _ => current_token.push(ch),
            },
            '\\' => {
                if let Some(next) = chars.next() {
                    current_token.push(next);
                    in_token = true;
                }
            }
            '"' => {
                in_double_quote = !in_double_quote;
                in_token = true;
            }
            _ if in_double_quote => current_token.push(ch),
            '\'' => {
                in_single_quote = true;
                in_token = true;
            }
            ' ' | '\t' | '\n' | '\r' => {
                if in_token {
                    tokens.push(std::mem::take(&mut current_token));
                    in_token = false;
                }
            }
            _ => {
                current_token.push(ch);
                in_token = true;
            }
        }
    }

    if in_single_quote || in_double_quote {
        return Err(ParseError::UnbalancedQuotes);
    }

    if in_token {
        tokens.push(current_token);
    }

    Ok(tokens)
}

/// Short flags whose value may be attached, as in `-XPOST` or `-HAccept:*/*`.
const ATTACHABLE_SHORT_FLAGS: &[&str] = &[
    "-X", "-H", "-d", "-u", "-A", "-o", "-w", "-m", "-b", "-c", "-e", "-F", "-x", "-E", "-T", "-r",
];

/// Splits an attached short-flag value off its flag.
fn split_attached(token: &str) -> (&str, Option<&str>) {
    if token.len() > 2 && !token.starts_with("--") && token.is_char_boundary(2) {
        let (flag, value) = token.split_at(2);
        if ATTACHABLE_SHORT_FLAGS.contains(&flag) {
            return (flag, Some(value));
        }
    }
    (token, None)
}

/// Returns the flag's value: the attached part if present, otherwise the next
/// token, advancing the cursor past it.
fn flag_value<'a>(
    tokens: &'a [String],
    i: &mut usize,
    flag: &str,
    attached: Option<&'a str>,
) -> Result<&'a str, ParseError> {
    if let Some(value) = attached {
        return Ok(value);
    }
    *i += 1;
    tokens
        .get(*i)
        .map(String::as_str)
        .ok_or_else(|| ParseError::MissingArgument(flag.to_string()))
}

/// Parses the tokens after the leading `curl` into a Request.
fn parse_tokens(tokens: &[String]) -> Result<Request, ParseError> {
    let mut explicit_method: Option<HttpMethod> = None;
    let mut url: Option<String> = None;
    let mut headers: IndexMap<String, String> = IndexMap::new();
    let mut body: Option<String> = None;

    let mut i = 0;

    while i < tokens.len() {
        let (token, attached) = split_attached(tokens[i].as_str());

        if token.starts_with('-') && token.len() > 1 {
            match token {
                "-X" | "--request" => {
                    let method_str = flag_value(tokens, &mut i, token, attached)?;
                    let method = HttpMethod::from_str(method_str)
                        .ok_or_else(|| ParseError::InvalidMethod(method_str.to_string()))?;
                    explicit_method = Some(method);
                }

                "-H" | "--header" => {
                    let header_str = flag_value(tokens, &mut i, token, attached)?;
                    parse_header(header_str, &mut headers)?;
                }

                "-d" | "--data" | "--data-raw" | "--data-binary" | "--data-ascii" | "--json" => {
                    let data = flag_value(tokens, &mut i, token, attached)?;
                    body = Some(match body.take() {
                        Some(existing) => format!("{}&{}", existing, data),
                        None => data.to_string(),
                    });
                }

                "--url" => {
                    let value = flag_value(tokens, &mut i, token, attached)?;
                    if url.is_none() {
                        url = Some(value.to_string());
                    }
                }

                "-u" | "--user" => {
                    let credentials = flag_value(tokens, &mut i, token, attached)?;
                    headers.insert(
                        "Authorization".to_string(),
                        format!("Basic {}", base64_encode(credentials)),
                    );
                }

                "-A" | "--user-agent" => {
                    let agent = flag_value(tokens, &mut i, token, attached)?;
                    headers.insert("User-Agent".to_string(), agent.to_string());
                }

                // Flags that don't affect the request itself.
                "--compressed" | "-k" | "--insecure" | "-L" | "--location" | "-s" | "--silent"
                | "-v" | "--verbose" | "-i" | "--include" => {
                    debug!("ignoring cURL flag {}", token);
                }

                // Unsupported flags whose value must not be mistaken for the URL.
                "-o" | "--output" | "-w" | "--write-out" | "--max-time" | "-m"
                | "--connect-timeout" | "-b" | "--cookie" | "-c" | "--cookie-jar" | "-e"
                | "--referer" | "-F" | "--form" | "--form-string" | "--data-urlencode" | "-x"
                | "--proxy" | "-E" | "--cert" | "--cacert" | "--key" | "-T" | "--upload-file"
                | "-r" | "--range" | "--resolve" | "--retry" => {
                    let value = flag_value(tokens, &mut i, token, attached)?;
                    debug!("ignoring cURL flag {} {}", token, value);
                }

                _ => {
                    debug!("ignoring unsupported cURL flag {}", token);
                }
            }
        } else if url.is_none() {
            url = Some(token.to_string());
        }

        i += 1;
    }

    let url = url.ok_or(ParseError::MissingUrl)?;
    let (base_url, path_segments, trailing_slash, query_params) = split_url(&url)?;

    let body = body.map(|text| RequestBody::from_text(&text));
    let method = explicit_method.unwrap_or_else(|| HttpMethod::inferred(body.is_some()));

    let mut request =
        Request::from_parts(method, base_url, path_segments, trailing_slash, query_params);
    request.headers = headers;
    request.body = body;

    Ok(request)
}

type UrlParts = (String, Vec<String>, bool, IndexMap<String, String>);

/// Splits a URL into origin, non-empty path segments, trailing-slash flag and
/// decoded query parameters. The fragment is discarded.
fn split_url(raw: &str) -> Result<UrlParts, ParseError> {
    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    };

    let parsed = url::Url::parse(&with_scheme)
        .map_err(|e| ParseError::InvalidUrl(format!("{} ({})", raw, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ParseError::InvalidUrl(raw.to_string()));
    }
    let base_url = parsed.origin().ascii_serialization();

    // Path and query are taken from the text as written so placeholders such
    // as `{id}` survive without percent-encoding.
    let after_scheme = with_scheme
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or_default();
    let remainder = after_scheme
        .find(['/', '?', '#'])
        .map(|pos| &after_scheme[pos..])
        .unwrap_or("");
    let without_fragment = remainder.split('#').next().unwrap_or("");
    let (path, query) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, query),
        None => (without_fragment, ""),
    };

    let path_segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let trailing_slash = !path_segments.is_empty() && path.ends_with('/');

    let mut query_params = IndexMap::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        query_params.insert(key.into_owned(), value.into_owned());
    }

    Ok((base_url, path_segments, trailing_slash, query_params))
}

/// Parses a header string in the format "Name: Value". Later duplicates win.
fn parse_header(header_str: &str, headers: &mut IndexMap<String, String>) -> Result<(), ParseError> {
    match header_str.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            headers.insert(name.trim().to_string(), value.trim().to_string());
            Ok(())
        }
        _ => Err(ParseError::InvalidHeader(header_str.to_string())),
    }
}

/// Base64 encodes a string (for Basic authentication).
fn base64_encode(input: &str) -> String {
    use base64::{engine::general_purpose, Engine as _};
    general_purpose::STANDARD.encode(input.as_bytes())
}

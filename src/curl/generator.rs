//! cURL command generator.
//!
//! Renders a [`Request`] back into the normalized cURL form: the method flag only
//! when it differs from what the parser would infer, headers in their stored
//! order, the body, and the URL last. Reparsing the output yields an equal
//! request.

use crate::models::request::{HttpMethod, Request};

/// Generates a cURL command, wrapping onto continuation lines when long.
///
/// # Examples
///
/// ```
/// use curl_template::curl::{generate_curl_command, parse_curl_command};
///
/// let request = parse_curl_command("curl https://api.example.com/users -H 'X-Team: core'").unwrap();
/// let curl = generate_curl_command(&request);
/// assert_eq!(curl, "curl -H 'X-Team: core' https://api.example.com/users");
/// ```
pub fn generate_curl_command(request: &Request) -> String {
    format_multiline(&command_parts(request))
}

/// Generates a single-line cURL command.
pub fn generate_curl_command_compact(request: &Request) -> String {
    command_parts(request).join(" ")
}

fn command_parts(request: &Request) -> Vec<String> {
    let mut parts = vec!["curl".to_string()];

    if request.method != HttpMethod::inferred(request.has_body()) {
        parts.push("-X".to_string());
        parts.push(request.method.as_str().to_string());
    }

    for (key, value) in &request.headers {
        parts.push("-H".to_string());
        parts.push(escape_shell_arg(&format!("{}: {}", key, value)));
    }

    if let Some(body) = &request.body {
        parts.push("-d".to_string());
        parts.push(escape_shell_arg(&body.to_text()));
    }

    parts.push(escape_shell_arg(&request.url));
    parts
}

/// Escapes a string for safe use in shell commands.
///
/// Uses single quotes, closing and reopening them around embedded single quotes.
fn escape_shell_arg(arg: &str) -> String {
    if needs_quoting(arg) {
        format!("'{}'", arg.replace('\'', "'\\''"))
    } else {
        arg.to_string()
    }
}

fn needs_quoting(s: &str) -> bool {
    let special_chars = [
        ' ', '\t', '\n', '\r', '|', '&', ';', '<', '>', '(', ')', '$', '`', '\\', '"', '\'', '*',
        '?', '[', ']', '#', '~', '=', '%', '{', '}',
    ];

    s.is_empty() || s.chars().any(|c| special_chars.contains(&c))
}

/// Joins parts with backslash continuations once the single line exceeds 80 columns.
fn format_multiline(parts: &[String]) -> String {
    let single_line = parts.join(" ");
    if single_line.len() <= 80 || parts.len() < 2 {
        return single_line;
    }

    let mut result = parts[0].clone();
    for part in &parts[1..] {
        result.push_str(" \\\n  ");
        result.push_str(part);
    }
    result
}

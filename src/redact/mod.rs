//! Heuristic secret detection and masking for display.
//!
//! Nothing here affects compilation or instantiation; it only decides how a
//! value is shown to the user.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Values shorter than this are never treated as secrets.
const MIN_SECRET_LEN: usize = 20;

static SECRET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Long alphanumeric run
        r"[A-Za-z0-9]{32,}",
        // Dash/underscore delimited token
        r"^[A-Za-z0-9]+(?:[-_][A-Za-z0-9]+)+$",
        r"(?i)^bearer\s+\S+",
        // SHA-1 to SHA-256 hex digests
        r"^[A-Fa-f0-9]{40,64}$",
        r"(?i)api[_-]key",
        // Stripe-style keys
        r"^(?:pk|sk)_[A-Za-z0-9_]+$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Failed to compile secret regex"))
    .collect()
});

/// Index of the delimited-token pattern, which also needs a length of 40+.
const DELIMITED_TOKEN: usize = 1;

/// Returns true when `value` looks like a credential.
pub fn looks_like_secret(value: &str) -> bool {
    if value.chars().count() < MIN_SECRET_LEN {
        return false;
    }

    SECRET_PATTERNS.iter().enumerate().any(|(i, pattern)| {
        pattern.is_match(value) && (i != DELIMITED_TOKEN || value.chars().count() >= 40)
    })
}

/// Masks `value` if it looks like a secret, otherwise returns it unchanged.
///
/// Values longer than 20 characters keep their first 8 and last 4 characters;
/// shorter ones keep their first 4.
///
/// ```
/// use curl_template::redact::redact;
///
/// assert_eq!(redact("sk-ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789"), "sk-ABCDE...6789");
/// assert_eq!(redact("short"), "short");
/// ```
pub fn redact(value: &str) -> String {
    if !looks_like_secret(value) {
        return value.to_string();
    }

    let chars: Vec<char> = value.chars().collect();
    if chars.len() > MIN_SECRET_LEN {
        let head: String = chars[..8].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        let head: String = chars[..4].iter().collect();
        format!("{}...", head)
    }
}

/// Returns a copy of `value` with every secret-looking string masked.
pub fn redact_json(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(redact(s)),
        Value::Array(items) => Value::Array(items.iter().map(redact_json).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_json(v)))
                .collect(),
        ),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
    }
}

//! cURL command parsing and generation.
//!
//! This module converts between cURL commands and structured [`Request`]s.
//!
//! [`Request`]: crate::models::Request
//!
//! # Examples
//!
//! ```
//! use curl_template::curl::{generate_curl_command, parse_curl_command};
//!
//! let curl = r#"curl -X POST https://api.example.com/users \
//!   -H "X-Tenant: acme" \
//!   -d '{"name":"John Doe"}'"#;
//!
//! let request = parse_curl_command(curl).unwrap();
//! assert_eq!(request.url, "https://api.example.com/users");
//!
//! // The normalized form parses back to the same request.
//! let normalized = generate_curl_command(&request);
//! assert_eq!(parse_curl_command(&normalized).unwrap(), request);
//! ```
//!
//! # Supported cURL Flags
//!
//! - `-X`, `--request` - HTTP method
//! - `-H`, `--header` - HTTP headers (a repeated name keeps the last value)
//! - `-d`, `--data`, `--data-raw`, `--data-binary`, `--data-ascii`, `--json` -
//!   Request body; repeated flags are joined with `&`
//! - `--url` - Explicit URL
//! - `-u`, `--user` - Basic authentication (converts to Authorization header)
//! - `-A`, `--user-agent` - Converts to a User-Agent header
//! - `--compressed`, `-k`, `-L`, `-s`, `-v`, `-i` and `-o`, `-w`, `-m`,
//!   `--max-time`, `--connect-timeout` - Ignored
//!
//! Short flags accept an attached value (`-XPOST`, `-H'Accept: */*'`).
//!
//! Cookies, multipart forms, file uploads, proxies and TLS options are not
//! supported. Their flags (`-b`, `-c`, `-e`, `-F`, `--data-urlencode`, `-x`,
//! `-T`, `-r`, `--cert`, ...) are skipped together with their value. Other
//! unknown flags are skipped on their own. The command word must be exactly
//! `curl`.

pub mod generator;
pub mod parser;

pub use generator::{generate_curl_command, generate_curl_command_compact};
pub use parser::{parse_curl_command, ParseError};

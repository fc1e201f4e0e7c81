//! HTTP route handlers

pub mod room;
pub mod status;
pub mod sync;

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::state::{CODE_ALPHABET, CODE_LEN};

/// Uniform error body
pub(crate) fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}

/// Normalize a submitted room code, or `None` if it cannot be one.
/// Codes are case-insensitive on the way in.
pub(crate) fn parse_code(raw: &str) -> Option<String> {
    let code = raw.trim().to_uppercase();
    let valid = code.len() == CODE_LEN && code.bytes().all(|b| CODE_ALPHABET.contains(&b));
    valid.then_some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code() {
        assert_eq!(parse_code("abcd"), Some("ABCD".to_string()));
        assert_eq!(parse_code(" WXYZ "), Some("WXYZ".to_string()));

        assert_eq!(parse_code("AB"), None, "too short");
        assert_eq!(parse_code("ABCDE"), None, "too long");
        assert_eq!(parse_code("AB0D"), None, "0 is not in the alphabet");
        assert_eq!(parse_code("AB!D"), None);
    }
}

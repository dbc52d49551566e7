use serde_json::Value;
use std::fmt;

pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

#[derive(Debug)]
pub enum ApiError {
    Http(reqwest::Error),
    Status { status: u16, message: String },
    Decode(String),
    Unauthorized,
    Config(String),
    Validation(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Status { message, .. } => write!(f, "{message}"),
            Self::Decode(e) => write!(f, "Unexpected response: {e}"),
            Self::Unauthorized => write!(f, "You must be signed in to do that."),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Validation(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Http(e)
        }
    }
}

impl ApiError {
    /// HTTP status of a rejected request, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Turn an error response body into a message fit for a toast.
///
/// DRF answers with `{"detail": ...}`, a bare string, or a map of field
/// errors (`{"email": ["..."], "password": "..."}`); anything else falls
/// back to the raw body or a generic message.
pub fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return UNKNOWN_ERROR.to_string();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(s)) => s,
        Ok(Value::Object(map)) => {
            if let Some(detail) = map.get("detail") {
                return value_text(detail);
            }
            if map.is_empty() {
                return UNKNOWN_ERROR.to_string();
            }
            map.iter()
                .map(|(key, value)| format!("{key}: {}", value_text(value)))
                .collect::<Vec<_>>()
                .join("; ")
        }
        Ok(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join(", "),
        Ok(_) => UNKNOWN_ERROR.to_string(),
        Err(_) => trimmed.to_string(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_detail() {
        let body = r#"{"detail": "No active account found with the given credentials"}"#;
        assert_eq!(
            error_message(body),
            "No active account found with the given credentials"
        );
    }

    #[test]
    fn test_error_message_plain_json_string() {
        assert_eq!(error_message(r#""Already applied""#), "Already applied");
    }

    #[test]
    fn test_error_message_field_errors_joined() {
        let body = r#"{"email": ["A user with this email address already exists."], "password": "Passwords must match."}"#;
        assert_eq!(
            error_message(body),
            "email: A user with this email address already exists.; password: Passwords must match."
        );
    }

    #[test]
    fn test_error_message_multiple_values_in_field() {
        let body = r#"{"non_field_errors": ["first", "second"]}"#;
        assert_eq!(error_message(body), "non_field_errors: first, second");
    }

    #[test]
    fn test_error_message_empty_body() {
        assert_eq!(error_message(""), UNKNOWN_ERROR);
        assert_eq!(error_message("   "), UNKNOWN_ERROR);
        assert_eq!(error_message("{}"), UNKNOWN_ERROR);
    }

    #[test]
    fn test_error_message_non_json_body() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_error_message_array_body() {
        assert_eq!(
            error_message(r#"["You have already submitted an application."]"#),
            "You have already submitted an application."
        );
    }

    #[test]
    fn test_status_display_is_message_only() {
        let err = ApiError::Status {
            status: 400,
            message: "This route already exists.".to_string(),
        };
        assert_eq!(err.to_string(), "This route already exists.");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_unauthorized_has_no_status() {
        assert_eq!(ApiError::Unauthorized.status(), None);
    }
}

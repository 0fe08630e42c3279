use anyhow::{anyhow, Context};
use serde_json::json;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Not found")]
    NotFound,

    #[error("Content must not be empty")]
    EmptyContent,

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),

    #[error("Invalid user name {0:?}")]
    InvalidName(String),

    #[error("Name already used {0}")]
    NameAlreadyUsed(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Replies cannot be replied to")]
    NestedReply,

    #[error("Parent comment belongs to another post")]
    ParentMismatch,
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::PermissionDenied => StatusCode::FORBIDDEN,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::EmptyContent => StatusCode::BAD_REQUEST,
            Error::NullByteInString(_) => StatusCode::BAD_REQUEST,
            Error::InvalidName(_) => StatusCode::BAD_REQUEST,
            Error::NameAlreadyUsed(_) => StatusCode::CONFLICT,
            Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::NestedReply => StatusCode::BAD_REQUEST,
            Error::ParentMismatch => StatusCode::BAD_REQUEST,
        }
    }

    /// Text carried in the `error` field of the response body
    pub fn message(&self) -> String {
        match self {
            Error::Unknown(msg) => msg.clone(),
            Error::PermissionDenied => String::from("You can only delete your own comments"),
            Error::NotFound => String::from("Not found"),
            Error::EmptyContent => String::from("Content is required"),
            Error::NullByteInString(_) => String::from("Content contains a null byte"),
            Error::InvalidName(_) => String::from("Invalid user name"),
            Error::NameAlreadyUsed(_) => String::from("User already exists"),
            Error::InvalidCredentials => String::from("Invalid email or password"),
            Error::NestedReply => String::from("Cannot reply to a reply"),
            Error::ParentMismatch => String::from("Parent comment belongs to another post"),
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        let error = self.message();
        serde_json::to_vec(&match self {
            Error::Unknown(_) => json!({ "error": error, "type": "unknown" }),
            Error::PermissionDenied => json!({ "error": error, "type": "permission-denied" }),
            Error::NotFound => json!({ "error": error, "type": "not-found" }),
            Error::EmptyContent => json!({ "error": error, "type": "empty-content" }),
            Error::NullByteInString(s) => json!({
                "error": error,
                "type": "null-byte",
                "string": s,
            }),
            Error::InvalidName(n) => json!({
                "error": error,
                "type": "invalid-name",
                "name": n,
            }),
            Error::NameAlreadyUsed(n) => json!({
                "error": error,
                "type": "conflict-name",
                "name": n,
            }),
            Error::InvalidCredentials => json!({ "error": error, "type": "invalid-credentials" }),
            Error::NestedReply => json!({ "error": error, "type": "nested-reply" }),
            Error::ParentMismatch => json!({ "error": error, "type": "parent-mismatch" }),
        })
        .expect("serializing error body")
    }

    /// Recovers an error from a response body
    ///
    /// Bodies with an `error` string but no known `type` become `Unknown`, so
    /// that servers which only follow the `{ "error": ... }` convention still
    /// get their message shown.
    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        let message = data
            .get("error")
            .and_then(|e| e.as_str())
            .ok_or_else(|| anyhow!("error body has no error string"))?;
        let field = |name: &str| {
            String::from(data.get(name).and_then(|s| s.as_str()).unwrap_or(""))
        };
        Ok(match data.get("type").and_then(|t| t.as_str()) {
            Some("permission-denied") => Error::PermissionDenied,
            Some("not-found") => Error::NotFound,
            Some("empty-content") => Error::EmptyContent,
            Some("null-byte") => Error::NullByteInString(field("string")),
            Some("invalid-name") => Error::InvalidName(field("name")),
            Some("conflict-name") => Error::NameAlreadyUsed(field("name")),
            Some("invalid-credentials") => Error::InvalidCredentials,
            Some("nested-reply") => Error::NestedReply,
            Some("parent-mismatch") => Error::ParentMismatch,
            _ => Error::Unknown(String::from(message)),
        })
    }
}

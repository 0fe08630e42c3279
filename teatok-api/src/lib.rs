use chrono::Utc;

pub use uuid::Uuid;
pub type Time = chrono::DateTime<Utc>;

mod auth;
pub use auth::{Credentials, LogoutRequest, LogoutResponse, NewUser};

mod comment;
pub use comment::{Author, Comment, CommentId, NewComment};

mod error;
pub use error::Error;

mod post;
pub use post::{NewPost, Post, PostId, RoomId};

mod user;
pub use user::{User, UserId};

/// Header carrying the acting user on requests that have no body
pub const USER_ID_HEADER: &str = "x-user-id";

pub fn validate_string(s: &str) -> Result<(), Error> {
    if s.contains('\0') {
        return Err(Error::NullByteInString(String::from(s)));
    }
    Ok(())
}

/// Trims comment or post content, refusing anything left empty
pub fn validate_content(content: &str) -> Result<String, Error> {
    let content = content.trim();
    if content.is_empty() {
        return Err(Error::EmptyContent);
    }
    validate_string(content)?;
    Ok(String::from(content))
}

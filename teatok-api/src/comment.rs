use crate::{PostId, Time, UserId};

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct CommentId(pub String);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,

    #[serde(default)]
    pub alias: Option<String>,

    #[serde(default)]
    pub anonymous_id: Option<String>,
}

impl Author {
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<UserId>,
    pub author: Author,

    pub content: String,
    pub created_at: Time,

    /// Only set on replies, always pointing to a top-level comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<CommentId>,

    /// Replies in the order they were posted; always empty on replies themselves
    #[serde(default)]
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_comment_id.is_some()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: PostId,
    pub author_id: UserId,
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<CommentId>,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), crate::Error> {
        crate::validate_content(&self.content)?;
        crate::validate_string(&self.post_id.0)?;
        crate::validate_string(&self.author_id.0)?;
        if let Some(parent) = &self.parent_comment_id {
            crate::validate_string(&parent.0)?;
        }
        Ok(())
    }
}

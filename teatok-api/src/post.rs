use crate::{Author, Error, Time, UserId};

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct PostId(pub String);

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub author: Author,
    pub room_id: RoomId,
    pub category: String,
    pub duration: String,

    #[serde(default)]
    pub is_voice_note: bool,

    /// None for permanent posts
    #[serde(default)]
    pub expires_at: Option<Time>,
    pub created_at: Time,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub room_id: RoomId,
    pub category: String,
    pub duration: String,

    #[serde(default)]
    pub is_voice_note: bool,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_content(&self.title)?;
        crate::validate_content(&self.content)?;
        crate::validate_string(&self.category)?;
        crate::validate_string(&self.duration)?;
        Ok(())
    }
}

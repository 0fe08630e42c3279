use async_trait::async_trait;

use crate::{
    api::{
        self, Comment, CommentId, Credentials, LogoutRequest, LogoutResponse, NewComment, NewPost,
        NewUser, Post, PostId, RoomId, User, UserId,
    },
    CommentsApi, Error,
};

/// Client for the TeaTok HTTP API, usable both natively and from wasm
#[derive(Clone, Debug)]
pub struct HttpApi {
    host: String,
    client: reqwest::Client,
}

impl PartialEq for HttpApi {
    fn eq(&self, other: &HttpApi) -> bool {
        self.host == other.host
    }
}

impl HttpApi {
    pub fn new(host: impl Into<String>) -> HttpApi {
        let host = host.into();
        HttpApi {
            host: String::from(host.trim_end_matches('/')),
            client: reqwest::Client::new(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    async fn receive<R>(resp: reqwest::Response) -> Result<R, Error>
    where
        R: for<'de> serde::Deserialize<'de>,
    {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }
        let body = resp.bytes().await?;
        match api::Error::parse(&body) {
            Ok(err) => {
                tracing::debug!(%status, ?err, "server returned an error");
                Err(Error::Api(err))
            }
            Err(err) => {
                tracing::warn!(%status, ?err, "server returned an unreadable error body");
                Err(Error::UnknownStatus(status.as_u16()))
            }
        }
    }

    pub async fn register(&self, user: &NewUser) -> Result<User, Error> {
        let resp = self
            .client
            .post(self.url("/users"))
            .json(user)
            .send()
            .await?;
        Self::receive(resp).await
    }

    pub async fn login(&self, creds: &Credentials) -> Result<User, Error> {
        let resp = self
            .client
            .post(self.url("/users/login"))
            .json(creds)
            .send()
            .await?;
        Self::receive(resp).await
    }

    pub async fn anonymous(&self) -> Result<User, Error> {
        let resp = self.client.post(self.url("/users/anonymous")).send().await?;
        Self::receive(resp).await
    }

    pub async fn logout(&self, user: &UserId) -> Result<LogoutResponse, Error> {
        let resp = self
            .client
            .post(self.url("/users/logout"))
            .json(&LogoutRequest {
                user_id: user.clone(),
            })
            .send()
            .await?;
        Self::receive(resp).await
    }

    pub async fn fetch_posts(&self, room: Option<&RoomId>) -> Result<Vec<Post>, Error> {
        let mut req = self.client.get(self.url("/posts"));
        if let Some(room) = room {
            req = req.query(&[("roomId", &room.0)]);
        }
        Self::receive(req.send().await?).await
    }

    pub async fn create_post(&self, post: &NewPost) -> Result<Post, Error> {
        let resp = self
            .client
            .post(self.url("/posts"))
            .json(post)
            .send()
            .await?;
        Self::receive(resp).await
    }
}

#[async_trait(?Send)]
impl CommentsApi for HttpApi {
    async fn fetch_comments(&self, post: &PostId) -> Result<Vec<Comment>, Error> {
        tracing::debug!(?post, "fetching comments");
        let resp = self
            .client
            .get(self.url(&format!("/posts/{}/comments", post.0)))
            .send()
            .await?;
        Self::receive(resp).await
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment, Error> {
        tracing::debug!(post = ?comment.post_id, parent = ?comment.parent_comment_id, "creating comment");
        let resp = self
            .client
            .post(self.url("/comments"))
            .json(comment)
            .send()
            .await?;
        Self::receive(resp).await
    }

    async fn delete_comment(&self, comment: &CommentId, actor: &UserId) -> Result<(), Error> {
        tracing::debug!(?comment, ?actor, "deleting comment");
        let resp = self
            .client
            .delete(self.url(&format!("/comments/{}", comment.0)))
            .header(api::USER_ID_HEADER, &actor.0)
            .send()
            .await?;
        let _: serde_json::Value = Self::receive(resp).await?;
        Ok(())
    }
}

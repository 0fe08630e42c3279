use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::Utc;
use teatok_client::{
    api::{
        self, Author, Comment, CommentId, Credentials, Error, LogoutResponse, NewComment,
        NewPost, NewUser, Post, PostId, RoomId, User, UserId, Uuid,
    },
    CommentsApi,
};
use tokio::sync::{Mutex, MutexGuard};

/// In-memory stand-in for the TeaTok API
#[derive(Debug, Default)]
pub struct MockServer {
    users: BTreeMap<UserId, DbUser>,

    /// In creation order
    posts: Vec<Post>,

    /// In creation order, replies included, all with empty `replies`
    comments: Vec<Comment>,

    fetches: HashMap<PostId, usize>,
}

#[derive(Debug)]
struct DbUser {
    user: User,
    password: Option<String>,
    logged_in: bool,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer::default()
    }

    /// Number of times the comments of `post` were listed
    pub fn test_num_fetches(&self, post: &PostId) -> usize {
        self.fetches.get(post).copied().unwrap_or(0)
    }

    /// Number of stored comments, replies included
    pub fn test_num_comments(&self) -> usize {
        self.comments.len()
    }

    fn author(&self, id: &UserId) -> Result<Author, Error> {
        let u = &self.users.get(id).ok_or(Error::NotFound)?.user;
        Ok(Author {
            name: u.name.clone(),
            alias: u.alias.clone(),
            anonymous_id: u.anonymous_id.clone(),
        })
    }

    pub fn register(&mut self, u: NewUser) -> Result<User, Error> {
        u.validate()?;
        let conflict = self.users.values().any(|db| {
            db.user.name == u.name || db.user.email.as_deref() == Some(&u.email as &str)
        });
        if conflict {
            return Err(Error::NameAlreadyUsed(u.name));
        }
        let user = User {
            id: UserId(new_id()),
            name: u.name,
            email: Some(u.email),
            alias: None,
            anonymous_id: None,
        };
        self.users.insert(
            user.id.clone(),
            DbUser {
                user: user.clone(),
                password: Some(u.password),
                logged_in: true,
            },
        );
        tracing::info!(user = ?user.id, "registered user");
        Ok(user)
    }

    pub fn login(&mut self, c: Credentials) -> Result<User, Error> {
        let db = self
            .users
            .values_mut()
            .find(|db| db.user.email.as_deref() == Some(&c.email as &str))
            .ok_or(Error::InvalidCredentials)?;
        // tests, of which the mock server is a part, do not hash passwords
        if db.password.as_deref() != Some(&c.password as &str) {
            return Err(Error::InvalidCredentials);
        }
        db.logged_in = true;
        Ok(db.user.clone())
    }

    pub fn anonymous(&mut self) -> User {
        let anonymous_id = new_id();
        let user = User {
            id: UserId(new_id()),
            name: format!("anon-{}", &anonymous_id[..8]),
            email: None,
            alias: None,
            anonymous_id: Some(anonymous_id),
        };
        self.users.insert(
            user.id.clone(),
            DbUser {
                user: user.clone(),
                password: None,
                logged_in: true,
            },
        );
        user
    }

    pub fn logout(&mut self, user: &UserId) -> Result<LogoutResponse, Error> {
        let db = self.users.get_mut(user).ok_or(Error::NotFound)?;
        db.logged_in = false;
        Ok(LogoutResponse {
            message: String::from("Logged out successfully"),
            is_demo: Some(db.user.is_anonymous()),
        })
    }

    pub fn create_post(&mut self, p: NewPost) -> Result<Post, Error> {
        p.validate()?;
        let post = Post {
            id: PostId(new_id()),
            title: api::validate_content(&p.title)?,
            content: api::validate_content(&p.content)?,
            author: self.author(&p.author_id)?,
            author_id: p.author_id,
            room_id: p.room_id,
            category: p.category,
            duration: p.duration,
            is_voice_note: p.is_voice_note,
            expires_at: None,
            created_at: Utc::now(),
        };
        self.posts.push(post.clone());
        Ok(post)
    }

    /// Posts, newest first
    pub fn fetch_posts(&self, room: Option<&RoomId>) -> Vec<Post> {
        self.posts
            .iter()
            .rev()
            .filter(|p| room.map(|r| p.room_id == *r).unwrap_or(true))
            .cloned()
            .collect()
    }

    /// Top-level comments newest first, each with its replies oldest first
    pub fn fetch_comments(&mut self, post: &PostId) -> Result<Vec<Comment>, Error> {
        if !self.posts.iter().any(|p| p.id == *post) {
            return Err(Error::NotFound);
        }
        *self.fetches.entry(post.clone()).or_insert(0) += 1;
        let of_post = || self.comments.iter().filter(|c| c.post_id == *post);
        Ok(of_post()
            .filter(|c| !c.is_reply())
            .rev()
            .map(|c| Comment {
                replies: of_post()
                    .filter(|r| r.parent_comment_id.as_ref() == Some(&c.id))
                    .cloned()
                    .collect(),
                ..c.clone()
            })
            .collect())
    }

    pub fn create_comment(&mut self, c: NewComment) -> Result<Comment, Error> {
        c.validate()?;
        let author = self.author(&c.author_id)?;
        if !self.posts.iter().any(|p| p.id == c.post_id) {
            return Err(Error::NotFound);
        }
        if let Some(parent) = &c.parent_comment_id {
            let parent = self
                .comments
                .iter()
                .find(|p| p.id == *parent)
                .ok_or(Error::NotFound)?;
            if parent.post_id != c.post_id {
                return Err(Error::ParentMismatch);
            }
            if parent.is_reply() {
                return Err(Error::NestedReply);
            }
        }
        let comment = Comment {
            id: CommentId(new_id()),
            post_id: c.post_id,
            author_id: Some(c.author_id),
            author,
            content: api::validate_content(&c.content)?,
            created_at: Utc::now(),
            parent_comment_id: c.parent_comment_id,
            replies: Vec::new(),
        };
        tracing::debug!(comment = ?comment.id, post = ?comment.post_id, "created comment");
        self.comments.push(comment.clone());
        Ok(comment)
    }

    /// Deletes a comment, and its replies with it
    pub fn delete_comment(&mut self, id: &CommentId, actor: &UserId) -> Result<(), Error> {
        let comment = self
            .comments
            .iter()
            .find(|c| c.id == *id)
            .ok_or(Error::NotFound)?;
        if comment.author_id.as_ref() != Some(actor) {
            return Err(Error::PermissionDenied);
        }
        self.comments
            .retain(|c| c.id != *id && c.parent_comment_id.as_ref() != Some(id));
        tracing::debug!(comment = ?id, "deleted comment");
        Ok(())
    }
}

/// Shared handle to a `MockServer`, usable both as axum state and as a `CommentsApi`
#[derive(Clone, Debug, Default)]
pub struct MockHandle {
    server: Arc<Mutex<MockServer>>,
    offline: Arc<std::sync::atomic::AtomicBool>,
}

impl MockHandle {
    pub fn new() -> MockHandle {
        MockHandle::default()
    }

    pub async fn lock(&self) -> MutexGuard<'_, MockServer> {
        self.server.lock().await
    }

    /// Makes every `CommentsApi` call fail as if the network were down
    pub fn set_offline(&self, offline: bool) {
        self.offline
            .store(offline, std::sync::atomic::Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), teatok_client::Error> {
        match self.offline.load(std::sync::atomic::Ordering::SeqCst) {
            true => Err(teatok_client::Error::Network(String::from(
                "mock server is offline",
            ))),
            false => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl CommentsApi for MockHandle {
    async fn fetch_comments(&self, post: &PostId) -> Result<Vec<Comment>, teatok_client::Error> {
        self.check_online()?;
        Ok(self.lock().await.fetch_comments(post)?)
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment, teatok_client::Error> {
        self.check_online()?;
        Ok(self.lock().await.create_comment(comment.clone())?)
    }

    async fn delete_comment(
        &self,
        comment: &CommentId,
        actor: &UserId,
    ) -> Result<(), teatok_client::Error> {
        self.check_online()?;
        Ok(self.lock().await.delete_comment(comment, actor)?)
    }
}

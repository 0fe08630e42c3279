use async_trait::async_trait;

use crate::{
    api::{Comment, CommentId, NewComment, PostId, UserId},
    Error,
};

/// The part of the remote API a comment thread talks to
#[async_trait(?Send)]
pub trait CommentsApi {
    /// Top-level comments of the post, newest first, replies already nested
    async fn fetch_comments(&self, post: &PostId) -> Result<Vec<Comment>, Error>;

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment, Error>;

    async fn delete_comment(&self, comment: &CommentId, actor: &UserId) -> Result<(), Error>;
}

/// A network call a thread asked for
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Request {
    Load(PostId),
    Create(NewComment),
    Delete { comment: CommentId, actor: UserId },
}

/// The outcome of a `Request`, to be fed back into the thread that issued it
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Response {
    Loaded(Result<Vec<Comment>, Error>),
    Created(Result<Comment, Error>),
    Deleted(CommentId, Result<(), Error>),
}

pub async fn execute<A: ?Sized + CommentsApi>(api: &A, req: Request) -> Response {
    match req {
        Request::Load(post) => Response::Loaded(api.fetch_comments(&post).await),
        Request::Create(comment) => Response::Created(api.create_comment(&comment).await),
        Request::Delete { comment, actor } => {
            let res = api.delete_comment(&comment, &actor).await;
            Response::Deleted(comment, res)
        }
    }
}

use axum::{
    extract::{Path, Query, State},
    Json,
};
use teatok_client::api::{
    Comment, CommentId, Credentials, LogoutRequest, LogoutResponse, NewComment, NewPost, NewUser,
    Post, PostId, RoomId, User,
};

use crate::{extractors::ActingUser, Error, MockHandle};

pub async fn register(
    State(server): State<MockHandle>,
    Json(data): Json<NewUser>,
) -> Result<Json<User>, Error> {
    Ok(Json(server.lock().await.register(data)?))
}

pub async fn login(
    State(server): State<MockHandle>,
    Json(data): Json<Credentials>,
) -> Result<Json<User>, Error> {
    Ok(Json(server.lock().await.login(data)?))
}

pub async fn anonymous(State(server): State<MockHandle>) -> Json<User> {
    Json(server.lock().await.anonymous())
}

pub async fn logout(
    State(server): State<MockHandle>,
    Json(data): Json<LogoutRequest>,
) -> Result<Json<LogoutResponse>, Error> {
    Ok(Json(server.lock().await.logout(&data.user_id)?))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsQuery {
    room_id: Option<String>,
}

pub async fn fetch_posts(
    State(server): State<MockHandle>,
    Query(q): Query<PostsQuery>,
) -> Json<Vec<Post>> {
    let room = q.room_id.map(RoomId);
    Json(server.lock().await.fetch_posts(room.as_ref()))
}

pub async fn create_post(
    State(server): State<MockHandle>,
    Json(data): Json<NewPost>,
) -> Result<Json<Post>, Error> {
    Ok(Json(server.lock().await.create_post(data)?))
}

pub async fn fetch_comments(
    State(server): State<MockHandle>,
    Path(post): Path<String>,
) -> Result<Json<Vec<Comment>>, Error> {
    Ok(Json(server.lock().await.fetch_comments(&PostId(post))?))
}

pub async fn create_comment(
    State(server): State<MockHandle>,
    Json(data): Json<NewComment>,
) -> Result<Json<Comment>, Error> {
    Ok(Json(server.lock().await.create_comment(data)?))
}

pub async fn delete_comment(
    ActingUser(actor): ActingUser,
    State(server): State<MockHandle>,
    Path(comment): Path<String>,
) -> Result<Json<serde_json::Value>, Error> {
    server
        .lock()
        .await
        .delete_comment(&CommentId(comment), &actor)?;
    Ok(Json(serde_json::json!({})))
}

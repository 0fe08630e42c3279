use axum::http::header;
use teatok_client::api::Error as ApiError;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(#[from] pub ApiError);

impl Error {
    pub fn permission_denied() -> Error {
        Error(ApiError::PermissionDenied)
    }
}

impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let err = self.0;
        match &err {
            ApiError::Unknown(msg) => tracing::error!(?msg, "internal server error"),
            _ => tracing::info!("returning error to client: {err}"),
        }
        (
            err.status_code(),
            [(header::CONTENT_TYPE, "application/json")],
            err.contents(),
        )
            .into_response()
    }
}

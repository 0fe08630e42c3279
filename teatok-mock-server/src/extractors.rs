use axum::{async_trait, extract::FromRequestParts, http::request};
use teatok_client::api::{self, UserId};

use crate::Error;

/// User named by the `x-user-id` header
pub struct ActingUser(pub UserId);

#[async_trait]
impl<S: Sync> FromRequestParts<S> for ActingUser {
    type Rejection = Error;

    async fn from_request_parts(req: &mut request::Parts, _state: &S) -> Result<ActingUser, Error> {
        let id = req
            .headers
            .get(api::USER_ID_HEADER)
            .ok_or(Error::permission_denied())?
            .to_str()
            .map_err(|_| Error::permission_denied())?
            .trim();
        if id.is_empty() {
            return Err(Error::permission_denied());
        }
        Ok(ActingUser(UserId(String::from(id))))
    }
}

use crate::{Error, UserId};

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.name)?;
        crate::validate_string(&self.email)?;
        crate::validate_string(&self.password)?;
        if self.name.trim().is_empty() || self.name.chars().any(|c| c.is_control()) {
            return Err(Error::InvalidName(self.name.clone()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub user_id: UserId,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub message: String,

    #[serde(default)]
    pub is_demo: Option<bool>,
}

use crate::api::{User, UserId};

/// The user on whose behalf mutating requests are made
///
/// Anonymous users are identities too: the API hands them a generated name.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Identity {
    pub id: UserId,
    pub name: String,
    pub alias: Option<String>,
}

impl Identity {
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl From<User> for Identity {
    fn from(u: User) -> Identity {
        Identity {
            id: u.id,
            name: u.name,
            alias: u.alias,
        }
    }
}

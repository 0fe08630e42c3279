use crate::api;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error(transparent)]
    Api(#[from] api::Error),

    #[error("Server answered with status {0} and no readable error")]
    UnknownStatus(u16),
}

impl Error {
    /// The message the server gave for this failure, if any
    pub fn server_message(&self) -> Option<String> {
        match self {
            Error::Api(e) => Some(e.message()).filter(|m| !m.is_empty()),
            Error::Network(_) | Error::UnknownStatus(_) => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Network(e.to_string())
    }
}

use jsonwebtoken::errors::Error as JwtError;
use log::{debug, error};
use rocket::{
    http::{Status, StatusClass},
    response::{self, status::Custom, Responder},
    serde::json::Json,
    Request,
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or empty identifier supplied by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Voter, candidate or election absent.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The voter is no longer eligible.
    #[error("Already voted: {0}")]
    AlreadyVoted(String),
    #[error("No election is currently active")]
    NoActiveElection,
    #[error(transparent)]
    Jwt(#[from] JwtError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn invalid_input(what: impl Into<String>) -> Self {
        Self::InvalidInput(what.into())
    }

    pub fn status(&self) -> Status {
        match self {
            Self::InvalidInput(_) => Status::BadRequest,
            Self::NotFound(_) => Status::NotFound,
            Self::AlreadyVoted(_) => Status::Conflict,
            Self::NoActiveElection => Status::Forbidden,
            // Session tokens are checked by the `AuthToken` guard; this only
            // comes from failing to sign one.
            Self::Jwt(_) | Self::Store(_) => Status::InternalServerError,
        }
    }

    /// Short machine-readable name of the failure, for the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound(_) => "not_found",
            Self::AlreadyVoted(_) => "already_voted",
            Self::NoActiveElection => "no_active_election",
            Self::Jwt(_) => "token_error",
            Self::Store(_) => "store_error",
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl From<&Error> for ErrorBody {
    fn from(err: &Error) -> Self {
        Self {
            error: err.kind(),
            message: err.to_string(),
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        let status = self.status();
        if status.class() == StatusClass::ServerError {
            error!("{self}");
        } else {
            debug!("{self}");
        }
        Custom(status, Json(ErrorBody::from(&self))).respond_to(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_distinguish_ineligible_from_store_failure() {
        assert_eq!(
            Error::AlreadyVoted("voter 'user-2'".to_string()).status(),
            Status::Conflict
        );
        assert_eq!(
            Error::from(StoreError::Backend("down".to_string())).status(),
            Status::InternalServerError
        );
        assert_eq!(Error::not_found("Voter 'x'").status(), Status::NotFound);
        assert_eq!(Error::invalid_input("empty").status(), Status::BadRequest);
        assert_eq!(Error::NoActiveElection.status(), Status::Forbidden);
    }

    #[test]
    fn token_signing_failure_is_a_server_error() {
        let err = JwtError::from(jsonwebtoken::errors::ErrorKind::InvalidKeyFormat);
        let err = Error::from(err);
        assert_eq!(err.status(), Status::InternalServerError);
        assert_eq!(ErrorBody::from(&err).error, "token_error");
    }

    #[test]
    fn body_carries_kind_and_message() {
        let body = ErrorBody::from(&Error::not_found("Voter with login ID 'BAD-ID'"));
        assert_eq!(body.error, "not_found");
        assert_eq!(body.message, "Not found: Voter with login ID 'BAD-ID'");
    }
}

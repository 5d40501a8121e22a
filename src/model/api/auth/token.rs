use chrono::{serde::ts_seconds, DateTime, Utc};
use jsonwebtoken::{
    errors::Error as JwtError, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use log::debug;
use rocket::{
    http::{Cookie, SameSite, Status},
    request::{FromRequest, Outcome},
    time::Duration,
    Request,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::model::common::{Voter, VoterId};
use crate::store::{IdentityStore, Store, StoreError};

pub const AUTH_TOKEN_COOKIE: &str = "auth_token";

/// An authentication token for a logged-in voter.
///
/// The token only names the voter. Voter state such as the has-voted flag
/// is always re-read from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    #[serde(rename = "sub")]
    voter_id: VoterId,
}

impl AuthToken {
    pub fn new(voter: &Voter) -> Self {
        Self {
            voter_id: voter.id.clone(),
        }
    }

    /// The ID of the voter this token was issued to.
    pub fn voter_id(&self) -> &VoterId {
        &self.voter_id
    }

    /// Serialize this token into a signed cookie.
    pub fn into_cookie(self, config: &Config) -> Result<Cookie<'static>, JwtError> {
        let claims = Claims {
            token: self,
            expire_at: Utc::now() + config.auth_ttl(),
        };

        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret()),
        )?;

        Ok(Cookie::build(AUTH_TOKEN_COOKIE, token)
            .max_age(Duration::seconds(config.auth_ttl().num_seconds()))
            .http_only(true)
            .same_site(SameSite::Strict)
            .finish())
    }

    /// Deserialize a token from a cookie, checking its signature and expiry.
    pub fn from_cookie(cookie: &Cookie<'_>, config: &Config) -> Result<Self, JwtError> {
        jsonwebtoken::decode(
            cookie.value(),
            &DecodingKey::from_secret(config.jwt_secret()),
            &Validation::default(),
        )
        .map(|claims: TokenData<Claims>| claims.claims.token)
    }
}

/// Cookie claims: the token itself plus an expiry datetime.
#[derive(Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    token: AuthToken,
    #[serde(rename = "exp", with = "ts_seconds")]
    expire_at: DateTime<Utc>,
}

/// Reasons a request is not authenticated as a voter.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Not logged in")]
    Missing,
    #[error("Invalid auth token: {0}")]
    Invalid(#[from] JwtError),
    #[error("Voter '{0}' no longer exists")]
    UnknownVoter(VoterId),
    #[error("Auth config is not loaded")]
    Unconfigured,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthToken {
    type Error = AuthError;

    /// Get an [`AuthToken`] from the cookie and check its voter still exists.
    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(config) = req.rocket().state::<Config>() else {
            return Outcome::Failure((Status::InternalServerError, AuthError::Unconfigured));
        };

        let Some(cookie) = req.cookies().get(AUTH_TOKEN_COOKIE) else {
            return Outcome::Failure((Status::Unauthorized, AuthError::Missing));
        };

        let token = match Self::from_cookie(cookie, config) {
            Ok(token) => token,
            Err(e) => {
                debug!("Rejecting auth token: {e}");
                return Outcome::Failure((Status::Unauthorized, e.into()));
            }
        };

        let Some(store) = req.rocket().state::<Store>() else {
            let e = StoreError::Backend("No store is managed".to_string());
            return Outcome::Failure((Status::InternalServerError, e.into()));
        };
        match store.find_voter(&token.voter_id).await {
            Ok(Some(_)) => Outcome::Success(token),
            Ok(None) => Outcome::Failure((
                Status::Unauthorized,
                AuthError::UnknownVoter(token.voter_id),
            )),
            Err(e) => Outcome::Failure((Status::InternalServerError, e.into())),
        }
    }
}

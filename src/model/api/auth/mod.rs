mod request;
mod token;

pub use request::LoginRequest;
pub use token::{AuthError, AuthToken, AUTH_TOKEN_COOKIE};

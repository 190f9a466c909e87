use common::http::RouteError;
use hyper::{Body, Request, StatusCode};

use super::error::{ApiError, Result};
use super::ext::RequestExt;
use crate::database::{Session, User};

#[derive(thiserror::Error, Debug, Clone)]
pub enum AuthError {
    #[error("not logged in")]
    NotLoggedIn,
    #[error("invalid token")]
    InvalidToken,
    #[error("session expired")]
    SessionExpired,
    #[error("forbidden")]
    NotAdmin,
}

impl From<AuthError> for RouteError<ApiError> {
    fn from(value: AuthError) -> Self {
        RouteError::from(match &value {
            AuthError::NotLoggedIn => (StatusCode::UNAUTHORIZED, "not logged in"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid token"),
            AuthError::SessionExpired => (StatusCode::UNAUTHORIZED, "session expired"),
            AuthError::NotAdmin => (StatusCode::FORBIDDEN, "forbidden"),
        })
        .with_source(Some(ApiError::Auth(value)))
    }
}

/// The session and user resolved by the auth middleware.
#[derive(Clone)]
pub struct AuthData {
    pub session: Session,
    pub user: User,
}

pub fn require_auth(req: &Request<Body>) -> Result<AuthData> {
    req.auth().ok_or_else(|| AuthError::NotLoggedIn.into())
}

pub fn require_admin(req: &Request<Body>) -> Result<AuthData> {
    let auth = require_auth(req)?;

    if !auth.user.is_admin {
        return Err(AuthError::NotAdmin.into());
    }

    Ok(auth)
}

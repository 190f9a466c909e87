use common::http::ext::ResultExt;
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use serde_json::json;

use super::auth::require_auth;
use super::error::Result;
use super::ext::{form_field, RequestExt};
use super::jwt::JwtState;
use crate::database::{Session, User};

/// Verifies the credentials, opens a session and returns its bearer token.
pub async fn login(mut req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global()?;

    let body = hyper::body::to_bytes(req.body_mut())
        .await
        .extend_route((StatusCode::BAD_REQUEST, "failed to read request body"))?;

    let username = form_field(&body, "username").unwrap_or_default();
    let password = form_field(&body, "password").unwrap_or_default();

    if username.is_empty() || password.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "username and password are required").into());
    }

    tracing::debug!(username = %username, "login attempt");

    let user = User::by_username(&global.db, &username)
        .await
        .extend_route("failed to fetch user")?;

    // One generic message for both unknown usernames and bad passwords.
    let Some(user) = user.filter(|user| user.verify_password(&password)) else {
        tracing::warn!(username = %username, "failed login attempt");
        return Err((StatusCode::UNAUTHORIZED, "invalid username or password").into());
    };

    let session = Session::create(&global.db, user.id)
        .await
        .extend_route("failed to create session")?;

    User::touch_login(&global.db, user.id)
        .await
        .extend_route("failed to update last login")?;

    let token = JwtState::from(session)
        .serialize(&global.config.jwt)
        .ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to sign session token",
        ))?;

    tracing::info!(username = %username, "logged in");

    Ok(make_response!(
        StatusCode::OK,
        json!({ "success": true, "token": token })
    ))
}

/// Expires the caller's session.
pub async fn logout(req: Request<Body>) -> Result<Response<Body>> {
    let auth = require_auth(&req)?;
    let global = req.get_global()?;

    Session::invalidate(&global.db, auth.session.id)
        .await
        .extend_route("failed to invalidate session")?;

    tracing::info!(username = %auth.user.username, "logged out");

    Ok(make_response!(StatusCode::OK, json!({ "success": true })))
}

/// The caller's identity for the admin panel.
pub async fn admin_panel(req: Request<Body>) -> Result<Response<Body>> {
    let auth = require_auth(&req)?;

    Ok(make_response!(
        StatusCode::OK,
        json!({
            "username": auth.user.username,
            "is_admin": auth.user.is_admin,
        })
    ))
}

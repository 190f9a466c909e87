use std::sync::Arc;

use common::http::ext::ResultExt;
use common::http::RouteError;
use hyper::http::header;
use hyper::Body;
use routerify::prelude::RequestExt as _;
use routerify::Middleware;

use crate::api::auth::{AuthData, AuthError};
use crate::api::error::ApiError;
use crate::api::ext::RequestExt as _;
use crate::api::jwt::JwtState;
use crate::database::{Session, User};
use crate::global::GlobalState;

pub fn auth_middleware(_: &Arc<GlobalState>) -> Middleware<Body, RouteError<ApiError>> {
    Middleware::pre(|req| async move {
        let Some(token) = req.headers().get(header::AUTHORIZATION) else {
            // No Authorization header, the request stays anonymous.
            return Ok(req);
        };

        let global = req.get_global()?;

        let token = token
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        let jwt = JwtState::verify(&global.config.jwt, token).ok_or(AuthError::InvalidToken)?;

        let session = Session::by_id(&global.db, jwt.session_id)
            .await
            .extend_route("failed to fetch session")?
            .ok_or(AuthError::InvalidToken)?;

        if !session.is_valid() {
            return Err(AuthError::SessionExpired.into());
        }

        let user = User::by_id(&global.db, session.user_id)
            .await
            .extend_route("failed to fetch user")?
            .ok_or(AuthError::InvalidToken)?;

        Session::touch(&global.db, session.id)
            .await
            .extend_route("failed to update session")?;

        req.set_context(AuthData { session, user });

        Ok(req)
    })
}

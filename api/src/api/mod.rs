use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use common::http::RouteError;
use hyper::{Body, Server};
use routerify::{Router, RouterService};

use self::error::ApiError;
use crate::global::GlobalState;

pub mod auth;
pub mod error;
pub mod ext;
pub mod jwt;
pub mod middleware;

mod draws;
mod feedback;
mod health;
mod history;
mod home;
mod login;

pub fn routes(global: &Arc<GlobalState>) -> Router<Body, RouteError<ApiError>> {
    // The router holds a weak reference so that open keep-alive connections
    // do not keep the global state alive past shutdown.
    let weak = Arc::downgrade(global);

    Router::builder()
        .data(weak)
        // The auth middleware checks the Authorization header and, if it is
        // valid, stores the session and user in the request context. It does
        // not fail requests without a token.
        .middleware(middleware::auth::auth_middleware(global))
        .get("/", home::index)
        .get("/health", health::health)
        .get("/history", history::history)
        .get("/admin", login::admin_panel)
        .get("/logout", login::logout)
        .post("/login", login::login)
        .post("/delete-entry", history::delete_entry)
        .post("/api/set-numbers", draws::set_numbers)
        .post("/submit-feedback", feedback::submit_feedback)
        .err_handler_with_info(common::http::error_handler::<ApiError>)
        .build()
        .expect("failed to build router")
}

pub async fn run(global: Arc<GlobalState>) -> Result<()> {
    let addr: SocketAddr = global.config.bind_address.parse()?;

    tracing::info!("listening on {}", addr);

    let service = RouterService::new(routes(&global))
        .map_err(|err| anyhow::anyhow!("failed to build router service: {}", err))?;

    let ctx = global.ctx.clone();

    Server::bind(&addr)
        .serve(service)
        .with_graceful_shutdown(ctx.done())
        .await?;

    Ok(())
}

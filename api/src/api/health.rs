use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use serde_json::json;

use super::error::Result;

pub async fn health(_: Request<Body>) -> Result<Response<Body>> {
    tracing::debug!("health check");

    Ok(make_response!(StatusCode::OK, json!({ "status": "ok" })))
}

use common::http::ext::ResultExt;
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use serde_json::json;

use super::auth::require_admin;
use super::error::Result;
use super::ext::RequestExt;
use crate::database::{Draw, DrawError};

#[derive(serde::Deserialize)]
struct SetNumbersRequest {
    #[serde(default)]
    first_prize: Vec<String>,
    #[serde(default)]
    second_prizes: Vec<String>,
}

/// Admin only. Publishes a new draw from the submitted prize numbers.
pub async fn set_numbers(mut req: Request<Body>) -> Result<Response<Body>> {
    let auth = require_admin(&req)?;
    let global = req.get_global()?;

    let body = hyper::body::to_bytes(req.body_mut())
        .await
        .extend_route((StatusCode::BAD_REQUEST, "failed to read request body"))?;

    let Ok(request) = serde_json::from_slice::<SetNumbersRequest>(&body) else {
        return Ok(make_response!(
            StatusCode::BAD_REQUEST,
            json!({ "error": "body is not valid json" })
        ));
    };

    match Draw::create(&global.db, request.first_prize, request.second_prizes).await {
        Ok(draw) => {
            tracing::info!(username = %auth.user.username, id = draw.id, "draw published");

            Ok(make_response!(StatusCode::OK, json!({ "success": true })))
        }
        Err(DrawError::Invalid(message)) => Ok(make_response!(
            StatusCode::BAD_REQUEST,
            json!({ "error": message })
        )),
        Err(DrawError::NotFound(_)) => Err("failed to store draw".into()),
        Err(DrawError::Database(err)) => Err(err).extend_route("failed to store draw"),
    }
}

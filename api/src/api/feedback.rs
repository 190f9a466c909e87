use common::http::ext::ResultExt;
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use serde_json::json;

use super::error::Result;
use super::ext::{form_field, RequestExt};
use crate::database::{Feedback, FeedbackError};

/// Public. Stores a visitor feedback message.
pub async fn submit_feedback(mut req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global()?;

    let body = hyper::body::to_bytes(req.body_mut())
        .await
        .extend_route((StatusCode::BAD_REQUEST, "failed to read request body"))?;

    let name = form_field(&body, "name").unwrap_or_default();
    let email = form_field(&body, "email").unwrap_or_default();
    let message = form_field(&body, "message").unwrap_or_default();

    match Feedback::create(&global.db, &name, &email, &message).await {
        Ok(_) => Ok(make_response!(
            StatusCode::OK,
            json!({ "success": true, "message": "Thank you for your feedback!" })
        )),
        Err(FeedbackError::Invalid(message)) => Ok(make_response!(
            StatusCode::BAD_REQUEST,
            json!({ "error": message })
        )),
        Err(FeedbackError::Database(err)) => Err(err).extend_route("failed to store feedback"),
    }
}

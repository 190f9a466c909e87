use common::http::ext::ResultExt;
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use serde_json::json;

use super::auth::require_admin;
use super::error::Result;
use super::ext::{form_field, RequestExt};
use crate::database::{Draw, DrawError};
use crate::schedule;

/// Every past draw, newest first.
pub async fn history(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global()?;

    let draws = Draw::all(&global.db)
        .await
        .extend_route("failed to fetch draws")?;

    let history = draws
        .iter()
        .map(|draw| {
            json!({
                "date": schedule::format_display_date(draw.date),
                "first_prize": draw.first_prize,
                "second_prizes": draw.second_prize_rows(),
            })
        })
        .collect::<Vec<_>>();

    Ok(make_response!(StatusCode::OK, json!({ "history": history })))
}

/// Admin only. Deletes the draw published on the given calendar date.
pub async fn delete_entry(mut req: Request<Body>) -> Result<Response<Body>> {
    let auth = require_admin(&req)?;
    let global = req.get_global()?;

    let body = hyper::body::to_bytes(req.body_mut())
        .await
        .extend_route((StatusCode::BAD_REQUEST, "failed to read request body"))?;

    let entry_date = form_field(&body, "entry_date")
        .ok_or((StatusCode::BAD_REQUEST, "entry_date is required"))?;

    let date = schedule::parse_display_date(&entry_date)
        .ok_or((StatusCode::BAD_REQUEST, "invalid entry_date"))?;

    match Draw::delete_by_date(&global.db, date).await {
        Ok(()) => {
            tracing::info!(username = %auth.user.username, date = %date, "draw deleted");

            Ok(make_response!(
                StatusCode::OK,
                json!({ "success": true, "message": "Entry deleted successfully" })
            ))
        }
        Err(DrawError::NotFound(_)) => Ok(make_response!(
            StatusCode::NOT_FOUND,
            json!({ "error": "Entry not found" })
        )),
        Err(DrawError::Invalid(message)) => Ok(make_response!(
            StatusCode::BAD_REQUEST,
            json!({ "error": message })
        )),
        Err(DrawError::Database(err)) => Err(err).extend_route("failed to delete draw"),
    }
}

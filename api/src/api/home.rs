use common::http::ext::ResultExt;
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};
use serde_json::json;

use super::error::Result;
use super::ext::RequestExt;
use crate::database::{Draw, Feedback};
use crate::schedule;

/// Landing page data: the latest draw, the next draw date and the most
/// recent feedback.
pub async fn index(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global()?;

    let latest = Draw::latest(&global.db)
        .await
        .extend_route("failed to fetch latest draw")?;
    let feedback = Feedback::recent(&global.db, 5)
        .await
        .extend_route("failed to fetch feedback")?;

    let next_draw = schedule::format_draw_date(schedule::next_draw_date(
        schedule::now(),
        latest.as_ref().map(|draw| draw.date),
    ));

    let (first_prize, second_prizes) = match &latest {
        Some(draw) => (json!(draw.first_prize), json!(draw.second_prize_rows())),
        None => (json!([]), json!([])),
    };

    Ok(make_response!(
        StatusCode::OK,
        json!({
            "first_prize": first_prize,
            "second_prizes": second_prizes,
            "next_draw": next_draw,
            "feedback": feedback
                .iter()
                .map(|entry| json!({
                    "name": entry.name,
                    "message": entry.message,
                    "date": entry.date.to_rfc3339(),
                }))
                .collect::<Vec<_>>(),
        })
    ))
}

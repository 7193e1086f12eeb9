//! `PUT|POST /travellers`
//!
//! Looks the surname up in the explorer table and answers with JSON, or
//! with the result page when the client accepts HTML (form submission).

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::ACCEPT;
use hyper::{Request, Response};

use super::pages;
use super::params::TravellerQuery;
use crate::config::AppState;
use crate::explorers::ExplorerRecord;
use crate::http;

/// Resolve the requested explorer; misses render the fallback record
pub async fn handle_travellers<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let wants_html = http::accepts_html(req.headers().get(ACCEPT).and_then(|v| v.to_str().ok()));
    let query = TravellerQuery::from_request(req, state.config.http.max_body_size).await;
    let record = match state.explorers.lookup(&query.surname) {
        Some(record) => record.clone(),
        None => {
            tracing::debug!(surname = %query.surname, "Unknown explorer, using fallback record");
            ExplorerRecord::fallback(&query.surname)
        }
    };

    if wants_html {
        http::build_html_response(pages::render_result(&record), false)
    } else {
        http::build_json_response(&record, false)
    }
}

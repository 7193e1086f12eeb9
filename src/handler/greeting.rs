//! `GET /hello`

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::params::GreetingRequest;
use crate::http;

/// Greet the `name` query parameter, or `Guest` when it is absent or empty
pub fn handle_greeting(query: Option<&str>, is_head: bool) -> Response<Full<Bytes>> {
    let request = GreetingRequest::from_query(query);
    http::build_text_response(format!("hello {}", request.display_name()), is_head)
}

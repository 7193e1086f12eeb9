//! Request parameter extraction
//!
//! Pulls the `name` and `surname` parameters out of query strings and
//! request bodies. Extraction never fails: anything unreadable becomes an
//! empty parameter.

use http_body_util::{BodyExt, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_TYPE;
use hyper::Request;
use serde::Deserialize;

use crate::http::BodyKind;
use crate::logger;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Name substituted when `/hello` receives no usable `name`
pub const DEFAULT_GUEST: &str = "Guest";

/// Parameters of `GET /hello`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GreetingRequest {
    pub name: Option<String>,
}

impl GreetingRequest {
    /// Decode the first `name` pair of a query string
    pub fn from_query(query: Option<&str>) -> Self {
        Self {
            name: query.and_then(|q| form_value(q.as_bytes(), "name")),
        }
    }

    /// The name to greet; absent and empty names become [`DEFAULT_GUEST`]
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_GUEST,
        }
    }
}

/// Parameters of `/travellers`
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct TravellerQuery {
    #[serde(default)]
    pub surname: String,
}

impl TravellerQuery {
    /// Read the surname from the body, falling back to the query string.
    ///
    /// At most `max_body_size` bytes are read. Oversized, unreadable or
    /// unparsable bodies are logged and treated as carrying no surname.
    pub async fn from_request<B>(req: Request<B>, max_body_size: u64) -> Self
    where
        B: Body<Data = Bytes>,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = req.into_parts();
        let kind = BodyKind::from_content_type(
            parts
                .headers
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );

        let from_body = match read_body(body, max_body_size).await {
            Ok(bytes) => Self::from_body(&bytes, kind),
            Err(e) => {
                logger::log_warning(&format!("Failed to read request body: {e}"));
                None
            }
        };

        from_body
            .filter(|q| !q.surname.is_empty())
            .or_else(|| Self::from_query(parts.uri.query()))
            .unwrap_or_default()
    }

    /// Parse a body according to its declared encoding.
    ///
    /// Bodies without a recognized content type are tried as JSON, then
    /// as a form.
    pub fn from_body(bytes: &[u8], kind: BodyKind) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        match kind {
            BodyKind::Json => Self::from_json(bytes),
            BodyKind::Form => Self::from_form(bytes),
            BodyKind::Unknown => serde_json::from_slice(bytes)
                .ok()
                .or_else(|| Self::from_form(bytes)),
        }
    }

    fn from_json(bytes: &[u8]) -> Option<Self> {
        match serde_json::from_slice(bytes) {
            Ok(query) => Some(query),
            Err(e) => {
                logger::log_warning(&format!("Malformed JSON body: {e}"));
                None
            }
        }
    }

    fn from_form(bytes: &[u8]) -> Option<Self> {
        form_value(bytes, "surname").map(|surname| Self { surname })
    }

    fn from_query(query: Option<&str>) -> Option<Self> {
        query.and_then(|q| Self::from_form(q.as_bytes()))
    }
}

/// First value for `key` in `application/x-www-form-urlencoded` input
fn form_value(input: &[u8], key: &str) -> Option<String> {
    url::form_urlencoded::parse(input)
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, BoxError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let collected = Limited::new(body, limit).collect().await?;
    Ok(collected.to_bytes())
}

//! Content type module
//!
//! Media types produced by the server and classification of request
//! `Content-Type` / `Accept` headers.

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
pub const TEXT_HTML: &str = "text/html; charset=utf-8";
pub const APPLICATION_JSON: &str = "application/json";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Encoding of a request body as announced by its `Content-Type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    Form,
    /// Missing or unrecognized content type
    Unknown,
}

impl BodyKind {
    /// Classify a `Content-Type` header value, ignoring parameters and case
    ///
    /// # Examples
    /// ```
    /// use travellers_server::http::mime::BodyKind;
    /// assert_eq!(BodyKind::from_content_type(Some("application/json; charset=utf-8")), BodyKind::Json);
    /// assert_eq!(BodyKind::from_content_type(Some("application/x-www-form-urlencoded")), BodyKind::Form);
    /// assert_eq!(BodyKind::from_content_type(None), BodyKind::Unknown);
    /// ```
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(value) = content_type else {
            return Self::Unknown;
        };
        let essence = value
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/json" => Self::Json,
            "application/x-www-form-urlencoded" => Self::Form,
            s if s.ends_with("+json") => Self::Json,
            _ => Self::Unknown,
        }
    }
}

/// Whether the client asked for an HTML page
///
/// Browsers submitting a form list `text/html` explicitly; API clients
/// send `application/json`, `*/*`, or nothing.
pub fn accepts_html(accept: Option<&str>) -> bool {
    accept.is_some_and(|value| {
        value
            .split(',')
            .filter_map(|part| part.split(';').next())
            .any(|media| media.trim().eq_ignore_ascii_case("text/html"))
    })
}

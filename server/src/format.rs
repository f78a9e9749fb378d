//! Representation guard.
//!
//! Each surface serves exactly one representation. The guard runs as
//! middleware in front of the surface's routes, so a request for anything
//! else is turned away before a handler (or the store) is touched.

use axum::{
    extract::Request,
    http::header::ACCEPT,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::{ApiError, PageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Json,
    Html,
}

impl Surface {
    fn media_types(self) -> &'static [&'static str] {
        match self {
            Surface::Json => &["application/json", "application/*"],
            Surface::Html => &["text/html", "application/xhtml+xml", "text/*"],
        }
    }

    /// Whether an `Accept` header value allows this surface's representation.
    /// A missing or empty header accepts anything.
    pub fn accepts(self, accept: Option<&str>) -> bool {
        let ranges: Vec<String> = accept
            .unwrap_or_default()
            .split(',')
            .filter_map(|range| range.split(';').next())
            .map(|media| media.trim().to_ascii_lowercase())
            .filter(|media| !media.is_empty())
            .collect();
        if ranges.is_empty() {
            return true;
        }
        ranges
            .iter()
            .any(|media| media == "*/*" || self.media_types().contains(&media.as_str()))
    }

    fn reject(self) -> Response {
        match self {
            Surface::Json => ApiError::unsupported_format().into_response(),
            Surface::Html => PageError::NotFound.into_response(),
        }
    }
}

async fn guard(surface: Surface, request: Request, next: Next) -> Response {
    let accept = request
        .headers()
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok());
    if surface.accepts(accept) {
        return next.run(request).await;
    }
    debug!(?surface, accept, uri = %request.uri(), "unsupported representation");
    surface.reject()
}

pub async fn json_only(request: Request, next: Next) -> Response {
    guard(Surface::Json, request, next).await
}

pub async fn html_only(request: Request, next: Next) -> Response {
    guard(Surface::Html, request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_accepts_both() {
        assert!(Surface::Json.accepts(None));
        assert!(Surface::Html.accepts(Some("")));
    }

    #[test]
    fn browser_header_is_html_only() {
        let browser = "text/html,application/xhtml+xml,application/xml;q=0.9";
        assert!(Surface::Html.accepts(Some(browser)));
        assert!(!Surface::Json.accepts(Some(browser)));
    }

    #[test]
    fn wildcard_accepts_both() {
        let header = "text/html, */*;q=0.8";
        assert!(Surface::Json.accepts(Some(header)));
        assert!(Surface::Html.accepts(Some(header)));
    }

    #[test]
    fn json_header_is_json_only() {
        assert!(Surface::Json.accepts(Some("Application/JSON; charset=utf-8")));
        assert!(!Surface::Html.accepts(Some("application/json")));
    }
}

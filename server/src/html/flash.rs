//! One-shot notices carried across a redirect in a `flash` cookie.
//!
//! A write sets the cookie on its redirect; the next rendered page reads
//! it, shows it and expires it in the same response.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, StatusCode,
    },
    response::{Html, IntoResponse, Redirect, Response},
};
use maud::Markup;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

const NAME: &str = "flash";
const EXPIRED: &str = "flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

/// The notice left by the previous request, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash(Option<String>);

impl Flash {
    pub fn notice(&self) -> Option<&str> {
        self.0.as_deref()
    }

    fn from_headers(headers: &HeaderMap) -> Self {
        let notice = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .filter_map(|pair| pair.trim().strip_prefix("flash="))
            .filter_map(|raw| percent_decode_str(raw).decode_utf8().ok())
            .map(|notice| notice.into_owned())
            .find(|notice| !notice.is_empty());
        Self(notice)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Flash {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Render a page, consuming the flash if one was shown.
pub fn render(flash: &Flash, status: StatusCode, page: Markup) -> Response {
    let body = Html(page.into_string());
    if flash.notice().is_some() {
        (status, [(SET_COOKIE, EXPIRED)], body).into_response()
    } else {
        (status, body).into_response()
    }
}

/// `303 See Other` to `location`, leaving `notice` for the next page.
pub fn redirect_with_notice(location: &str, notice: &str) -> Response {
    let cookie = format!(
        "{NAME}={}; Path=/; HttpOnly; SameSite=Lax",
        utf8_percent_encode(notice, NON_ALPHANUMERIC)
    );
    ([(SET_COOKIE, cookie)], Redirect::to(location)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn reads_encoded_notice_among_other_cookies() {
        let cookie = "theme=dark; flash=List%20successfully%20created%21";
        let flash = Flash::from_headers(&headers(cookie));
        assert_eq!(flash.notice(), Some("List successfully created!"));
    }

    #[test]
    fn empty_cookie_is_no_notice() {
        assert_eq!(Flash::from_headers(&headers("flash=")).notice(), None);
        assert_eq!(Flash::from_headers(&HeaderMap::new()).notice(), None);
    }

    #[test]
    fn redirect_sets_cookie_and_location() {
        let response = redirect_with_notice("/todolists", "Item successfully deleted!");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/todolists");
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("flash=Item%20successfully%20deleted%21;"));
    }

    #[test]
    fn render_expires_a_shown_notice() {
        let flash = Flash(Some("hi".to_string()));
        let response = render(&flash, StatusCode::OK, maud::html! { p { "page" } });
        assert_eq!(response.headers()[SET_COOKIE], EXPIRED);

        let response = render(&Flash::default(), StatusCode::OK, maud::html! { p { "page" } });
        assert!(response.headers().get(SET_COOKIE).is_none());
    }
}

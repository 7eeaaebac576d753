//! Access-token middleware.
//!
//! The token is read from the `X-Access-Token` header, falling back to the
//! `token` query parameter when the header is absent or empty. When the
//! configured token is empty every request passes.

use axum::extract::{Query, Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use relayhub_app::ports::GpioAdapter;

use crate::error::ApiError;
use crate::state::AppState;

/// Request header carrying the access token.
pub const TOKEN_HEADER: &str = "x-access-token";

/// Query string carrying the access token (`?token=...`).
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

/// Extract the token presented by a request, header first.
///
/// A non-empty header is authoritative even when it is not valid UTF-8, so
/// the query parameter is only consulted when the header is absent or empty.
#[must_use]
pub fn presented_token(request: &Request) -> Option<Vec<u8>> {
    let header = request
        .headers()
        .get(TOKEN_HEADER)
        .map(HeaderValue::as_bytes)
        .filter(|value| !value.is_empty())
        .map(<[u8]>::to_vec);

    header.or_else(|| {
        Query::<TokenQuery>::try_from_uri(request.uri())
            .ok()
            .and_then(|Query(query)| query.token)
            .map(String::into_bytes)
    })
}

/// Reject requests that do not present the configured token.
pub async fn require_token<G>(
    State(state): State<AppState<G>>,
    request: Request,
    next: Next,
) -> Response
where
    G: GpioAdapter + 'static,
{
    let token = presented_token(&request);
    if state.access_token.verify(token.as_deref()) {
        return next.run(request).await;
    }

    tracing::warn!(
        method = %request.method(),
        path = %request.uri().path(),
        token_present = token.is_some(),
        "rejected request with invalid access token"
    );
    ApiError::Unauthorized.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(uri: &str, header: Option<&str>) -> Request {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = header {
            builder = builder.header("X-Access-Token", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn should_read_token_from_header() {
        let req = request("/api/relays", Some("abc"));
        assert_eq!(presented_token(&req).as_deref(), Some(&b"abc"[..]));
    }

    #[test]
    fn should_read_token_from_query() {
        let req = request("/api/relays?token=abc", None);
        assert_eq!(presented_token(&req).as_deref(), Some(&b"abc"[..]));
    }

    #[test]
    fn should_prefer_header_over_query() {
        let req = request("/api/relays?token=query", Some("header"));
        assert_eq!(presented_token(&req).as_deref(), Some(&b"header"[..]));
    }

    #[test]
    fn should_fall_back_to_query_when_header_is_empty() {
        let req = request("/api/relays?token=query", Some(""));
        assert_eq!(presented_token(&req).as_deref(), Some(&b"query"[..]));
    }

    #[test]
    fn should_decode_percent_encoded_query_token() {
        let req = request("/?token=a%20b%26c", None);
        assert_eq!(presented_token(&req).as_deref(), Some(&b"a b&c"[..]));
    }

    #[test]
    fn should_return_none_without_token() {
        let req = request("/api/relays?other=1", None);
        assert_eq!(presented_token(&req), None);
    }

    #[test]
    fn should_keep_non_utf8_header_instead_of_query() {
        let req = Request::builder()
            .uri("/api/relays?token=abc")
            .header(TOKEN_HEADER, HeaderValue::from_bytes(b"wr\xffng").unwrap())
            .body(Body::empty())
            .unwrap();
        assert_eq!(presented_token(&req).as_deref(), Some(&b"wr\xffng"[..]));
    }
}

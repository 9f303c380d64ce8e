//! Bearer Token Extraction
//!
//! Reads `Authorization: Bearer <token>` headers.

use axum::http::{HeaderMap, header};

/// Authentication scheme accepted by [`extract_bearer`]
pub const BEARER_SCHEME: &str = "Bearer";

/// Extract the bearer token from request headers
///
/// The header must split on single spaces into exactly two parts, the
/// scheme and a non-empty token. Any other shape yields `None`, which
/// callers treat as "no usable token".
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let mut parts = value.split(' ');
    let (scheme, token) = (parts.next()?, parts.next()?);

    if parts.next().is_some() || scheme != BEARER_SCHEME || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_bearer(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_bearer_missing_header() {
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
    }

    #[test]
    fn test_extract_bearer_rejects_other_shapes() {
        assert_eq!(extract_bearer(&headers_with("Bearer")), None);
        assert_eq!(extract_bearer(&headers_with("Bearer ")), None);
        assert_eq!(extract_bearer(&headers_with("abc.def.ghi")), None);
        assert_eq!(extract_bearer(&headers_with("Bearer a b")), None);
        assert_eq!(extract_bearer(&headers_with("Basic dXNlcjpwdw==")), None);
    }
}

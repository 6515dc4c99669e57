//! Session cookie parsing and issuing
use axum::http::{header, HeaderMap, HeaderValue};

use crate::core::session::SessionId;

pub const SESSION_COOKIE: &str = "numguess_session";

/// Session id from the request's `Cookie` headers, if present and non-empty
pub fn session_id(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value binding the client to `id`
pub fn set_cookie(id: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, id
    ))
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn finds_session_among_other_cookies() {
        let h = headers("theme=dark; numguess_session=abc-123; lang=en");
        assert_eq!(session_id(&h).as_deref(), Some("abc-123"));
    }

    #[test]
    fn missing_or_empty_cookie_is_none() {
        assert_eq!(session_id(&HeaderMap::new()), None);
        assert_eq!(session_id(&headers("theme=dark")), None);
        assert_eq!(session_id(&headers("numguess_session=")), None);
    }

    #[test]
    fn set_cookie_round_trips() {
        let value = set_cookie("xyz").unwrap();
        let cookie = value.to_str().unwrap().split(';').next().unwrap().to_string();
        assert_eq!(session_id(&headers(&cookie)).as_deref(), Some("xyz"));
    }
}

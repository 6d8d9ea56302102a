//! Signed cookie sessions
//!
//! The whole session lives client-side in one cookie:
//! `base64url(json) "." base64url(hmac_sha256(secret, json))`.
//! Anything missing, malformed or carrying a bad signature reads back as
//! the default anonymous session.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::{IntoResponseParts, ResponseParts};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{ApiError, ServerError};
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

pub const COOKIE_NAME: &str = "blogctl_session";

/// Unread notices kept per session, oldest dropped first.
pub const MAX_FLASHES: usize = 5;

/// Per-client state carried between requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    logged_in: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    flashes: Vec<String>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn log_in(&mut self) {
        self.logged_in = true;
    }

    pub fn log_out(&mut self) {
        self.logged_in = false;
    }

    /// Queue a notice for the next rendered page.
    pub fn flash(&mut self, message: impl Into<String>) {
        self.flashes.push(message.into());
        if self.flashes.len() > MAX_FLASHES {
            let excess = self.flashes.len() - MAX_FLASHES;
            self.flashes.drain(..excess);
        }
    }

    /// Drain queued notices; each is shown exactly once.
    pub fn take_flashes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.flashes)
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(find_session_cookie)
            .and_then(|value| state.sessions().open(value))
            .unwrap_or_default();

        Ok(session)
    }
}

fn find_session_cookie(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == COOKIE_NAME).then_some(value)
    })
}

/// HMAC key for sealing and opening session cookies
#[derive(Clone)]
pub struct SessionKey {
    mac: HmacSha256,
}

impl SessionKey {
    pub fn new(secret: &str) -> Result<Self, ServerError> {
        let mac =
            HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| ServerError::SessionKey)?;
        Ok(Self { mac })
    }

    fn signature(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }

    /// Encode and sign a session into a cookie value.
    pub fn seal(&self, session: &Session) -> Result<String, serde_json::Error> {
        let payload = serde_json::to_vec(session)?;
        let signature = self.signature(&payload);

        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Verify and decode a cookie value. `None` for anything not sealed by
    /// this key.
    pub fn open(&self, value: &str) -> Option<Session> {
        let (payload, signature) = value.split_once('.')?;
        let payload = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(&payload);
        if mac.verify_slice(&signature).is_err() {
            tracing::warn!("session cookie signature mismatch, ignoring");
            return None;
        }

        serde_json::from_slice(&payload).ok()
    }

    /// `Set-Cookie` response part persisting `session`.
    pub fn commit(&self, session: &Session) -> Result<SetSession, ApiError> {
        let sealed = self.seal(session).map_err(|e| ApiError::Internal {
            message: format!("failed to encode session: {}", e),
        })?;

        let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", COOKIE_NAME, sealed);
        let value = HeaderValue::from_str(&cookie).map_err(|e| ApiError::Internal {
            message: format!("invalid session cookie: {}", e),
        })?;

        Ok(SetSession(value))
    }
}

/// Response part that writes the session cookie
pub struct SetSession(HeaderValue);

impl IntoResponseParts for SetSession {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        res.headers_mut().append(SET_COOKIE, self.0);
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SessionKey {
        SessionKey::new("test key").unwrap()
    }

    #[test]
    fn seal_then_open_preserves_session() {
        let mut session = Session::default();
        session.log_in();
        session.flash("You were logged in");

        let sealed = key().seal(&session).unwrap();
        assert_eq!(key().open(&sealed), Some(session));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let sealed = key().seal(&Session::default()).unwrap();
        let (_, signature) = sealed.split_once('.').unwrap();

        let forged = URL_SAFE_NO_PAD.encode(br#"{"logged_in":true}"#);
        assert_eq!(key().open(&format!("{}.{}", forged, signature)), None);
    }

    #[test]
    fn other_key_is_rejected() {
        let mut session = Session::default();
        session.log_in();

        let sealed = SessionKey::new("another key").unwrap().seal(&session).unwrap();
        assert_eq!(key().open(&sealed), None);
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(key().open(""), None);
        assert_eq!(key().open("no-dot-here"), None);
        assert_eq!(key().open("!!!.???"), None);
    }

    #[test]
    fn flashes_are_drained_once() {
        let mut session = Session::default();
        session.flash("one");
        session.flash("two");

        assert_eq!(session.take_flashes(), vec!["one", "two"]);
        assert!(session.take_flashes().is_empty());
    }

    #[test]
    fn unread_flashes_are_capped_keeping_newest() {
        let mut session = Session::default();
        for i in 0..50 {
            session.flash(format!("Entry was successfully edited {i}"));
        }

        let flashes = session.take_flashes();
        assert_eq!(flashes.len(), MAX_FLASHES);
        assert_eq!(flashes.first().unwrap(), "Entry was successfully edited 45");
        assert_eq!(flashes.last().unwrap(), "Entry was successfully edited 49");
    }

    #[test]
    fn log_out_clears_flag() {
        let mut session = Session::default();
        assert!(!session.is_logged_in());
        session.log_in();
        assert!(session.is_logged_in());
        session.log_out();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn finds_cookie_among_others() {
        let header = format!("theme=dark; {}=abc.def; lang=en", COOKIE_NAME);
        assert_eq!(find_session_cookie(&header), Some("abc.def"));
        assert_eq!(find_session_cookie("theme=dark"), None);
    }

    #[test]
    fn commit_builds_cookie_header() {
        let SetSession(value) = key().commit(&Session::default()).unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("blogctl_session="));
        assert!(value.contains("HttpOnly"));
    }
}

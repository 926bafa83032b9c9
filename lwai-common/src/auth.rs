//! Admin session token helpers
//!
//! The admin gate is stateless: logging in with the configured password sets
//! a cookie whose value is a SHA-256 digest derived from that password. A
//! request is authenticated iff it carries that exact cookie value.
//!
//! This module holds only pure functions; the HTTP middleware lives in the
//! service crate.

use sha2::{Digest, Sha256};

/// Name of the admin session cookie
pub const SESSION_COOKIE: &str = "admin-session";

/// Session lifetime (7 days)
pub const SESSION_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 7;

/// Domain-separation label mixed into the token digest
const TOKEN_LABEL: &str = "lwai-admin-session:v1:";

/// Compute the session token for a configured password
///
/// # Examples
///
/// ```
/// use lwai_common::auth::session_token;
///
/// let token = session_token("hunter2");
/// assert_eq!(token.len(), 64); // SHA-256 is 64 hex chars
/// assert_eq!(token, session_token("hunter2"));
/// assert_ne!(token, session_token("hunter3"));
/// ```
pub fn session_token(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(TOKEN_LABEL.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Compare a submitted password against the configured one
///
/// No configured password means admin login is disabled.
pub fn verify_password(candidate: &str, configured: Option<&str>) -> bool {
    match configured {
        Some(expected) if !expected.is_empty() => {
            constant_time_eq(candidate.as_bytes(), expected.as_bytes())
        }
        _ => false,
    }
}

/// Check a presented cookie value against the expected token
pub fn verify_token(presented: &str, expected: &str) -> bool {
    constant_time_eq(presented.as_bytes(), expected.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// `Set-Cookie` value establishing a session
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, SESSION_MAX_AGE_SECS
    )
}

/// `Set-Cookie` value clearing the session
pub fn expired_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    )
}

/// Find a cookie's value in a `Cookie` request header
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

//! Decoding of backend responses.

use crate::domain::{AuthState, FetchError, Page};

/// Decodes a page response.
///
/// # Errors
///
/// - [`FetchError::Http`] for any non-2xx status
/// - [`FetchError::Decode`] if the body is not a page payload
pub fn decode_page(status: u16, body: &[u8]) -> Result<Page, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Http { status });
    }
    let page: Page = serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(Page::new(page.items, page.next_cursor))
}

/// Decodes an auth response.
///
/// Never fails: every problem becomes [`AuthState::Error`] so the screen can
/// stay blank with a logged reason.
#[must_use]
pub fn decode_auth(status: u16, body: &[u8]) -> AuthState {
    match status {
        200..=299 => serde_json::from_slice(body).unwrap_or_else(|e| AuthState::Error {
            message: format!("malformed auth payload: {e}"),
        }),
        401 | 403 => AuthState::Error {
            message: "not signed in".to_string(),
        },
        _ => AuthState::Error {
            message: format!("auth request failed with HTTP {status}"),
        },
    }
}

#[must_use]
pub const fn reuse_succeeded(status: u16) -> bool {
    status >= 200 && status < 300
}

//! HTTP error mapping shared by the document and identity clients
//!
//! Every failure keeps a human-readable message: the screen layer shows
//! whatever the rejected operation carried.

use onewun_domain::OneWunError;
use reqwest::{Response, StatusCode};

/// Map a transport-level failure (connect, DNS, timeout) to the domain
/// error taxonomy.
pub(crate) fn transport_error(err: &reqwest::Error) -> OneWunError {
    OneWunError::Network(format!("request failed: {err}"))
}

/// Reject non-success responses, folding the response body into the
/// message. 401/403 mean the credential was refused; everything else is
/// surfaced as a network-level failure - the client deliberately does not
/// classify further.
pub(crate) async fn reject_error_status(
    response: Response,
    url: &str,
) -> onewun_domain::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.is_empty() {
        format!("{url} returned status {status}")
    } else {
        format!("{url} returned status {status}: {body}")
    };

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Err(OneWunError::Auth(message))
    } else {
        Err(OneWunError::Network(message))
    }
}

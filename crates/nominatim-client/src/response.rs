//! Decoding of Nominatim HTTP responses

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

use crate::error::{NominatimError, Result};
use crate::http::HttpResponse;
use crate::types::Address;

/// Fail with a service error when the status is 400 or above
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.status < 400 {
        return Ok(());
    }
    Err(NominatimError::Service {
        status: response.status,
        reason: service_reason(response),
    })
}

/// Prefer the message the server put in the body, either
/// `{"error": "..."}` or `{"error": {"message": "..."}}`
fn service_reason(response: &HttpResponse) -> String {
    let message = serde_json::from_slice::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|body| match body.get("error")? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => other.get("message")?.as_str().map(str::to_string),
        });
    message.unwrap_or_else(|| response.reason.clone())
}

/// Decode a successful response body into `T`
pub(crate) fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    check_status(response)?;
    Ok(serde_json::from_slice(&response.body)?)
}

/// Decode a reverse geocoding response.
///
/// The service answers `{"error": "Unable to geocode"}` with a success
/// status when nothing is found there; that is `None`, not an error.
pub(crate) fn decode_reverse(response: &HttpResponse) -> Result<Option<Address>> {
    check_status(response)?;
    let outcome: ReverseError = serde_json::from_slice(&response.body)?;
    if let Some(err) = outcome.error {
        warn!(error = %err, "Nominatim found no address");
        return Ok(None);
    }
    // Decode from the raw bytes so the address keys keep their order
    Ok(Some(serde_json::from_slice(&response.body)?))
}

/// Only the `error` key of a reverse response, other keys are ignored
#[derive(Deserialize)]
struct ReverseError {
    error: Option<serde_json::Value>,
}

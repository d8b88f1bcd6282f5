//! Error types for the Nominatim client

use std::fmt;

/// Errors from building Nominatim requests or decoding their responses
#[derive(Debug)]
pub enum NominatimError {
    /// A serializer was handed a field with no value
    NullValue(&'static str),
    /// A floating point parameter was NaN or infinite
    NonFiniteNumber(&'static str),
    /// Unrecognised OSM type code
    InvalidOsmType(String),
    /// HTTP request failed
    Http(reqwest::Error),
    /// The service answered with a 4xx/5xx status
    Service { status: u16, reason: String },
    /// The response body did not match the expected shape
    Decoding(serde_json::Error),
}

impl fmt::Display for NominatimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullValue(field) => write!(f, "Null value for query parameter: {field}"),
            Self::NonFiniteNumber(field) => {
                write!(f, "Non-finite value for query parameter: {field}")
            }
            Self::InvalidOsmType(code) => write!(f, "Invalid OSM type: {code}"),
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Service { status, reason } => write!(f, "Service error: {status} {reason}"),
            Self::Decoding(e) => write!(f, "Decoding error: {e}"),
        }
    }
}

impl std::error::Error for NominatimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Decoding(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NominatimError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<serde_json::Error> for NominatimError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decoding(err)
    }
}

pub type Result<T> = std::result::Result<T, NominatimError>;

//! Nominatim Geocoding Client
//!
//! A Rust client for the [Nominatim](https://nominatim.org/) search, reverse
//! geocoding and lookup APIs.
//!
//! Requests are plain structs whose parameters are declared in static,
//! ordered tables. Building a query string walks that table, so the output
//! is deterministic and easy to assert on:
//!
//! ```
//! use nominatim_client::{LookupRequest, QueryString};
//!
//! let mut request = LookupRequest::with_ids(["R146656", "W104393803"]);
//! request.accept_language = Some("fr_FR".to_string());
//! assert_eq!(
//!     request.query_string().unwrap(),
//!     "accept-language=fr_FR&osm_ids=R146656,W104393803"
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use nominatim_client::NominatimClient;
//!
//! # async fn example() -> Result<(), nominatim_client::NominatimError> {
//! let client = NominatimClient::new("me@example.com")?;
//!
//! for place in client.search_text("Rennes, France").await? {
//!     println!("{}", place.display_name);
//! }
//!
//! if let Some(place) = client.reverse_coordinates(-1.6778, 48.1109).await? {
//!     println!("{:?}", place.element("city"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The client does no caching, retrying or rate limiting. Callers sharing
//! the public server must respect its usage policy themselves.

mod client;
mod config;
mod error;
mod http;
pub mod request;
mod response;
mod types;

pub use client::NominatimClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::{NominatimError, Result};
pub use http::{HttpFetch, HttpResponse, ReqwestFetcher};
pub use request::{
    CoordinatesReverseQuery, LookupQuery, LookupRequest, NominatimOptions, OsmType,
    OsmTypeAndIdLookupQuery, OsmTypeAndIdReverseQuery, PolygonFormat, QueryString, ReverseQuery,
    ReverseRequest, SearchQuery, SearchRequest, SimpleSearchQuery, StructuredSearchQuery,
};
pub use types::{Address, AddressElement, BoundingBox};

use tracing::debug;

use crate::config::ClientConfig;
use crate::http::{HttpFetch, ReqwestFetcher};
use crate::request::{
    CoordinatesReverseQuery, LookupRequest, NominatimOptions, OsmType, QueryString,
    ReverseRequest, SearchRequest,
};
use crate::response::{decode, decode_reverse};
use crate::types::Address;

/// Nominatim client for search, reverse geocoding and lookup
pub struct NominatimClient<H = ReqwestFetcher> {
    http: H,
    search_url: String,
    reverse_url: String,
    lookup_url: String,
    defaults: NominatimOptions,
}

impl NominatimClient<ReqwestFetcher> {
    /// Create a client for the public Nominatim server.
    ///
    /// `email` is sent with each request so the operators can reach you.
    pub fn new(email: &str) -> crate::Result<Self> {
        Self::with_config(ClientConfig::new(email))
    }

    /// Create a client with custom settings
    pub fn with_config(config: ClientConfig) -> crate::Result<Self> {
        let http = ReqwestFetcher::new(&config.user_agent, config.timeout)?;
        Ok(Self::with_http(config, http))
    }
}

impl<H: HttpFetch> NominatimClient<H> {
    /// Create a client on top of a custom HTTP transport
    pub fn with_http(config: ClientConfig, http: H) -> Self {
        let base_url = config.base_url.trim_end_matches('/');
        let email = urlencoding::encode(&config.email);

        let search_url = format!("{base_url}/search?format=jsonv2&email={email}");
        let reverse_url = format!("{base_url}/reverse?format=jsonv2&email={email}");
        let lookup_url = format!("{base_url}/lookup?format=json&email={email}");

        debug!(
            search_url = %search_url,
            reverse_url = %reverse_url,
            lookup_url = %lookup_url,
            "Configured Nominatim endpoints"
        );

        Self {
            http,
            search_url,
            reverse_url,
            lookup_url,
            defaults: config.defaults,
        }
    }

    /// Defaults merged into every search request
    pub fn defaults(&self) -> &NominatimOptions {
        &self.defaults
    }

    /// Search for places.
    ///
    /// The client defaults fill any option the request leaves unset.
    pub async fn search(&self, mut request: SearchRequest) -> crate::Result<Vec<Address>> {
        self.defaults.merge_into(&mut request);
        let url = endpoint_url(&self.search_url, &request.query_string()?);
        debug!(url = %url, "Nominatim search");

        let response = self.http.get(&url).await?;
        decode(&response)
    }

    /// Free-form search for `query`
    pub async fn search_text(&self, query: &str) -> crate::Result<Vec<Address>> {
        self.search(SearchRequest::with_text(query)).await
    }

    /// Reverse geocode; `None` when no address is found.
    ///
    /// Client defaults are not applied to reverse requests.
    pub async fn reverse(&self, request: &ReverseRequest) -> crate::Result<Option<Address>> {
        let url = endpoint_url(&self.reverse_url, &request.query_string()?);
        debug!(url = %url, "Nominatim reverse geocoding");

        let response = self.http.get(&url).await?;
        decode_reverse(&response)
    }

    /// Reverse geocode a point
    pub async fn reverse_coordinates(
        &self,
        longitude: f64,
        latitude: f64,
    ) -> crate::Result<Option<Address>> {
        let mut request = ReverseRequest::new();
        request.set_coordinates(longitude, latitude);
        self.reverse(&request).await
    }

    /// Reverse geocode a point at an OSM zoom level (0-18)
    pub async fn reverse_coordinates_with_zoom(
        &self,
        longitude: f64,
        latitude: f64,
        zoom: u8,
    ) -> crate::Result<Option<Address>> {
        let mut request = ReverseRequest::new();
        request.set_coordinates(longitude, latitude);
        request.zoom = Some(zoom);
        self.reverse(&request).await
    }

    /// Reverse geocode a point given in integer micro-degrees
    pub async fn reverse_e6(
        &self,
        longitude_e6: i32,
        latitude_e6: i32,
    ) -> crate::Result<Option<Address>> {
        let mut request = ReverseRequest::new();
        request.set_query(CoordinatesReverseQuery::from_e6(longitude_e6, latitude_e6));
        self.reverse(&request).await
    }

    /// Reverse geocode an OSM element given its type code (`N`, `W`, `R`
    /// or the full name) and id
    pub async fn reverse_osm(&self, osm_type: &str, osm_id: u64) -> crate::Result<Option<Address>> {
        let osm_type: OsmType = osm_type.parse()?;
        let mut request = ReverseRequest::new();
        request.set_osm_element(osm_type, osm_id);
        self.reverse(&request).await
    }

    /// Look up places by OSM reference.
    ///
    /// Client defaults are not applied to lookup requests.
    pub async fn lookup(&self, request: &LookupRequest) -> crate::Result<Vec<Address>> {
        let url = endpoint_url(&self.lookup_url, &request.query_string()?);
        debug!(url = %url, "Nominatim lookup");

        let response = self.http.get(&url).await?;
        decode(&response)
    }

    /// Look up `<type letter><id>` references such as `R146656`
    pub async fn lookup_ids<I, S>(&self, ids: I) -> crate::Result<Vec<Address>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lookup(&LookupRequest::with_ids(ids)).await
    }
}

fn endpoint_url(endpoint: &str, query: &str) -> String {
    if query.is_empty() {
        endpoint.to_string()
    } else {
        format!("{endpoint}&{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NominatimError;
    use crate::http::HttpResponse;
    use crate::request::PolygonFormat;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays one canned response and records requested URLs
    struct FakeHttp {
        status: u16,
        body: String,
        urls: Mutex<Vec<String>>,
    }

    impl FakeHttp {
        fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                urls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpFetch for FakeHttp {
        async fn get(&self, url: &str) -> crate::Result<HttpResponse> {
            self.urls.lock().unwrap().push(url.to_string());
            Ok(HttpResponse {
                status: self.status,
                reason: "Test".to_string(),
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    const PLACE: &str = r#"{
        "place_id": 282236157,
        "osm_type": "relation",
        "osm_id": 146656,
        "lat": "53.4794892",
        "lon": "-2.2451148",
        "display_name": "Manchester, Greater Manchester, England, United Kingdom",
        "address": {"city": "Manchester", "country": "United Kingdom", "country_code": "gb"}
    }"#;

    fn client(status: u16, body: &str) -> NominatimClient<FakeHttp> {
        let config = ClientConfig::new("me@example.com").with_base_url("http://nominatim.test/");
        NominatimClient::with_http(config, FakeHttp::new(status, body))
    }

    fn requested_urls(client: &NominatimClient<FakeHttp>) -> Vec<String> {
        client.http.urls.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_search_url() {
        let client = client(200, &format!("[{PLACE}]"));
        let results = client.search_text("manchester uk").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].element("city"), Some("Manchester"));
        assert_eq!(
            requested_urls(&client),
            ["http://nominatim.test/search?format=jsonv2&email=me%40example.com&q=manchester%20uk"]
        );
    }

    #[tokio::test]
    async fn test_search_merges_defaults_without_overwriting() {
        let defaults = NominatimOptions {
            accept_language: Some("en".to_string()),
            address_details: Some(true),
            limit: Some(5),
            ..Default::default()
        };
        let config = ClientConfig::new("me@example.com")
            .with_base_url("http://nominatim.test")
            .with_defaults(defaults);
        let client = NominatimClient::with_http(config, FakeHttp::new(200, "[]"));

        let mut request = SearchRequest::with_text("rennes");
        request.limit = Some(1);
        client.search(request).await.unwrap();

        assert_eq!(
            requested_urls(&client),
            ["http://nominatim.test/search?format=jsonv2&email=me%40example.com\
              &accept-language=en&q=rennes&addressdetails=1&limit=1"]
        );
    }

    // Defaults only apply to searches; reverse and lookup are sent as built.
    #[tokio::test]
    async fn test_reverse_and_lookup_ignore_defaults() {
        let defaults = NominatimOptions {
            accept_language: Some("en".to_string()),
            polygon_format: Some(PolygonFormat::GeoJson),
            ..Default::default()
        };
        let config = ClientConfig::new("me@example.com")
            .with_base_url("http://nominatim.test")
            .with_defaults(defaults);
        let client = NominatimClient::with_http(config, FakeHttp::new(200, PLACE));

        client.reverse_coordinates(2.3522, 48.8566).await.unwrap();

        assert_eq!(
            requested_urls(&client),
            ["http://nominatim.test/reverse?format=jsonv2&email=me%40example.com&lon=2.3522&lat=48.8566"]
        );
        assert_eq!(client.defaults().accept_language.as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn test_reverse_with_zoom() {
        let client = client(200, PLACE);
        let address = client
            .reverse_coordinates_with_zoom(-2.2451148, 53.4794892, 10)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(address.osm_id, Some(146656));
        assert!(requested_urls(&client)[0].ends_with("&lon=-2.2451148&lat=53.4794892&zoom=10"));
    }

    #[tokio::test]
    async fn test_reverse_e6() {
        let client = client(200, PLACE);
        client.reverse_e6(2_352_200, 48_856_600).await.unwrap();
        assert!(requested_urls(&client)[0].ends_with("&lon=2.3522&lat=48.8566"));
    }

    #[tokio::test]
    async fn test_reverse_osm() {
        let client = client(200, PLACE);
        client.reverse_osm("R", 146656).await.unwrap();
        assert!(requested_urls(&client)[0].ends_with("&osm_type=R&osm_id=146656"));
    }

    #[tokio::test]
    async fn test_reverse_osm_invalid_type_sends_nothing() {
        let client = client(200, PLACE);
        let err = client.reverse_osm("Q", 1).await.unwrap_err();
        assert!(matches!(err, NominatimError::InvalidOsmType(ref code) if code == "Q"));
        assert!(requested_urls(&client).is_empty());
    }

    #[tokio::test]
    async fn test_non_finite_coordinates_send_nothing() {
        let client = client(200, PLACE);
        let err = client.reverse_coordinates(f64::NAN, 48.8566).await.unwrap_err();
        assert!(matches!(err, NominatimError::NonFiniteNumber("longitude")));
        assert!(requested_urls(&client).is_empty());
    }

    #[tokio::test]
    async fn test_reverse_not_found_is_none() {
        let client = client(200, r#"{"error": "Unable to geocode"}"#);
        let address = client.reverse_coordinates(0.0, 0.0).await.unwrap();
        assert!(address.is_none());
    }

    #[tokio::test]
    async fn test_lookup_url() {
        let client = client(200, &format!("[{PLACE}]"));
        let results = client
            .lookup_ids(["R146656", "W104393803"])
            .await
            .unwrap();

        assert_eq!(results[0].place_id, 282236157);
        assert_eq!(
            requested_urls(&client),
            ["http://nominatim.test/lookup?format=json&email=me%40example.com&osm_ids=R146656,W104393803"]
        );
    }

    #[tokio::test]
    async fn test_empty_request_has_no_trailing_separator() {
        let client = client(200, "[]");
        client.lookup(&LookupRequest::new()).await.unwrap();
        assert_eq!(
            requested_urls(&client),
            ["http://nominatim.test/lookup?format=json&email=me%40example.com"]
        );
    }

    #[tokio::test]
    async fn test_missing_email_sent_empty() {
        let config = ClientConfig::from_lookup(|key| {
            (key == "NOMINATIM_BASE_URL").then(|| "http://nominatim.test".to_string())
        });
        let client = NominatimClient::with_http(config, FakeHttp::new(200, "[]"));
        client.lookup_ids(["N1"]).await.unwrap();
        assert_eq!(
            requested_urls(&client),
            ["http://nominatim.test/lookup?format=json&email=&osm_ids=N1"]
        );
    }

    #[tokio::test]
    async fn test_service_error_propagates() {
        let client = client(429, "");
        let err = client.search_text("paris").await.unwrap_err();
        assert!(matches!(
            err,
            NominatimError::Service { status: 429, ref reason } if reason == "Test"
        ));
    }

    #[tokio::test]
    async fn test_unexpected_body_is_decoding_error() {
        let client = client(200, r#"{"not": "a list"}"#);
        let err = client.lookup_ids(["N1"]).await.unwrap_err();
        assert!(matches!(err, NominatimError::Decoding(_)));
    }
}

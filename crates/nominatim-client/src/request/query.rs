//! Query variants embedded in search, reverse and lookup requests

use std::fmt;
use std::str::FromStr;

use crate::error::{NominatimError, Result};
use crate::request::params::{Parameterized, QueryParameter, QueryString};
use crate::request::serializer::{ParamValue, SerializerKind};

/// OpenStreetMap element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsmType {
    Node,
    Way,
    Relation,
}

impl OsmType {
    /// Single-letter code used by the Nominatim API
    pub fn code(self) -> &'static str {
        match self {
            Self::Node => "N",
            Self::Way => "W",
            Self::Relation => "R",
        }
    }
}

impl fmt::Display for OsmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for OsmType {
    type Err = NominatimError;

    /// Accepts `N`/`W`/`R` or `node`/`way`/`relation`, ignoring case
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "node" => Ok(Self::Node),
            "w" | "way" => Ok(Self::Way),
            "r" | "relation" => Ok(Self::Relation),
            _ => Err(NominatimError::InvalidOsmType(s.to_string())),
        }
    }
}

/// Free-form search, e.g. `"135 pilkington avenue, birmingham"`
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleSearchQuery {
    pub query: String,
}

impl SimpleSearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

impl Parameterized for SimpleSearchQuery {
    const PARAMETERS: &'static [QueryParameter<Self>] = &[QueryParameter::new(
        "query",
        "q=%s",
        |q: &Self| Some(ParamValue::Text(&q.query)),
    )];
}

/// Search by address parts. Cannot be combined with a free-form query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredSearchQuery {
    pub amenity: Option<String>,
    /// House number and street name
    pub street: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl StructuredSearchQuery {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Parameterized for StructuredSearchQuery {
    const PARAMETERS: &'static [QueryParameter<Self>] = &[
        QueryParameter::new("amenity", "amenity=%s", |q: &Self| {
            q.amenity.as_deref().map(ParamValue::Text)
        }),
        QueryParameter::new("street", "street=%s", |q: &Self| {
            q.street.as_deref().map(ParamValue::Text)
        }),
        QueryParameter::new("city", "city=%s", |q: &Self| {
            q.city.as_deref().map(ParamValue::Text)
        }),
        QueryParameter::new("county", "county=%s", |q: &Self| {
            q.county.as_deref().map(ParamValue::Text)
        }),
        QueryParameter::new("state", "state=%s", |q: &Self| {
            q.state.as_deref().map(ParamValue::Text)
        }),
        QueryParameter::new("country", "country=%s", |q: &Self| {
            q.country.as_deref().map(ParamValue::Text)
        }),
        QueryParameter::new("postal_code", "postalcode=%s", |q: &Self| {
            q.postal_code.as_deref().map(ParamValue::Text)
        }),
    ];
}

/// Reverse geocode a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatesReverseQuery {
    pub longitude: f64,
    pub latitude: f64,
}

impl CoordinatesReverseQuery {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Coordinates given in integer micro-degrees
    pub fn from_e6(longitude_e6: i32, latitude_e6: i32) -> Self {
        Self::new(
            f64::from(longitude_e6) / 1_000_000.0,
            f64::from(latitude_e6) / 1_000_000.0,
        )
    }
}

impl Parameterized for CoordinatesReverseQuery {
    const PARAMETERS: &'static [QueryParameter<Self>] = &[
        QueryParameter::new("longitude", "lon=%s", |q: &Self| {
            Some(ParamValue::Double(q.longitude))
        })
        .with_serializer(SerializerKind::Double),
        QueryParameter::new("latitude", "lat=%s", |q: &Self| {
            Some(ParamValue::Double(q.latitude))
        })
        .with_serializer(SerializerKind::Double),
    ];
}

/// Reverse geocode a known OSM element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OsmTypeAndIdReverseQuery {
    pub osm_type: OsmType,
    pub osm_id: u64,
}

impl OsmTypeAndIdReverseQuery {
    pub fn new(osm_type: OsmType, osm_id: u64) -> Self {
        Self { osm_type, osm_id }
    }
}

impl Parameterized for OsmTypeAndIdReverseQuery {
    const PARAMETERS: &'static [QueryParameter<Self>] = &[
        QueryParameter::new("osm_type", "osm_type=%s", |q: &Self| {
            Some(ParamValue::Text(q.osm_type.code()))
        }),
        QueryParameter::new("osm_id", "osm_id=%s", |q: &Self| {
            Some(ParamValue::Unsigned(q.osm_id))
        }),
    ];
}

/// Look up elements by `<type letter><id>` references such as `R146656`.
///
/// Entries are sent as given; the service reports malformed ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsmTypeAndIdLookupQuery {
    pub ids: Vec<String>,
}

impl OsmTypeAndIdLookupQuery {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl Parameterized for OsmTypeAndIdLookupQuery {
    // An empty id list is omitted rather than sent as `osm_ids=`
    const PARAMETERS: &'static [QueryParameter<Self>] = &[QueryParameter::new(
        "ids",
        "osm_ids=%s",
        |q: &Self| {
            if q.ids.is_empty() {
                return None;
            }
            Some(ParamValue::List(
                q.ids.iter().map(|id| ParamValue::Text(id)).collect(),
            ))
        },
    )
    .with_serializer(SerializerKind::List)];
}

/// Queries accepted by a search request
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    Simple(SimpleSearchQuery),
    Structured(StructuredSearchQuery),
}

impl QueryString for SearchQuery {
    fn query_string(&self) -> Result<String> {
        match self {
            Self::Simple(q) => q.query_string(),
            Self::Structured(q) => q.query_string(),
        }
    }
}

impl From<SimpleSearchQuery> for SearchQuery {
    fn from(q: SimpleSearchQuery) -> Self {
        Self::Simple(q)
    }
}

impl From<StructuredSearchQuery> for SearchQuery {
    fn from(q: StructuredSearchQuery) -> Self {
        Self::Structured(q)
    }
}

/// Queries accepted by a reverse geocoding request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReverseQuery {
    Coordinates(CoordinatesReverseQuery),
    OsmTypeAndId(OsmTypeAndIdReverseQuery),
}

impl QueryString for ReverseQuery {
    fn query_string(&self) -> Result<String> {
        match self {
            Self::Coordinates(q) => q.query_string(),
            Self::OsmTypeAndId(q) => q.query_string(),
        }
    }
}

impl From<CoordinatesReverseQuery> for ReverseQuery {
    fn from(q: CoordinatesReverseQuery) -> Self {
        Self::Coordinates(q)
    }
}

impl From<OsmTypeAndIdReverseQuery> for ReverseQuery {
    fn from(q: OsmTypeAndIdReverseQuery) -> Self {
        Self::OsmTypeAndId(q)
    }
}

/// Queries accepted by a lookup request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupQuery {
    OsmTypeAndIds(OsmTypeAndIdLookupQuery),
}

impl QueryString for LookupQuery {
    fn query_string(&self) -> Result<String> {
        match self {
            Self::OsmTypeAndIds(q) => q.query_string(),
        }
    }
}

impl From<OsmTypeAndIdLookupQuery> for LookupQuery {
    fn from(q: OsmTypeAndIdLookupQuery) -> Self {
        Self::OsmTypeAndIds(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osm_type_parses_letters_and_names() {
        assert_eq!("N".parse::<OsmType>().unwrap(), OsmType::Node);
        assert_eq!("w".parse::<OsmType>().unwrap(), OsmType::Way);
        assert_eq!("Relation".parse::<OsmType>().unwrap(), OsmType::Relation);
        assert_eq!("node".parse::<OsmType>().unwrap(), OsmType::Node);
    }

    #[test]
    fn test_osm_type_rejects_unknown_code() {
        let err = "X".parse::<OsmType>().unwrap_err();
        assert!(matches!(err, NominatimError::InvalidOsmType(ref code) if code == "X"));
        assert!("".parse::<OsmType>().is_err());
        assert!("nodes".parse::<OsmType>().is_err());
    }

    #[test]
    fn test_simple_query_encodes_text() {
        let q = SimpleSearchQuery::new("le mans, france");
        assert_eq!(q.query_string().unwrap(), "q=le%20mans%2C%20france");
    }

    #[test]
    fn test_structured_query_skips_unset_parts() {
        let q = StructuredSearchQuery {
            city: Some("Rennes".to_string()),
            country: Some("France".to_string()),
            postal_code: Some("35000".to_string()),
            ..StructuredSearchQuery::new()
        };
        assert_eq!(
            q.query_string().unwrap(),
            "city=Rennes&country=France&postalcode=35000"
        );
    }

    #[test]
    fn test_coordinates_longitude_first() {
        let q = CoordinatesReverseQuery::new(2.3522, 48.8566);
        assert_eq!(q.query_string().unwrap(), "lon=2.3522&lat=48.8566");
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        let err = CoordinatesReverseQuery::new(f64::NAN, 48.8566)
            .query_string()
            .unwrap_err();
        assert!(matches!(err, NominatimError::NonFiniteNumber("longitude")));

        let err = CoordinatesReverseQuery::new(2.3522, f64::INFINITY)
            .query_string()
            .unwrap_err();
        assert!(matches!(err, NominatimError::NonFiniteNumber("latitude")));
    }

    #[test]
    fn test_coordinates_from_e6() {
        let q = CoordinatesReverseQuery::from_e6(-1_677_793, 48_110_899);
        assert_eq!(q.longitude, -1.677793);
        assert_eq!(q.latitude, 48.110899);
        assert_eq!(q.query_string().unwrap(), "lon=-1.677793&lat=48.110899");
    }

    #[test]
    fn test_osm_reverse_query() {
        let q = OsmTypeAndIdReverseQuery::new(OsmType::Way, 104393803);
        assert_eq!(q.query_string().unwrap(), "osm_type=W&osm_id=104393803");
    }

    #[test]
    fn test_lookup_ids_passed_through() {
        let q = OsmTypeAndIdLookupQuery::new(["R146656", "W104393803", "bogus"]);
        assert_eq!(q.query_string().unwrap(), "osm_ids=R146656,W104393803,bogus");
    }

    #[test]
    fn test_empty_lookup_ids_omitted() {
        let q = OsmTypeAndIdLookupQuery::new(Vec::<String>::new());
        assert_eq!(q.query_string().unwrap(), "");
    }

    #[test]
    fn test_family_enums_only_render_their_variant() {
        let reverse = ReverseQuery::from(OsmTypeAndIdReverseQuery::new(OsmType::Node, 1));
        let rendered = reverse.query_string().unwrap();
        assert!(!rendered.contains("lat="));
        assert!(!rendered.contains("lon="));

        let search = SearchQuery::from(StructuredSearchQuery {
            street: Some("1 main st".to_string()),
            ..Default::default()
        });
        assert_eq!(search.query_string().unwrap(), "street=1%20main%20st");
    }
}

//! Request types and their query string serialization

mod lookup;
mod options;
mod params;
mod query;
mod reverse;
mod search;
mod serializer;

pub use lookup::LookupRequest;
pub use options::{NominatimOptions, PolygonFormat};
pub use params::{build, FieldReader, Parameterized, QueryParameter, QueryString};
pub use query::{
    CoordinatesReverseQuery, LookupQuery, OsmType, OsmTypeAndIdLookupQuery,
    OsmTypeAndIdReverseQuery, ReverseQuery, SearchQuery, SimpleSearchQuery,
    StructuredSearchQuery,
};
pub use reverse::ReverseRequest;
pub use search::SearchRequest;
pub use serializer::{ParamValue, SerializerKind};

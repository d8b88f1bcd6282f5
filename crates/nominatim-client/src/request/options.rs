//! Shared output options and the defaults overlay applied to searches

use std::fmt;

use crate::request::search::SearchRequest;
use crate::types::BoundingBox;

/// Geometry format requested with `polygon_<format>=1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolygonFormat {
    GeoJson,
    Kml,
    Svg,
    Text,
}

impl PolygonFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GeoJson => "geojson",
            Self::Kml => "kml",
            Self::Svg => "svg",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for PolygonFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default values for search options.
///
/// Merging only fills options the request left unset; explicit values on
/// the request always win.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NominatimOptions {
    pub accept_language: Option<String>,
    pub country_codes: Option<Vec<String>>,
    pub viewbox: Option<BoundingBox>,
    pub bounded: Option<bool>,
    pub polygon_format: Option<PolygonFormat>,
    pub address_details: Option<bool>,
    pub limit: Option<u32>,
}

impl NominatimOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy every default into `request` where the request has no value.
    /// The request's query is never touched.
    pub fn merge_into(&self, request: &mut SearchRequest) {
        fill(&mut request.accept_language, &self.accept_language);
        fill(&mut request.country_codes, &self.country_codes);
        fill(&mut request.viewbox, &self.viewbox);
        fill(&mut request.bounded, &self.bounded);
        fill(&mut request.polygon_format, &self.polygon_format);
        fill(&mut request.address_details, &self.address_details);
        fill(&mut request.limit, &self.limit);
    }
}

fn fill<T: Clone>(target: &mut Option<T>, default: &Option<T>) {
    if target.is_none() {
        target.clone_from(default);
    }
}

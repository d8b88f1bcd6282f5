//! Reverse geocoding request parameters

use crate::request::options::PolygonFormat;
use crate::request::params::{Parameterized, QueryParameter};
use crate::request::query::{
    CoordinatesReverseQuery, OsmType, OsmTypeAndIdReverseQuery, ReverseQuery,
};
use crate::request::serializer::{ParamValue, SerializerKind};

/// Parameters of a `/reverse` request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReverseRequest {
    pub accept_language: Option<String>,
    pub query: Option<ReverseQuery>,
    /// Level of detail, 0 (country) to 18 (building)
    pub zoom: Option<u8>,
    pub polygon_format: Option<PolygonFormat>,
    pub polygon_threshold: Option<f64>,
    pub address_details: Option<bool>,
    pub extra_tags: Option<bool>,
    pub name_details: Option<bool>,
}

impl ReverseRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: impl Into<ReverseQuery>) {
        self.query = Some(query.into());
    }

    pub fn set_coordinates(&mut self, longitude: f64, latitude: f64) {
        self.set_query(CoordinatesReverseQuery::new(longitude, latitude));
    }

    pub fn set_osm_element(&mut self, osm_type: OsmType, osm_id: u64) {
        self.set_query(OsmTypeAndIdReverseQuery::new(osm_type, osm_id));
    }
}

impl Parameterized for ReverseRequest {
    const PARAMETERS: &'static [QueryParameter<Self>] = &[
        QueryParameter::new("accept_language", "accept-language=%s", |r: &Self| {
            r.accept_language.as_deref().map(ParamValue::Text)
        }),
        QueryParameter::nested("query", |r: &Self| {
            r.query.as_ref().map(|q| ParamValue::Nested(q))
        }),
        QueryParameter::new("zoom", "zoom=%s", |r: &Self| {
            r.zoom.map(|z| ParamValue::Unsigned(u64::from(z)))
        }),
        QueryParameter::new("polygon_format", "polygon_%s=1", |r: &Self| {
            r.polygon_format.map(|f| ParamValue::Text(f.as_str()))
        }),
        QueryParameter::new("polygon_threshold", "polygon_threshold=%s", |r: &Self| {
            r.polygon_threshold.map(ParamValue::Double)
        })
        .with_serializer(SerializerKind::Double),
        QueryParameter::new("address_details", "addressdetails=%s", |r: &Self| {
            r.address_details.map(ParamValue::Bool)
        })
        .with_serializer(SerializerKind::Boolean),
        QueryParameter::new("extra_tags", "extratags=%s", |r: &Self| {
            r.extra_tags.map(ParamValue::Bool)
        })
        .with_serializer(SerializerKind::Boolean),
        QueryParameter::new("name_details", "namedetails=%s", |r: &Self| {
            r.name_details.map(ParamValue::Bool)
        })
        .with_serializer(SerializerKind::Boolean),
    ];
}

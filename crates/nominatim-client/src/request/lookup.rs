//! Lookup request parameters

use crate::request::options::PolygonFormat;
use crate::request::params::{Parameterized, QueryParameter};
use crate::request::query::{LookupQuery, OsmTypeAndIdLookupQuery};
use crate::request::serializer::{ParamValue, SerializerKind};

/// Parameters of a `/lookup` request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupRequest {
    pub accept_language: Option<String>,
    pub query: Option<LookupQuery>,
    pub address_details: Option<bool>,
    pub extra_tags: Option<bool>,
    pub name_details: Option<bool>,
    pub polygon_format: Option<PolygonFormat>,
}

impl LookupRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `<type letter><id>` references such as `W104393803`
    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            query: Some(OsmTypeAndIdLookupQuery::new(ids).into()),
            ..Self::default()
        }
    }

    pub fn set_query(&mut self, query: impl Into<LookupQuery>) {
        self.query = Some(query.into());
    }
}

impl Parameterized for LookupRequest {
    const PARAMETERS: &'static [QueryParameter<Self>] = &[
        QueryParameter::new("accept_language", "accept-language=%s", |r: &Self| {
            r.accept_language.as_deref().map(ParamValue::Text)
        }),
        QueryParameter::nested("query", |r: &Self| {
            r.query.as_ref().map(|q| ParamValue::Nested(q))
        }),
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
        QueryParameter::new("polygon_format", "polygon_%s=1", |r: &Self| {
            r.polygon_format.map(|f| ParamValue::Text(f.as_str()))
        }),
    ];
}

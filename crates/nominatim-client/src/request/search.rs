//! Search request parameters

use crate::request::options::PolygonFormat;
use crate::request::params::{Parameterized, QueryParameter};
use crate::request::query::{SearchQuery, SimpleSearchQuery};
use crate::request::serializer::{ParamValue, SerializerKind};
use crate::types::BoundingBox;

/// Parameters of a `/search` request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    /// Preferred languages, as an RFC 2616 accept-language string or a
    /// comma separated list of language codes
    pub accept_language: Option<String>,
    pub query: Option<SearchQuery>,
    /// ISO 3166-1 alpha-2 codes limiting the search
    pub country_codes: Option<Vec<String>>,
    /// Preferred area for results
    pub viewbox: Option<BoundingBox>,
    /// Restrict results to the viewbox
    pub bounded: Option<bool>,
    pub polygon_format: Option<PolygonFormat>,
    /// Simplify returned geometries by this tolerance in degrees
    pub polygon_threshold: Option<f64>,
    /// Include a breakdown of the address into elements
    pub address_details: Option<bool>,
    pub extra_tags: Option<bool>,
    pub name_details: Option<bool>,
    pub exclude_place_ids: Option<Vec<u64>>,
    pub limit: Option<u32>,
    pub dedupe: Option<bool>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-form search for `text`
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            query: Some(SimpleSearchQuery::new(text).into()),
            ..Self::default()
        }
    }

    pub fn set_query(&mut self, query: impl Into<SearchQuery>) {
        self.query = Some(query.into());
    }
}

impl Parameterized for SearchRequest {
    const PARAMETERS: &'static [QueryParameter<Self>] = &[
        QueryParameter::new("accept_language", "accept-language=%s", |r: &Self| {
            r.accept_language.as_deref().map(ParamValue::Text)
        }),
        QueryParameter::nested("query", |r: &Self| {
            r.query.as_ref().map(|q| ParamValue::Nested(q))
        }),
        QueryParameter::new("country_codes", "countrycodes=%s", |r: &Self| {
            let codes = r.country_codes.as_ref().filter(|c| !c.is_empty())?;
            Some(ParamValue::List(
                codes.iter().map(|c| ParamValue::Text(c)).collect(),
            ))
        })
        .with_serializer(SerializerKind::List),
        QueryParameter::new("viewbox", "viewbox=%s", |r: &Self| {
            r.viewbox.map(|b| {
                ParamValue::List(
                    b.viewbox_corners()
                        .into_iter()
                        .map(ParamValue::Double)
                        .collect(),
                )
            })
        })
        .with_serializer(SerializerKind::List),
        QueryParameter::new("bounded", "bounded=%s", |r: &Self| {
            r.bounded.map(ParamValue::Bool)
        })
        .with_serializer(SerializerKind::Boolean),
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
        QueryParameter::new("exclude_place_ids", "exclude_place_ids=%s", |r: &Self| {
            let ids = r.exclude_place_ids.as_ref().filter(|ids| !ids.is_empty())?;
            Some(ParamValue::List(
                ids.iter().copied().map(ParamValue::Unsigned).collect(),
            ))
        })
        .with_serializer(SerializerKind::List),
        QueryParameter::new("limit", "limit=%s", |r: &Self| {
            r.limit.map(|l| ParamValue::Unsigned(u64::from(l)))
        }),
        QueryParameter::new("dedupe", "dedupe=%s", |r: &Self| {
            r.dedupe.map(ParamValue::Bool)
        })
        .with_serializer(SerializerKind::Boolean),
    ];
}

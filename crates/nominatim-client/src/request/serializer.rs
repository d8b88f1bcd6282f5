//! Query parameter value serializers

use std::fmt;

use crate::error::{NominatimError, Result};
use crate::request::params::QueryString;

/// Raw value read from a request field, before serialization
#[derive(Clone)]
pub enum ParamValue<'a> {
    Text(&'a str),
    Integer(i64),
    Unsigned(u64),
    Double(f64),
    Bool(bool),
    List(Vec<ParamValue<'a>>),
    /// An embedded query or request that renders its own parameters
    Nested(&'a dyn QueryString),
}

impl fmt::Debug for ParamValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Integer(v) => f.debug_tuple("Integer").field(v).finish(),
            Self::Unsigned(v) => f.debug_tuple("Unsigned").field(v).finish(),
            Self::Double(v) => f.debug_tuple("Double").field(v).finish(),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Nested(_) => f.write_str("Nested(..)"),
        }
    }
}

/// How a parameter value is turned into its query string form
///
/// Every kind returns text that is already safe to place after `key=`:
/// free text is percent-encoded, list delimiters stay literal commas and
/// nested query strings are embedded as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerializerKind {
    /// Display form of the value, text percent-encoded
    #[default]
    Identity,
    /// `1` for true, `0` for anything else
    Boolean,
    /// Plain decimal notation with `.` as separator
    Double,
    /// Elements joined with `,`
    List,
    /// Query string of an embedded request object
    Nested,
}

impl SerializerKind {
    /// Serialize the value of `field`.
    ///
    /// The builder skips unset fields, so a missing value here means a
    /// descriptor is reading the wrong field.
    pub fn serialize(self, field: &'static str, value: Option<&ParamValue<'_>>) -> Result<String> {
        let value = value.ok_or(NominatimError::NullValue(field))?;
        match self {
            Self::Identity | Self::Nested => identity(field, value),
            Self::Boolean => Ok(boolean(value).to_string()),
            Self::Double => match value {
                ParamValue::Double(v) => format_double(field, *v),
                ParamValue::Integer(v) => format_double(field, *v as f64),
                ParamValue::Unsigned(v) => format_double(field, *v as f64),
                other => identity(field, other),
            },
            Self::List => match value {
                ParamValue::List(items) => join_list(field, items),
                other => identity(field, other),
            },
        }
    }
}

fn identity(field: &'static str, value: &ParamValue<'_>) -> Result<String> {
    match value {
        ParamValue::Text(s) => Ok(urlencoding::encode(s).into_owned()),
        ParamValue::Integer(v) => Ok(v.to_string()),
        ParamValue::Unsigned(v) => Ok(v.to_string()),
        ParamValue::Double(v) => format_double(field, *v),
        ParamValue::Bool(v) => Ok(v.to_string()),
        ParamValue::List(items) => join_list(field, items),
        ParamValue::Nested(inner) => inner.query_string(),
    }
}

fn boolean(value: &ParamValue<'_>) -> &'static str {
    let truthy = match value {
        ParamValue::Bool(v) => *v,
        ParamValue::Text(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    };
    if truthy {
        "1"
    } else {
        "0"
    }
}

fn join_list(field: &'static str, items: &[ParamValue<'_>]) -> Result<String> {
    let parts = items
        .iter()
        .map(|item| identity(field, item))
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join(","))
}

/// `f64`'s `Display` never uses exponent notation or digit grouping and is
/// locale independent, which is what the service's parser accepts.
/// NaN and infinities have no such form and are rejected.
fn format_double(field: &'static str, value: f64) -> Result<String> {
    if !value.is_finite() {
        return Err(NominatimError::NonFiniteNumber(field));
    }
    Ok(format!("{}", value))
}

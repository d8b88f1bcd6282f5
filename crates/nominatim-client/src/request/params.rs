//! Query parameter descriptors and the query string builder
//!
//! Each request and query type declares a static, ordered table of
//! [`QueryParameter`]s. [`build`] walks that table, skips unset fields and
//! joins the rendered `key=value` fragments with `&`. A nested descriptor has
//! no key format: the embedded object's own query string is spliced in at
//! the descriptor's position.

use crate::error::Result;
use crate::request::serializer::{ParamValue, SerializerKind};

/// Anything that renders itself as a Nominatim query string
pub trait QueryString {
    /// URL-encoded `key=value&...` string, without a leading `?`
    fn query_string(&self) -> Result<String>;
}

/// Types that declare their query parameters in a static table
pub trait Parameterized: Sized + 'static {
    /// Descriptors in emission order
    const PARAMETERS: &'static [QueryParameter<Self>];
}

impl<T: Parameterized> QueryString for T {
    fn query_string(&self) -> Result<String> {
        build(self)
    }
}

/// Reads a field's current value, `None` when unset
pub type FieldReader<T> = for<'a> fn(&'a T) -> Option<ParamValue<'a>>;

/// Metadata for one query parameter of `T`
pub struct QueryParameter<T> {
    field: &'static str,
    format: Option<&'static str>,
    serializer: SerializerKind,
    read: FieldReader<T>,
}

impl<T> QueryParameter<T> {
    /// Parameter rendered into `format`, whose `%s` receives the value
    pub const fn new(field: &'static str, format: &'static str, read: FieldReader<T>) -> Self {
        Self {
            field,
            format: Some(format),
            serializer: SerializerKind::Identity,
            read,
        }
    }

    /// Embedded query object, rendered in place with no key of its own
    pub const fn nested(field: &'static str, read: FieldReader<T>) -> Self {
        Self {
            field,
            format: None,
            serializer: SerializerKind::Nested,
            read,
        }
    }

    pub const fn with_serializer(self, serializer: SerializerKind) -> Self {
        Self { serializer, ..self }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn format(&self) -> Option<&'static str> {
        self.format
    }

    pub fn serializer(&self) -> SerializerKind {
        self.serializer
    }

    /// Render this parameter for `target`, `None` when the field is unset
    fn render(&self, target: &T) -> Result<Option<String>> {
        let Some(value) = (self.read)(target) else {
            return Ok(None);
        };
        let rendered = self.serializer.serialize(self.field, Some(&value))?;

        Ok(match self.format {
            Some(format) => Some(format.replacen("%s", &rendered, 1)),
            None if rendered.is_empty() => None,
            None => Some(rendered),
        })
    }
}

/// Build the query string of `target` from its declared parameters
pub fn build<T: Parameterized>(target: &T) -> Result<String> {
    let mut fragments = Vec::with_capacity(T::PARAMETERS.len());
    for param in T::PARAMETERS {
        if let Some(fragment) = param.render(target)? {
            fragments.push(fragment);
        }
    }
    Ok(fragments.join("&"))
}

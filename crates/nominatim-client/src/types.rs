use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// Rectangle in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn new(south: f64, north: f64, west: f64, east: f64) -> Self {
        Self {
            south,
            north,
            west,
            east,
        }
    }

    /// Corners in `viewbox` order: left, top, right, bottom
    pub fn viewbox_corners(&self) -> [f64; 4] {
        [self.west, self.north, self.east, self.south]
    }
}

/// Nominatim sends `boundingbox` as `["south", "north", "west", "east"]`
impl<'de> Deserialize<'de> for BoundingBox {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let corners = Vec::<Coordinate>::deserialize(deserializer)?;
        if corners.len() != 4 {
            return Err(de::Error::invalid_length(corners.len(), &"4 coordinates"));
        }
        let mut values = [0.0; 4];
        for (slot, corner) in values.iter_mut().zip(corners) {
            *slot = corner.parse::<D::Error>()?;
        }
        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

/// A coordinate sent either as a JSON string or a number
#[derive(Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Text(String),
    Number(f64),
}

impl Coordinate {
    fn parse<E: de::Error>(self) -> Result<f64, E> {
        match self {
            Self::Number(v) => Ok(v),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid coordinate: {s}"))),
        }
    }
}

fn de_coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Coordinate::deserialize(deserializer)?.parse()
}

/// One `key: value` pair of an address breakdown, e.g. `city: Rennes`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressElement {
    pub key: String,
    pub value: String,
}

/// Reads the `address` object into elements, keeping the order the service
/// sent them in (most specific first)
fn de_address_elements<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<AddressElement>, D::Error> {
    struct ElementsVisitor;

    impl<'de> Visitor<'de> for ElementsVisitor {
        type Value = Vec<AddressElement>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an address object")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut elements = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                elements.push(AddressElement { key, value });
            }
            Ok(elements)
        }
    }

    deserializer.deserialize_map(ElementsVisitor)
}

/// A place returned by search, reverse geocoding or lookup
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Address {
    pub place_id: u64,
    pub licence: Option<String>,
    pub osm_type: Option<String>,
    pub osm_id: Option<u64>,
    #[serde(rename = "lat", deserialize_with = "de_coordinate")]
    pub latitude: f64,
    #[serde(rename = "lon", deserialize_with = "de_coordinate")]
    pub longitude: f64,
    pub display_name: String,
    /// `category` in jsonv2 output, `class` in json output
    #[serde(alias = "class")]
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub place_type: Option<String>,
    pub place_rank: Option<u32>,
    pub importance: Option<f64>,
    #[serde(rename = "addresstype")]
    pub address_type: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_address_elements")]
    pub address: Vec<AddressElement>,
    pub extratags: Option<HashMap<String, String>>,
    pub namedetails: Option<HashMap<String, String>>,
    #[serde(rename = "boundingbox")]
    pub bounding_box: Option<BoundingBox>,
    pub geojson: Option<serde_json::Value>,
    pub svg: Option<String>,
    pub geokml: Option<String>,
    pub geotext: Option<String>,
}

impl Address {
    /// Value of an address element such as `"city"` or `"postcode"`
    pub fn element(&self, key: &str) -> Option<&str> {
        self.address
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }
}

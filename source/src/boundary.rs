use crate::SourceError;

use serde::de::Error as SerdeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `[longitude, latitude]`, GeoJSON order.
pub type Position = [f64; 2];
pub type Ring = Vec<Position>;

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Rings of one polygon; the first is the outer boundary.
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
    /// Any other geometry type, kept by name so callers can report it.
    Unsupported(String),
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer).map_err(SerdeError::custom)?;

        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| SerdeError::custom("geometry without a type"))?;
        let coords = value.get("coordinates");

        match kind {
            "Polygon" => {
                let rings = coords
                    .and_then(Value::as_array)
                    .ok_or_else(|| SerdeError::custom("Polygon without coordinates"))?;
                Ok(Geometry::Polygon(parse_rings(rings)))
            }
            "MultiPolygon" => {
                let polygons = coords
                    .and_then(Value::as_array)
                    .ok_or_else(|| SerdeError::custom("MultiPolygon without coordinates"))?;
                Ok(Geometry::MultiPolygon(
                    polygons
                        .iter()
                        .filter_map(Value::as_array)
                        .map(|rings| parse_rings(rings))
                        .collect(),
                ))
            }
            other => Ok(Geometry::Unsupported(other.to_string())),
        }
    }
}

fn parse_rings(rings: &[Value]) -> Vec<Ring> {
    rings
        .iter()
        .filter_map(Value::as_array)
        .map(|ring| {
            let parsed: Ring = ring.iter().filter_map(parse_position).collect();
            if parsed.len() < ring.len() {
                log::warn!(
                    "Dropped {} malformed of {} positions in ring starting at {:?}",
                    ring.len() - parsed.len(),
                    ring.len(),
                    parsed.first()
                );
            }
            parsed
        })
        .collect()
}

// extra ordinates (altitude) are ignored
fn parse_position(value: &Value) -> Option<Position> {
    let arr = value.as_array()?;
    let lon = arr.first()?.as_f64()?;
    let lat = arr.get(1)?.as_f64()?;
    Some([lon, lat])
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Properties {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: Option<String>,
    pub geometry: Option<Geometry>,
}

impl<'de> Deserialize<'de> for Feature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawFeature {
            #[serde(default)]
            properties: Option<Properties>,
            #[serde(default)]
            geometry: Option<Geometry>,
        }

        let raw = RawFeature::deserialize(deserializer)?;
        Ok(Feature {
            name: raw.properties.and_then(|p| p.name),
            geometry: raw.geometry,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SourceError> {
        let fc: FeatureCollection = serde_json::from_slice(bytes)?;

        match fc.kind.as_deref() {
            Some("FeatureCollection") | None => Ok(fc),
            Some(other) => Err(SourceError::NotFeatureCollection(other.to_string())),
        }
    }
}

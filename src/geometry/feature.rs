use geojson::GeoJson;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{GeometryError, GeometryResult};

/// `[longitude, latitude]`
pub type Position = [f64; 2];

/// Geometry of an edited feature, in GeoJSON layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Position),
    LineString(Vec<Position>),
    /// Outer ring first; rings are closed (first == last).
    Polygon(Vec<Vec<Position>>),
}

impl Geometry {
    /// Builds a polygon from an open ring, closing it.
    pub fn polygon(mut ring: Vec<Position>) -> Self {
        if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
            if first != last {
                ring.push(first);
            }
        }
        Self::Polygon(vec![ring])
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::LineString(_) => "LineString",
            Self::Polygon(_) => "Polygon",
        }
    }

    /// Every vertex, rings flattened.
    pub fn vertices(&self) -> Vec<Position> {
        match self {
            Self::Point(p) => vec![*p],
            Self::LineString(line) => line.clone(),
            Self::Polygon(rings) => rings.iter().flatten().copied().collect(),
        }
    }

    pub fn outer_ring(&self) -> Option<&[Position]> {
        match self {
            Self::Polygon(rings) => rings.first().map(Vec::as_slice),
            _ => None,
        }
    }
}

/// A user-authored feature with a stable identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Uuid,
    pub geometry: Geometry,
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
            properties: Map::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_owned(), value.into());
        self
    }
}

/// Ordered collection of edited features. Replaced wholesale on every edit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// A new collection holding every current feature plus `feature`.
    pub fn with_feature(&self, feature: Feature) -> Self {
        let mut features = self.features.clone();
        features.push(feature);
        Self { features }
    }

    pub fn get(&self, id: Uuid) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn to_geojson_string(&self) -> GeometryResult<String> {
        let collection = geojson::FeatureCollection {
            bbox: None,
            features: self.features.iter().map(geojson::Feature::from).collect(),
            foreign_members: None,
        };
        Ok(serde_json::to_string_pretty(&collection)?)
    }

    /// Parses a GeoJSON FeatureCollection.
    ///
    /// Multi-part geometries and geometry collections are split into one
    /// feature per part, features without a geometry are skipped and any
    /// altitude is dropped. Feature ids that are UUID strings are kept,
    /// anything else gets a fresh id.
    pub fn from_geojson_str(text: &str) -> GeometryResult<Self> {
        let collection = match text.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(collection) => collection,
            GeoJson::Feature(_) => {
                return Err(GeometryError::NotAFeatureCollection("Feature".to_owned()));
            }
            GeoJson::Geometry(geometry) => {
                return Err(GeometryError::NotAFeatureCollection(
                    geometry.value.type_name().to_owned(),
                ));
            }
        };

        let mut features = Vec::new();
        for feature in collection.features {
            let Some(geometry) = feature.geometry else {
                log::debug!("Skipping feature without geometry");
                continue;
            };
            let mut parts = Vec::new();
            split_geometry(geometry.value, &mut parts)?;

            let properties = feature.properties.unwrap_or_default();
            let mut id = match feature.id {
                Some(geojson::feature::Id::String(s)) => Uuid::parse_str(&s).ok(),
                _ => None,
            };
            for part in parts {
                features.push(Feature {
                    id: id.take().unwrap_or_else(Uuid::new_v4),
                    geometry: part,
                    properties: properties.clone(),
                });
            }
        }
        Ok(Self { features })
    }
}

impl From<&Feature> for geojson::Feature {
    fn from(feature: &Feature) -> Self {
        Self {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&feature.geometry))),
            id: Some(geojson::feature::Id::String(feature.id.to_string())),
            properties: Some(feature.properties.clone()),
            foreign_members: None,
        }
    }
}

impl From<&Geometry> for geojson::Value {
    fn from(geometry: &Geometry) -> Self {
        let line = |ps: &[Position]| ps.iter().map(|p| p.to_vec()).collect::<Vec<_>>();
        match geometry {
            Geometry::Point(p) => Self::Point(p.to_vec()),
            Geometry::LineString(ps) => Self::LineString(line(ps)),
            Geometry::Polygon(rings) => Self::Polygon(rings.iter().map(|r| line(r)).collect()),
        }
    }
}

/// Longitude and latitude of a GeoJSON position; extra coordinates are ignored.
fn position(coords: &[f64]) -> GeometryResult<Position> {
    match coords {
        [lng, lat, ..] => Ok([*lng, *lat]),
        _ => Err(GeometryError::ShortPosition(coords.len())),
    }
}

fn positions(coords: &[Vec<f64>]) -> GeometryResult<Vec<Position>> {
    coords.iter().map(|c| position(c)).collect()
}

fn rings(coords: &[Vec<Vec<f64>>]) -> GeometryResult<Vec<Vec<Position>>> {
    coords.iter().map(|r| positions(r)).collect()
}

/// Flattens a GeoJSON geometry into single-part geometries.
fn split_geometry(value: geojson::Value, parts: &mut Vec<Geometry>) -> GeometryResult<()> {
    match value {
        geojson::Value::Point(p) => parts.push(Geometry::Point(position(&p)?)),
        geojson::Value::MultiPoint(ps) => {
            for p in ps {
                parts.push(Geometry::Point(position(&p)?));
            }
        }
        geojson::Value::LineString(line) => parts.push(Geometry::LineString(positions(&line)?)),
        geojson::Value::MultiLineString(lines) => {
            for line in lines {
                parts.push(Geometry::LineString(positions(&line)?));
            }
        }
        geojson::Value::Polygon(polygon) => parts.push(Geometry::Polygon(rings(&polygon)?)),
        geojson::Value::MultiPolygon(polygons) => {
            for polygon in polygons {
                parts.push(Geometry::Polygon(rings(&polygon)?));
            }
        }
        geojson::Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                split_geometry(geometry.value, parts)?;
            }
        }
    }
    Ok(())
}

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{DatasetError, DatasetResult};

/// One categorical series as served by the dataset endpoint:
/// `{name, mode, text[], x[], y[], marker: {color[]}}`.
///
/// Every array is optional. Entries of the wrong type decode as `null`
/// instead of failing the whole body; they are then filtered or defaulted
/// when flattened into [`PointRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Series {
    #[serde(deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(deserialize_with = "lenient_value")]
    pub mode: Option<String>,
    #[serde(deserialize_with = "lenient_entries")]
    pub text: Vec<Option<String>>,
    #[serde(deserialize_with = "lenient_entries")]
    pub x: Vec<Option<f64>>,
    #[serde(deserialize_with = "lenient_entries")]
    pub y: Vec<Option<f64>>,
    #[serde(deserialize_with = "lenient_marker")]
    pub marker: Marker,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Marker {
    #[serde(deserialize_with = "lenient_entries")]
    pub color: Vec<Option<String>>,
}

/// An array whose entries are kept only when they have type `T`.
/// Anything that is not an array reads as empty.
fn lenient_entries<'de, D, T>(deserializer: D) -> Result<Vec<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(values) => values
            .into_iter()
            .map(|v| serde_json::from_value(v).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok(entries)
}

fn lenient_value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

/// Numeric names are kept as their decimal text.
fn lenient_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let name = match Value::deserialize(deserializer)? {
        Value::String(name) => name,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    };
    Ok(name)
}

fn lenient_marker<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Marker, D::Error> {
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

impl Series {
    /// First color listed for this series, or an empty string.
    pub fn primary_color(&self) -> &str {
        self.marker
            .color
            .iter()
            .flatten()
            .next()
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Flattens the parallel arrays into point records.
    ///
    /// Yields `min(len(x), len(y))` candidates; entries with a missing or
    /// non-finite coordinate are dropped, missing text/color default to "".
    pub fn points(&self) -> impl Iterator<Item = PointRecord> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .enumerate()
            .filter_map(move |(i, (x, y))| {
                let x = x.filter(|v| v.is_finite())?;
                let y = y.filter(|v| v.is_finite())?;
                Some(PointRecord {
                    x,
                    y,
                    color: entry(&self.marker.color, i),
                    text: entry(&self.text, i),
                    cluster: self.name.clone(),
                })
            })
    }
}

fn entry(values: &[Option<String>], index: usize) -> String {
    values.get(index).cloned().flatten().unwrap_or_default()
}

/// A single immutable point of the fetched dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    /// Hex color, not validated here.
    pub color: String,
    pub text: String,
    pub cluster: String,
}

impl PointRecord {
    pub fn position(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// Decodes the categorical dataset body.
///
/// The body must be an array of objects. Inside each object, fields of the
/// wrong type are tolerated.
pub fn parse_series(body: &str) -> DatasetResult<Vec<Series>> {
    let values: Vec<Value> = serde_json::from_str(body)?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            if !value.is_object() {
                return Err(DatasetError::NotASeries(index));
            }
            Ok(serde_json::from_value::<Series>(value)?)
        })
        .collect()
}

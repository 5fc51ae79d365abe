use thiserror::Error;

/// Errors that can occur while fetching or decoding the point dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Request failed: {0}")]
    Http(String),

    #[error("Failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Failed to decode dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset entry {0} is not a series object")]
    NotASeries(usize),

    #[error("Dataset unavailable after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("Fetch was dropped before it completed")]
    Cancelled,
}

/// Errors that can occur while importing or exporting edited geometry
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("Invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("Failed to encode GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a FeatureCollection, found {0}")]
    NotAFeatureCollection(String),

    #[error("Position needs longitude and latitude, found {0} coordinates")]
    ShortPosition(usize),
}

/// Rejected tool or selection mode requests
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModeError {
    #[error("Unknown tool mode: {0}")]
    UnknownToolMode(String),

    #[error("Unknown selection mode: {0}")]
    UnknownSelectionMode(String),
}

pub type DatasetResult<T> = Result<T, DatasetError>;
pub type GeometryResult<T> = Result<T, GeometryError>;

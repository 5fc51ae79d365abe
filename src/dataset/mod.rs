mod fetch;
mod record;

pub use fetch::{DatasetFetch, fetch_with_retry};
pub use record::{Marker, PointRecord, Series, parse_series};

/// The fetched dataset, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<PointRecord>,
}

impl Dataset {
    pub fn from_series(series: &[Series]) -> Self {
        Self {
            points: series.iter().flat_map(Series::points).collect(),
        }
    }

    pub fn from_points(points: Vec<PointRecord>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PointRecord] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

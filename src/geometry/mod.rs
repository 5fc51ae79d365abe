mod feature;
pub mod hit_testing;
pub mod measure;
mod store;

pub use feature::{Feature, FeatureCollection, Geometry, Position};
pub use store::EditedGeometryStore;

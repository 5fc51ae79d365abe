use super::FeatureCollection;

/// Holds the user-drawn geometry for the session.
///
/// Edits never patch the collection; they hand over a complete replacement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditedGeometryStore {
    collection: FeatureCollection,
}

impl EditedGeometryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    pub fn replace(&mut self, updated: FeatureCollection) {
        log::debug!(
            "Replacing edited geometry: {} -> {} features",
            self.collection.len(),
            updated.len()
        );
        self.collection = updated;
    }

    pub fn clear(&mut self) {
        self.collection = FeatureCollection::new();
    }
}

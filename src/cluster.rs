use crate::dataset::Series;

/// A named category of the dataset and its legend color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub name: String,
    /// Hex color, taken from the first series that carries this name.
    pub color: String,
}

/// Read-only list of clusters, in first-occurrence order of the source data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterRegistry {
    clusters: Vec<Cluster>,
}

impl ClusterRegistry {
    /// Derives the registry from the fetched series.
    ///
    /// Duplicate names collapse onto their first occurrence; a later duplicate
    /// with a different color is ignored.
    pub fn derive(series: &[Series]) -> Self {
        let mut clusters: Vec<Cluster> = Vec::new();
        for s in series {
            if clusters.iter().any(|c| c.name == s.name) {
                log::debug!("Ignoring duplicate cluster {:?}", s.name);
                continue;
            }
            clusters.push(Cluster {
                name: s.name.clone(),
                color: s.primary_color().to_owned(),
            });
        }
        Self { clusters }
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clusters.iter().map(|c| c.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clusters.iter().any(|c| c.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

use crate::cluster::ClusterRegistry;
use crate::command::Command;
use crate::composer::{ComposerInputs, LayerDependencies, compose};
use crate::dataset::{Dataset, Series};
use crate::event::MapEvent;
use crate::geometry::{EditedGeometryStore, FeatureCollection};
use crate::layer::LayerList;
use crate::mode::ToolModeController;
use crate::visibility::VisibilityToggleSet;

/// Composition root for everything the layer list depends on.
///
/// Each container has exactly one writer, reached through [`MapState::execute`]
/// (or [`MapState::load_dataset`] for the fetched data). Every write bumps the
/// matching revision in [`LayerDependencies`]; [`MapState::layers`] recomposes
/// only when the live revisions differ from the ones the cache was built from.
#[derive(Debug, Default)]
pub struct MapState {
    dataset: Option<Dataset>,
    registry: ClusterRegistry,
    visibility: VisibilityToggleSet,
    tool: ToolModeController,
    geometry: EditedGeometryStore,
    revisions: LayerDependencies,
    cache: Option<(LayerDependencies, Option<LayerList>)>,
}

impl MapState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the fetched dataset and derives the cluster registry.
    ///
    /// The dataset is immutable once loaded; later calls are ignored.
    pub fn load_dataset(&mut self, series: &[Series]) -> bool {
        if self.dataset.is_some() {
            log::warn!("Dataset already loaded, ignoring a second load");
            return false;
        }
        let dataset = Dataset::from_series(series);
        self.registry = ClusterRegistry::derive(series);
        log::info!(
            "Loaded {} points in {} clusters",
            dataset.len(),
            self.registry.len()
        );
        self.dataset = Some(dataset);
        self.revisions.dataset += 1;
        true
    }

    /// Applies a command to the container that owns its data.
    /// Returns whether any state changed.
    pub fn execute(&mut self, command: Command) -> bool {
        log::debug!("Executing {}", command.name());
        match command {
            Command::ToggleCluster(name) => {
                if !self.visibility.toggle_known(&name, &self.registry) {
                    return false;
                }
                self.revisions.visibility += 1;
            }
            Command::SetMode { mode, selection } => {
                self.tool.set_mode(mode, selection);
                self.revisions.tool_mode += 1;
            }
            Command::SetModeByToken { mode, selection } => {
                if !self.tool.set_mode_by_token(&mode, &selection) {
                    return false;
                }
                self.revisions.tool_mode += 1;
            }
            Command::SetModeConfig(config) => {
                if self.tool.config() == config {
                    return false;
                }
                self.tool.set_config(config);
                self.revisions.tool_mode += 1;
            }
            Command::ReplaceGeometry(updated) | Command::ImportGeometry(updated) => {
                self.geometry.replace(updated);
                self.revisions.geometry += 1;
            }
            Command::ClearGeometry => {
                self.geometry.clear();
                self.revisions.geometry += 1;
            }
        }
        true
    }

    /// Routes a map event through the current layers' handlers and executes
    /// the resulting commands.
    pub fn handle_event(&mut self, event: &MapEvent) {
        let commands = match self.layers() {
            Some(layers) => layers.dispatch(event),
            None => return,
        };
        for command in commands {
            self.execute(command);
        }
    }

    /// The layer list for the current state, `None` until the dataset arrived.
    pub fn layers(&mut self) -> Option<&LayerList> {
        let key = self.revisions;
        let stale = !matches!(&self.cache, Some((built_from, _)) if *built_from == key);
        if stale {
            let layers = compose(&self.inputs());
            self.cache = Some((key, layers));
        }
        self.cache.as_ref().and_then(|(_, layers)| layers.as_ref())
    }

    pub fn inputs(&self) -> ComposerInputs<'_> {
        ComposerInputs {
            dataset: self.dataset.as_ref(),
            registry: &self.registry,
            visibility: &self.visibility,
            tool: &self.tool,
            geometry: self.geometry.collection(),
            color_trigger: self.revisions.dataset,
        }
    }

    pub fn dependencies(&self) -> LayerDependencies {
        self.revisions
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn registry(&self) -> &ClusterRegistry {
        &self.registry
    }

    pub fn visibility(&self) -> &VisibilityToggleSet {
        &self.visibility
    }

    pub fn tool(&self) -> &ToolModeController {
        &self.tool
    }

    pub fn geometry(&self) -> &FeatureCollection {
        self.geometry.collection()
    }
}

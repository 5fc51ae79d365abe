use crate::command::Command;
use crate::config::MapConfig;
use crate::dataset::DatasetFetch;
use crate::panels::{ToolboxState, legend_panel, map_panel, toolbox_panel};
use crate::renderer::MapRenderer;
use crate::state::MapState;
use crate::tools::{GeometryEditor, MapTool, SelectionTool};
use crate::view::ViewState;

/// Where the dataset request stands, for the render gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

/// The cluster map application.
///
/// Owns every state container. Panels only push [`Command`]s; they are
/// executed here, once per frame, in the order they were pushed.
#[derive(Debug)]
pub struct ClusterMapApp {
    pub(crate) config: MapConfig,
    pub(crate) state: MapState,
    pub(crate) view: ViewState,
    pub(crate) status: LoadStatus,
    pub(crate) toolbox: ToolboxState,
    pub(crate) editor: GeometryEditor,
    pub(crate) selection_tool: SelectionTool,
    pub(crate) renderer: MapRenderer,
    fetch: DatasetFetch,
    pending: Vec<Command>,
    /// Tool mode revision the tools' sketches belong to
    tool_revision: u64,
}

impl ClusterMapApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = MapConfig::load(cc.storage);
        let fetch = DatasetFetch::start(
            config.dataset_url.clone(),
            config.max_fetch_attempts,
            cc.egui_ctx.clone(),
        );
        Self::with_fetch(config, fetch)
    }

    /// Builds the app around an already started dataset request.
    ///
    /// The configured startup mode tokens are queued for the first flush.
    pub fn with_fetch(config: MapConfig, fetch: DatasetFetch) -> Self {
        let startup_mode = Command::SetModeByToken {
            mode: config.initial_tool.clone(),
            selection: config.initial_selection.clone(),
        };
        let state = MapState::new();
        Self {
            view: config.initial_view,
            renderer: MapRenderer::new(config.point_radius_px),
            config,
            tool_revision: state.dependencies().tool_mode,
            state,
            status: LoadStatus::Loading,
            toolbox: ToolboxState::default(),
            editor: GeometryEditor::new(),
            selection_tool: SelectionTool::new(),
            fetch,
            pending: vec![startup_mode],
        }
    }

    pub fn state(&self) -> &MapState {
        &self.state
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Text shown in place of the map until the dataset is loaded.
    pub fn status_text(&self) -> &str {
        match &self.status {
            LoadStatus::Loading => "loading dataset…",
            LoadStatus::Failed(_) => "dataset unavailable",
            LoadStatus::Ready => "",
        }
    }

    /// Queues a command for the end of the frame.
    pub fn push_command(&mut self, command: Command) {
        self.pending.push(command);
    }

    /// Takes the fetch result if it arrived since the last frame.
    pub fn poll_dataset(&mut self) {
        match self.fetch.poll() {
            None => {}
            Some(Ok(series)) => {
                self.state.load_dataset(&series);
                self.status = LoadStatus::Ready;
            }
            Some(Err(err)) => {
                log::error!("Dataset unavailable: {}", err);
                self.status = LoadStatus::Failed(err.to_string());
            }
        }
    }

    /// Executes the commands queued this frame, in order.
    ///
    /// A tool or selection mode change drops any half-finished sketch.
    pub fn flush_commands(&mut self) {
        for command in std::mem::take(&mut self.pending) {
            if !self.state.execute(command.clone()) {
                log::debug!("{} changed nothing", command.name());
            }
        }

        let revision = self.state.dependencies().tool_mode;
        if revision != self.tool_revision {
            self.tool_revision = revision;
            self.editor.reset();
            self.selection_tool.reset();
        }
    }
}

impl eframe::App for ClusterMapApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.config.save(storage);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_dataset();

        if self.state.is_loaded() {
            toolbox_panel(self, ctx);
            legend_panel(self, ctx);
        }
        map_panel(self, ctx);

        self.flush_commands();
    }
}

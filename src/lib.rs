#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod cluster;
pub mod color;
pub mod command;
pub mod components;
pub mod composer;
pub mod config;
pub mod dataset;
pub mod error;
pub mod event;
pub mod geometry;
pub mod layer;
pub mod mode;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod tools;
pub mod view;
pub mod visibility;

pub use app::{ClusterMapApp, LoadStatus};
pub use cluster::{Cluster, ClusterRegistry};
pub use command::Command;
pub use composer::{ComposerInputs, LayerDependencies, compose};
pub use config::MapConfig;
pub use dataset::{Dataset, PointRecord, Series};
pub use event::{EventHandler, MapEvent};
pub use layer::{LayerDescriptor, LayerList};
pub use mode::{ModeConfig, SelectionMode, ToolMode, ToolModeController};
pub use renderer::MapRenderer;
pub use state::MapState;
pub use view::ViewState;
pub use visibility::VisibilityToggleSet;

use crate::event::MapEvent;
use crate::geometry::Position;
use crate::layer::LayerList;

/// Pointer input already converted to map coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Hover(Position),
    Click(Position),
    DoubleClick(Position),
    DragStart(Position),
    Drag(Position),
    DragEnd(Position),
    /// Enter: complete the current sketch
    Finish,
    /// Escape: drop the current sketch
    Cancel,
}

/// What the active tool wants drawn on top of the layers.
#[derive(Debug, Clone, PartialEq)]
pub enum SketchShape {
    Path(Vec<Position>),
    Ring(Vec<Position>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SketchPreview {
    pub shape: SketchShape,
    /// Live measurement, when the tool measures something
    pub label: Option<String>,
}

/// Interaction logic that sits between raw pointer input and the layers.
///
/// Tools keep only transient sketch state. Anything that should change
/// application state leaves the tool as a [`MapEvent`].
pub trait MapTool {
    fn name(&self) -> &'static str;

    /// Handle one pointer input against the current layers.
    fn on_input(&mut self, input: PointerInput, layers: &LayerList) -> Option<MapEvent>;

    /// Current in-progress shape, if any.
    fn preview(&self) -> Option<SketchPreview>;

    /// Drop any in-progress sketch.
    fn reset(&mut self);
}

mod geometry_editor;
pub use geometry_editor::GeometryEditor;

mod selection_tool;
pub use selection_tool::SelectionTool;

mod picking;
pub use picking::pick_nearest;

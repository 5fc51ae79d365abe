mod legend_panel;
mod map_panel;
mod toolbox_panel;

pub use legend_panel::legend_panel;
pub use map_panel::map_panel;
pub use toolbox_panel::{ToolboxState, toolbox_panel};

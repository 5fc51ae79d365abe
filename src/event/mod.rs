mod events;

pub use events::{MapEvent, PickedObject, PickingInfo, tooltip_text};

use crate::command::Command;

/// Implemented by layer descriptors that react to map events.
///
/// Handlers never mutate state themselves; they translate an event into the
/// command that the owning controller will execute.
pub trait EventHandler {
    fn handle_event(&self, event: &MapEvent) -> Option<Command>;
}

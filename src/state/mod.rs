mod map_state;

pub use map_state::MapState;

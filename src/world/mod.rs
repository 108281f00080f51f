mod body_set;
mod physics_world;

pub use body_set::*;
pub use physics_world::*;

mod shape;
mod rigid_body;
mod frame;

pub use shape::*;
pub use rigid_body::*;
pub use frame::*;

mod narrow_phase;
mod dispatch;

pub use narrow_phase::*;
pub use dispatch::*;

#[cfg(test)]
mod narrow_phase_tests;
#[cfg(test)]
mod dispatch_tests;

/// Per-frame input supplied by the surrounding simulation loop.
///
/// The physics world reads the elapsed time and the single-step debug flag
/// but does not own or construct this object's timing source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Elapsed time for the step, in seconds. Zero or negative means the
    /// simulation is paused for this frame.
    pub delta_time: f64,
    /// Debug flag: advance exactly one frame while paused. Collision
    /// resolution runs even with zero elapsed time when this is set.
    pub single_step: bool,
}

impl FrameParams {
    pub fn new(delta_time: f64) -> Self {
        FrameParams {
            delta_time,
            single_step: false,
        }
    }

    /// A paused frame that still resolves collisions once.
    pub fn single_step() -> Self {
        FrameParams {
            delta_time: 0.0,
            single_step: true,
        }
    }

    /// True when collisions detected this frame should be resolved.
    ///
    /// Paused frames (zero or negative elapsed time) skip resolution unless
    /// the single-step flag is set, so a standing contact is not resolved
    /// repeatedly while time is frozen.
    pub fn should_resolve(&self) -> bool {
        self.delta_time > 0.0 || self.single_step
    }
}

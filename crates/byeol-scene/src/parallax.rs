//! Pointer-driven parallax offset with exponential smoothing.

/// Parallax layer multiplier for background stars.
pub const STAR_LAYER: f64 = 0.2;
/// Parallax layer multiplier for cluster stars and planets.
pub const CLUSTER_LAYER: f64 = 0.4;

/// Smooths a pointer-derived target offset toward the current offset.
///
/// Pointer samples arriving between frames are coalesced: only the
/// latest one is turned into a target on the next [`step`]. The
/// smoothing itself is applied once per rendered frame and is
/// intentionally not delta-time corrected, matching the feel of the
/// effect at the reference frame rate.
///
/// [`step`]: ParallaxTracker::step
#[derive(Debug, Clone, Default)]
pub struct ParallaxTracker {
    current: (f64, f64),
    target: (f64, f64),
    pending: Option<(f64, f64)>,
}

impl ParallaxTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest pointer position; overwrites any sample not
    /// yet consumed by a frame.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pending = Some((x, y));
    }

    /// Advance the offset one frame: fold in a pending pointer sample,
    /// then move `current` toward `target` by the smoothing fraction.
    pub fn step(&mut self, width: f64, height: f64, factor: f64, smoothing: f64) {
        if let Some((x, y)) = self.pending.take() {
            self.target = (
                (x / width.max(1.0) - 0.5) * 2.0 * factor,
                (y / height.max(1.0) - 0.5) * 2.0 * factor,
            );
        }
        self.current.0 += (self.target.0 - self.current.0) * smoothing;
        self.current.1 += (self.target.1 - self.current.1) * smoothing;
    }

    /// The offset applied to draw positions this frame.
    pub fn offset(&self) -> (f64, f64) {
        self.current
    }
}

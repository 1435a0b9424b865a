//! Flick velocity sampling.
//!
//! Panels only need to know how fast the finger was moving when it let go,
//! so the sampler keeps a single previous sample and derives a signed speed
//! from the last change in displacement.

/// Most recent displacement sample and the speed derived from it.
///
/// Speed is in displacement units per millisecond. Positive is toward the
/// bottom of the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlickSample {
    pub displacement: f32,
    pub time_ms: u64,
    pub speed: f32,
}

impl FlickSample {
    /// Fresh sample at drag start.
    pub fn start(time_ms: u64) -> Self {
        Self {
            displacement: 0.0,
            time_ms,
            speed: 0.0,
        }
    }

    /// Records a new displacement.
    ///
    /// Samples that repeat the previous displacement are dropped so a finger
    /// that stops before lifting does not reset the speed to zero. Two
    /// samples in the same millisecond count as one millisecond apart.
    pub fn record(&mut self, displacement: f32, time_ms: u64) {
        if !displacement.is_finite() || displacement == self.displacement {
            return;
        }
        let elapsed = time_ms.saturating_sub(self.time_ms).max(1) as f32;
        self.speed = (displacement - self.displacement) / elapsed;
        self.displacement = displacement;
        self.time_ms = time_ms;
    }

    /// Whether the current speed qualifies as a flick.
    pub fn is_flick(&self, threshold: f32) -> bool {
        self.speed.abs() > threshold
    }
}

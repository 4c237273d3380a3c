//! Smoothed frame-rate readout.

/// Exponentially smoothed frames per second.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FpsMeter {
    fps: Option<f32>,
}

impl FpsMeter {
    const SMOOTHING: f32 = 0.1;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's delta. Zero-length frames are ignored.
    pub fn record(&mut self, delta_ms: f32) {
        if delta_ms <= 0.0 {
            return;
        }
        let instant = 1000.0 / delta_ms;
        self.fps = Some(match self.fps {
            Some(fps) => fps + (instant - fps) * Self::SMOOTHING,
            None => instant,
        });
    }

    #[must_use]
    pub fn fps(&self) -> f32 {
        self.fps.unwrap_or(0.0)
    }

    /// Text shown by the on-screen counter.
    #[must_use]
    pub fn label(&self) -> String {
        format!("FPS: {}", self.fps().round())
    }
}

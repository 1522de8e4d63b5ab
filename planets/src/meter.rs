//! Frame-rate overlay
//!
//! Purely observational: consumes the render delta and publishes a smoothed
//! rate through the HUD slot of the draw list. No physics coupling.

use crate::renderer::DrawList;

const SMOOTHING: f64 = 0.1;

#[derive(Debug, Default)]
pub struct FpsMeter {
    smoothed: f64,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        let fps = 1.0 / dt;
        self.smoothed = if self.smoothed == 0.0 {
            fps
        } else {
            self.smoothed + (fps - self.smoothed) * SMOOTHING
        };
    }

    pub fn fps(&self) -> f64 {
        self.smoothed
    }

    pub fn draw(&self, out: &mut DrawList) {
        out.set_hud(format!("{:.0} FPS", self.smoothed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_to_the_frame_rate() {
        let mut meter = FpsMeter::new();
        for _ in 0..200 {
            meter.tick(1.0 / 60.0);
        }
        assert!((meter.fps() - 60.0).abs() < 0.5);
    }

    #[test]
    fn zero_delta_is_ignored() {
        let mut meter = FpsMeter::new();
        meter.tick(0.0);
        assert_eq!(meter.fps(), 0.0);
        meter.tick(1.0 / 30.0);
        assert!(meter.fps() > 0.0);
    }
}

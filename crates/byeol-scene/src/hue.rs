//! Palette cycling with a spring-damped cross-fade.

use byeol_core::Rgba;

// Spring constants tuned for a settle time of roughly half a second.
const STIFFNESS: f64 = 60.0;
const DAMPING: f64 = 20.0;

/// Cycles through a hue palette and produces the displayed color.
///
/// The selection moves in whole steps; a damped spring drives a
/// continuous index after it, and the displayed color is the palette
/// entry at the rounded, clamped spring index. This gives transitions
/// a cross-fade feel without interpolating in color space.
#[derive(Debug, Clone)]
pub struct HueController {
    palette: Vec<Rgba>,
    selected: usize,
    spring_pos: f64,
    spring_vel: f64,
}

impl HueController {
    pub fn new(palette: Vec<Rgba>) -> Self {
        Self {
            palette,
            selected: 0,
            spring_pos: 0.0,
            spring_vel: 0.0,
        }
    }

    /// Advance the selection to the next palette entry, wrapping at
    /// the end. No-op on an empty palette.
    pub fn cycle(&mut self) {
        if self.palette.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.palette.len();
    }

    /// Integrate the spring one frame toward the selected index.
    pub fn step(&mut self, delta_ms: f64) {
        // A stalled frame must not destabilize the integration.
        let dt = (delta_ms / 1000.0).clamp(0.0, 0.05);
        let accel = STIFFNESS * (self.selected as f64 - self.spring_pos) - DAMPING * self.spring_vel;
        self.spring_vel += accel * dt;
        self.spring_pos += self.spring_vel * dt;
    }

    /// The displayed color this frame; `None` on an empty palette.
    pub fn color(&self) -> Option<Rgba> {
        if self.palette.is_empty() {
            return None;
        }
        let max = self.palette.len() as i64 - 1;
        let index = (self.spring_pos.round() as i64).clamp(0, max) as usize;
        Some(self.palette[index])
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(n: usize) -> Vec<Rgba> {
        (0..n).map(|i| Rgba::rgb(i as u8, 0, 0)).collect()
    }

    #[test]
    fn cycling_palette_length_times_returns_to_start() {
        let mut hue = HueController::new(palette(5));
        for _ in 0..5 {
            hue.cycle();
        }
        assert_eq!(hue.selected(), 0);
    }

    #[test]
    fn empty_palette_is_inert() {
        let mut hue = HueController::new(Vec::new());
        hue.cycle();
        hue.step(16.67);
        assert_eq!(hue.selected(), 0);
        assert_eq!(hue.color(), None);
        assert!(hue.is_empty());
    }

    #[test]
    fn spring_settles_on_the_selected_entry() {
        let mut hue = HueController::new(palette(5));
        hue.cycle();
        hue.cycle();
        for _ in 0..600 {
            hue.step(16.67);
        }
        assert_eq!(hue.color(), Some(Rgba::rgb(2, 0, 0)));
    }

    #[test]
    fn displayed_index_stays_clamped_mid_flight() {
        let mut hue = HueController::new(palette(2));
        hue.cycle();
        // Coarse steps exercise the delta clamp and the index clamp.
        for _ in 0..200 {
            hue.step(100.0);
            assert!(hue.color().is_some());
        }
        assert_eq!(hue.color(), Some(Rgba::rgb(1, 0, 0)));
    }
}

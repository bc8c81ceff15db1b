//! Meteor spawning, physics and eviction.

use byeol_config::MeteorsConfig;

use crate::rng::BackdropRng;

/// Hard cap on the live meteor population.
pub const MAX_METEORS: usize = 50;

/// Opacity lost per millisecond; 0.006 per 16.67ms reference frame.
const FADE_RATE_PER_MS: f64 = 0.006 / 16.67;

/// A transient line-trail entity.
#[derive(Debug, Clone)]
pub struct Meteor {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Trail length in velocity steps.
    pub length: f64,
    /// Monotonically decreasing once spawned.
    pub opacity: f64,
}

impl Meteor {
    /// Tail endpoint of the drawn trail.
    pub fn tail(&self) -> (f64, f64) {
        (self.x + self.vx * self.length, self.y + self.vy * self.length)
    }

    fn off_screen(&self, width: f64, height: f64) -> bool {
        self.x < -self.length
            || self.x > width + self.length
            || self.y < -self.length
            || self.y > height + self.length
    }
}

/// Owns the live meteor list and the spawn timer.
#[derive(Debug, Clone, Default)]
pub struct MeteorManager {
    meteors: Vec<Meteor>,
    last_spawn_ms: f64,
}

impl MeteorManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    /// Spawn one meteor unconditionally. Used when animation starts;
    /// the timed rule goes through [`maybe_spawn`].
    ///
    /// [`maybe_spawn`]: MeteorManager::maybe_spawn
    pub fn spawn(&mut self, width: f64, height: f64, config: &MeteorsConfig, rng: &mut BackdropRng) {
        let angle = config.angle.to_radians();
        let base_speed = 2.0 + rng.unit();
        self.meteors.push(Meteor {
            x: rng.unit() * width,
            y: rng.unit() * height * 0.3,
            vx: angle.cos() * base_speed * config.speed,
            vy: angle.sin() * base_speed * config.speed,
            length: config.length,
            opacity: config.opacity,
        });
        self.enforce_cap();
    }

    /// Apply the timed spawn rule: enabled, dark theme, and the jittered
    /// interval elapsed since the last spawn.
    pub fn maybe_spawn(
        &mut self,
        now_ms: f64,
        width: f64,
        height: f64,
        config: &MeteorsConfig,
        rng: &mut BackdropRng,
        dark: bool,
    ) {
        if !config.enable || !dark {
            return;
        }
        if now_ms - self.last_spawn_ms > config.interval + rng.unit() * 3000.0 {
            self.spawn(width, height, config, rng);
            self.last_spawn_ms = now_ms;
        }
    }

    /// Advance every meteor one rendered frame and prune the dead.
    ///
    /// Position moves one raw velocity step per frame while the fade is
    /// scaled by `delta_ms`; the split matches the observable behavior
    /// of the effect at its reference frame rate (see DESIGN.md).
    pub fn update(&mut self, delta_ms: f64, width: f64, height: f64) {
        self.meteors.retain_mut(|m| {
            m.x += m.vx;
            m.y += m.vy;
            m.opacity -= FADE_RATE_PER_MS * delta_ms;
            m.opacity > 0.0 && !m.off_screen(width, height)
        });
        self.enforce_cap();
    }

    /// Drop all meteors, e.g. when leaving the animating state.
    pub fn clear(&mut self) {
        self.meteors.clear();
    }

    /// Evict oldest-first above the population cap.
    fn enforce_cap(&mut self) {
        if self.meteors.len() > MAX_METEORS {
            let excess = self.meteors.len() - MAX_METEORS;
            self.meteors.drain(..excess);
        }
    }
}

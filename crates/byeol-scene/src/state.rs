//! Backdrop state: the animate/static machine and the per-frame render.

use byeol_config::Config;
use byeol_core::{Rgba, Theme};

use crate::hue::HueController;
use crate::meteor::MeteorManager;
use crate::parallax::{CLUSTER_LAYER, STAR_LAYER, ParallaxTracker};
use crate::rng::BackdropRng;
use crate::scene::Scene;
use crate::surface::Surface;

/// Translucent wash laid over the cleared surface each frame.
const DARK_WASH: Rgba = Rgba::rgba(0, 0, 0, 0.4);
const LIGHT_WASH: Rgba = Rgba::rgba(255, 255, 255, 0.2);

/// Scheduling mode of the backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Continuous frame scheduling.
    Animating,
    /// A single render, then nothing until re-entry or invalidation.
    Static,
}

/// Per-frame inputs owned by the caller: the running timestamp and the
/// externally observed theme.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub now_ms: f64,
    pub theme: Theme,
}

/// The whole backdrop: generated scene, per-frame controllers and the
/// Animating/Static state machine. All mutable per-frame state lives
/// here, exclusively owned by whoever drives [`render`].
///
/// [`render`]: Backdrop::render
#[derive(Debug)]
pub struct Backdrop {
    config: Config,
    rng: BackdropRng,
    scene: Scene,
    parallax: ParallaxTracker,
    hue: HueController,
    meteors: MeteorManager,
    width: f64,
    height: f64,
    mode: Mode,
    animation_disabled: bool,
    reduced_motion: bool,
    /// Theme captured by the one render a Static entry performs;
    /// `None` while that render is still owed.
    static_rendered: Option<Theme>,
    last_frame_ms: Option<f64>,
    torn_down: bool,
}

impl Backdrop {
    /// Build the backdrop and generate the initial scene. Starts
    /// Static when animation is disabled or reduced motion is set.
    pub fn new(
        config: Config,
        width: f64,
        height: f64,
        reduced_motion: bool,
        mut rng: BackdropRng,
    ) -> Self {
        let scene = Scene::generate(width, height, &config, &mut rng);
        let hue = HueController::new(config.visual.hue_options.clone());
        let animation_disabled = config.visual.disable_animation;
        let mut meteors = MeteorManager::new();

        let mode = if animation_disabled || reduced_motion {
            Mode::Static
        } else {
            Mode::Animating
        };
        if mode == Mode::Animating && config.meteors.enable {
            // One meteor is in flight from the moment animation starts.
            meteors.spawn(width, height, &config.meteors, &mut rng);
        }

        Self {
            config,
            rng,
            scene,
            parallax: ParallaxTracker::new(),
            hue,
            meteors,
            width,
            height,
            mode,
            animation_disabled,
            reduced_motion,
            static_rendered: None,
            last_frame_ms: None,
            torn_down: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn animation_disabled(&self) -> bool {
        self.animation_disabled
    }

    /// Latest pointer position in surface coordinates; coalesced to
    /// one processed update per rendered frame.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.parallax.pointer_moved(x, y);
    }

    /// Whether the hue-cycle affordance should be offered.
    pub fn hue_control_active(&self, theme: Theme) -> bool {
        self.config.visual.show_hue_control
            && !self.hue.is_empty()
            && !self.animation_disabled
            && theme.is_dark()
    }

    /// Advance the hue selection when the affordance is active.
    pub fn cycle_hue(&mut self, theme: Theme) {
        if self.hue_control_active(theme) {
            self.hue.cycle();
            // A Static backdrop owes a fresh render with the new wash.
            self.static_rendered = None;
        }
    }

    /// Flip the disable-animation flag, transitioning the mode.
    pub fn toggle_animation(&mut self) {
        self.set_animation_disabled(!self.animation_disabled);
    }

    pub fn set_animation_disabled(&mut self, disabled: bool) {
        if self.animation_disabled == disabled {
            return;
        }
        self.animation_disabled = disabled;
        self.apply_mode();
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        if self.reduced_motion == reduced {
            return;
        }
        self.reduced_motion = reduced;
        self.apply_mode();
    }

    /// Regenerate the scene for new dimensions. Parallax, hue and
    /// meteor state are left untouched; a Static backdrop re-renders
    /// once at the new size.
    pub fn resized(&mut self, width: f64, height: f64) {
        if self.torn_down {
            return;
        }
        self.width = width;
        self.height = height;
        self.scene = Scene::generate(width, height, &self.config, &mut self.rng);
        self.static_rendered = None;
    }

    /// Render one frame. Returns `true` when another frame should be
    /// scheduled; a Static backdrop renders at most once and then
    /// reports `false` until something invalidates it.
    pub fn render(&mut self, surface: &mut Surface, input: FrameInput) -> bool {
        if self.torn_down {
            return false;
        }
        match self.mode {
            Mode::Animating => {
                self.render_animated(surface, input);
                true
            }
            Mode::Static => {
                if self.static_rendered != Some(input.theme) {
                    self.render_static(surface, input.theme);
                    self.static_rendered = Some(input.theme);
                }
                false
            }
        }
    }

    /// Drop scene and meteor state and blank the surface. Idempotent.
    pub fn teardown(&mut self, surface: &mut Surface) {
        self.scene.clear();
        self.meteors.clear();
        surface.clear();
        self.torn_down = true;
    }

    fn apply_mode(&mut self) {
        let next = if self.animation_disabled || self.reduced_motion {
            Mode::Static
        } else {
            Mode::Animating
        };
        if next == self.mode {
            return;
        }
        self.mode = next;
        match next {
            Mode::Static => {
                // Nothing stays scheduled; meteors do not survive the stop.
                self.meteors.clear();
                self.static_rendered = None;
            }
            Mode::Animating => {
                self.last_frame_ms = None;
                if self.config.meteors.enable {
                    self.meteors
                        .spawn(self.width, self.height, &self.config.meteors, &mut self.rng);
                }
            }
        }
    }

    fn render_animated(&mut self, surface: &mut Surface, input: FrameInput) {
        let visual = &self.config.visual;
        self.parallax.step(
            self.width,
            self.height,
            visual.parallax_factor,
            visual.parallax_smoothing,
        );
        let (offset_x, offset_y) = self.parallax.offset();

        let delta_ms = match self.last_frame_ms {
            Some(prev) => (input.now_ms - prev).max(0.0),
            None => 0.0,
        };
        self.last_frame_ms = Some(input.now_ms);

        let dark = input.theme.is_dark();
        self.hue.step(delta_ms);

        self.clear_and_tint(surface, input.theme);

        // Stars, twinkling against the running timestamp.
        let time = input.now_ms / self.config.stars.twinkle_decrease;
        for star in &self.scene.stars {
            let opacity = 0.5 + 0.5 * (time + star.twinkle).sin();
            surface.fill_circle(
                star.x + offset_x * STAR_LAYER,
                star.y + offset_y * STAR_LAYER,
                star.radius,
                0.0,
                Rgba::WHITE.with_alpha(opacity as f32),
            );
        }

        // Clusters rotate; planets advance and draw only in the dark.
        let cluster_color = self.config.clusters.color;
        let planets = &self.config.planets;
        for cluster in &mut self.scene.clusters {
            cluster.angle += cluster.speed;
            for star in &mut cluster.stars {
                let angle = cluster.angle + star.angle;
                let x = cluster.cx + angle.cos() * star.radius;
                let y = cluster.cy + angle.sin() * star.radius;
                surface.fill_circle(
                    x + offset_x * CLUSTER_LAYER,
                    y + offset_y * CLUSTER_LAYER,
                    star.size,
                    0.0,
                    cluster_color,
                );

                if let Some(planet) = &mut star.planet {
                    if dark {
                        planet.orbit_angle += delta_ms * planets.orbit_speed;
                        let px = x + planet.orbit_angle.cos() * planet.orbit_radius;
                        let py = y + planet.orbit_angle.sin() * cluster.eccentricity;
                        surface.fill_circle(
                            px + offset_x * CLUSTER_LAYER,
                            py + offset_y * CLUSTER_LAYER,
                            planets.size,
                            planets.glow,
                            planet.color,
                        );
                    }
                }
            }
        }

        // Meteors: spawn rule, then draw and advance.
        let meteors_config = &self.config.meteors;
        self.meteors.maybe_spawn(
            input.now_ms,
            self.width,
            self.height,
            meteors_config,
            &mut self.rng,
            dark,
        );
        if meteors_config.enable {
            for meteor in self.meteors.meteors() {
                let stops: Vec<Rgba> = meteors_config
                    .colors
                    .iter()
                    .map(|c| c.with_alpha(meteor.opacity.clamp(0.0, 1.0) as f32))
                    .collect();
                surface.stroke_line(
                    (meteor.x, meteor.y),
                    meteor.tail(),
                    meteors_config.trail_width,
                    meteors_config.glow,
                    &stops,
                );
            }
            self.meteors.update(delta_ms, self.width, self.height);
        }
    }

    /// The single render a Static entry performs: wash, hue, stars at
    /// full opacity. No meteors, no cluster motion.
    fn render_static(&mut self, surface: &mut Surface, theme: Theme) {
        self.clear_and_tint(surface, theme);
        for star in &self.scene.stars {
            surface.fill_circle(star.x, star.y, star.radius, 0.0, Rgba::WHITE);
        }
    }

    /// Clear, lay the theme wash, then composite the hue additively.
    fn clear_and_tint(&mut self, surface: &mut Surface, theme: Theme) {
        surface.clear();
        surface.fill(if theme.is_dark() { DARK_WASH } else { LIGHT_WASH });

        let suppressed = self.hue.is_empty() || self.animation_disabled || !theme.is_dark();
        if !suppressed {
            if let Some(hue) = self.hue.color() {
                surface.fill_lighter(hue);
            }
        }
    }
}

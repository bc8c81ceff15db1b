//! Procedural generation of stars and star clusters.

use byeol_config::Config;
use byeol_core::Rgba;

use crate::rng::BackdropRng;

/// A background star. Generated once per scene build, read-only after.
#[derive(Debug, Clone)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Twinkle phase offset in radians.
    pub twinkle: f64,
}

/// A planet orbiting a cluster star.
#[derive(Debug, Clone)]
pub struct Planet {
    pub orbit_radius: f64,
    /// Advanced by delta-time while the theme is dark.
    pub orbit_angle: f64,
    pub color: Rgba,
}

/// A star belonging to a cluster, positioned by angular offset.
#[derive(Debug, Clone)]
pub struct ClusterStar {
    /// Angular offset from the cluster's rotation angle.
    pub angle: f64,
    /// Distance from the cluster center.
    pub radius: f64,
    pub size: f64,
    pub planet: Option<Planet>,
}

/// A rotating group of stars around a shared center.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub cx: f64,
    pub cy: f64,
    /// Rotation angle, advanced every animated frame.
    pub angle: f64,
    /// Angular speed per frame.
    pub speed: f64,
    /// Vertical half-extent of planet orbits around this cluster.
    pub eccentricity: f64,
    pub stars: Vec<ClusterStar>,
}

/// The generated entity sets for one viewport size.
///
/// Counts are fixed between builds; a resize or reconfiguration
/// discards the whole scene and generates a fresh one.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub stars: Vec<Star>,
    pub clusters: Vec<Cluster>,
}

impl Scene {
    /// Build a scene for the given viewport. Well-formed for any
    /// non-negative counts; degenerate numeric config is not rejected.
    pub fn generate(width: f64, height: f64, config: &Config, rng: &mut BackdropRng) -> Self {
        let stars = (0..config.stars.count)
            .map(|_| Star {
                x: rng.unit() * width,
                y: rng.unit() * height,
                radius: rng.range(config.stars.min_radius, config.stars.max_radius),
                twinkle: rng.angle(),
            })
            .collect();

        let clusters = (0..config.clusters.count)
            .map(|_| Cluster {
                cx: rng.unit() * width,
                cy: rng.unit() * height,
                angle: rng.angle(),
                speed: 0.001 + rng.unit() * 0.002,
                eccentricity: 4.0 + rng.unit() * 2.0,
                stars: (0..config.clusters.star_count)
                    .map(|_| generate_cluster_star(config, rng))
                    .collect(),
            })
            .collect();

        Self { stars, clusters }
    }

    /// Drop all generated entities.
    pub fn clear(&mut self) {
        self.stars.clear();
        self.clusters.clear();
    }
}

fn generate_cluster_star(config: &Config, rng: &mut BackdropRng) -> ClusterStar {
    let planets = &config.planets;
    let angle = rng.angle();
    let radius = 20.0 + rng.unit() * config.clusters.radius;
    let size = 0.5 + rng.unit() * config.clusters.size;
    let planet = if rng.unit() > planets.density {
        Some(Planet {
            orbit_radius: rng.range(planets.orbit_radius_range[0], planets.orbit_radius_range[1]),
            orbit_angle: rng.angle(),
            color: Rgba::from_hsl((rng.unit() * 360.0).floor() as f32, 0.5, 0.7),
        })
    } else {
        None
    };
    ClusterStar {
        angle,
        radius,
        size,
        planet,
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use super::*;

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn stars_fall_inside_the_viewport() {
        let mut rng = BackdropRng::seeded(3);
        let config = config();
        let scene = Scene::generate(1024.0, 768.0, &config, &mut rng);
        assert_eq!(scene.stars.len(), config.stars.count);
        for star in &scene.stars {
            assert!((0.0..1024.0).contains(&star.x));
            assert!((0.0..768.0).contains(&star.y));
            assert!(star.radius >= config.stars.min_radius);
            assert!(star.radius <= config.stars.max_radius);
            assert!((0.0..TAU).contains(&star.twinkle));
        }
    }

    #[test]
    fn two_star_scene_on_800_by_600() {
        let mut rng = BackdropRng::seeded(11);
        let mut config = config();
        config.stars.count = 2;
        let scene = Scene::generate(800.0, 600.0, &config, &mut rng);
        assert_eq!(scene.stars.len(), 2);
        for star in &scene.stars {
            assert!((0.0..800.0).contains(&star.x));
            assert!((0.0..600.0).contains(&star.y));
        }
    }

    #[test]
    fn cluster_star_orbit_radii_stay_in_band() {
        let mut rng = BackdropRng::seeded(5);
        let config = config();
        let scene = Scene::generate(640.0, 480.0, &config, &mut rng);
        assert_eq!(scene.clusters.len(), config.clusters.count);
        for cluster in &scene.clusters {
            assert_eq!(cluster.stars.len(), config.clusters.star_count);
            assert!((0.0..640.0).contains(&cluster.cx));
            assert!((0.0..480.0).contains(&cluster.cy));
            assert!(cluster.speed >= 0.001 && cluster.speed < 0.003);
            for star in &cluster.stars {
                assert!(star.radius >= 20.0);
                assert!(star.radius < config.clusters.radius + 20.0);
                if let Some(planet) = &star.planet {
                    assert!(planet.orbit_radius >= config.planets.orbit_radius_range[0]);
                    assert!(planet.orbit_radius < config.planets.orbit_radius_range[1]);
                    // Any hue at 50% saturation, 70% lightness keeps every
                    // channel inside the 0.55..0.85 band.
                    assert_eq!(planet.color.a, 1.0);
                    for channel in [planet.color.r, planet.color.g, planet.color.b] {
                        assert!((140..=217).contains(&channel));
                    }
                }
            }
        }
    }

    #[test]
    fn planet_fraction_tracks_density() {
        let mut rng = BackdropRng::seeded(9);
        let mut config = config();
        config.clusters.count = 40;
        config.clusters.star_count = 250;
        let scene = Scene::generate(800.0, 600.0, &config, &mut rng);
        let total: usize = scene.clusters.iter().map(|c| c.stars.len()).sum();
        let with_planet: usize = scene
            .clusters
            .iter()
            .flat_map(|c| &c.stars)
            .filter(|s| s.planet.is_some())
            .count();
        let fraction = with_planet as f64 / total as f64;
        let expected = 1.0 - config.planets.density;
        assert!(
            (fraction - expected).abs() < 0.01,
            "fraction {fraction} too far from {expected}"
        );
    }

    #[test]
    fn zero_counts_yield_an_empty_scene() {
        let mut rng = BackdropRng::seeded(1);
        let mut config = config();
        config.stars.count = 0;
        config.clusters.count = 0;
        let scene = Scene::generate(100.0, 100.0, &config, &mut rng);
        assert!(scene.stars.is_empty());
        assert!(scene.clusters.is_empty());
    }

    #[test]
    fn regeneration_produces_distinct_layouts() {
        let mut rng = BackdropRng::from_entropy();
        let config = config();
        let a = Scene::generate(800.0, 600.0, &config, &mut rng);
        let b = Scene::generate(800.0, 600.0, &config, &mut rng);
        let moved = a
            .stars
            .iter()
            .zip(&b.stars)
            .any(|(s, t)| s.x != t.x || s.y != t.y);
        assert!(moved);
    }
}

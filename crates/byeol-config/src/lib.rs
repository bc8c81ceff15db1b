//! Configuration for the byeol starfield backdrop.
//!
//! Every field is optional in the TOML file; missing sections and
//! fields fall back to the defaults below. Malformed numeric values
//! (say, a negative star count) are caller error: the scene renders
//! something undefined but never panics over them.

use std::fs;
use std::path::PathBuf;

use byeol_core::{Position, Rgba};
use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};

/// Top-level backdrop configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub stars: StarsConfig,
    pub clusters: ClustersConfig,
    pub planets: PlanetsConfig,
    pub meteors: MeteorsConfig,
    pub visual: VisualConfig,
}

/// Background star field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarsConfig {
    /// Number of stars generated per scene build.
    pub count: usize,
    /// Divisor applied to the running timestamp for twinkle phase.
    pub twinkle_decrease: f64,
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            count: 150,
            twinkle_decrease: 800.0,
            min_radius: 0.5,
            max_radius: 2.0,
        }
    }
}

/// Rotating star clusters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClustersConfig {
    pub count: usize,
    /// Stars per cluster.
    pub star_count: usize,
    pub color: Rgba,
    /// Spread of cluster-star orbit radii.
    pub radius: f64,
    /// Upper spread of cluster-star sizes.
    pub size: f64,
}

impl Default for ClustersConfig {
    fn default() -> Self {
        Self {
            count: 3,
            star_count: 25,
            color: Rgba::WHITE,
            radius: 60.0,
            size: 1.5,
        }
    }
}

/// Planets orbiting a subset of cluster stars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetsConfig {
    pub size: f64,
    pub glow: f64,
    /// Orbit angle advance per millisecond of frame delta.
    pub orbit_speed: f64,
    pub orbit_radius_range: [f64; 2],
    /// A cluster star hosts a planet with probability 1 - density.
    pub density: f64,
}

impl Default for PlanetsConfig {
    fn default() -> Self {
        Self {
            size: 1.6,
            glow: 4.0,
            orbit_speed: 0.001,
            orbit_radius_range: [4.0, 7.0],
            density: 0.92,
        }
    }
}

/// Meteor trails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteorsConfig {
    pub enable: bool,
    /// Minimum milliseconds between spawns; jitter up to 3000ms is added.
    pub interval: f64,
    /// Trail length in velocity steps.
    pub length: f64,
    pub glow: f64,
    /// Gradient stops sampled evenly from head to tail.
    pub colors: Vec<Rgba>,
    pub speed: f64,
    pub trail_width: f64,
    /// Travel direction in degrees.
    pub angle: f64,
    /// Initial opacity; values above 1 extend the visible lifetime.
    pub opacity: f64,
}

impl Default for MeteorsConfig {
    fn default() -> Self {
        Self {
            enable: true,
            interval: 4000.0,
            length: 80.0,
            glow: 8.0,
            colors: vec![
                Rgba::WHITE,
                Rgba::rgba(173, 216, 230, 0.6),
                Rgba::rgba(255, 255, 255, 0.0),
            ],
            speed: 1.0,
            trail_width: 2.5,
            angle: 135.0,
            opacity: 2.0,
        }
    }
}

/// Visual behavior: hue palette, parallax, animation toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub disable_animation: bool,
    pub hue_options: Vec<Rgba>,
    pub parallax_factor: f64,
    pub parallax_smoothing: f64,
    pub show_hue_control: bool,
    pub mobile_position: Position,
    pub desktop_position: Position,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            disable_animation: false,
            hue_options: vec![
                Rgba::rgba(220, 200, 255, 0.04),
                Rgba::rgba(255, 220, 200, 0.05),
                Rgba::rgba(200, 255, 240, 0.04),
                Rgba::rgba(255, 255, 200, 0.04),
                Rgba::rgba(200, 230, 255, 0.04),
            ],
            parallax_factor: 20.0,
            parallax_smoothing: 0.05,
            show_hue_control: true,
            mobile_position: Position::Fixed,
            desktop_position: Position::Fixed,
        }
    }
}

impl Config {
    /// Path of the user config file, if a home directory is known.
    pub fn path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "byeol")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the user config file, falling back to defaults when absent.
    pub fn load() -> color_eyre::Result<Self> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&text).wrap_err_with(|| format!("failed to parse {}", path.display()))
    }

    /// Parse a TOML document into a config.
    pub fn from_toml(text: &str) -> color_eyre::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.stars.count, 150);
        assert_eq!(config.stars.twinkle_decrease, 800.0);
        assert_eq!(config.clusters.count, 3);
        assert_eq!(config.clusters.star_count, 25);
        assert_eq!(config.planets.orbit_radius_range, [4.0, 7.0]);
        assert_eq!(config.planets.density, 0.92);
        assert_eq!(config.meteors.interval, 4000.0);
        assert_eq!(config.meteors.angle, 135.0);
        assert_eq!(config.meteors.colors.len(), 3);
        assert_eq!(config.visual.hue_options.len(), 5);
        assert_eq!(config.visual.parallax_smoothing, 0.05);
    }

    #[test]
    fn empty_document_is_all_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_sections_override_only_named_fields() {
        let config = Config::from_toml(
            r##"
            [stars]
            count = 10

            [meteors]
            colors = ["#ff0000", "rgba(0, 0, 255, 0.5)"]

            [visual]
            mobile_position = "absolute"
            "##,
        )
        .unwrap();
        assert_eq!(config.stars.count, 10);
        assert_eq!(config.stars.max_radius, 2.0);
        assert_eq!(config.meteors.colors[0], Rgba::rgb(255, 0, 0));
        assert_eq!(config.meteors.colors[1], Rgba::rgba(0, 0, 255, 0.5));
        assert_eq!(config.visual.mobile_position, Position::Absolute);
        assert_eq!(config.visual.desktop_position, Position::Fixed);
    }

    #[test]
    fn bad_color_string_is_a_parse_error() {
        assert!(Config::from_toml("[clusters]\ncolor = \"not-a-color\"").is_err());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }
}

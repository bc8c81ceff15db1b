//! Core types shared across the byeol workspace.
//!
//! This crate holds the leaf types the config and scene crates both
//! need: the dark/light theme flag, the overlay positioning mode and
//! the [`Rgba`] color value with its parsing and compositing helpers.

mod color;

pub use color::Rgba;

use serde::{Deserialize, Serialize};

/// Presentation theme consumed by the backdrop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Toggle between dark and light.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Whether the dark theme is active.
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Positioning mode for the backdrop overlay and its controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Fixed,
    Absolute,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_toggles_both_ways() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert!(Theme::Dark.is_dark());
        assert!(!Theme::Light.is_dark());
    }
}

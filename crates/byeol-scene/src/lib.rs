//! Procedural starfield scene and animation state for byeol.
//!
//! This crate owns the backdrop's moving parts: scene generation,
//! pointer parallax, hue cross-fading, meteor physics, the software
//! drawing surface and the animate/static scheduling state machine.
//! The binary crate wires these to the terminal.

mod hue;
mod meteor;
mod parallax;
mod rng;
mod scene;
mod state;
mod surface;

pub use hue::HueController;
pub use meteor::{MAX_METEORS, Meteor, MeteorManager};
pub use parallax::{CLUSTER_LAYER, ParallaxTracker, STAR_LAYER};
pub use rng::BackdropRng;
pub use scene::{Cluster, ClusterStar, Planet, Scene, Star};
pub use state::{Backdrop, FrameInput, Mode};
pub use surface::Surface;

//! finrings - AI in corporate finance as an interactive hub-and-rings scene.
//!
//! The crate splits into a headless interaction core ([`stage`]) that owns all
//! state and timing, a content catalog ([`models`]), and a Bevy viewer
//! ([`visualization`]) that renders whatever the core decides.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod stage;
pub mod visualization;

//! ECS systems for the viewer.
//!
//! Systems are functions that operate on components and resources each frame.
//! Input systems translate window events into stage events; the remaining
//! systems advance the stage and copy its scene model onto entities.

pub mod camera;
pub mod interaction;
pub mod sync;
pub mod ui;

pub use camera::{camera_orbit_system, sync_camera_system};
pub use interaction::{button_system, keyboard_system, pointer_system, resize_system};
pub use sync::{sync_scene_system, tick_stage_system, update_outline_system};
pub use ui::{update_button_colors_system, update_info_panel_system, update_labels_system};

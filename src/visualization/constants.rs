//! Visual constants for the viewer.

use bevy::prelude::*;

use crate::models::Rgb;

// =============================================================================
// Colors
// =============================================================================

/// Window clear color.
pub const COLOR_BACKGROUND: Color = Color::srgb(0.02, 0.03, 0.06);
/// Panel and button background.
pub const COLOR_PANEL: Color = Color::srgba(0.1, 0.1, 0.15, 0.9);
pub const COLOR_BUTTON: Color = Color::srgba(0.15, 0.17, 0.24, 0.9);
pub const COLOR_BUTTON_HOVER: Color = Color::srgba(0.22, 0.25, 0.35, 0.95);
pub const COLOR_BUTTON_ACTIVE: Color = Color::srgba(0.3, 0.42, 0.6, 0.95);
pub const COLOR_TEXT: Color = Color::srgb(0.85, 0.85, 0.85);
pub const COLOR_TEXT_DIM: Color = Color::srgb(0.65, 0.65, 0.7);
/// Emphasized runs in panel facts.
pub const COLOR_TEXT_EMPHASIS: Color = Color::srgb(1.0, 0.84, 0.4);
pub const COLOR_OUTLINE: Color = Color::srgba(1.0, 1.0, 1.0, 0.35);

// =============================================================================
// Sizing
// =============================================================================

/// Label font size at a label scale height of 1.
pub const LABEL_FONT_PER_UNIT: f32 = 14.0;
/// Outline shell radius relative to the outlined object's hit radius.
pub const OUTLINE_SCALE: f32 = 1.4;
/// Orbit speed in radians per pixel.
pub const ORBIT_SENSITIVITY: f32 = 0.01;
/// Zoom step per scroll line.
pub const ZOOM_STEP: f32 = 1.0;

// =============================================================================
// Helpers
// =============================================================================

/// Bevy color of a catalog color.
pub fn color_of(rgb: Rgb) -> Color {
    let [r, g, b] = rgb.components();
    Color::srgb_u8(r, g, b)
}

/// Emissive term of a catalog color at `intensity`.
pub fn emissive_of(rgb: Rgb, intensity: f32) -> LinearRgba {
    color_of(rgb).to_linear() * intensity
}

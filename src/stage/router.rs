//! Input events understood by the stage.

use super::scene::PickRay;
use crate::models::LayerId;

/// Discrete user input, already translated out of window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A layer button or key.
    Activate(LayerId),
    /// The reset button or key.
    Reset,
    /// Pointer moved; the ray goes from the camera through the cursor.
    PointerMoved(PickRay),
    Resized { width: f32, height: f32 },
}

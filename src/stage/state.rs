//! Session-wide activation state.

use crate::models::{LayerId, SubItemId};

/// Which layer is active and which of its sub-items is hovered.
///
/// `hovered`, when set, always belongs to `active_layer`. Only the layer
/// controller writes `active_layer` and only the hover controller writes
/// `hovered`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivationState {
    pub(crate) active_layer: Option<LayerId>,
    pub(crate) hovered: Option<SubItemId>,
}

impl ActivationState {
    pub fn active_layer(&self) -> Option<LayerId> {
        self.active_layer
    }

    pub fn hovered(&self) -> Option<SubItemId> {
        self.hovered
    }

    pub fn is_idle(&self) -> bool {
        self.active_layer.is_none()
    }
}

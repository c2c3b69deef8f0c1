//! ECS components for the viewer.
//!
//! Components are data attached to entities. Each entity can have
//! any combination of components.

use bevy::prelude::*;

use crate::models::LayerId;
use crate::stage::ObjectId;

/// Mesh entity mirroring one scene object.
#[derive(Component)]
pub struct SceneEntity {
    pub object: ObjectId,
}

/// UI text following a label object in screen space.
#[derive(Component)]
pub struct SceneLabel {
    pub object: ObjectId,
}

/// Shell drawn around the outlined object.
#[derive(Component)]
pub struct OutlineShell;

/// Marker component for the info panel container.
#[derive(Component)]
pub struct InfoPanel;

/// Marker component for the info panel text content.
#[derive(Component)]
pub struct InfoPanelText;

/// Button activating a layer.
#[derive(Component)]
pub struct LayerButton(pub LayerId);

/// Button returning to the overview.
#[derive(Component)]
pub struct ResetButton;

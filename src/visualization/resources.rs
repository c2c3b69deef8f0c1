//! ECS resources for viewer state.
//!
//! Resources are global singleton data - there's only one instance
//! of each resource in the entire app.

use bevy::prelude::*;

use crate::stage::Stage;

/// The interaction core driven by the viewer.
#[derive(Resource)]
pub struct StageRes(pub Stage);

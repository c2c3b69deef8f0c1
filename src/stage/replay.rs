//! Scripted, frame-stepped sessions.
//!
//! ```json
//! {
//!   "frame_ms": 16,
//!   "until_ms": 6000,
//!   "steps": [
//!     { "at_ms": 0, "action": { "type": "activate", "layer": "automation" } },
//!     { "at_ms": 2500, "action": { "type": "hover", "item": "Invoice Processing" } },
//!     { "at_ms": 4000, "action": { "type": "reset" } }
//!   ]
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::router::InputEvent;
use super::{Stage, StageSnapshot};
use crate::error::AppError;
use crate::models::SubItemId;

fn default_frame_ms() -> u64 {
    16
}

/// A replay script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Fixed tick length.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Keep ticking until this time even after the last step.
    #[serde(default)]
    pub until_ms: Option<u64>,
    pub steps: Vec<ReplayStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayStep {
    pub at_ms: u64,
    pub action: ReplayAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayAction {
    Activate { layer: String },
    Reset,
    /// Point at a sub-item, by its text.
    Hover { item: String },
    /// Move the pointer off every object.
    PointerAway,
    Resize { width: f32, height: f32 },
}

// Actions with their keys resolved against the stage's catalog.
#[derive(Debug, Clone, Copy)]
enum Resolved {
    Event(InputEvent),
    Hover(SubItemId),
    PointerAway,
}

impl ReplayScript {
    pub fn parse(json: &str) -> Result<Self, AppError> {
        let script: ReplayScript = serde_json::from_str(json)?;
        if script.frame_ms == 0 {
            return Err(AppError::InvalidScript("frame_ms must be positive".into()));
        }
        Ok(script)
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        Self::parse(&json)
    }

    /// Time of the last step, or `until_ms` if later.
    pub fn end_ms(&self) -> u64 {
        let last = self.steps.iter().map(|s| s.at_ms).max().unwrap_or(0);
        self.until_ms.map_or(last, |until| until.max(last))
    }

    /// Play the script against `stage` and return its final snapshot.
    ///
    /// All layer and item names are resolved before the first tick, so an
    /// unknown name leaves the stage untouched.
    pub fn run(&self, stage: &mut Stage) -> Result<StageSnapshot, AppError> {
        let mut steps = self
            .steps
            .iter()
            .map(|step| Ok((step.at_ms, self.resolve(stage, &step.action)?)))
            .collect::<Result<Vec<_>, AppError>>()?;
        steps.sort_by_key(|(at, _)| *at);

        let frame = Duration::from_millis(self.frame_ms);
        let end = Duration::from_millis(self.end_ms());
        let start = stage.clock();
        tracing::info!(
            "Replaying {} step(s) over {:?} in {:?} frames",
            steps.len(),
            end,
            frame
        );

        let mut next = 0;
        loop {
            let now = stage.clock() - start;
            while let Some((at, action)) = steps.get(next) {
                if Duration::from_millis(*at) > now {
                    break;
                }
                tracing::debug!("Step at {}ms: {:?}", at, action);
                Self::apply(stage, *action);
                next += 1;
            }
            if now >= end && next >= steps.len() {
                break;
            }
            stage.tick(frame);
        }

        Ok(stage.snapshot())
    }

    fn resolve(&self, stage: &Stage, action: &ReplayAction) -> Result<Resolved, AppError> {
        let catalog = stage.catalog();
        Ok(match action {
            ReplayAction::Activate { layer } => {
                Resolved::Event(InputEvent::Activate(catalog.layer_id(layer)?))
            }
            ReplayAction::Reset => Resolved::Event(InputEvent::Reset),
            ReplayAction::Hover { item } => Resolved::Hover(catalog.sub_item_id(item)?),
            ReplayAction::PointerAway => Resolved::PointerAway,
            ReplayAction::Resize { width, height } => Resolved::Event(InputEvent::Resized {
                width: *width,
                height: *height,
            }),
        })
    }

    fn apply(stage: &mut Stage, action: Resolved) {
        let event = match action {
            Resolved::Event(event) => event,
            Resolved::Hover(sub_item) => InputEvent::PointerMoved(stage.ray_onto(sub_item)),
            Resolved::PointerAway => InputEvent::PointerMoved(stage.ray_away()),
        };
        stage.dispatch(event);
    }
}

//! Overlap-checked placement and relocation.
//!
//! The engine decides whether a candidate pose is legal and, when it is,
//! mutates the registry and queues the matching visual command. Candidate
//! poses are the raw tracked surface poses; the engine applies the configured
//! pitch offset before anything is stored or drawn.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use crate::config::{PlacementConfig, TemplateId};
use crate::engine::Command;
use crate::pose::Pose;
use crate::registry::{ObjectHandle, PlacedObjectRegistry};

/// Why a placement or relocation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    /// Another object sits closer than the minimum placement distance.
    #[error("too close to placed object {blocker}")]
    TooClose { blocker: ObjectHandle },
    /// No surface is being tracked, so there is no pose to place at.
    #[error("no valid surface pose")]
    InvalidPose,
    /// The object being moved is not in the registry.
    #[error("unknown object {handle}")]
    UnknownObject { handle: ObjectHandle },
    /// The configuration carries no template to instantiate.
    #[error("no object template configured")]
    NoTemplate,
}

/// Placement rules plus the currently active template.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    templates: Vec<TemplateId>,
    active: usize,
    min_distance: f64,
    pitch_offset_degrees: f64,
}

impl PlacementEngine {
    #[must_use]
    pub fn new(config: &PlacementConfig) -> Self {
        Self {
            templates: config.templates.clone(),
            active: 0,
            min_distance: config.min_placement_distance,
            pitch_offset_degrees: config.pitch_offset_degrees,
        }
    }

    /// Template instantiated by the next successful placement.
    #[must_use]
    pub fn active_template(&self) -> Option<&TemplateId> {
        self.templates.get(self.active)
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    #[must_use]
    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    /// Switch the active template. Returns false, leaving it unchanged, when
    /// `index` is out of range.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.templates.len() {
            return false;
        }
        self.active = index;
        true
    }

    /// World pose an object takes when placed on `surface`.
    #[must_use]
    pub fn world_pose(&self, surface: &Pose) -> Pose {
        surface.pitched(self.pitch_offset_degrees)
    }

    /// Place a new object on `surface` unless it would overlap an existing one.
    pub fn try_place(
        &self,
        surface: &Pose,
        registry: &mut PlacedObjectRegistry,
        commands: &mut Vec<Command>,
    ) -> Result<ObjectHandle, Rejected> {
        if let Some(blocker) = registry.nearest_within(surface.position, self.min_distance) {
            return Err(Rejected::TooClose { blocker });
        }
        let Some(template) = self.active_template() else {
            return Err(Rejected::NoTemplate);
        };

        let pose = self.world_pose(surface);
        let handle = registry.add(pose);
        commands.push(Command::Instantiate { handle, template: template.clone(), pose });
        Ok(handle)
    }

    /// Move `handle` onto `surface` unless another object is in the way.
    /// The moving object never blocks itself.
    pub fn try_relocate(
        &self,
        handle: ObjectHandle,
        surface: &Pose,
        registry: &mut PlacedObjectRegistry,
        commands: &mut Vec<Command>,
    ) -> Result<(), Rejected> {
        if !registry.contains(&handle) {
            return Err(Rejected::UnknownObject { handle });
        }
        if let Some(blocker) = registry.nearest_within_excluding(surface.position, self.min_distance, Some(handle)) {
            return Err(Rejected::TooClose { blocker });
        }

        let pose = self.world_pose(surface);
        registry.set_position(&handle, pose);
        commands.push(Command::MoveVisual { handle, pose });
        Ok(())
    }
}

//! Pose values and the tracker seam that produces them.
//!
//! A [`Pose`] is an opaque position + orientation pair. It is produced once
//! per frame by a [`PoseTracker`] and read everywhere else. When no surface is
//! under the screen centre the tracker yields `None`, so an invalid pose can
//! never be read by accident.

#[cfg(test)]
#[path = "pose_test.rs"]
mod pose_test;

use glam::{DQuat, DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::consts::VIEWPORT_CENTER;

/// A world-space position and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    pub rotation: DQuat,
}

impl Pose {
    #[must_use]
    pub fn new(position: DVec3, rotation: DQuat) -> Self {
        Self { position, rotation }
    }

    /// A pose at `position` with identity rotation.
    #[must_use]
    pub fn at(position: DVec3) -> Self {
        Self { position, rotation: DQuat::IDENTITY }
    }

    /// Euclidean distance between the two positions. Orientation is ignored.
    #[must_use]
    pub fn distance(&self, other: &Pose) -> f64 {
        self.position.distance(other.position)
    }

    /// This pose with its rotation followed by a local pitch of `degrees`.
    #[must_use]
    pub fn pitched(&self, degrees: f64) -> Self {
        Self {
            position: self.position,
            rotation: self.rotation * DQuat::from_rotation_x(degrees.to_radians()),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(DVec3::ZERO)
    }
}

/// Source of the per-frame surface pose under the screen centre.
///
/// Called once per frame (or once per tap evaluation). Returns `None` when no
/// surface is detected.
pub trait PoseTracker {
    fn sample(&mut self) -> Option<Pose>;
}

/// A [`PoseTracker`] over a host hit-test function.
///
/// The hit-test receives a screen-space point and returns every surface hit
/// along the ray, nearest first. The tracker always casts through the centre
/// of the viewport and keeps only the first hit.
pub struct RaycastTracker<F> {
    raycast: F,
    viewport: DVec2,
}

impl<F> RaycastTracker<F>
where
    F: FnMut(DVec2) -> Vec<Pose>,
{
    /// Wrap `raycast` for a viewport of `width` x `height` screen pixels.
    #[must_use]
    pub fn new(raycast: F, width: f64, height: f64) -> Self {
        Self { raycast, viewport: DVec2::new(width, height) }
    }

    /// Update the viewport size after a resize or rotation.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = DVec2::new(width, height);
    }

    /// Screen-space point the tracker raycasts through.
    #[must_use]
    pub fn screen_center(&self) -> DVec2 {
        self.viewport * VIEWPORT_CENTER
    }
}

impl<F> PoseTracker for RaycastTracker<F>
where
    F: FnMut(DVec2) -> Vec<Pose>,
{
    fn sample(&mut self) -> Option<Pose> {
        let center = self.screen_center();
        (self.raycast)(center).into_iter().next()
    }
}

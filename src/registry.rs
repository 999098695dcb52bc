//! Placed-object registry: the ordered store of everything anchored in the world.
//!
//! Objects are kept in insertion order. Proximity queries scan that order and
//! return the first match, so the oldest object within range wins both the
//! overlap check and selection lookup. The scan is linear; object counts in a
//! single session are small.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use glam::DVec3;
use serde::Serialize;
use uuid::Uuid;

use crate::pose::Pose;

/// Opaque identifier for a placed object. Unique for the object's lifetime.
pub type ObjectHandle = Uuid;

/// A single placed object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedObject {
    /// Identifier handed out by [`PlacedObjectRegistry::add`].
    pub handle: ObjectHandle,
    /// World pose of the object, including orientation correction.
    pub pose: Pose,
}

/// Ordered store of placed objects.
#[derive(Debug, Default)]
pub struct PlacedObjectRegistry {
    objects: Vec<PlacedObject>,
}

impl PlacedObjectRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Append an object at `pose` and return its new handle.
    pub fn add(&mut self, pose: Pose) -> ObjectHandle {
        let handle = Uuid::new_v4();
        self.objects.push(PlacedObject { handle, pose });
        handle
    }

    /// Remove an object, returning it if it was present. Absent handles are a no-op.
    pub fn remove(&mut self, handle: &ObjectHandle) -> Option<PlacedObject> {
        let index = self.objects.iter().position(|o| o.handle == *handle)?;
        Some(self.objects.remove(index))
    }

    /// Remove and return the most recently added object.
    pub fn remove_last(&mut self) -> Option<PlacedObject> {
        self.objects.pop()
    }

    /// First object in registry order whose position is strictly closer than
    /// `radius` to `position`.
    #[must_use]
    pub fn nearest_within(&self, position: DVec3, radius: f64) -> Option<ObjectHandle> {
        self.nearest_within_excluding(position, radius, None)
    }

    /// Like [`nearest_within`](Self::nearest_within), skipping `exclude`.
    #[must_use]
    pub fn nearest_within_excluding(
        &self,
        position: DVec3,
        radius: f64,
        exclude: Option<ObjectHandle>,
    ) -> Option<ObjectHandle> {
        self.scan(position, radius, exclude).map(|o| o.handle)
    }

    /// The object [`nearest_within`](Self::nearest_within) would pick, with its pose.
    #[must_use]
    pub fn object_within(&self, position: DVec3, radius: f64) -> Option<&PlacedObject> {
        self.scan(position, radius, None)
    }

    fn scan(&self, position: DVec3, radius: f64, exclude: Option<ObjectHandle>) -> Option<&PlacedObject> {
        self.objects
            .iter()
            .filter(|o| Some(o.handle) != exclude)
            .find(|o| o.pose.position.distance(position) < radius)
    }

    /// Current pose of an object.
    #[must_use]
    pub fn position_of(&self, handle: &ObjectHandle) -> Option<Pose> {
        self.get(handle).map(|o| o.pose)
    }

    /// Move an object. Returns false if the handle is unknown.
    pub fn set_position(&mut self, handle: &ObjectHandle, pose: Pose) -> bool {
        let Some(obj) = self.objects.iter_mut().find(|o| o.handle == *handle) else {
            return false;
        };
        obj.pose = pose;
        true
    }

    /// Look up an object by handle.
    #[must_use]
    pub fn get(&self, handle: &ObjectHandle) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.handle == *handle)
    }

    /// Whether `handle` names a live object.
    #[must_use]
    pub fn contains(&self, handle: &ObjectHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Objects in registry (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedObject> {
        self.objects.iter()
    }

    /// Number of placed objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if nothing has been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

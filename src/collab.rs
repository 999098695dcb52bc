//! Collaborator seams: the outside systems the engine drives.
//!
//! Each trait is the narrowest surface the engine needs. Calls are
//! fire-and-forget; rendering failures are the implementor's concern.

use glam::{DVec2, DVec3};
use serde::Serialize;

use crate::config::TemplateId;
use crate::pose::Pose;

/// Handle to a visual owned by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RenderHandle(pub u64);

/// Creates, moves, shows/hides and destroys 3D visuals.
pub trait ObjectRenderer {
    fn instantiate(&mut self, template: &TemplateId, pose: &Pose) -> RenderHandle;
    fn destroy(&mut self, handle: RenderHandle);
    fn set_pose(&mut self, handle: RenderHandle, pose: &Pose);
    fn set_visible(&mut self, handle: RenderHandle, visible: bool);
}

/// The floating menu (delete / move) shown above a selected object.
pub trait SelectionMenu {
    fn show(&mut self, world_position: DVec3);
    fn hide(&mut self);
}

/// The reticle that follows the tracked surface while placement is possible.
pub trait PlacementIndicator {
    fn show(&mut self, pose: &Pose);
    fn hide(&mut self);
}

/// Answers whether a screen point lands on a rendered UI element.
pub trait UiHitTest {
    fn point_over_ui(&self, screen: DVec2) -> bool;
}

//! Tap-to-place interaction core for surface-anchored AR objects.
//!
//! The crate owns the interaction state machine only: deciding, from a single
//! confirmed tap plus the current tracking state, whether the user is placing
//! a new object, selecting or deselecting an existing one, or confirming a
//! relocation. Plane tracking, input delivery, widget rendering and 3D object
//! instantiation are external collaborators reached through the narrow traits
//! in [`collab`], [`pose`] and [`input`].
//!
//! [`engine::TapInterpreter`] is the pure core: it returns [`engine::Command`]s
//! for the host to carry out. [`engine::Engine`] wraps it with injected
//! collaborators and applies those commands directly.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Tap interpreter and collaborator-driving engine |
//! | [`registry`] | Ordered store of placed objects with proximity queries |
//! | [`selection`] | Idle / selected / relocating state |
//! | [`placement`] | Overlap-checked placement and relocation |
//! | [`pose`] | Pose value type and the pose tracker seam |
//! | [`input`] | Tap action binding and subscription lifecycle |
//! | [`collab`] | Renderer, menu, indicator and UI hit-test traits |
//! | [`mode`] | Cosmetic add/delete mode labels |
//! | [`config`] | Immutable placement configuration |
//! | [`consts`] | Shared numeric constants (distances, offsets) |

pub mod collab;
pub mod config;
pub mod consts;
pub mod engine;
pub mod input;
pub mod mode;
pub mod placement;
pub mod pose;
pub mod registry;
pub mod selection;

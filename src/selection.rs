//! Selection state: which object, if any, the user is acting on.
//!
//! At most one object is selected or relocating at a time; the enum makes any
//! other arrangement unrepresentable. Transitions are explicit methods so the
//! tap interpreter never assigns variants directly.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use serde::Serialize;

use crate::registry::ObjectHandle;

/// Current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "handle", rename_all = "snake_case")]
pub enum SelectionState {
    /// Nothing selected; taps place new objects.
    #[default]
    Idle,
    /// An object is selected and the selection menu is open above it.
    Selected(ObjectHandle),
    /// The selected object is hidden while the user re-aims for a new spot.
    Relocating(ObjectHandle),
}

impl SelectionState {
    /// The handle being acted on, in either the selected or relocating state.
    #[must_use]
    pub fn handle(&self) -> Option<ObjectHandle> {
        match *self {
            Self::Idle => None,
            Self::Selected(h) | Self::Relocating(h) => Some(h),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The selected handle, only when not relocating.
    #[must_use]
    pub fn selected(&self) -> Option<ObjectHandle> {
        match *self {
            Self::Selected(h) => Some(h),
            _ => None,
        }
    }

    /// The relocating handle, if a relocation is pending.
    #[must_use]
    pub fn relocating(&self) -> Option<ObjectHandle> {
        match *self {
            Self::Relocating(h) => Some(h),
            _ => None,
        }
    }

    /// Whether the selection menu should be on screen.
    #[must_use]
    pub fn shows_menu(&self) -> bool {
        matches!(self, Self::Selected(_))
    }

    /// Enter `Selected(handle)`, replacing any previous selection.
    pub fn select(&mut self, handle: ObjectHandle) {
        *self = Self::Selected(handle);
    }

    /// `Selected(h)` becomes `Relocating(h)`. Returns the handle, or `None`
    /// (leaving the state untouched) when nothing is selected.
    pub fn begin_relocation(&mut self) -> Option<ObjectHandle> {
        let handle = self.selected()?;
        *self = Self::Relocating(handle);
        Some(handle)
    }

    /// Return to `Idle`, yielding the handle that was held.
    pub fn clear(&mut self) -> Option<ObjectHandle> {
        std::mem::take(self).handle()
    }
}

//! Add/delete mode toggle.
//!
//! Purely cosmetic: it flips which labels the mode UI shows and never feeds
//! back into the placement state machine.

#[cfg(test)]
#[path = "mode_test.rs"]
mod mode_test;

use serde::Serialize;
use tracing::info;

/// Text for the mode banner and the toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeLabels {
    pub mode: &'static str,
    pub button: &'static str,
}

const ADD_LABELS: ModeLabels = ModeLabels { mode: "Add Mode", button: "Switch to Delete" };
const DELETE_LABELS: ModeLabels = ModeLabels { mode: "Delete Mode", button: "Switch to Add" };

#[derive(Debug, Clone, Copy, Default)]
pub struct ModeToggle {
    delete_mode: bool,
}

impl ModeToggle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_delete_mode(&self) -> bool {
        self.delete_mode
    }

    /// Labels for the current mode.
    #[must_use]
    pub fn labels(&self) -> ModeLabels {
        if self.delete_mode { DELETE_LABELS } else { ADD_LABELS }
    }

    /// Flip the mode and return the labels to display.
    pub fn toggle(&mut self) -> ModeLabels {
        self.delete_mode = !self.delete_mode;
        let labels = self.labels();
        info!(mode = labels.mode, "mode toggled");
        labels
    }
}

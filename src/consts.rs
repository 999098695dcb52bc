//! Shared numeric constants for the placement crate.

// ── Placement ───────────────────────────────────────────────────

/// Minimum centre-to-centre distance between two placed objects, in metres.
pub const DEFAULT_MIN_PLACEMENT_DISTANCE: f64 = 0.5;

/// Pitch applied to the tracked surface orientation before instantiating an
/// object, in degrees. Stands upright assets on a horizontal plane.
pub const DEFAULT_PITCH_OFFSET_DEG: f64 = -90.0;

// ── Selection UI ────────────────────────────────────────────────

/// Height of the selection menu above the selected object, in metres.
pub const DEFAULT_SELECTION_OFFSET_Y: f64 = 0.2;

// ── Input ───────────────────────────────────────────────────────

/// Name of the input action that fires once per confirmed tap.
pub const TAP_ACTION_NAME: &str = "SingleTouchClick";

/// Normalised viewport coordinate of the screen centre used for raycasts.
pub const VIEWPORT_CENTER: f64 = 0.5;

use uuid::Uuid;

use super::*;

// =============================================================
// Queries
// =============================================================

#[test]
fn default_is_idle() {
    let state = SelectionState::default();
    assert!(state.is_idle());
    assert!(state.handle().is_none());
    assert!(!state.shows_menu());
}

#[test]
fn selected_exposes_handle() {
    let h = Uuid::new_v4();
    let state = SelectionState::Selected(h);
    assert_eq!(state.handle(), Some(h));
    assert_eq!(state.selected(), Some(h));
    assert!(state.relocating().is_none());
    assert!(state.shows_menu());
}

#[test]
fn relocating_exposes_handle_but_no_menu() {
    let h = Uuid::new_v4();
    let state = SelectionState::Relocating(h);
    assert_eq!(state.handle(), Some(h));
    assert_eq!(state.relocating(), Some(h));
    assert!(state.selected().is_none());
    assert!(!state.shows_menu());
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn select_replaces_previous_selection() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let mut state = SelectionState::Idle;
    state.select(a);
    state.select(b);
    assert_eq!(state, SelectionState::Selected(b));
}

#[test]
fn begin_relocation_from_selected() {
    let h = Uuid::new_v4();
    let mut state = SelectionState::Selected(h);
    assert_eq!(state.begin_relocation(), Some(h));
    assert_eq!(state, SelectionState::Relocating(h));
}

#[test]
fn begin_relocation_from_idle_is_noop() {
    let mut state = SelectionState::Idle;
    assert!(state.begin_relocation().is_none());
    assert!(state.is_idle());
}

#[test]
fn begin_relocation_twice_is_noop() {
    let h = Uuid::new_v4();
    let mut state = SelectionState::Relocating(h);
    assert!(state.begin_relocation().is_none());
    assert_eq!(state, SelectionState::Relocating(h));
}

#[test]
fn clear_returns_held_handle() {
    let h = Uuid::new_v4();
    let mut state = SelectionState::Relocating(h);
    assert_eq!(state.clear(), Some(h));
    assert!(state.is_idle());
    assert!(state.clear().is_none());
}

// =============================================================
// Serde
// =============================================================

#[test]
fn serializes_with_tag() {
    let h = Uuid::nil();
    let json = serde_json::to_value(SelectionState::Selected(h)).unwrap();
    assert_eq!(json["state"], "selected");
    assert_eq!(json["handle"], h.to_string());
    let idle = serde_json::to_value(SelectionState::Idle).unwrap();
    assert_eq!(idle["state"], "idle");
}

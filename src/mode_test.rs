use super::*;

#[test]
fn starts_in_add_mode() {
    let toggle = ModeToggle::new();
    assert!(!toggle.is_delete_mode());
    assert_eq!(toggle.labels().mode, "Add Mode");
    assert_eq!(toggle.labels().button, "Switch to Delete");
}

#[test]
fn toggle_switches_to_delete_labels() {
    let mut toggle = ModeToggle::new();
    let labels = toggle.toggle();
    assert!(toggle.is_delete_mode());
    assert_eq!(labels, ModeLabels { mode: "Delete Mode", button: "Switch to Add" });
}

#[test]
fn toggle_twice_returns_to_add() {
    let mut toggle = ModeToggle::new();
    toggle.toggle();
    let labels = toggle.toggle();
    assert!(!toggle.is_delete_mode());
    assert_eq!(labels, ModeLabels { mode: "Add Mode", button: "Switch to Delete" });
}

use std::collections::HashMap;

use glam::DVec3;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::collab::{ObjectRenderer, PlacementIndicator, RenderHandle, SelectionMenu, UiHitTest};
use crate::config::{ConfigError, PlacementConfig, TemplateId};
use crate::consts::TAP_ACTION_NAME;
use crate::input::{InputSource, TapBinding, TapEvent};
use crate::mode::{ModeLabels, ModeToggle};
use crate::placement::{PlacementEngine, Rejected};
use crate::pose::{Pose, PoseTracker};
use crate::registry::{ObjectHandle, PlacedObject, PlacedObjectRegistry};
use crate::selection::SelectionState;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Side effects for the host's collaborators to carry out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Instantiate { handle: ObjectHandle, template: TemplateId, pose: Pose },
    Destroy { handle: ObjectHandle },
    MoveVisual { handle: ObjectHandle, pose: Pose },
    SetVisible { handle: ObjectHandle, visible: bool },
    ShowMenu { anchor: DVec3 },
    HideMenu,
    ShowIndicator { pose: Pose },
    HideIndicator,
}

/// What a tap was interpreted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    Place(ObjectHandle),
    Select(ObjectHandle),
    Deselect(ObjectHandle),
    ConfirmRelocation(ObjectHandle),
    Ignore(IgnoreReason),
}

/// Why a tap changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The tap landed on a UI element.
    OverUi,
    /// No surface is tracked.
    InvalidPose,
    /// Placement or relocation was refused.
    Rejected(Rejected),
    /// Empty space was tapped while the selection menu is open.
    SelectionOpen,
    /// The tap input binding is missing or detached.
    Unbound,
}

#[derive(Debug, thiserror::Error)]
pub enum PrefabError {
    #[error("template index {index} out of range (have {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Result of an operation plus the commands it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub commands: Vec<Command>,
}

pub type TapOutcome = Outcome<TapAction>;

impl<T> Outcome<T> {
    fn new(value: T, commands: Vec<Command>) -> Self {
        Self { value, commands }
    }
}

impl TapOutcome {
    fn ignore(reason: IgnoreReason) -> Self {
        Self::new(TapAction::Ignore(reason), Vec::new())
    }
}

/// The tap-interpretation state machine.
///
/// Owns the registry and the selection state. Holds no collaborators; every
/// operation returns the [`Command`]s the host must apply, which keeps the
/// core testable without a renderer.
pub struct TapInterpreter {
    registry: PlacedObjectRegistry,
    selection: SelectionState,
    placement: PlacementEngine,
    mode: ModeToggle,
    tracked: Option<Pose>,
    selection_radius: f64,
    selection_offset: DVec3,
}

impl TapInterpreter {
    /// Build an interpreter from a validated configuration.
    pub fn new(config: &PlacementConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            registry: PlacedObjectRegistry::new(),
            selection: SelectionState::Idle,
            placement: PlacementEngine::new(config),
            mode: ModeToggle::new(),
            tracked: None,
            selection_radius: config.selection_radius,
            selection_offset: config.selection_offset,
        })
    }

    // --- Per-frame ---

    /// Store this frame's tracker sample and derive indicator visibility.
    pub fn update_pose(&mut self, tracked: Option<Pose>) -> Vec<Command> {
        self.tracked = tracked;
        vec![self.indicator_command()]
    }

    // --- Tap ---

    /// Interpret one confirmed tap at the current tracked pose.
    pub fn on_tap(&mut self, over_ui: bool) -> TapOutcome {
        if over_ui {
            debug!("tap over ui ignored");
            return TapOutcome::ignore(IgnoreReason::OverUi);
        }
        let Some(surface) = self.tracked else {
            warn!("tap swallowed: no valid surface pose");
            return TapOutcome::ignore(IgnoreReason::InvalidPose);
        };

        // A pending relocation claims the tap before any selection lookup.
        if let Some(handle) = self.selection.relocating() {
            return self.confirm_relocation(handle, &surface);
        }

        match self.registry.object_within(surface.position, self.selection_radius).copied() {
            Some(hit) if self.selection.selected() == Some(hit.handle) => self.deselect(hit.handle),
            Some(hit) => self.select(&hit),
            None if self.selection.is_idle() => self.place(&surface),
            None => {
                debug!("empty-space tap while selection menu is open");
                TapOutcome::ignore(IgnoreReason::SelectionOpen)
            }
        }
    }

    fn place(&mut self, surface: &Pose) -> TapOutcome {
        let mut commands = Vec::new();
        match self.placement.try_place(surface, &mut self.registry, &mut commands) {
            Ok(handle) => {
                info!(%handle, position = ?surface.position, "object placed");
                Outcome::new(TapAction::Place(handle), commands)
            }
            Err(rejected) => {
                warn!(%rejected, position = ?surface.position, "placement rejected");
                TapOutcome::ignore(IgnoreReason::Rejected(rejected))
            }
        }
    }

    fn select(&mut self, hit: &PlacedObject) -> TapOutcome {
        let handle = hit.handle;
        self.selection.select(handle);
        info!(%handle, "object selected");
        let anchor = hit.pose.position + self.selection_offset;
        let commands = vec![Command::HideIndicator, Command::ShowMenu { anchor }];
        Outcome::new(TapAction::Select(handle), commands)
    }

    fn deselect(&mut self, handle: ObjectHandle) -> TapOutcome {
        self.selection.clear();
        info!(%handle, "object deselected");
        let commands = vec![Command::HideMenu, self.indicator_command()];
        Outcome::new(TapAction::Deselect(handle), commands)
    }

    fn confirm_relocation(&mut self, handle: ObjectHandle, surface: &Pose) -> TapOutcome {
        let mut commands = Vec::new();
        if let Err(rejected) = self.placement.try_relocate(handle, surface, &mut self.registry, &mut commands) {
            warn!(%handle, %rejected, "relocation rejected");
            return TapOutcome::ignore(IgnoreReason::Rejected(rejected));
        }
        self.selection.clear();
        info!(%handle, position = ?surface.position, "object relocated");
        commands.push(Command::SetVisible { handle, visible: true });
        commands.push(self.indicator_command());
        Outcome::new(TapAction::ConfirmRelocation(handle), commands)
    }

    // --- Menu operations ---

    /// Delete the selected object. No-op unless an object is selected.
    pub fn delete_selected(&mut self) -> Outcome<Option<ObjectHandle>> {
        let Some(handle) = self.selection.selected() else {
            return Outcome::new(None, Vec::new());
        };
        self.registry.remove(&handle);
        self.selection.clear();
        info!(%handle, remaining = self.registry.len(), "object deleted");
        let commands = vec![Command::Destroy { handle }, Command::HideMenu, self.indicator_command()];
        Outcome::new(Some(handle), commands)
    }

    /// Hide the selected object and wait for a tap at its new spot.
    pub fn start_relocation(&mut self) -> Outcome<Option<ObjectHandle>> {
        let Some(handle) = self.selection.begin_relocation() else {
            return Outcome::new(None, Vec::new());
        };
        info!(%handle, "relocation started");
        let commands = vec![
            Command::SetVisible { handle, visible: false },
            Command::HideMenu,
            self.indicator_command(),
        ];
        Outcome::new(Some(handle), commands)
    }

    /// Remove the newest placed object, whatever the selection.
    pub fn delete_most_recent(&mut self) -> Outcome<Option<ObjectHandle>> {
        let Some(removed) = self.registry.remove_last() else {
            return Outcome::new(None, Vec::new());
        };
        let handle = removed.handle;
        let mut commands = vec![Command::Destroy { handle }];
        if self.selection.handle() == Some(handle) {
            if self.selection.shows_menu() {
                commands.push(Command::HideMenu);
            }
            self.selection.clear();
        }
        commands.push(self.indicator_command());
        info!(%handle, remaining = self.registry.len(), "most recent object deleted");
        Outcome::new(Some(handle), commands)
    }

    /// Choose which template the next placement instantiates.
    pub fn change_active_prefab(&mut self, index: usize) -> Result<(), PrefabError> {
        if !self.placement.set_active(index) {
            let len = self.placement.template_count();
            warn!(index, len, "template index out of range");
            return Err(PrefabError::OutOfRange { index, len });
        }
        info!(index, template = ?self.placement.active_template(), "active template changed");
        Ok(())
    }

    /// Flip the cosmetic add/delete mode.
    pub fn toggle_mode(&mut self) -> ModeLabels {
        self.mode.toggle()
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    #[must_use]
    pub fn registry(&self) -> &PlacedObjectRegistry {
        &self.registry
    }

    #[must_use]
    pub fn active_template(&self) -> Option<&TemplateId> {
        self.placement.active_template()
    }

    #[must_use]
    pub fn mode(&self) -> ModeToggle {
        self.mode
    }

    /// Whether the tracker currently sees a surface.
    #[must_use]
    pub fn placement_valid(&self) -> bool {
        self.tracked.is_some()
    }

    /// Indicator shows only with a tracked surface, nothing selected or
    /// relocating, and no selection menu open.
    #[must_use]
    pub fn indicator_visible(&self) -> bool {
        self.placement_valid() && self.selection.is_idle() && !self.selection.shows_menu()
    }

    #[must_use]
    pub fn menu_visible(&self) -> bool {
        self.selection.shows_menu()
    }

    fn indicator_command(&self) -> Command {
        match self.tracked {
            Some(pose) if self.indicator_visible() => Command::ShowIndicator { pose },
            _ => Command::HideIndicator,
        }
    }
}

/// The external systems an [`Engine`] drives, injected at construction.
pub struct Collaborators {
    pub tracker: Box<dyn PoseTracker>,
    pub ui: Box<dyn UiHitTest>,
    pub renderer: Box<dyn ObjectRenderer>,
    pub menu: Box<dyn SelectionMenu>,
    pub indicator: Box<dyn PlacementIndicator>,
}

/// The full engine. Wraps `TapInterpreter` and applies its commands to the
/// injected collaborators.
pub struct Engine {
    pub core: TapInterpreter,
    collab: Collaborators,
    binding: TapBinding,
    visuals: HashMap<ObjectHandle, RenderHandle>,
}

impl Engine {
    /// Create an engine and resolve the tap binding on `input`.
    ///
    /// A missing tap action is logged and leaves the engine inert; only an
    /// invalid configuration fails construction.
    pub fn new(config: &PlacementConfig, collab: Collaborators, input: &dyn InputSource) -> Result<Self, ConfigError> {
        let core = TapInterpreter::new(config)?;
        let binding = match TapBinding::resolve(input, TAP_ACTION_NAME) {
            Ok(binding) => binding,
            Err(e) => {
                error!(error = %e, "tap binding missing; placement disabled");
                TapBinding::Unbound
            }
        };
        Ok(Self { core, collab, binding, visuals: HashMap::new() })
    }

    // --- Lifecycle ---

    /// Attach the tap handler. Must be paired with [`disable`](Self::disable)
    /// before teardown.
    pub fn enable(&mut self, input: &mut dyn InputSource) {
        if self.binding.enable(input) {
            debug!("tap handler attached");
        }
    }

    /// Detach the tap handler. Safe to call repeatedly.
    pub fn disable(&mut self, input: &mut dyn InputSource) {
        if self.binding.disable(input) {
            debug!("tap handler detached");
        }
    }

    #[must_use]
    pub fn binding(&self) -> TapBinding {
        self.binding
    }

    // --- Frame ---

    /// Sample the tracker and refresh the placement indicator.
    pub fn tick(&mut self) {
        let tracked = self.collab.tracker.sample();
        let commands = self.core.update_pose(tracked);
        self.apply(commands);
    }

    // --- Input ---

    /// Handle a confirmed tap delivered by the input source.
    pub fn on_tap(&mut self, event: &TapEvent) -> TapAction {
        if !self.binding.accepts(event) {
            debug!(?event, "tap for inactive subscription ignored");
            return TapAction::Ignore(IgnoreReason::Unbound);
        }
        let over_ui = self.collab.ui.point_over_ui(event.screen);
        let outcome = self.core.on_tap(over_ui);
        self.apply(outcome.commands);
        outcome.value
    }

    // --- Delegated menu operations ---

    pub fn delete_selected(&mut self) -> Option<ObjectHandle> {
        let outcome = self.core.delete_selected();
        self.apply(outcome.commands);
        outcome.value
    }

    pub fn start_relocation(&mut self) -> Option<ObjectHandle> {
        let outcome = self.core.start_relocation();
        self.apply(outcome.commands);
        outcome.value
    }

    pub fn delete_most_recent(&mut self) -> Option<ObjectHandle> {
        let outcome = self.core.delete_most_recent();
        self.apply(outcome.commands);
        outcome.value
    }

    pub fn change_active_prefab(&mut self, index: usize) -> Result<(), PrefabError> {
        self.core.change_active_prefab(index)
    }

    pub fn toggle_mode(&mut self) -> ModeLabels {
        self.core.toggle_mode()
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> SelectionState {
        self.core.selection()
    }

    #[must_use]
    pub fn registry(&self) -> &PlacedObjectRegistry {
        self.core.registry()
    }

    /// Renderer handle backing a placed object.
    #[must_use]
    pub fn visual(&self, handle: &ObjectHandle) -> Option<RenderHandle> {
        self.visuals.get(handle).copied()
    }

    fn apply(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Instantiate { handle, template, pose } => {
                    let visual = self.collab.renderer.instantiate(&template, &pose);
                    self.visuals.insert(handle, visual);
                }
                Command::Destroy { handle } => match self.visuals.remove(&handle) {
                    Some(visual) => self.collab.renderer.destroy(visual),
                    None => warn!(%handle, "destroy for object without a visual"),
                },
                Command::MoveVisual { handle, pose } => match self.visuals.get(&handle) {
                    Some(visual) => self.collab.renderer.set_pose(*visual, &pose),
                    None => warn!(%handle, "move for object without a visual"),
                },
                Command::SetVisible { handle, visible } => match self.visuals.get(&handle) {
                    Some(visual) => self.collab.renderer.set_visible(*visual, visible),
                    None => warn!(%handle, "visibility change for object without a visual"),
                },
                Command::ShowMenu { anchor } => self.collab.menu.show(anchor),
                Command::HideMenu => self.collab.menu.hide(),
                Command::ShowIndicator { pose } => self.collab.indicator.show(&pose),
                Command::HideIndicator => self.collab.indicator.hide(),
            }
        }
    }
}

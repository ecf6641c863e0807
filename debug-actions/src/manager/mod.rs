//! Debug action manager: samples input once per tick and reports fired actions


use crate::action::DebugAction;
use crate::source::InputSource;
use crate::state::ActionState;
use crate::table::ActionTable;
use crate::trigger::{ActionDesc, MatchedTrigger};

/// Turns raw button/axis/key input into [`DebugAction`] activations
///
/// Owned by the session and updated once per tick from the main loop:
///
/// ```rust,ignore
/// manager.update(&input);
/// if manager.action(DebugAction::EnableDebugMenu) != 0.0 {
///     panel.toggle();
/// }
/// input.end_frame();
/// ```
pub struct DebugActionManager {
    /// False if the host is missing a binding the table needs; `update` is then a no-op
    valid: bool,

    /// Trigger descriptors, indexed by `DebugAction::index`
    table: ActionTable,

    /// Runtime state, indexed by `DebugAction::index`
    states: [ActionState; DebugAction::COUNT],
}

impl DebugActionManager {
    /// Create a manager for `table`, checking once that `input` binds every name it uses
    ///
    /// Missing bindings (or a malformed table) are reported with a single
    /// warning. The manager is then inert for its whole lifetime: no action
    /// ever fires.
    pub fn new(table: ActionTable, input: &impl InputSource) -> Self {
        let missing: Vec<&str> = table
            .required_bindings()
            .into_iter()
            .filter(|name| !input.is_bound(name))
            .collect();

        let valid = match table.validate() {
            Err(e) => {
                tracing::warn!("Debug actions disabled, invalid action table: {}", e);
                false
            }
            Ok(()) if !missing.is_empty() => {
                tracing::warn!(
                    "Debug actions disabled, input bindings missing: {}",
                    missing.join(", ")
                );
                false
            }
            Ok(()) => true,
        };

        Self {
            valid,
            table,
            states: Default::default(),
        }
    }

    /// Whether the host binds every input the table needs
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The action table this manager was built with
    pub fn table(&self) -> &ActionTable {
        &self.table
    }

    /// Advance one tick: age running actions, then sample idle ones
    pub fn update(&mut self, input: &impl InputSource) {
        if !self.valid {
            return;
        }

        for action in DebugAction::ALL {
            let desc = self.table.get(action);
            let state = &mut self.states[action.index()];

            if state.update(desc, input) {
                tracing::trace!("Debug action {} re-armed", action);
            }
            if !state.is_running() {
                if let Some((matched, value)) = sample(desc, input) {
                    tracing::debug!("Debug action {} triggered ({})", action, value);
                    state.trigger(desc, matched, value);
                }
            }
        }
    }

    /// Activation of `action` for the current tick
    ///
    /// 0.0 unless the action fired during the last `update`; 1.0 for button and
    /// key triggers, the signed axis value for axis triggers.
    pub fn action(&self, action: DebugAction) -> f32 {
        self.states[action.index()].value()
    }

    /// Whether `action` fired during the last `update`
    pub fn triggered(&self, action: DebugAction) -> bool {
        self.action(action) != 0.0
    }

    /// Whether `action` has fired and is still waiting for release or repeat
    pub fn is_running(&self, action: DebugAction) -> bool {
        self.states[action.index()].is_running()
    }

    /// Runtime state of `action`
    pub fn state(&self, action: DebugAction) -> &ActionState {
        &self.states[action.index()]
    }
}

/// Find the trigger that starts an idle action this tick
///
/// Button combos first, then the axis, then key combos; the first match wins.
/// A NaN or infinite axis sample never triggers.
fn sample(desc: &ActionDesc, input: &impl InputSource) -> Option<(MatchedTrigger, f32)> {
    if let Some(i) = desc
        .buttons
        .iter()
        .position(|combo| combo.buttons().iter().all(|b| input.is_button_down(b)))
    {
        return Some((MatchedTrigger::Buttons(i), 1.0));
    }

    if let Some(axis) = desc.axis.as_deref() {
        let value = input.axis(axis);
        if value.is_finite() && value != 0.0 {
            return Some((MatchedTrigger::Axis, value));
        }
    }

    desc.keys
        .iter()
        .position(|combo| combo.keys().iter().all(|k| input.is_key_down(*k)))
        .map(|i| (MatchedTrigger::Keys(i), 1.0))
}

//! Debug action identifiers and repeat modes

use serde::{Deserialize, Serialize};

/// Debug actions recognised by the [`DebugActionManager`](crate::DebugActionManager).
///
/// The set is closed: every action has exactly one descriptor in the
/// [`ActionTable`](crate::ActionTable) and one runtime state in the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugAction {
    /// Open or close the debug menu
    EnableDebugMenu,
    /// Switch to the previous debug menu page
    PreviousDebugMenu,
    /// Switch to the next debug menu page
    NextDebugMenu,
    /// Confirm the selected debug item
    Validate,
    /// Move the selection up or down (signed)
    MoveVertical,
    /// Move the selection left or right (signed)
    MoveHorizontal,
}

impl DebugAction {
    /// Number of debug actions
    pub const COUNT: usize = 6;

    /// All actions, in update order
    pub const ALL: [DebugAction; Self::COUNT] = [
        DebugAction::EnableDebugMenu,
        DebugAction::PreviousDebugMenu,
        DebugAction::NextDebugMenu,
        DebugAction::Validate,
        DebugAction::MoveVertical,
        DebugAction::MoveHorizontal,
    ];

    /// Dense index used by the descriptor and state arrays
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Config / script name of the action
    pub const fn name(self) -> &'static str {
        match self {
            DebugAction::EnableDebugMenu => "enable_debug_menu",
            DebugAction::PreviousDebugMenu => "previous_debug_menu",
            DebugAction::NextDebugMenu => "next_debug_menu",
            DebugAction::Validate => "validate",
            DebugAction::MoveVertical => "move_vertical",
            DebugAction::MoveHorizontal => "move_horizontal",
        }
    }

    /// Look up an action by its config name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }
}

impl std::fmt::Display for DebugAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a held trigger fires its action again
///
/// TOML form: `repeat = "never"` or `repeat = { delay = 0.25 }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Fire once per press; every source must be released before it can fire again
    #[default]
    Never,
    /// Re-arm once this many seconds have elapsed since the action started running
    Delay(f32),
}

impl RepeatMode {
    /// Whether a running action with `elapsed` seconds on its timer re-arms
    ///
    /// The comparison is strict: an action held for exactly the delay does not repeat yet.
    pub fn rearms_after(self, elapsed: f32) -> bool {
        match self {
            RepeatMode::Never => false,
            RepeatMode::Delay(delay) => elapsed > delay,
        }
    }
}

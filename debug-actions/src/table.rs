//! The action table: one descriptor per debug action
//!
//! The default table binds the debug actions to the host input names below.
//! A table can also be read from TOML, one section per action:
//!
//! ```toml
//! [enable_debug_menu]
//! buttons = [["Enable Debug Button 1", "Enable Debug Button 2"]]
//! keys = [["ControlLeft", "Backspace"]]
//! repeat = "never"
//!
//! [move_vertical]
//! axis = "Debug Vertical"
//! repeat = { delay = 0.2 }
//! ```
//!
//! Sections left out of the file keep their default descriptor.

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::action::{DebugAction, RepeatMode};
use crate::error::ConfigError;
use crate::trigger::{ActionDesc, KeyCombo};

/// Host button names used by the default table
pub const ENABLE_DEBUG_BUTTON_1: &str = "Enable Debug Button 1";
pub const ENABLE_DEBUG_BUTTON_2: &str = "Enable Debug Button 2";
pub const DEBUG_PREVIOUS_BUTTON: &str = "Debug Previous";
pub const DEBUG_NEXT_BUTTON: &str = "Debug Next";
pub const DEBUG_VALIDATE_BUTTON: &str = "Debug Validate";

/// Host axis names used by the default table
pub const DEBUG_VERTICAL_AXIS: &str = "Debug Vertical";
pub const DEBUG_HORIZONTAL_AXIS: &str = "Debug Horizontal";

/// Seconds between repeats of a held validate button
pub const VALIDATE_REPEAT_DELAY: f32 = 0.25;
/// Seconds between repeats of a held navigation axis
pub const MOVE_REPEAT_DELAY: f32 = 0.2;

/// Descriptors for every [`DebugAction`], indexed by [`DebugAction::index`]
#[derive(Debug, Clone, PartialEq)]
pub struct ActionTable {
    descs: [ActionDesc; DebugAction::COUNT],
}

impl Default for ActionTable {
    fn default() -> Self {
        Self::from_fn(default_desc)
    }
}

fn default_desc(action: DebugAction) -> ActionDesc {
    match action {
        DebugAction::EnableDebugMenu => ActionDesc::new(RepeatMode::Never)
            .with_buttons([ENABLE_DEBUG_BUTTON_1, ENABLE_DEBUG_BUTTON_2])
            .with_keys([KeyCode::ControlLeft, KeyCode::Backspace]),
        DebugAction::PreviousDebugMenu => {
            ActionDesc::new(RepeatMode::Never).with_buttons([DEBUG_PREVIOUS_BUTTON])
        }
        DebugAction::NextDebugMenu => {
            ActionDesc::new(RepeatMode::Never).with_buttons([DEBUG_NEXT_BUTTON])
        }
        DebugAction::Validate => ActionDesc::new(RepeatMode::Delay(VALIDATE_REPEAT_DELAY))
            .with_buttons([DEBUG_VALIDATE_BUTTON]),
        DebugAction::MoveVertical => {
            ActionDesc::new(RepeatMode::Delay(MOVE_REPEAT_DELAY)).with_axis(DEBUG_VERTICAL_AXIS)
        }
        DebugAction::MoveHorizontal => {
            ActionDesc::new(RepeatMode::Delay(MOVE_REPEAT_DELAY)).with_axis(DEBUG_HORIZONTAL_AXIS)
        }
    }
}

impl ActionTable {
    /// Build a table by asking for each action's descriptor
    pub fn from_fn(mut f: impl FnMut(DebugAction) -> ActionDesc) -> Self {
        Self {
            descs: DebugAction::ALL.map(&mut f),
        }
    }

    /// Descriptor of an action
    pub fn get(&self, action: DebugAction) -> &ActionDesc {
        &self.descs[action.index()]
    }

    /// Replace the descriptor of an action
    pub fn set(&mut self, action: DebugAction, desc: ActionDesc) {
        self.descs[action.index()] = desc;
    }

    /// `(action, descriptor)` pairs in update order
    pub fn iter(&self) -> impl Iterator<Item = (DebugAction, &ActionDesc)> {
        DebugAction::ALL.into_iter().zip(self.descs.iter())
    }

    /// Every button and axis name the table reads, deduplicated, in declaration order
    ///
    /// These must all be bound by the host for the manager to be usable.
    pub fn required_bindings(&self) -> Vec<&str> {
        let mut seen = hashbrown::HashSet::new();
        self.descs
            .iter()
            .flat_map(ActionDesc::bindings)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Check every descriptor for empty combos, blank names and bad repeat delays
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.iter().try_for_each(|(action, desc)| desc.validate(action))
    }

    /// Parse and validate a table from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let file: TableFile = toml::from_str(toml_str)?;
        let table = Self::from(file);
        table.validate()?;
        Ok(table)
    }

    /// Serialize the table to TOML
    ///
    /// Fails with [`ConfigError::UnknownKey`] if a key trigger uses a key that
    /// has no config name, since the file could not be loaded back.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let unnamed = self
            .descs
            .iter()
            .flat_map(|desc| &desc.keys)
            .find_map(KeyCombo::unnamed_key);
        if let Some(key) = unnamed {
            return Err(ConfigError::UnknownKey(format!("{:?}", key)));
        }
        Ok(toml::to_string_pretty(&TableFile::from(self))?)
    }
}

/// On-disk form of [`ActionTable`]; absent sections mean "use the default"
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enable_debug_menu: Option<ActionDesc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    previous_debug_menu: Option<ActionDesc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next_debug_menu: Option<ActionDesc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    validate: Option<ActionDesc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    move_vertical: Option<ActionDesc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    move_horizontal: Option<ActionDesc>,
}

impl TableFile {
    fn slot(&mut self, action: DebugAction) -> &mut Option<ActionDesc> {
        match action {
            DebugAction::EnableDebugMenu => &mut self.enable_debug_menu,
            DebugAction::PreviousDebugMenu => &mut self.previous_debug_menu,
            DebugAction::NextDebugMenu => &mut self.next_debug_menu,
            DebugAction::Validate => &mut self.validate,
            DebugAction::MoveVertical => &mut self.move_vertical,
            DebugAction::MoveHorizontal => &mut self.move_horizontal,
        }
    }
}

impl From<TableFile> for ActionTable {
    fn from(mut file: TableFile) -> Self {
        Self::from_fn(|action| file.slot(action).take().unwrap_or_else(|| default_desc(action)))
    }
}

impl From<&ActionTable> for TableFile {
    fn from(table: &ActionTable) -> Self {
        let mut file = TableFile::default();
        for (action, desc) in table.iter() {
            *file.slot(action) = Some(desc.clone());
        }
        file
    }
}

//! Errors for loading and validating action tables

use crate::action::DebugAction;

/// Errors produced while reading, writing or validating an [`ActionTable`](crate::ActionTable)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the table file failed
    #[error("action table I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The table file is not valid TOML for an action table
    #[error("failed to parse action table: {0}")]
    Parse(#[from] toml::de::Error),

    /// The table could not be written as TOML
    #[error("failed to serialize action table: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A key trigger names a key with no config name
    #[error("unknown key name: '{0}'")]
    UnknownKey(String),

    /// A button or key combo has no entries
    #[error("{0}: trigger combo is empty")]
    EmptyCombo(DebugAction),

    /// A button or axis binding name is blank
    #[error("{0}: binding name is empty")]
    EmptyBinding(DebugAction),

    /// Repeat delay is negative, NaN or infinite
    #[error("{action}: invalid repeat delay {delay}")]
    InvalidRepeatDelay { action: DebugAction, delay: f32 },
}

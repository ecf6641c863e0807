//! Action table file management (debug_actions.toml)
//!
//! The table lives next to the console config in the platform-specific config
//! directory. A missing or broken file never stops the console: [`load`] falls
//! back to the built-in table.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::table::ActionTable;

/// File name of the action table inside the config directory
pub const ACTION_TABLE_FILE: &str = "debug_actions.toml";

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\Nethercore\config`
/// On macOS: `~/Library/Application Support/io.nethercore.Nethercore`
/// On Linux: `~/.config/Nethercore`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.nethercore", "", "Nethercore")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Full path of the action table file, if the config directory is known
pub fn table_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(ACTION_TABLE_FILE))
}

/// Loads the action table from the config directory.
///
/// Returns the default table if the file doesn't exist or cannot be parsed;
/// parse errors are logged.
pub fn load() -> ActionTable {
    let Some(path) = table_path() else {
        return ActionTable::default();
    };
    if !path.exists() {
        return ActionTable::default();
    }
    match load_from(&path) {
        Ok(table) => {
            tracing::info!("Loaded debug action table from {}", path.display());
            table
        }
        Err(e) => {
            tracing::warn!(
                "Ignoring {}: {}. Using default debug actions.",
                path.display(),
                e
            );
            ActionTable::default()
        }
    }
}

/// Reads and validates an action table file
pub fn load_from(path: &Path) -> Result<ActionTable, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    ActionTable::from_toml(&content)
}

/// Writes an action table file, creating parent directories as needed
pub fn save_to(table: &ActionTable, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, table.to_toml()?)?;
    Ok(())
}

/// Saves the action table to the config directory
pub fn save(table: &ActionTable) -> Result<(), ConfigError> {
    match table_path() {
        Some(path) => save_to(table, &path),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{DebugAction, RepeatMode};
    use crate::trigger::ActionDesc;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(ACTION_TABLE_FILE);

        let mut table = ActionTable::default();
        table.set(
            DebugAction::Validate,
            ActionDesc::new(RepeatMode::Delay(0.5)).with_buttons(["Submit"]),
        );

        save_to(&table, &path).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_save_rejects_unnamed_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ACTION_TABLE_FILE);

        let mut table = ActionTable::default();
        table.set(
            DebugAction::EnableDebugMenu,
            ActionDesc::new(RepeatMode::Never).with_keys([winit::keyboard::KeyCode::NumLock]),
        );

        assert!(matches!(
            save_to(&table, &path),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ACTION_TABLE_FILE);
        std::fs::write(&path, "[validate\nbuttons = ").unwrap();
        assert!(matches!(load_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_table_path_uses_file_name() {
        if let Some(path) = table_path() {
            assert!(path.ends_with(ACTION_TABLE_FILE));
        }
    }
}

//! Trace script format
//!
//! A trace script describes held inputs frame by frame and, optionally, the
//! activations expected after each frame's update.
//!
//! ```toml
//! delta = 0.125
//!
//! frames = [
//!   { f = 0, buttons = ["Debug Validate"], expect = { validate = 1.0 } },
//!   { f = 2, expect = { validate = 0.0 } },
//!   { f = 3, expect = { validate = 1.0 } },
//!   { f = 4, buttons = [], axes = { "Debug Vertical" = -1.0 }, expect = { move_vertical = -1.0 } },
//! ]
//! ```
//!
//! Held state set by an entry carries over to the following frames until an
//! entry changes it. `buttons`, `keys` and `axes` each replace the whole set
//! when present.

use hashbrown::{HashMap, HashSet};
use nethercore_debug_actions::{DebugAction, KeyCode, keycode_serde::parse_key};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete trace script file (TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceScript {
    /// Seconds per frame, unless an entry overrides it
    #[serde(default = "default_delta")]
    pub delta: f32,

    /// Button/axis names the simulated host binds (default: everything the table needs)
    #[serde(default)]
    pub bindings: Option<Vec<String>>,

    /// Frame entries, in ascending frame order
    pub frames: Vec<FrameEntry>,
}

fn default_delta() -> f32 {
    1.0 / 60.0
}

/// Single frame entry in the script
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameEntry {
    /// Frame number
    pub f: u64,

    /// Buttons held from this frame on
    #[serde(default)]
    pub buttons: Option<Vec<String>>,

    /// Keys held from this frame on, by config name ("ControlLeft", "F1")
    #[serde(default)]
    pub keys: Option<Vec<String>>,

    /// Axis values from this frame on; axes not listed return to 0.0
    #[serde(default)]
    pub axes: Option<HashMap<String, f32>>,

    /// Delta time for this frame only
    #[serde(default)]
    pub delta: Option<f32>,

    /// Expected activations after this frame's update, by action name
    #[serde(default)]
    pub expect: Option<HashMap<String, f32>>,
}

/// Errors for trace scripts
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse script: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("script has no frames")]
    NoFrames,

    #[error("frame {0} is duplicated or out of order")]
    FrameOrder(u64),

    #[error("invalid delta {delta} at frame {frame}")]
    InvalidDelta { frame: u64, delta: f32 },

    #[error("unknown key '{name}' at frame {frame}")]
    UnknownKey { frame: u64, name: String },

    #[error("unknown action '{name}' at frame {frame}")]
    UnknownAction { frame: u64, name: String },
}

impl TraceScript {
    /// Parse a script from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Parse a script from a file
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Last frame the script covers
    pub fn last_frame(&self) -> u64 {
        self.frames.last().map(|entry| entry.f).unwrap_or(0)
    }

    /// Check frame order, deltas, key names and action names
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.frames.is_empty() {
            return Err(ScriptError::NoFrames);
        }
        check_delta(0, self.delta)?;

        let mut previous: Option<u64> = None;
        for entry in &self.frames {
            if previous.is_some_and(|prev| entry.f <= prev) {
                return Err(ScriptError::FrameOrder(entry.f));
            }
            previous = Some(entry.f);

            if let Some(delta) = entry.delta {
                check_delta(entry.f, delta)?;
            }
            entry.held_keys()?;
            entry.expectations()?;
        }
        Ok(())
    }
}

fn check_delta(frame: u64, delta: f32) -> Result<(), ScriptError> {
    if delta.is_finite() && delta > 0.0 {
        Ok(())
    } else {
        Err(ScriptError::InvalidDelta { frame, delta })
    }
}

impl FrameEntry {
    /// Keys held from this frame on, if the entry sets them
    pub fn held_keys(&self) -> Result<Option<HashSet<KeyCode>>, ScriptError> {
        let Some(names) = &self.keys else {
            return Ok(None);
        };
        names
            .iter()
            .map(|name| {
                parse_key(name).ok_or_else(|| ScriptError::UnknownKey {
                    frame: self.f,
                    name: name.clone(),
                })
            })
            .collect::<Result<HashSet<_>, _>>()
            .map(Some)
    }

    /// Expected activations, resolved to actions
    pub fn expectations(&self) -> Result<Vec<(DebugAction, f32)>, ScriptError> {
        let Some(expect) = &self.expect else {
            return Ok(Vec::new());
        };
        let mut resolved = expect
            .iter()
            .map(|(name, value)| {
                DebugAction::from_name(name)
                    .map(|action| (action, *value))
                    .ok_or_else(|| ScriptError::UnknownAction {
                        frame: self.f,
                        name: name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        resolved.sort_by_key(|(action, _)| action.index());
        Ok(resolved)
    }
}

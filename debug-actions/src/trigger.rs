//! Trigger descriptors: which inputs can start an action

use serde::ser::{Error as _, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use smallvec::SmallVec;
use winit::keyboard::KeyCode;

use crate::action::{DebugAction, RepeatMode};
use crate::error::ConfigError;
use crate::keycode_serde::{key_name, parse_key};

/// Buttons that must all be held at once, e.g. `["Enable Debug Button 1", "Enable Debug Button 2"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ButtonCombo(SmallVec<[String; 2]>);

impl ButtonCombo {
    pub fn new<I, S>(buttons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(buttons.into_iter().map(Into::into).collect())
    }

    pub fn buttons(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for ButtonCombo {
    fn from(buttons: Vec<String>) -> Self {
        Self(buttons.into_iter().collect())
    }
}

impl From<ButtonCombo> for Vec<String> {
    fn from(combo: ButtonCombo) -> Self {
        combo.0.into_vec()
    }
}

/// Keys that must all be held at once, e.g. `["ControlLeft", "Backspace"]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct KeyCombo(SmallVec<[KeyCode; 2]>);

impl KeyCombo {
    pub fn new(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        Self(keys.into_iter().collect())
    }

    pub fn keys(&self) -> &[KeyCode] {
        &self.0
    }

    /// First key in the combo that has no config name
    pub(crate) fn unnamed_key(&self) -> Option<KeyCode> {
        self.0.iter().copied().find(|key| key_name(*key).is_none())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<String>> for KeyCombo {
    type Error = ConfigError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        names
            .iter()
            .map(|name| parse_key(name).ok_or_else(|| ConfigError::UnknownKey(name.clone())))
            .collect::<Result<SmallVec<_>, _>>()
            .map(Self)
    }
}

impl Serialize for KeyCombo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for key in &self.0 {
            let name = key_name(*key)
                .ok_or_else(|| S::Error::custom(format!("unknown key name: '{:?}'", key)))?;
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

/// Configuration of one debug action: its triggers and repeat mode
///
/// Button and key combos are alternatives checked in declaration order; the
/// first combo whose inputs are all held wins. The axis trigger, if any, is
/// checked between the button and key alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ActionDesc {
    /// Button combos, first match wins
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ButtonCombo>,
    /// Analog axis; any nonzero sample triggers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<String>,
    /// Key combos, first match wins
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<KeyCombo>,
    /// Repeat behaviour while held
    #[serde(default)]
    pub repeat: RepeatMode,
}

impl ActionDesc {
    pub fn new(repeat: RepeatMode) -> Self {
        Self {
            repeat,
            ..Default::default()
        }
    }

    /// Add a button combo alternative
    pub fn with_buttons<I, S>(mut self, buttons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.buttons.push(ButtonCombo::new(buttons));
        self
    }

    /// Set the axis trigger
    pub fn with_axis(mut self, axis: impl Into<String>) -> Self {
        self.axis = Some(axis.into());
        self
    }

    /// Add a key combo alternative
    pub fn with_keys(mut self, keys: impl IntoIterator<Item = KeyCode>) -> Self {
        self.keys.push(KeyCombo::new(keys));
        self
    }

    /// Button and axis names this action reads from the host, in declaration order
    pub fn bindings(&self) -> impl Iterator<Item = &str> {
        self.buttons
            .iter()
            .flat_map(|combo| combo.buttons().iter().map(String::as_str))
            .chain(self.axis.as_deref())
    }

    pub(crate) fn validate(&self, action: DebugAction) -> Result<(), ConfigError> {
        if self.buttons.iter().any(ButtonCombo::is_empty) || self.keys.iter().any(KeyCombo::is_empty)
        {
            return Err(ConfigError::EmptyCombo(action));
        }
        if self.bindings().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::EmptyBinding(action));
        }
        if let RepeatMode::Delay(delay) = self.repeat {
            if !delay.is_finite() || delay < 0.0 {
                return Err(ConfigError::InvalidRepeatDelay { action, delay });
            }
        }
        Ok(())
    }
}

/// Which trigger started a running action
///
/// Indices point into the owning [`ActionDesc`]'s `buttons` / `keys` lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedTrigger {
    Buttons(usize),
    Axis,
    Keys(usize),
}

impl MatchedTrigger {
    /// Number of inputs that must report release before the action resets
    pub fn source_count(self, desc: &ActionDesc) -> usize {
        match self {
            MatchedTrigger::Buttons(i) => desc.buttons[i].len(),
            MatchedTrigger::Axis => 1,
            MatchedTrigger::Keys(i) => desc.keys[i].len(),
        }
    }
}

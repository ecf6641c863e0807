//! Event-fed input snapshot
//!
//! [`FrameInput`] turns host press/release events into the per-tick queries of
//! [`InputSource`]. Per tick, the host:
//!
//! 1. forwards window/gamepad events (`update_button`, `update_keyboard`, `set_axis`)
//! 2. sets the frame delta and calls [`DebugActionManager::update`](crate::DebugActionManager::update)
//! 3. calls [`FrameInput::end_frame`] to drop this tick's release events

use hashbrown::{HashMap, HashSet};
use winit::keyboard::KeyCode;

use crate::source::InputSource;

#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Button and axis names the host has configured
    bindings: HashSet<String>,

    /// Current button state (name -> held)
    buttons: HashMap<String, bool>,

    /// Current keyboard state (key -> held)
    keyboard_state: HashMap<KeyCode, bool>,

    /// Buttons that went up this frame
    released_buttons: HashSet<String>,

    /// Keys that went up this frame
    released_keys: HashSet<KeyCode>,

    /// Last reported axis values
    axes: HashMap<String, f32>,

    /// Seconds since the previous frame
    delta_time: f32,
}

impl FrameInput {
    /// Create an input snapshot with no bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input snapshot with the given button/axis names bound
    pub fn with_bindings<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bindings: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Declare a button or axis name as configured by the host
    pub fn bind(&mut self, name: impl Into<String>) {
        self.bindings.insert(name.into());
    }

    /// Update a button's held state. A held -> up transition counts as a release this frame.
    pub fn update_button(&mut self, button: &str, pressed: bool) {
        let was_pressed = self.buttons.insert(button.to_string(), pressed).unwrap_or(false);
        if was_pressed && !pressed {
            self.released_buttons.insert(button.to_string());
        }
    }

    /// Update a key's held state. A held -> up transition counts as a release this frame.
    pub fn update_keyboard(&mut self, key: KeyCode, pressed: bool) {
        let was_pressed = self.keyboard_state.insert(key, pressed).unwrap_or(false);
        if was_pressed && !pressed {
            self.released_keys.insert(key);
        }
    }

    /// Set an axis value. NaN and infinite values are stored as 0.0.
    pub fn set_axis(&mut self, axis: &str, value: f32) {
        let value = if value.is_finite() { value } else { 0.0 };
        self.axes.insert(axis.to_string(), value);
    }

    /// Set the seconds elapsed since the previous frame
    pub fn set_delta_time(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
    }

    /// Forget this frame's release events. Held state and axes carry over.
    pub fn end_frame(&mut self) {
        self.released_buttons.clear();
        self.released_keys.clear();
    }

    /// Release everything and zero all axes (e.g. on focus loss)
    pub fn release_all(&mut self) {
        for (button, pressed) in self.buttons.iter_mut() {
            if std::mem::take(pressed) {
                self.released_buttons.insert(button.clone());
            }
        }
        for (key, pressed) in self.keyboard_state.iter_mut() {
            if std::mem::take(pressed) {
                self.released_keys.insert(*key);
            }
        }
        self.axes.values_mut().for_each(|value| *value = 0.0);
    }
}

impl InputSource for FrameInput {
    fn is_button_down(&self, button: &str) -> bool {
        self.buttons.get(button).copied().unwrap_or(false)
    }

    fn is_button_released(&self, button: &str) -> bool {
        self.released_buttons.contains(button)
    }

    fn is_key_down(&self, key: KeyCode) -> bool {
        self.keyboard_state.get(&key).copied().unwrap_or(false)
    }

    fn is_key_released(&self, key: KeyCode) -> bool {
        self.released_keys.contains(&key)
    }

    fn axis(&self, axis: &str) -> f32 {
        self.axes.get(axis).copied().unwrap_or(0.0)
    }

    fn delta_time(&self) -> f32 {
        self.delta_time
    }

    fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains(name)
    }
}

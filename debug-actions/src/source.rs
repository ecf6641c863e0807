//! Host input contract

use winit::keyboard::KeyCode;

/// Snapshot of host input for the current tick
///
/// The manager only reads through this trait, so any input backend (a winit
/// event loop, a gamepad library, a scripted test) can drive it. All queries
/// refer to the tick being processed by the current
/// [`DebugActionManager::update`](crate::DebugActionManager::update) call.
pub trait InputSource {
    /// Whether the named button is held
    fn is_button_down(&self, button: &str) -> bool;

    /// Whether the named button went up during this tick
    fn is_button_released(&self, button: &str) -> bool;

    /// Whether the key is held
    fn is_key_down(&self, key: KeyCode) -> bool;

    /// Whether the key went up during this tick
    fn is_key_released(&self, key: KeyCode) -> bool;

    /// Signed axis value; exactly 0.0 when neutral
    ///
    /// NaN and infinite values are treated as neutral.
    fn axis(&self, axis: &str) -> f32;

    /// Seconds elapsed since the previous tick
    fn delta_time(&self) -> f32;

    /// Whether the host input configuration defines this button or axis
    fn is_bound(&self, name: &str) -> bool;
}

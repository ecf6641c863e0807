//! Runtime state of a single debug action

use smallvec::SmallVec;

use crate::source::InputSource;
use crate::trigger::{ActionDesc, MatchedTrigger};

/// A trigger that has fired and not yet been fully released
#[derive(Debug, Clone)]
struct RunningTrigger {
    matched: MatchedTrigger,
    /// Sticky per-source release latch; a source stays released once it has been seen up
    released: SmallVec<[bool; 4]>,
    /// Seconds since the trigger fired
    timer: f32,
}

/// Mutable per-action state driven by the manager once per tick
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    running: Option<RunningTrigger>,
    /// Activation produced this tick, 0.0 when the action did not fire
    value: f32,
}

impl ActionState {
    /// Whether the action has fired and is waiting for release or repeat
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Activation for the current tick
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Seconds since the running trigger fired (0.0 when idle)
    pub fn timer(&self) -> f32 {
        self.running.as_ref().map_or(0.0, |running| running.timer)
    }

    /// The trigger that started the running action
    pub fn matched(&self) -> Option<MatchedTrigger> {
        self.running.as_ref().map(|running| running.matched)
    }

    /// Clear this tick's activation and advance a running trigger toward reset
    ///
    /// The action resets once every source of its trigger has been released, or
    /// once its repeat delay has passed. Returns `true` if it reset this tick.
    pub fn update(&mut self, desc: &ActionDesc, input: &impl InputSource) -> bool {
        self.value = 0.0;

        let Some(running) = self.running.as_mut() else {
            return false;
        };

        running.timer += input.delta_time();

        match running.matched {
            MatchedTrigger::Buttons(i) => {
                for (released, button) in running.released.iter_mut().zip(desc.buttons[i].buttons()) {
                    *released |= input.is_button_released(button);
                }
            }
            MatchedTrigger::Axis => {
                // Axis is released once it reads exactly neutral or non-finite
                if let Some(axis) = desc.axis.as_deref() {
                    let value = input.axis(axis);
                    running.released[0] |= value == 0.0 || !value.is_finite();
                }
            }
            MatchedTrigger::Keys(i) => {
                for (released, key) in running.released.iter_mut().zip(desc.keys[i].keys()) {
                    *released |= input.is_key_released(*key);
                }
            }
        }

        let all_released = running.released.iter().all(|released| *released);
        if all_released || desc.repeat.rearms_after(running.timer) {
            self.running = None;
            return true;
        }
        false
    }

    /// Start the action with the given trigger and activation value
    pub fn trigger(&mut self, desc: &ActionDesc, matched: MatchedTrigger, value: f32) {
        let count = matched.source_count(desc);
        self.value = value;
        self.running = Some(RunningTrigger {
            matched,
            released: SmallVec::from_elem(false, count),
            timer: 0.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::RepeatMode;
    use crate::frame_input::FrameInput;

    fn step(state: &mut ActionState, desc: &ActionDesc, input: &mut FrameInput) -> bool {
        let reset = state.update(desc, &*input);
        input.end_frame();
        reset
    }

    #[test]
    fn test_idle_update_is_noop() {
        let desc = ActionDesc::new(RepeatMode::Never).with_buttons(["A"]);
        let mut state = ActionState::default();
        let mut input = FrameInput::new();
        input.set_delta_time(0.5);

        assert!(!step(&mut state, &desc, &mut input));
        assert!(!state.is_running());
        assert_eq!(state.timer(), 0.0);
        assert_eq!(state.value(), 0.0);
    }

    #[test]
    fn test_trigger_sets_value_until_next_update() {
        let desc = ActionDesc::new(RepeatMode::Never).with_axis("X");
        let mut state = ActionState::default();
        let mut input = FrameInput::new();

        state.trigger(&desc, MatchedTrigger::Axis, -0.5);
        assert_eq!(state.value(), -0.5);
        assert_eq!(state.matched(), Some(MatchedTrigger::Axis));

        input.set_axis("X", -0.5);
        step(&mut state, &desc, &mut input);
        assert_eq!(state.value(), 0.0);
        assert!(state.is_running());
    }

    #[test]
    fn test_release_latch_is_sticky() {
        let desc = ActionDesc::new(RepeatMode::Never).with_buttons(["A", "B"]);
        let mut state = ActionState::default();
        let mut input = FrameInput::new();
        input.update_button("A", true);
        input.update_button("B", true);
        input.end_frame();

        state.trigger(&desc, MatchedTrigger::Buttons(0), 1.0);

        // B goes up and is pressed again; the latch remembers the release
        input.update_button("B", false);
        assert!(!step(&mut state, &desc, &mut input));
        input.update_button("B", true);
        assert!(!step(&mut state, &desc, &mut input));

        // A goes up: both sources have now been released at some point
        input.update_button("A", false);
        assert!(step(&mut state, &desc, &mut input));
        assert!(!state.is_running());
    }

    #[test]
    fn test_timer_accumulates_delta() {
        let desc = ActionDesc::new(RepeatMode::Never).with_keys([winit::keyboard::KeyCode::KeyQ]);
        let mut state = ActionState::default();
        let mut input = FrameInput::new();
        input.update_keyboard(winit::keyboard::KeyCode::KeyQ, true);
        input.set_delta_time(0.125);

        state.trigger(&desc, MatchedTrigger::Keys(0), 1.0);
        step(&mut state, &desc, &mut input);
        step(&mut state, &desc, &mut input);
        assert_eq!(state.timer(), 0.25);

        // Never mode keeps running no matter how long it is held
        for _ in 0..100 {
            assert!(!step(&mut state, &desc, &mut input));
        }
        assert!(state.is_running());
    }

    #[test]
    fn test_delay_resets_without_release() {
        let desc = ActionDesc::new(RepeatMode::Delay(0.25)).with_buttons(["A"]);
        let mut state = ActionState::default();
        let mut input = FrameInput::new();
        input.update_button("A", true);
        input.set_delta_time(0.125);

        state.trigger(&desc, MatchedTrigger::Buttons(0), 1.0);
        assert!(!step(&mut state, &desc, &mut input)); // 0.125
        assert!(!step(&mut state, &desc, &mut input)); // 0.25, not past the delay
        assert!(step(&mut state, &desc, &mut input)); // 0.375
        assert_eq!(state.timer(), 0.0);
    }

    #[test]
    fn test_axis_release_requires_exact_zero() {
        let desc = ActionDesc::new(RepeatMode::Never).with_axis("X");
        let mut state = ActionState::default();
        let mut input = FrameInput::new();

        state.trigger(&desc, MatchedTrigger::Axis, 1.0);

        input.set_axis("X", 0.001);
        assert!(!step(&mut state, &desc, &mut input));

        input.set_axis("X", 0.0);
        assert!(step(&mut state, &desc, &mut input));
    }
}

//! Step a trace script through the debug action manager

use hashbrown::{HashMap, HashSet};
use nethercore_debug_actions::{ActionTable, DebugAction, DebugActionManager, FrameInput, KeyCode};

use crate::script::{FrameEntry, ScriptError, TraceScript};

/// Tolerance when comparing expected activations
const EXPECT_EPSILON: f32 = 1e-6;

/// Actions that fired on one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameResult {
    pub frame: u64,
    pub fired: Vec<(DebugAction, f32)>,
}

/// An expectation that did not hold
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub frame: u64,
    pub action: DebugAction,
    pub expected: f32,
    pub actual: f32,
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "frame {}: {} expected {} but was {}",
            self.frame, self.action, self.expected, self.actual
        )
    }
}

/// Result of running a script
#[derive(Debug, Clone, Default)]
pub struct TraceReport {
    /// Whether the manager accepted the simulated bindings
    pub valid: bool,
    /// Frames on which at least one action fired
    pub frames: Vec<FrameResult>,
    pub mismatches: Vec<Mismatch>,
    /// Number of frames stepped
    pub frames_run: u64,
}

impl TraceReport {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Simulated host: applies script entries to a [`FrameInput`]
struct ScriptedHost {
    input: FrameInput,
    held_buttons: HashSet<String>,
    held_keys: HashSet<KeyCode>,
    axes: HashMap<String, f32>,
}

impl ScriptedHost {
    fn new(input: FrameInput) -> Self {
        Self {
            input,
            held_buttons: HashSet::new(),
            held_keys: HashSet::new(),
            axes: HashMap::new(),
        }
    }

    fn apply(&mut self, entry: &FrameEntry) -> Result<(), ScriptError> {
        if let Some(buttons) = &entry.buttons {
            let next: HashSet<String> = buttons.iter().cloned().collect();
            for button in self.held_buttons.difference(&next) {
                self.input.update_button(button, false);
            }
            for button in &next {
                self.input.update_button(button, true);
            }
            self.held_buttons = next;
        }

        if let Some(next) = entry.held_keys()? {
            for key in self.held_keys.difference(&next) {
                self.input.update_keyboard(*key, false);
            }
            for key in &next {
                self.input.update_keyboard(*key, true);
            }
            self.held_keys = next;
        }

        if let Some(axes) = &entry.axes {
            for axis in self.axes.keys() {
                if !axes.contains_key(axis) {
                    self.input.set_axis(axis, 0.0);
                }
            }
            for (axis, value) in axes {
                self.input.set_axis(axis, *value);
            }
            self.axes = axes.clone();
        }
        Ok(())
    }
}

/// Run `script` against `table`, frame 0 through the script's last frame
///
/// With `fail_fast`, stops after the first frame with a mismatch.
pub fn run_script(
    script: &TraceScript,
    table: ActionTable,
    fail_fast: bool,
) -> Result<TraceReport, ScriptError> {
    script.validate()?;

    let input = match &script.bindings {
        Some(bindings) => FrameInput::with_bindings(bindings.iter().cloned()),
        None => FrameInput::with_bindings(table.required_bindings()),
    };
    let mut host = ScriptedHost::new(input);
    let mut manager = DebugActionManager::new(table, &host.input);

    let mut report = TraceReport {
        valid: manager.is_valid(),
        ..TraceReport::default()
    };
    let mut entries = script.frames.iter().peekable();

    for frame in 0..=script.last_frame() {
        let entry = entries.next_if(|entry| entry.f == frame);
        if let Some(entry) = entry {
            host.apply(entry)?;
        }

        let delta = entry.and_then(|entry| entry.delta).unwrap_or(script.delta);
        host.input.set_delta_time(delta);
        manager.update(&host.input);
        report.frames_run += 1;

        let fired: Vec<(DebugAction, f32)> = DebugAction::ALL
            .into_iter()
            .map(|action| (action, manager.action(action)))
            .filter(|(_, value)| *value != 0.0)
            .collect();
        if !fired.is_empty() {
            tracing::debug!("frame {}: {} action(s) fired", frame, fired.len());
            report.frames.push(FrameResult { frame, fired });
        }

        let mut failed = false;
        if let Some(entry) = entry {
            for (action, expected) in entry.expectations()? {
                let actual = manager.action(action);
                if (actual - expected).abs() > EXPECT_EPSILON {
                    report.mismatches.push(Mismatch {
                        frame,
                        action,
                        expected,
                        actual,
                    });
                    failed = true;
                }
            }
        }

        host.input.end_frame();
        if failed && fail_fast {
            break;
        }
    }

    Ok(report)
}

/// Execute the `run` command
pub fn execute(
    script_path: &std::path::Path,
    actions: Option<&std::path::Path>,
    fail_fast: bool,
) -> anyhow::Result<()> {
    use anyhow::Context;

    let script = TraceScript::from_file(script_path)
        .with_context(|| format!("Failed to load script: {}", script_path.display()))?;
    let table = match actions {
        Some(path) => nethercore_debug_actions::config::load_from(path)
            .with_context(|| format!("Failed to load action table: {}", path.display()))?,
        None => ActionTable::default(),
    };

    let report = run_script(&script, table, fail_fast)
        .with_context(|| format!("Failed to run script: {}", script_path.display()))?;

    if !report.valid {
        println!("warning: bindings incomplete, no action can fire");
    }
    for result in &report.frames {
        let fired: Vec<String> = result
            .fired
            .iter()
            .map(|(action, value)| format!("{}={:.3}", action, value))
            .collect();
        println!("f={:<6} {}", result.frame, fired.join(" "));
    }

    println!();
    println!("=== Trace Complete ===");
    println!("Frames: {}", report.frames_run);
    println!("Mismatches: {}", report.mismatches.len());
    for mismatch in &report.mismatches {
        println!("  {}", mismatch);
    }

    if report.passed() {
        Ok(())
    } else {
        anyhow::bail!("{} expectation(s) failed", report.mismatches.len())
    }
}

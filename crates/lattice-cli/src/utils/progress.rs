use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use latticegpm::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;
const DONE_LABEL: &str = "✓ Done";

/// Renders engine progress events on a single progress bar.
///
/// Phases show as a spinner; a task inside a phase (one step per folded genotype) switches
/// the bar to a counter until the task finishes.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::drawing_to(ProgressDrawTarget::stderr())
    }

    /// Tracks progress without drawing anything, for `--quiet` runs.
    pub fn hidden() -> Self {
        Self::drawing_to(ProgressDrawTarget::hidden())
    }

    fn drawing_to(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target)
            .with_style(spinner_style())
            .with_message("Initializing...");
        bar.finish_and_clear();
        Self {
            bar: Arc::new(Mutex::new(bar)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = Arc::clone(&self.bar);
        Box::new(move |event: Progress| match bar.lock() {
            Ok(guard) => apply(&guard, event),
            Err(_) => warn!("Progress bar mutex was poisoned. Cannot update progress."),
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(bar: &ProgressBar, event: Progress) {
    match event {
        Progress::PhaseStart { name } => {
            bar.reset();
            bar.set_length(0);
            bar.set_style(spinner_style());
            bar.set_message(name);
            bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        }
        Progress::PhaseFinish => {
            bar.disable_steady_tick();
            bar.finish_with_message(DONE_LABEL);
        }
        Progress::TaskStart { total_steps } => {
            bar.disable_steady_tick();
            bar.reset();
            bar.set_style(counter_style());
            bar.set_length(total_steps);
        }
        Progress::TaskIncrement => bar.inc(1),
        Progress::TaskFinish => {
            if let Some(total) = bar.length() {
                bar.set_position(total);
            }
            bar.finish();
        }
        Progress::Message(text) if bar.is_finished() => bar.set_message(text),
        Progress::Message(text) => bar.println(format!("  {}", text)),
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn counter_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<26} [{bar:40.cyan/blue}] {pos}/{len} genotypes ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key("eta", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
        })
        .progress_chars("=>-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn snapshot(handler: &CliProgressHandler) -> (Option<u64>, u64, bool, String) {
        let bar = handler.bar.lock().unwrap();
        (bar.length(), bar.position(), bar.is_finished(), bar.message())
    }

    #[test]
    fn fresh_handler_is_idle() {
        let handler = CliProgressHandler::hidden();
        let (length, position, finished, _) = snapshot(&handler);
        assert_eq!(length, Some(0));
        assert_eq!(position, 0);
        assert!(finished);
    }

    #[test]
    fn map_workflow_events_drive_the_counter() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Folding Genotypes",
        });
        let (_, _, finished, message) = snapshot(&handler);
        assert!(!finished);
        assert_eq!(message, "Folding Genotypes");

        callback(Progress::TaskStart { total_steps: 16 });
        for _ in 0..5 {
            callback(Progress::TaskIncrement);
        }
        assert_eq!(snapshot(&handler).0, Some(16));
        assert_eq!(snapshot(&handler).1, 5);

        callback(Progress::TaskFinish);
        let (_, position, finished, _) = snapshot(&handler);
        assert_eq!(position, 16);
        assert!(finished);

        callback(Progress::PhaseFinish);
        assert_eq!(snapshot(&handler).3, DONE_LABEL);
    }

    #[test]
    fn message_on_an_idle_bar_becomes_its_label() {
        let handler = CliProgressHandler::hidden();
        handler.get_callback()(Progress::Message("Ensemble ready.".to_string()));
        assert_eq!(snapshot(&handler).3, "Ensemble ready.");
    }

    #[test]
    fn callback_can_run_on_another_thread() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart {
                name: "Enumerating Conformations",
            });
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let (_, _, finished, message) = snapshot(&handler);
        assert!(finished);
        assert_eq!(message, DONE_LABEL);
    }
}

//! Binding between a run's emissions and a view.

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tracing::debug;

use docflow_core::{ProgressState, RunId};

use crate::sink::ProgressSink;

/// What the hosting page should be showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewMode {
    /// No run bound yet
    Idle,
    /// Showing live progress
    Running,
    /// Showing the success panel
    Complete,
}

/// A view that renders progress.
pub trait ProgressView: Send {
    /// Redraw for a new snapshot.
    fn render_progress(&mut self, state: &ProgressState);

    /// Switch to the completion panel. Called once per run.
    fn render_complete(&mut self, state: &ProgressState);
}

struct Bound<V> {
    view: V,
    run: Option<RunId>,
    mode: ViewMode,
    last: Option<ProgressState>,
}

/// Feeds a view from a run, filtering out snapshots of other runs.
///
/// An unbound binding adopts the run of the first snapshot it receives.
pub struct PresentationBinding<V> {
    inner: Mutex<Bound<V>>,
}

impl<V: ProgressView> PresentationBinding<V> {
    /// Create an idle binding around `view`.
    pub fn new(view: V) -> Self {
        Self {
            inner: Mutex::new(Bound {
                view,
                run: None,
                mode: ViewMode::Idle,
                last: None,
            }),
        }
    }

    /// Bind to a specific run, discarding anything shown for the previous one.
    pub fn bind(&self, run_id: RunId) {
        let mut inner = self.lock();
        inner.run = Some(run_id);
        inner.mode = ViewMode::Running;
        inner.last = None;
    }

    /// Return to idle; the next snapshot's run is adopted.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.run = None;
        inner.mode = ViewMode::Idle;
        inner.last = None;
    }

    /// Current view mode.
    pub fn mode(&self) -> ViewMode {
        self.lock().mode
    }

    /// Last snapshot rendered for the bound run.
    pub fn last(&self) -> Option<ProgressState> {
        self.lock().last.clone()
    }

    /// Run access to the wrapped view.
    pub fn with_view<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        f(&mut self.lock().view)
    }

    /// Apply one snapshot.
    pub fn apply(&self, state: &ProgressState) {
        let mut inner = self.lock();

        let bound = inner.run;
        match bound {
            None => {
                inner.run = Some(state.run_id);
                inner.mode = ViewMode::Running;
            }
            Some(run) if run != state.run_id => {
                debug!("Ignoring snapshot from stale run {}", state.run_id);
                return;
            }
            Some(_) => {}
        }

        if inner.mode == ViewMode::Complete {
            return;
        }
        if inner.last.as_ref() == Some(state) {
            return;
        }

        inner.view.render_progress(state);
        if state.is_complete {
            inner.view.render_complete(state);
            inner.mode = ViewMode::Complete;
        }
        inner.last = Some(state.clone());
    }

    fn lock(&self) -> MutexGuard<'_, Bound<V>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<V: ProgressView> ProgressSink for PresentationBinding<V> {
    fn emit(&self, state: &ProgressState) {
        self.apply(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docflow_core::StageSequence;

    #[derive(Default)]
    struct RecordingView {
        frames: Vec<(u8, String)>,
        completions: usize,
    }

    impl ProgressView for RecordingView {
        fn render_progress(&mut self, state: &ProgressState) {
            self.frames.push((state.percent, state.label.clone()));
        }

        fn render_complete(&mut self, _state: &ProgressState) {
            self.completions += 1;
        }
    }

    fn seq() -> StageSequence {
        StageSequence::from_pairs(&[(50, "Uploading"), (100, "Done")]).unwrap()
    }

    #[test]
    fn test_adopts_first_run_and_completes_once() {
        let binding = PresentationBinding::new(RecordingView::default());
        assert_eq!(binding.mode(), ViewMode::Idle);

        let run = RunId::new();
        binding.apply(&ProgressState::at(run, &seq(), 50));
        assert_eq!(binding.mode(), ViewMode::Running);

        let done = ProgressState::at(run, &seq(), 100);
        binding.apply(&done);
        binding.apply(&done);
        assert_eq!(binding.mode(), ViewMode::Complete);

        binding.with_view(|view| {
            assert_eq!(view.frames.len(), 2);
            assert_eq!(view.completions, 1);
        });
        assert_eq!(binding.last(), Some(done));
    }

    #[test]
    fn test_ignores_other_runs() {
        let binding = PresentationBinding::new(RecordingView::default());
        let current = RunId::new();
        binding.bind(current);

        binding.apply(&ProgressState::at(RunId::new(), &seq(), 100));
        assert_eq!(binding.mode(), ViewMode::Running);
        assert!(binding.last().is_none());

        binding.apply(&ProgressState::at(current, &seq(), 50));
        binding.with_view(|view| assert_eq!(view.frames, vec![(50, "Uploading".to_string())]));
    }

    #[test]
    fn test_reset_allows_new_run() {
        let binding = PresentationBinding::new(RecordingView::default());
        binding.apply(&ProgressState::at(RunId::new(), &seq(), 100));
        assert_eq!(binding.mode(), ViewMode::Complete);

        binding.reset();
        assert_eq!(binding.mode(), ViewMode::Idle);

        binding.apply(&ProgressState::at(RunId::new(), &seq(), 100));
        assert_eq!(binding.mode(), ViewMode::Complete);
        binding.with_view(|view| assert_eq!(view.completions, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_driven_by_driver() {
        use crate::driver::{DriverConfig, ProgressDriver};
        use std::sync::Arc;
        use std::time::Duration;

        let binding = Arc::new(PresentationBinding::new(RecordingView::default()));
        let driver = ProgressDriver::new(
            DriverConfig::new()
                .with_tick_interval(Duration::from_millis(200))
                .with_step(25),
        );

        let handle = driver.start(seq(), binding.clone()).unwrap();
        binding.bind(handle.run_id());
        handle.wait().await;

        assert_eq!(binding.mode(), ViewMode::Complete);
        binding.with_view(|view| {
            let percents: Vec<u8> = view.frames.iter().map(|(p, _)| *p).collect();
            assert_eq!(percents, vec![25, 50, 75, 100]);
            assert_eq!(view.completions, 1);
        });
    }
}

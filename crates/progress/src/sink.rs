//! Receivers of progress emissions.

use std::sync::Arc;

use tokio::sync::mpsc;

use docflow_core::ProgressState;

/// Something that consumes every emission of a run.
///
/// `emit` is called from the driver task while it holds the run's emission
/// lock, so an implementation must not call `stop()` on the run feeding it.
pub trait ProgressSink: Send + Sync {
    /// Receive one snapshot.
    fn emit(&self, state: &ProgressState);
}

impl<T: ProgressSink + ?Sized> ProgressSink for Arc<T> {
    fn emit(&self, state: &ProgressState) {
        (**self).emit(state)
    }
}

/// Forwards emissions into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ProgressState>,
}

impl ChannelSink {
    /// Create a sink and the receiver it feeds.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProgressState>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ProgressSink for ChannelSink {
    fn emit(&self, state: &ProgressState) {
        // A dropped receiver means nobody is watching any more.
        let _ = self.tx.send(state.clone());
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F> ProgressSink for FnSink<F>
where
    F: Fn(&ProgressState) + Send + Sync,
{
    fn emit(&self, state: &ProgressState) {
        (self.0)(state)
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _state: &ProgressState) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use docflow_core::{RunId, StageSequence};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample() -> ProgressState {
        let seq = StageSequence::from_pairs(&[(100, "Done")]).unwrap();
        ProgressState::at(RunId::new(), &seq, 40)
    }

    #[test]
    fn test_channel_sink_forwards() {
        let (sink, mut rx) = ChannelSink::new();
        let state = sample();
        sink.emit(&state);
        assert_eq!(rx.try_recv().unwrap(), state);
    }

    #[test]
    fn test_channel_sink_ignores_closed_receiver() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        sink.emit(&sample());
    }

    #[test]
    fn test_fn_sink_through_arc() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let sink: Arc<dyn ProgressSink> = Arc::new(FnSink(move |_: &ProgressState| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        sink.emit(&sample());
        sink.emit(&sample());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}

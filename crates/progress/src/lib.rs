//! Staged Progress Simulation
//!
//! Drives simulated long-running operations through their named stages on a
//! fixed timer, and binds the resulting snapshots to a view.

#![warn(missing_docs)]

pub mod run;
pub mod driver;
pub mod sink;
pub mod binding;

pub use run::{Advance, ProgressRun};
pub use driver::{DriverConfig, ProgressDriver, ProgressHandle, RunOutcome, RunStatus};
pub use sink::{ChannelSink, FnSink, NullSink, ProgressSink};
pub use binding::{PresentationBinding, ProgressView, ViewMode};

//! Docflow core data models.
//!
//! This crate defines the data structures behind the simulated long-running
//! operations of the document processing dashboard: stage sequences, progress
//! snapshots, and the static catalogs the deployment wizard offers.

#![warn(missing_docs)]

// Core identities
mod id;
mod error;

// Staged progress
mod stage;
mod state;
pub mod presets;

// Wizard
pub mod catalog;
mod deployment;

// Re-exports
pub use id::RunId;
pub use error::{ProgressError, SequenceDefect, Result};

pub use stage::{Stage, StageSequence, COMPLETE};
pub use state::ProgressState;

pub use catalog::{
    CompliancePreset, Difficulty, Icon, Industry, Model, ModelTier, Region, WorkflowCategory,
    WorkflowTemplate,
};
pub use deployment::{DeploymentConfig, WizardStep};

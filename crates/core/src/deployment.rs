//! Deployment wizard configuration.
//!
//! The values chosen in the wizard are echoed back verbatim on the success
//! panel; the only logic here is step gating and catalog validation.

use serde::{Deserialize, Serialize};

use crate::catalog::{find_compliance, find_industry, find_model, find_region};
use crate::error::{ProgressError, Result};

/// Values picked across the wizard steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Industry id
    pub industry: String,

    /// Use case name, one of the industry's use cases
    pub use_case: String,

    /// Model id
    pub model: String,

    /// Region id
    pub region: String,

    /// Compliance preset id
    pub compliance: String,

    /// Organization name
    pub organization: String,

    /// Free-form team size
    pub team_size: String,

    /// Free-form expected document volume
    pub document_volume: String,
}

/// Steps of the deployment wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    /// Pick an industry and one of its use cases
    IndustryAndUseCase,
    /// Pick a model
    ModelSelection,
    /// Pick region and compliance, name the organization
    Infrastructure,
    /// Review and deploy
    Deploy,
}

impl WizardStep {
    /// All steps in order.
    pub const ALL: [WizardStep; 4] = [
        WizardStep::IndustryAndUseCase,
        WizardStep::ModelSelection,
        WizardStep::Infrastructure,
        WizardStep::Deploy,
    ];

    /// 1-based step number.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::IndustryAndUseCase => 1,
            WizardStep::ModelSelection => 2,
            WizardStep::Infrastructure => 3,
            WizardStep::Deploy => 4,
        }
    }

    /// Step title.
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::IndustryAndUseCase => "Industry & Use Case",
            WizardStep::ModelSelection => "Model Selection",
            WizardStep::Infrastructure => "Infrastructure",
            WizardStep::Deploy => "Deploy System",
        }
    }

    /// Following step, if any.
    pub fn next(&self) -> Option<WizardStep> {
        Self::ALL.get(usize::from(self.number())).copied()
    }

    /// Preceding step, if any.
    pub fn previous(&self) -> Option<WizardStep> {
        usize::from(self.number())
            .checked_sub(2)
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

impl DeploymentConfig {
    /// Whether the fields required by `step` are filled in.
    pub fn can_proceed(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::IndustryAndUseCase => !self.industry.is_empty() && !self.use_case.is_empty(),
            WizardStep::ModelSelection => !self.model.is_empty(),
            WizardStep::Infrastructure => {
                !self.region.is_empty()
                    && !self.compliance.is_empty()
                    && !self.organization.is_empty()
            }
            WizardStep::Deploy => true,
        }
    }

    /// First step whose required fields are missing.
    pub fn first_incomplete_step(&self) -> Option<WizardStep> {
        WizardStep::ALL.into_iter().find(|s| !self.can_proceed(*s))
    }

    /// Resolve every catalog id and check the use case fits the industry.
    pub fn validate(&self) -> Result<()> {
        if let Some(step) = self.first_incomplete_step() {
            return Err(ProgressError::InvalidConfig {
                reason: format!("step {} ({}) is incomplete", step.number(), step.title()),
            });
        }

        let industry = find_industry(&self.industry)?;
        if !industry.offers(&self.use_case) {
            return Err(ProgressError::UnknownCatalogEntry {
                kind: "use case",
                id: self.use_case.clone(),
            });
        }
        find_model(&self.model)?;
        find_region(&self.region)?;
        find_compliance(&self.compliance)?;

        Ok(())
    }
}

//! Stage presets for the two simulated flows.

use std::time::Duration;

use crate::stage::{Stage, StageSequence};

/// Delay between deployment stages.
pub const DEPLOYMENT_TICK: Duration = Duration::from_millis(1500);

/// Delay between upload ticks.
pub const UPLOAD_TICK: Duration = Duration::from_millis(200);

/// Percent added per upload tick.
pub const UPLOAD_STEP: u8 = 10;

const DEPLOYMENT: &[(u8, &str)] = &[
    (10, "Provisioning CoreWeave GPU instances..."),
    (25, "Setting up dual A100 GPUs for LLaMA 3 70B..."),
    (40, "Configuring vLLM with quantized model..."),
    (55, "Deploying ChromaDB vector storage cluster..."),
    (70, "Setting up LlamaIndex RAG pipeline..."),
    (85, "Configuring n8n workflow automation..."),
    (95, "Deploying Streamlit chat interface..."),
    (100, "System deployment complete!"),
];

const UPLOAD: &[(u8, &str)] = &[
    (10, "Uploading files..."),
    (50, "Extracting text..."),
    (80, "Indexing documents..."),
    (100, "Upload complete"),
];

/// Stages of the deployment wizard's final step.
pub fn deployment_stages() -> StageSequence {
    StageSequence::new(to_stages(DEPLOYMENT))
        .unwrap_or_else(|err| unreachable!("deployment preset is malformed: {err}"))
        .with_pending_label("Preparing deployment...")
}

/// Stages of a document upload.
pub fn upload_stages() -> StageSequence {
    StageSequence::new(to_stages(UPLOAD))
        .unwrap_or_else(|err| unreachable!("upload preset is malformed: {err}"))
        .with_pending_label("Waiting for files...")
}

fn to_stages(pairs: &[(u8, &str)]) -> Vec<Stage> {
    pairs
        .iter()
        .map(|(threshold, label)| Stage::new(*threshold, *label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_preset() {
        let seq = deployment_stages();
        assert_eq!(seq.len(), 8);
        assert_eq!(seq.label_at(0), "Preparing deployment...");
        assert_eq!(seq.label_at(10), "Provisioning CoreWeave GPU instances...");
        assert_eq!(seq.label_at(25), "Setting up dual A100 GPUs for LLaMA 3 70B...");
        assert_eq!(seq.label_at(100), "System deployment complete!");
    }

    #[test]
    fn test_upload_preset() {
        let seq = upload_stages();
        assert_eq!(seq.thresholds().collect::<Vec<_>>(), vec![10, 50, 80, 100]);
        assert_eq!(seq.label_at(60), "Extracting text...");
    }
}

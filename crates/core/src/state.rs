//! Observable snapshot of a simulated operation.

use serde::{Deserialize, Serialize};

use crate::id::RunId;
use crate::stage::{StageSequence, COMPLETE};

/// Progress of one run at a point in time.
///
/// Decoding rejects a percent above 100 and an `is_complete` flag that
/// disagrees with the percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressState {
    /// Run that produced this snapshot
    pub run_id: RunId,

    /// Percent complete, 0..=100
    pub percent: u8,

    /// Label of the current stage
    pub label: String,

    /// True exactly when `percent` is 100
    pub is_complete: bool,
}

impl ProgressState {
    /// State of a run that has not ticked yet.
    pub fn initial(run_id: RunId, sequence: &StageSequence) -> Self {
        Self::at(run_id, sequence, 0)
    }

    /// State at `percent` (clamped to 100) with the label looked up in `sequence`.
    pub fn at(run_id: RunId, sequence: &StageSequence, percent: u8) -> Self {
        let percent = percent.min(COMPLETE);
        Self {
            run_id,
            percent,
            label: sequence.label_at(percent).to_string(),
            is_complete: percent == COMPLETE,
        }
    }

    /// Progress as a fraction in 0.0..=1.0.
    pub fn fraction(&self) -> f32 {
        f32::from(self.percent) / f32::from(COMPLETE)
    }
}

impl<'de> Deserialize<'de> for ProgressState {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            run_id: RunId,
            percent: u8,
            label: String,
            is_complete: bool,
        }

        let raw = Raw::deserialize(deserializer)?;
        if raw.percent > COMPLETE {
            return Err(serde::de::Error::custom(format!(
                "percent {} is above {}",
                raw.percent, COMPLETE
            )));
        }
        if raw.is_complete != (raw.percent == COMPLETE) {
            return Err(serde::de::Error::custom(format!(
                "is_complete is {} at {}%",
                raw.is_complete, raw.percent
            )));
        }
        Ok(Self {
            run_id: raw.run_id,
            percent: raw.percent,
            label: raw.label,
            is_complete: raw.is_complete,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let seq = StageSequence::from_pairs(&[(25, "Configuring"), (100, "Ready")])
            .unwrap()
            .with_pending_label("Queued");
        let state = ProgressState::initial(RunId::new(), &seq);
        assert_eq!(state.percent, 0);
        assert_eq!(state.label, "Queued");
        assert!(!state.is_complete);
        assert_eq!(state.fraction(), 0.0);
    }

    #[test]
    fn test_complete_only_at_hundred() {
        let seq = StageSequence::from_pairs(&[(50, "Half"), (100, "Done")]).unwrap();
        let run = RunId::new();
        assert!(!ProgressState::at(run, &seq, 99).is_complete);

        let done = ProgressState::at(run, &seq, 120);
        assert_eq!(done.percent, 100);
        assert_eq!(done.label, "Done");
        assert!(done.is_complete);
        assert_eq!(done.fraction(), 1.0);
    }

    #[test]
    fn test_deserialize_validates() {
        let seq = StageSequence::from_pairs(&[(50, "Half"), (100, "Done")]).unwrap();
        let state = ProgressState::at(RunId::new(), &seq, 50);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(serde_json::from_str::<ProgressState>(&json).unwrap(), state);

        let run = state.run_id.to_string();
        let over = format!(
            r#"{{"run_id":"{}","percent":101,"label":"Done","is_complete":true}}"#,
            run
        );
        assert!(serde_json::from_str::<ProgressState>(&over).is_err());

        let early = format!(
            r#"{{"run_id":"{}","percent":40,"label":"Half","is_complete":true}}"#,
            run
        );
        assert!(serde_json::from_str::<ProgressState>(&early).is_err());

        let unfinished = format!(
            r#"{{"run_id":"{}","percent":100,"label":"Done","is_complete":false}}"#,
            run
        );
        assert!(serde_json::from_str::<ProgressState>(&unfinished).is_err());
    }
}

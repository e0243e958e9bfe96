//! Stage model - named phases of a simulated long-running operation.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SequenceDefect};

/// Percent value at which a run is complete.
pub const COMPLETE: u8 = 100;

/// One named phase, entered once progress reaches `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Percent at which this stage begins
    pub threshold: u8,

    /// Status message shown while in this stage
    pub label: String,
}

impl Stage {
    /// Create a new stage.
    pub fn new(threshold: u8, label: impl Into<String>) -> Self {
        Self {
            threshold,
            label: label.into(),
        }
    }
}

/// Ordered, validated mapping from progress thresholds to labels.
///
/// Thresholds are strictly increasing and the last one is always 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageSequence {
    stages: Vec<Stage>,
    pending_label: Option<String>,
}

impl StageSequence {
    /// Build a sequence, rejecting empty or non-monotonic stage lists.
    pub fn new(stages: Vec<Stage>) -> Result<Self> {
        validate(&stages)?;
        Ok(Self {
            stages,
            pending_label: None,
        })
    }

    /// Build a sequence from `(threshold, label)` pairs.
    pub fn from_pairs(pairs: &[(u8, &str)]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|(threshold, label)| Stage::new(*threshold, *label))
                .collect(),
        )
    }

    /// Label reported before the first threshold is reached.
    ///
    /// Without one, the first stage's label is used.
    pub fn with_pending_label(mut self, label: impl Into<String>) -> Self {
        self.pending_label = Some(label.into());
        self
    }

    /// All stages in order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always false; a validated sequence has at least one stage.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Thresholds in order.
    pub fn thresholds(&self) -> impl Iterator<Item = u8> + '_ {
        self.stages.iter().map(|s| s.threshold)
    }

    /// Index of the greatest stage whose threshold is at or below `percent`.
    pub fn stage_index_at(&self, percent: u8) -> Option<usize> {
        let percent = percent.min(COMPLETE);
        // Thresholds are sorted, so the reached stages form a prefix.
        let reached = self.stages.partition_point(|s| s.threshold <= percent);
        reached.checked_sub(1)
    }

    /// Label to display at `percent`.
    pub fn label_at(&self, percent: u8) -> &str {
        match self.stage_index_at(percent) {
            Some(index) => &self.stages[index].label,
            None => self
                .pending_label
                .as_deref()
                .unwrap_or(&self.stages[0].label),
        }
    }

    /// First threshold strictly above `percent`, if any.
    pub fn next_threshold_after(&self, percent: u8) -> Option<u8> {
        self.thresholds().find(|t| *t > percent)
    }
}

impl<'de> Deserialize<'de> for StageSequence {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            stages: Vec<Stage>,
            #[serde(default)]
            pending_label: Option<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let mut sequence = StageSequence::new(raw.stages).map_err(serde::de::Error::custom)?;
        sequence.pending_label = raw.pending_label;
        Ok(sequence)
    }
}

fn validate(stages: &[Stage]) -> std::result::Result<(), SequenceDefect> {
    let Some(last) = stages.last() else {
        return Err(SequenceDefect::Empty);
    };

    let mut previous: Option<u8> = None;
    for (index, stage) in stages.iter().enumerate() {
        if stage.threshold > COMPLETE {
            return Err(SequenceDefect::ThresholdOutOfRange {
                index,
                threshold: stage.threshold,
            });
        }
        if let Some(previous) = previous {
            if stage.threshold <= previous {
                return Err(SequenceDefect::NotIncreasing {
                    index,
                    previous,
                    threshold: stage.threshold,
                });
            }
        }
        previous = Some(stage.threshold);
    }

    if last.threshold != COMPLETE {
        return Err(SequenceDefect::FinalNotComplete {
            threshold: last.threshold,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProgressError;

    fn abc() -> StageSequence {
        StageSequence::from_pairs(&[(10, "A"), (40, "B"), (100, "C")]).unwrap()
    }

    #[test]
    fn test_label_lookup_by_threshold() {
        let seq = abc();
        assert_eq!(seq.label_at(5), "A");
        assert_eq!(seq.label_at(10), "A");
        assert_eq!(seq.label_at(25), "A");
        assert_eq!(seq.label_at(39), "A");
        assert_eq!(seq.label_at(40), "B");
        assert_eq!(seq.label_at(99), "B");
        assert_eq!(seq.label_at(100), "C");
    }

    #[test]
    fn test_pending_label_before_first_threshold() {
        let seq = abc().with_pending_label("Waiting");
        assert_eq!(seq.label_at(0), "Waiting");
        assert_eq!(seq.label_at(9), "Waiting");
        assert_eq!(seq.label_at(10), "A");
    }

    #[test]
    fn test_percent_above_complete_is_clamped() {
        assert_eq!(abc().label_at(250), "C");
        assert_eq!(abc().stage_index_at(250), Some(2));
    }

    #[test]
    fn test_stage_index_at() {
        let seq = abc();
        assert_eq!(seq.stage_index_at(0), None);
        assert_eq!(seq.stage_index_at(10), Some(0));
        assert_eq!(seq.stage_index_at(55), Some(1));
    }

    #[test]
    fn test_next_threshold_after() {
        let seq = abc();
        assert_eq!(seq.next_threshold_after(0), Some(10));
        assert_eq!(seq.next_threshold_after(10), Some(40));
        assert_eq!(seq.next_threshold_after(100), None);
    }

    #[test]
    fn test_zero_threshold_is_allowed() {
        let seq = StageSequence::from_pairs(&[(0, "Start"), (100, "Done")]).unwrap();
        assert_eq!(seq.label_at(0), "Start");
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert_eq!(
            StageSequence::new(Vec::new()),
            Err(ProgressError::InvalidSequence(SequenceDefect::Empty))
        );
    }

    #[test]
    fn test_non_increasing_rejected() {
        let err = StageSequence::from_pairs(&[(10, "A"), (10, "B"), (100, "C")]).unwrap_err();
        assert_eq!(
            err,
            ProgressError::InvalidSequence(SequenceDefect::NotIncreasing {
                index: 1,
                previous: 10,
                threshold: 10,
            })
        );

        let err = StageSequence::from_pairs(&[(50, "A"), (20, "B"), (100, "C")]).unwrap_err();
        assert!(matches!(
            err,
            ProgressError::InvalidSequence(SequenceDefect::NotIncreasing { index: 1, .. })
        ));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = StageSequence::from_pairs(&[(10, "A"), (101, "B")]).unwrap_err();
        assert_eq!(
            err,
            ProgressError::InvalidSequence(SequenceDefect::ThresholdOutOfRange {
                index: 1,
                threshold: 101,
            })
        );
    }

    #[test]
    fn test_must_end_at_complete() {
        let err = StageSequence::from_pairs(&[(10, "A"), (90, "B")]).unwrap_err();
        assert_eq!(
            err,
            ProgressError::InvalidSequence(SequenceDefect::FinalNotComplete { threshold: 90 })
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: StageSequence = serde_json::from_str(
            r#"{"stages":[{"threshold":50,"label":"Half"},{"threshold":100,"label":"Done"}],"pending_label":"Idle"}"#,
        )
        .unwrap();
        assert_eq!(ok.label_at(0), "Idle");
        assert_eq!(ok.len(), 2);

        let bad = serde_json::from_str::<StageSequence>(r#"{"stages":[]}"#);
        assert!(bad.is_err());
    }
}

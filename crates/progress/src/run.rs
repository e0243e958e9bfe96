//! Timer-free stepping of a single run.

use serde::{Deserialize, Serialize};

use docflow_core::{ProgressError, ProgressState, Result, RunId, StageSequence, COMPLETE};

/// How far a run moves on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advance {
    /// Add a fixed number of percent points, capping at 100
    Step(u8),
    /// Jump straight to the next stage threshold
    StageByStage,
}

impl Advance {
    /// Reject steps that would never reach 100 or overshoot the scale.
    pub fn validate(&self) -> Result<()> {
        match self {
            Advance::Step(step) if *step == 0 || *step > COMPLETE => {
                Err(ProgressError::InvalidConfig {
                    reason: format!("step must be within 1..=100, got {}", step),
                })
            }
            _ => Ok(()),
        }
    }
}

impl Default for Advance {
    fn default() -> Self {
        Advance::Step(10)
    }
}

/// Deterministic state advancer for one run.
///
/// Each `tick` yields the next snapshot until the run completes, after which
/// it yields nothing. The timer-driven driver is a thin loop around this.
#[derive(Debug, Clone)]
pub struct ProgressRun {
    sequence: StageSequence,
    advance: Advance,
    state: ProgressState,
    ticks: u32,
}

impl ProgressRun {
    /// Create a run at 0 percent.
    pub fn new(run_id: RunId, sequence: StageSequence, advance: Advance) -> Result<Self> {
        advance.validate()?;
        let state = ProgressState::initial(run_id, &sequence);
        Ok(Self {
            sequence,
            advance,
            state,
            ticks: 0,
        })
    }

    /// Advance once. Returns `None` once the run has completed.
    pub fn tick(&mut self) -> Option<ProgressState> {
        if self.state.is_complete {
            return None;
        }

        let current = self.state.percent;
        let next = match self.advance {
            Advance::Step(step) => current.saturating_add(step).min(COMPLETE),
            Advance::StageByStage => self
                .sequence
                .next_threshold_after(current)
                .unwrap_or(COMPLETE),
        };

        self.state = ProgressState::at(self.state.run_id, &self.sequence, next);
        self.ticks += 1;
        Some(self.state.clone())
    }

    /// Latest snapshot.
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Whether the terminal snapshot has been produced.
    pub fn is_complete(&self) -> bool {
        self.state.is_complete
    }

    /// Ticks taken so far.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Number of ticks a full run takes.
    pub fn max_ticks(&self) -> u32 {
        match self.advance {
            Advance::Step(step) => u32::from(COMPLETE).div_ceil(u32::from(step)),
            Advance::StageByStage => self
                .sequence
                .thresholds()
                .filter(|t| *t > 0)
                .count() as u32,
        }
    }

    /// Stage sequence driving this run.
    pub fn sequence(&self) -> &StageSequence {
        &self.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deploy_like() -> StageSequence {
        StageSequence::from_pairs(&[(10, "Provisioning"), (25, "Configuring"), (100, "Ready")])
            .unwrap()
    }

    fn drain(run: &mut ProgressRun) -> Vec<ProgressState> {
        std::iter::from_fn(|| run.tick()).collect()
    }

    #[test]
    fn test_fixed_step_emissions() {
        let mut run = ProgressRun::new(RunId::new(), deploy_like(), Advance::Step(10)).unwrap();
        let emissions = drain(&mut run);

        let percents: Vec<u8> = emissions.iter().map(|s| s.percent).collect();
        assert_eq!(percents, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);

        let labels: Vec<&str> = emissions.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(&labels[..3], &["Provisioning", "Provisioning", "Configuring"]);
        assert!(labels[2..9].iter().all(|l| *l == "Configuring"));
        assert_eq!(labels[9], "Ready");

        assert_eq!(emissions.iter().filter(|s| s.is_complete).count(), 1);
        assert!(emissions.last().unwrap().is_complete);
    }

    #[test]
    fn test_step_caps_at_complete() {
        let seq = StageSequence::from_pairs(&[(100, "Done")]).unwrap();
        let mut run = ProgressRun::new(RunId::new(), seq, Advance::Step(30)).unwrap();
        let percents: Vec<u8> = drain(&mut run).iter().map(|s| s.percent).collect();
        assert_eq!(percents, vec![30, 60, 90, 100]);
        assert_eq!(run.ticks(), run.max_ticks());
    }

    #[test]
    fn test_terminates_within_bound_for_every_step() {
        for step in 1..=100u8 {
            let mut run = ProgressRun::new(RunId::new(), deploy_like(), Advance::Step(step)).unwrap();
            let emissions = drain(&mut run);

            let bound = (100 + u32::from(step) - 1) / u32::from(step);
            assert!(emissions.len() as u32 <= bound, "step {}", step);
            assert_eq!(emissions.last().unwrap().percent, 100, "step {}", step);
            assert!(emissions.windows(2).all(|w| w[0].percent <= w[1].percent));
            assert_eq!(emissions.iter().filter(|s| s.is_complete).count(), 1);
        }
    }

    #[test]
    fn test_no_ticks_after_completion() {
        let mut run = ProgressRun::new(RunId::new(), deploy_like(), Advance::Step(50)).unwrap();
        drain(&mut run);
        assert!(run.is_complete());
        assert!(run.tick().is_none());
        assert_eq!(run.ticks(), 2);
    }

    #[test]
    fn test_stage_by_stage() {
        let mut run = ProgressRun::new(RunId::new(), deploy_like(), Advance::StageByStage).unwrap();
        assert_eq!(run.max_ticks(), 3);

        let emissions = drain(&mut run);
        let seen: Vec<(u8, &str)> = emissions
            .iter()
            .map(|s| (s.percent, s.label.as_str()))
            .collect();
        assert_eq!(
            seen,
            vec![(10, "Provisioning"), (25, "Configuring"), (100, "Ready")]
        );
    }

    #[test]
    fn test_stage_by_stage_skips_zero_threshold() {
        let seq = StageSequence::from_pairs(&[(0, "Start"), (100, "Done")]).unwrap();
        let mut run = ProgressRun::new(RunId::new(), seq, Advance::StageByStage).unwrap();
        assert_eq!(run.state().label, "Start");
        assert_eq!(run.max_ticks(), 1);
        assert_eq!(drain(&mut run).len(), 1);
    }

    #[test]
    fn test_invalid_step_rejected() {
        assert!(matches!(
            ProgressRun::new(RunId::new(), deploy_like(), Advance::Step(0)),
            Err(ProgressError::InvalidConfig { .. })
        ));
        assert!(matches!(
            ProgressRun::new(RunId::new(), deploy_like(), Advance::Step(101)),
            Err(ProgressError::InvalidConfig { .. })
        ));
    }
}

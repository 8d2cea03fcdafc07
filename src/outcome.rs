//! Step outcome type for bootstrap sequencing.
//!
//! Every bootstrap step reports a [`StepOutcome`] instead of raising or
//! leaking a tool's exit-status conventions. The orchestrator is the only
//! place that decides fatal-vs-continue, so a step never needs to know
//! whether its failure aborts the run.

/// The uniform result of a single bootstrap step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step did what it set out to do.
    Success,

    /// The step degraded but the run can continue (e.g., the inference
    /// backend is down, or a fetch failed and the local copy is used as-is).
    Warning(String),

    /// The step failed in a way that makes launching pointless.
    Fatal(String),
}

impl StepOutcome {
    /// Whether this outcome allows the sequence to continue.
    pub fn can_proceed(&self) -> bool {
        !matches!(self, StepOutcome::Fatal(_))
    }

    /// Whether this outcome carries a warning.
    pub fn is_warning(&self) -> bool {
        matches!(self, StepOutcome::Warning(_))
    }

    /// The reason attached to a warning or fatal outcome, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            StepOutcome::Success => None,
            StepOutcome::Warning(reason) | StepOutcome::Fatal(reason) => Some(reason),
        }
    }
}

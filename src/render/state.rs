use crate::contract::PipelineReport;

/// Which of the three report layouts to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationState {
    /// Every tool executed and passed
    Success,
    /// Not ready, but at least one tool is degraded
    Warning,
    /// Not ready and nothing is degraded
    Failure,
}

impl PresentationState {
    /// `Warning` wins over `Failure` whenever any result is degraded, even
    /// if other tools errored outright.
    pub fn classify(report: &PipelineReport) -> Self {
        if report.is_ready() {
            PresentationState::Success
        } else if report.has_degraded() {
            PresentationState::Warning
        } else {
            PresentationState::Failure
        }
    }
}

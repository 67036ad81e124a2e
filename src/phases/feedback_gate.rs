//! Human-feedback gate between planning and research.

/// What the orchestrator should do with the current plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanDecision {
    /// Re-run the planner once with the feedback attached.
    Replan,
    /// Accept the plan and start researching sections.
    Proceed,
}

/// Decide whether plan feedback asks for a revision.
///
/// This is a literal substring check for "revise" (case-insensitive), not a
/// semantic classification of the feedback text. No feedback always proceeds.
pub fn decide(feedback: Option<&str>) -> PlanDecision {
    match feedback {
        Some(text) if text.to_lowercase().contains("revise") => PlanDecision::Replan,
        _ => PlanDecision::Proceed,
    }
}

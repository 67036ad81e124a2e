use crate::models::Section;

/// Shared state for one report run.
///
/// Owned exclusively by the orchestrator; section loops work on private
/// copies and results are merged back here between loop invocations.
#[derive(Debug, Clone)]
pub struct ReportState {
    pub topic: String,
    /// Human feedback on the plan, if any. Consumed by the replan gate.
    pub feedback_on_report_plan: Option<String>,
    pub sections: Vec<Section>,
    pub final_report: Option<String>,
}

impl ReportState {
    pub fn new(topic: impl Into<String>, feedback_on_report_plan: Option<String>) -> Self {
        Self {
            topic: topic.into(),
            feedback_on_report_plan,
            sections: Vec::new(),
            final_report: None,
        }
    }

    /// Sections that currently have content.
    ///
    /// Always derived from `sections`, never tracked separately, so it can
    /// not diverge from the section list.
    pub fn completed_sections(&self) -> Vec<&Section> {
        self.sections.iter().filter(|s| s.is_complete()).collect()
    }

    /// Replace the section with the same name, keeping planned order.
    /// Sections the planner never emitted are ignored.
    pub fn replace_section(&mut self, updated: Section) {
        if let Some(slot) = self.sections.iter_mut().find(|s| s.name == updated.name) {
            *slot = updated;
        }
    }
}

use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ResearchConfig;
use crate::gateways::{LanguageModel, WebSearch};
use crate::phases::{decide, prompts, PlanDecision, ReportPlanner, SectionRefiner};

use super::state::ReportState;

/// Block emitted for a section whose content could not be generated. Never
/// silently omit a planned section from the compiled report.
const MISSING_CONTENT_PLACEHOLDER: &str = "Content not generated.";

/// Progress callback injected by the caller: receives (step, message).
/// Keeps the engine free of process-wide mutable state; anyone wanting a job
/// registry updates it from inside their sink.
pub type ProgressSink = Arc<dyn Fn(&str, &str) + Send + Sync>;

/// Output of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    pub final_report: String,
}

/// Sequences the whole workflow: plan, optional single replan, sequential
/// section research, final-section synthesis, compile.
///
/// Single-shot and not resumable; a caller wanting cancellation or timeouts
/// wraps `run` itself.
pub struct ReportOrchestrator<L, S> {
    llm: L,
    search: S,
    config: ResearchConfig,
    progress: Option<ProgressSink>,
}

impl<L, S> ReportOrchestrator<L, S>
where
    L: LanguageModel,
    S: WebSearch,
{
    pub fn new(llm: L, search: S, config: ResearchConfig) -> Self {
        Self {
            llm,
            search,
            config,
            progress: None,
        }
    }

    /// Attach a progress sink that receives (step, message) events.
    pub fn with_progress(mut self, sink: ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    fn report_progress(&self, step: &str, message: &str) {
        if let Some(sink) = &self.progress {
            sink(step, message);
        }
    }

    /// Run the workflow for a topic. `plan_feedback` is prior human feedback
    /// on the report plan; it drives at most one replan before research
    /// starts.
    pub async fn run(&self, topic: &str, plan_feedback: Option<&str>) -> Result<ReportOutput> {
        info!(
            "Report run starting for topic: {topic} (user: {})",
            self.config.user_id.as_deref().unwrap_or("anonymous")
        );

        let mut state = ReportState::new(topic, plan_feedback.map(str::to_string));
        let planner = ReportPlanner::new(&self.llm, &self.search, &self.config);

        self.report_progress("plan", &format!("Planning report for '{topic}'"));
        state.sections = planner.plan(topic, None).await?;

        // Single replan at most; deeper revision cycles are driven
        // externally by re-invoking run.
        if decide(state.feedback_on_report_plan.as_deref()) == PlanDecision::Replan {
            info!("Plan feedback requests a revision; re-planning once");
            self.report_progress("replan", "Revising plan from feedback");
            state.sections = planner
                .plan(topic, state.feedback_on_report_plan.as_deref())
                .await?;
            state.feedback_on_report_plan = None;
        }

        self.research_sections(topic, &mut state).await;
        self.write_final_sections(topic, &mut state).await;

        self.report_progress("compile", "Compiling final report");
        let final_report = compile_report(&state);
        if final_report.is_empty() {
            anyhow::bail!("No report content was generated for topic '{topic}'");
        }
        state.final_report = Some(final_report.clone());

        info!("Report run finished for topic: {topic}");
        Ok(ReportOutput { final_report })
    }

    /// Run the refinement loop over every research-flagged section, in
    /// planned order. Sequential by design: simple and cost-predictable.
    ///
    /// One failing section does not abort the run; it is left empty for the
    /// placeholder path and the failure is logged.
    async fn research_sections(&self, topic: &str, state: &mut ReportState) {
        let refiner = SectionRefiner::new(&self.llm, &self.search, &self.config);

        for index in 0..state.sections.len() {
            if !state.sections[index].research {
                continue;
            }
            let section = state.sections[index].clone();
            self.report_progress(
                "research",
                &format!("Researching section '{}'", section.name),
            );

            match refiner.refine(topic, section).await {
                Ok(completed) => state.replace_section(completed),
                Err(error) => warn!(
                    "Section '{}' failed: {error:#}; continuing with remaining sections",
                    state.sections[index].name
                ),
            }
        }
    }

    /// Single-pass synthesis of non-research sections from the completed
    /// content. No search or grading here.
    async fn write_final_sections(&self, topic: &str, state: &mut ReportState) {
        // Snapshot the completed content once; every synthesized section
        // sees the same context.
        let context = state
            .completed_sections()
            .iter()
            .map(|s| format!("## {}\n{}", s.name, s.content))
            .collect::<Vec<_>>()
            .join("\n\n");

        for index in 0..state.sections.len() {
            let section = &state.sections[index];
            if section.research || section.is_complete() {
                continue;
            }
            self.report_progress(
                "synthesize",
                &format!("Writing final section '{}'", section.name),
            );

            let prompt = prompts::final_section_writer(topic, section, &context);
            match self.llm.generate(&prompt).await {
                Ok(content) => state.sections[index].content = content,
                Err(error) => warn!(
                    "Final section '{}' failed: {error:#}; leaving placeholder",
                    state.sections[index].name
                ),
            }
        }
    }
}

/// Concatenate every section as a titled block, in planned order. Sections
/// that ended up empty get an explicit placeholder.
fn compile_report(state: &ReportState) -> String {
    state
        .sections
        .iter()
        .map(|section| {
            let content = if section.content.is_empty() {
                MISSING_CONTENT_PLACEHOLDER
            } else {
                section.content.as_str()
            };
            format!("## {}\n{}", section.name, content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

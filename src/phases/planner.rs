use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::ResearchConfig;
use crate::gateways::{run_queries, LanguageModel, WebSearch};
use crate::models::{Queries, Section, Sections};

use super::prompts;

/// Produces the initial section list for a topic.
///
/// A preliminary search pass informs the plan; prior human feedback, when
/// present, is attached to the planning prompt. Gateway errors propagate
/// uncaught since there is no sensible local fallback for a failed plan.
pub struct ReportPlanner<'a, L, S> {
    llm: &'a L,
    search: &'a S,
    config: &'a ResearchConfig,
}

impl<'a, L, S> ReportPlanner<'a, L, S>
where
    L: LanguageModel,
    S: WebSearch,
{
    pub fn new(llm: &'a L, search: &'a S, config: &'a ResearchConfig) -> Self {
        Self { llm, search, config }
    }

    pub async fn plan(&self, topic: &str, prior_feedback: Option<&str>) -> Result<Vec<Section>> {
        info!("Generating report plan for topic: {topic}");

        let query_prompt = prompts::planning_query_writer(
            topic,
            &self.config.report_organization,
            self.config.number_of_planning_queries,
        );
        let queries: Queries = self
            .llm
            .generate_structured(&query_prompt)
            .await
            .context("Failed to generate planning queries")?;

        let results = run_queries(
            self.search,
            &queries.queries,
            self.config.search_results_per_query,
        )
        .await
        .context("Planning search failed")?;

        // One context string, in result order, search by search. Empty is
        // fine: planning proceeds without context.
        let planning_context = results
            .iter()
            .flatten()
            .map(|hit| hit.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        if planning_context.is_empty() {
            debug!("Planning searches returned no content; planning without context");
        }

        let plan_prompt = prompts::report_planner(
            topic,
            &self.config.report_organization,
            &planning_context,
            prior_feedback,
        );
        let plan: Sections = self
            .llm
            .generate_structured(&plan_prompt)
            .await
            .context("Failed to generate report plan")?;

        // Advisory check only: the workflow proceeds with whatever the model
        // returned.
        let research_count = plan.sections.iter().filter(|s| s.research).count();
        if research_count < 2 {
            warn!(
                "Plan has only {research_count} research section(s); a useful report wants 2-3"
            );
        }

        info!(
            "Planned {} sections ({} research-flagged)",
            plan.sections.len(),
            research_count
        );
        Ok(plan.sections)
    }
}

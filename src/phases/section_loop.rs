use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::ResearchConfig;
use crate::gateways::{run_queries, LanguageModel, SearchResult, WebSearch};
use crate::models::{Feedback, Grade, Queries, SearchQuery, Section};

use super::prompts;

/// Where a refinement pass starts after grading routed it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassEntry {
    GenerateQueries,
    WebSearch,
    WriteSection,
}

/// Working state for one section's refinement loop.
///
/// Created fresh per section and discarded when the loop ends; nothing here
/// is shared with the report-level state.
struct SectionRunState {
    section: Section,
    /// Pass counter and termination signal. The ceiling is checked before
    /// the increment, so the counter never exceeds `max_search_depth + 1`.
    search_iterations: u32,
    search_queries: Vec<SearchQuery>,
    source_str: String,
    /// Feedback from the most recent grading pass.
    feedback: Option<Feedback>,
}

/// Drives one section through generate-queries, search, write, grade passes
/// until it passes grading or the iteration ceiling is hit.
///
/// Gateway failures propagate; retry policy belongs to the gateways, not
/// this loop.
pub struct SectionRefiner<'a, L, S> {
    llm: &'a L,
    search: &'a S,
    config: &'a ResearchConfig,
}

impl<'a, L, S> SectionRefiner<'a, L, S>
where
    L: LanguageModel,
    S: WebSearch,
{
    pub fn new(llm: &'a L, search: &'a S, config: &'a ResearchConfig) -> Self {
        Self { llm, search, config }
    }

    /// Refine a section until its content passes grading, returning it with
    /// populated content. Grades at most `max_search_depth + 1` times.
    pub async fn refine(&self, topic: &str, section: Section) -> Result<Section> {
        info!("Refining section: {}", section.name);

        let mut state = SectionRunState {
            section,
            search_iterations: 0,
            search_queries: Vec::new(),
            source_str: String::new(),
            feedback: None,
        };
        let mut entry = PassEntry::GenerateQueries;

        loop {
            if passes_exhausted(state.search_iterations, self.config.max_search_depth) {
                warn!(
                    "Max search iterations reached for section '{}'; keeping the latest draft",
                    state.section.name
                );
                break;
            }
            state.search_iterations += 1;
            debug!(
                "Section '{}' refinement pass {}",
                state.section.name, state.search_iterations
            );

            if entry == PassEntry::GenerateQueries {
                state.search_queries = self.generate_queries(topic, &state.section).await?;
                entry = PassEntry::WebSearch;
            }

            if entry == PassEntry::WebSearch {
                state.source_str = self.web_search(&state.search_queries).await?;
                if is_dead_end(&state.source_str, state.feedback.as_ref()) {
                    warn!(
                        "No sources and no follow-up queries for section '{}'; ending refinement",
                        state.section.name
                    );
                    break;
                }
            }

            self.write_section(topic, &mut state).await?;

            let feedback = self.grade_section(topic, &state).await?;
            if feedback.grade == Grade::Pass {
                debug!("Section '{}' passed grading", state.section.name);
                break;
            }

            if feedback.follow_up_queries.is_empty() {
                // No new searches proposed; attempt a rewrite from the
                // sources already gathered.
                entry = PassEntry::WriteSection;
            } else {
                state.search_queries = feedback.follow_up_queries.clone();
                entry = PassEntry::WebSearch;
            }
            state.feedback = Some(feedback);
        }

        Ok(state.section)
    }

    async fn generate_queries(&self, topic: &str, section: &Section) -> Result<Vec<SearchQuery>> {
        let prompt = prompts::section_query_writer(
            topic,
            &section.description,
            self.config.number_of_section_queries,
        );
        let queries: Queries = self
            .llm
            .generate_structured(&prompt)
            .await
            .with_context(|| format!("Failed to generate queries for section '{}'", section.name))?;
        Ok(queries.queries)
    }

    async fn web_search(&self, queries: &[SearchQuery]) -> Result<String> {
        let results = run_queries(self.search, queries, self.config.search_results_per_query)
            .await
            .context("Section search failed")?;
        Ok(format_sources(&results))
    }

    async fn write_section(&self, topic: &str, state: &mut SectionRunState) -> Result<()> {
        let prompt = prompts::section_writer(topic, &state.section, &state.source_str);
        let content = self
            .llm
            .generate(&prompt)
            .await
            .with_context(|| format!("Failed to write section '{}'", state.section.name))?;
        state.section.content = content;
        Ok(())
    }

    async fn grade_section(&self, topic: &str, state: &SectionRunState) -> Result<Feedback> {
        let prompt = prompts::section_grader(
            topic,
            &state.section.description,
            &state.section.content,
            self.config.number_of_follow_up_queries,
        );
        self.llm
            .generate_structured(&prompt)
            .await
            .with_context(|| format!("Failed to grade section '{}'", state.section.name))
    }
}

/// Join search hits into one numbered source string, in query-then-result
/// order.
fn format_sources(batches: &[Vec<SearchResult>]) -> String {
    batches
        .iter()
        .flatten()
        .enumerate()
        .map(|(index, hit)| format!("[{}] {}: {}", index + 1, hit.url, hit.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// True once `max_search_depth + 1` passes have started. Checked before the
/// counter increments, so a started pass always runs to its grade.
fn passes_exhausted(search_iterations: u32, max_search_depth: u32) -> bool {
    search_iterations > max_search_depth
}

/// Early-termination check inside the search step: nothing new to read, and
/// the previous grading pass failed without proposing follow-up queries.
///
/// On the first pass no feedback exists yet, so the check is vacuously false
/// and the loop always performs at least one full write/grade cycle.
fn is_dead_end(source_str: &str, feedback: Option<&Feedback>) -> bool {
    source_str.is_empty()
        && feedback.is_some_and(|f| f.grade == Grade::Fail && f.follow_up_queries.is_empty())
}

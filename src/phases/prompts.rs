//! Prompt builders for every generation step.
//!
//! Structured steps ask for a bare JSON object matching the serde shape the
//! caller parses; see `gateways::parse_structured`.

use crate::models::Section;

/// Queries that inform the initial report plan.
pub fn planning_query_writer(topic: &str, organization: &str, count: usize) -> String {
    format!(
        r#"You are planning research for a report on the topic below.

Report topic: {topic}

Report organization: {organization}

Generate {count} web search queries that will help gather information for
planning the report sections. Queries should relate to the topic and cover
the breadth the organization requires, while staying specific enough to find
high-quality sources.

Respond with only a JSON object of the form:
{{"queries": [{{"search_query": "..."}}]}}
Use null for search_query if a slot has no useful query."#
    )
}

/// The section list itself.
pub fn report_planner(
    topic: &str,
    organization: &str,
    context: &str,
    feedback: Option<&str>,
) -> String {
    let feedback_block = match feedback {
        Some(text) => format!("\nFeedback on a previous version of this plan:\n{text}\n"),
        None => String::new(),
    };

    format!(
        r#"Generate a list of sections for a report on the topic below. The plan
should be tight and focused, with no overlapping sections or filler.

Report topic: {topic}

Report organization: {organization}

Context gathered from preliminary web searches:
{context}
{feedback_block}
Each section needs:
- name: the section title.
- description: a brief overview of what the section covers.
- research: whether web research is needed for this section. Main body
  sections must have research set to true; a useful report has at least 2-3
  research sections. Intro and conclusion sections are synthesized from the
  rest of the report and take research false.
- content: leave as an empty string for now.

Respond with only a JSON object of the form:
{{"sections": [{{"name": "...", "description": "...", "research": true, "content": ""}}]}}"#
    )
}

/// Queries targeting one section's scope.
pub fn section_query_writer(topic: &str, section_topic: &str, count: usize) -> String {
    format!(
        r#"Generate targeted web search queries to research one section of a report.

Report topic: {topic}

Section topic: {section_topic}

Produce {count} queries that examine different aspects of the section topic
and are specific enough to find high-quality, relevant sources.

Respond with only a JSON object of the form:
{{"queries": [{{"search_query": "..."}}]}}
Use null for search_query if a slot has no useful query."#
    )
}

/// (Re)write one research section from the accumulated sources.
pub fn section_writer(topic: &str, section: &Section, sources: &str) -> String {
    let existing = if section.content.is_empty() {
        String::new()
    } else {
        format!("\nExisting section content to synthesize with the sources:\n{}\n", section.content)
    };

    format!(
        r####"Write one section of a research report.

Report topic: {topic}

Section name: {name}

Section topic: {description}
{existing}
Source material:
{sources}

Guidelines:
- If there is no existing content, write from scratch; otherwise merge it
  with the new source material.
- 150-200 words, simple language, short paragraphs.
- Start with "## {name}" as a Markdown heading.
- Ground every claim in the source material and end with a "### Sources"
  list, numbering sources sequentially without gaps."####,
        name = section.name,
        description = section.description,
    )
}

/// Grade a section draft against its intended scope.
pub fn section_grader(
    topic: &str,
    section_topic: &str,
    content: &str,
    follow_up_count: usize,
) -> String {
    format!(
        r#"Review a report section against its intended scope.

Report topic: {topic}

Section topic: {section_topic}

Section content:
{content}

Evaluate whether the content adequately addresses the section topic. If it
does not, propose up to {follow_up_count} follow-up search queries that would
gather the missing information.

Respond with only a JSON object of the form:
{{"grade": "pass", "follow_up_queries": []}}
where grade is "pass" or "fail" and follow_up_queries contains objects of the
form {{"search_query": "..."}}."#
    )
}

/// Write a non-research section from the completed report content.
pub fn final_section_writer(topic: &str, section: &Section, report_context: &str) -> String {
    format!(
        r###"Write a section that synthesizes the rest of a completed report.

Report topic: {topic}

Section name: {name}

Section topic: {description}

Completed report content:
{report_context}

Guidelines:
- For an introduction: use "# " for the report title, 50-100 words, no lists
  or tables, no sources section.
- For a conclusion or summary: use "## {name}" as the heading, 100-150 words,
  at most one table or list to distill the report's points, no sources
  section.
- Use concrete details from the report content; do not introduce new claims."###,
        name = section.name,
        description = section.description,
    )
}

use serde::{Deserialize, Serialize};

/// One named, described unit of the final report.
///
/// Sections with `research = true` are filled in by the search/write/grade
/// refinement loop; the rest (typically intro and conclusion) are synthesized
/// from the completed research sections in a single pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub description: String,
    pub research: bool,
    /// Empty until a writer phase populates it.
    #[serde(default)]
    pub content: String,
}

impl Section {
    pub fn new(name: impl Into<String>, description: impl Into<String>, research: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            research,
            content: String::new(),
        }
    }

    /// A section is complete once it has any content.
    pub fn is_complete(&self) -> bool {
        !self.content.is_empty()
    }
}

/// Structured output wrapper for the planner's section list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sections {
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A single proposed web search.
///
/// The model may emit `null` when it has nothing useful to search for. That
/// is a valid outcome, not an error; callers filter null queries out before
/// invoking the search gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub search_query: Option<String>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            search_query: Some(query.into()),
        }
    }
}

/// Structured output wrapper for query generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Queries {
    #[serde(default)]
    pub queries: Vec<SearchQuery>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_content_defaults_empty() {
        let json = r#"{"name": "Intro", "description": "Opening", "research": false}"#;
        let section: Section = serde_json::from_str(json).unwrap();
        assert_eq!(section.content, "");
        assert!(!section.is_complete());
    }

    #[test]
    fn test_null_search_query_deserializes() {
        let json = r#"{"queries": [{"search_query": null}, {"search_query": "rust async"}]}"#;
        let queries: Queries = serde_json::from_str(json).unwrap();
        assert_eq!(queries.queries.len(), 2);
        assert!(queries.queries[0].search_query.is_none());
        assert_eq!(queries.queries[1].search_query.as_deref(), Some("rust async"));
    }
}

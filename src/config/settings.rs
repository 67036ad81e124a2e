use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_max_search_depth() -> u32 {
    2
}

fn default_planning_queries() -> usize {
    3
}

fn default_section_queries() -> usize {
    3
}

fn default_follow_up_queries() -> usize {
    2
}

fn default_results_per_query() -> usize {
    5
}

fn default_report_organization() -> String {
    "1. Introduction, 2. Background, 3. Main Findings, 4. Conclusion".to_string()
}

/// Configuration for one report run.
///
/// Every knob has a documented default; a YAML config file and CLI flags can
/// override them. The engine reads these values but never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Extra refinement passes allowed per section after the first. A section
    /// is graded at most `max_search_depth + 1` times.
    #[serde(default = "default_max_search_depth")]
    pub max_search_depth: u32,

    /// Search queries generated for the planning pass.
    #[serde(default = "default_planning_queries")]
    pub number_of_planning_queries: usize,

    /// Search queries generated per section refinement pass.
    #[serde(default = "default_section_queries")]
    pub number_of_section_queries: usize,

    /// Follow-up queries the grader may propose on a failing grade.
    #[serde(default = "default_follow_up_queries")]
    pub number_of_follow_up_queries: usize,

    /// Result-count bound passed to the search gateway per query.
    #[serde(default = "default_results_per_query")]
    pub search_results_per_query: usize,

    /// Outline the planner is asked to follow.
    #[serde(default = "default_report_organization")]
    pub report_organization: String,

    /// Caller identity, forwarded to progress events only. The engine itself
    /// persists nothing.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_search_depth: default_max_search_depth(),
            number_of_planning_queries: default_planning_queries(),
            number_of_section_queries: default_section_queries(),
            number_of_follow_up_queries: default_follow_up_queries(),
            search_results_per_query: default_results_per_query(),
            report_organization: default_report_organization(),
            user_id: None,
        }
    }
}

impl ResearchConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ResearchConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults if file doesn't exist
    pub fn load_or_default(path: Option<&PathBuf>) -> anyhow::Result<Self> {
        match path {
            Some(p) if p.exists() => Self::from_file(p),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ResearchConfig::default();
        assert_eq!(config.max_search_depth, 2);
        assert_eq!(config.number_of_planning_queries, 3);
        assert_eq!(config.number_of_section_queries, 3);
        assert_eq!(config.number_of_follow_up_queries, 2);
        assert_eq!(config.search_results_per_query, 5);
        assert!(config.user_id.is_none());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_search_depth: 4").unwrap();
        writeln!(file, "report_organization: \"1. Overview, 2. Details\"").unwrap();

        let config = ResearchConfig::from_file(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.max_search_depth, 4);
        assert_eq!(config.report_organization, "1. Overview, 2. Details");
        // Unspecified fields take defaults
        assert_eq!(config.number_of_planning_queries, 3);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let path = PathBuf::from("/nonexistent/research.yaml");
        let config = ResearchConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(config.max_search_depth, 2);
    }
}

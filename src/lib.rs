pub mod config;
pub mod gateways;
pub mod models;
pub mod orchestrator;
pub mod phases;

// Re-export main types
pub use config::ResearchConfig;
pub use gateways::{
    GatewayError, LanguageModel, OpenAiGateway, SearchResult, TavilySearch, WebSearch,
};
pub use models::{Feedback, Grade, Queries, SearchQuery, Section, Sections};
pub use orchestrator::{ProgressSink, ReportOrchestrator, ReportOutput, ReportState};
pub use phases::{decide, PlanDecision, ReportPlanner, SectionRefiner};

mod feedback_gate;
mod planner;
mod section_loop;
pub mod prompts;

pub use feedback_gate::{decide, PlanDecision};
pub use planner::ReportPlanner;
pub use section_loop::SectionRefiner;

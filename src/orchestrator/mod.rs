pub mod state;
pub mod workflow;

pub use state::ReportState;
pub use workflow::{ProgressSink, ReportOrchestrator, ReportOutput};

mod feedback;
mod section;

pub use feedback::{Feedback, Grade};
pub use section::{Queries, SearchQuery, Section, Sections};

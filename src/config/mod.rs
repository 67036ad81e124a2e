mod settings;

pub use settings::ResearchConfig;

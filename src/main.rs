use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use report_forge::{OpenAiGateway, ReportOrchestrator, ResearchConfig, TavilySearch};

/// Report-Forge CLI: iterative research report generation
#[derive(Parser, Debug)]
#[command(name = "report-forge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Report topic
    #[arg(short, long)]
    topic: String,

    /// Prior feedback on the report plan (containing "revise" triggers one replan)
    #[arg(short, long)]
    feedback: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the language model (e.g. "gpt-4o-mini")
    #[arg(long)]
    model: Option<String>,

    /// Maximum extra refinement passes per section
    #[arg(long)]
    max_search_depth: Option<u32>,

    /// Search queries for the planning pass
    #[arg(long)]
    planning_queries: Option<usize>,

    /// Search queries per section refinement pass
    #[arg(long)]
    section_queries: Option<usize>,

    /// Report outline the planner should follow
    #[arg(long)]
    organization: Option<String>,

    /// Write the final report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    info!("Report-Forge starting");

    // Load configuration and apply CLI overrides
    let mut config = ResearchConfig::load_or_default(cli.config.as_ref())?;
    if let Some(depth) = cli.max_search_depth {
        config.max_search_depth = depth;
    }
    if let Some(count) = cli.planning_queries {
        config.number_of_planning_queries = count;
    }
    if let Some(count) = cli.section_queries {
        config.number_of_section_queries = count;
    }
    if let Some(organization) = cli.organization {
        config.report_organization = organization;
    }

    // Gateways come from the environment; a missing key is a hard error.
    let mut llm = OpenAiGateway::from_env()?;
    if let Some(model) = cli.model {
        llm = llm.with_model(model);
    }
    let search = TavilySearch::from_env()?;

    let orchestrator = ReportOrchestrator::new(llm, search, config)
        .with_progress(Arc::new(|step, message| info!("[{step}] {message}")));

    let output = orchestrator.run(&cli.topic, cli.feedback.as_deref()).await?;

    match cli.output {
        Some(path) => {
            std::fs::write(&path, &output.final_report)
                .with_context(|| format!("Failed to write report to {path:?}"))?;
            info!("Report written to {path:?}");
        }
        None => println!("{}", output.final_report),
    }

    Ok(())
}

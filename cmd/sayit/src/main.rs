//! sayit - Speak text from recorded samples with a fallback synthesizer.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{ConfigCommand, PlanCommand, SamplesCommand, SayCommand, SegmentCommand};

/// sayit - Speak text from recorded samples.
///
/// Words and phrases with a recorded sample are played with the configured
/// player command; everything else is spoken by a fallback synthesizer.
///
/// Configuration is stored in ~/.samplespeech/sayit/ and supports multiple
/// contexts, similar to kubectl's context management.
#[derive(Parser)]
#[command(name = "sayit")]
#[command(about = "Speak text from recorded samples")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.samplespeech/sayit/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Context name to use
    #[arg(short = 'c', long, global = true)]
    pub context: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage CLI configuration
    Config(ConfigCommand),
    /// Speak text
    Say(SayCommand),
    /// Show how text splits into samples and literal runs
    Segment(SegmentCommand),
    /// Show the commands that would speak text
    Plan(PlanCommand),
    /// List samples in match order
    Samples(SamplesCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_target(false)
            .init();
    }

    match &cli.command {
        Commands::Config(cmd) => cmd.run(&cli).await,
        Commands::Say(cmd) => cmd.run(&cli).await,
        Commands::Segment(cmd) => cmd.run(&cli).await,
        Commands::Plan(cmd) => cmd.run(&cli).await,
        Commands::Samples(cmd) => cmd.run(&cli).await,
    }
}

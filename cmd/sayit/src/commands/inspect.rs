//! Commands that show segmentation without speaking.

use clap::Args;
use serde::Serialize;

use super::{create_cmdline_speaker, get_context, join_text, output, print_verbose};
use crate::Cli;

/// Show how text splits into samples and literal runs.
#[derive(Args)]
pub struct SegmentCommand {
    /// Text to segment
    #[arg(required = true)]
    text: Vec<String>,
}

impl SegmentCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let (_, options) = get_context(cli)?;
        let speaker = create_cmdline_speaker(&options)?;

        let segments = speaker.segments(&join_text(&self.text));
        print_verbose(cli, &format!("Segments: {}", segments.len()));
        output(cli).write(&segments)
    }
}

/// Show the commands that would speak text, without running them.
#[derive(Args)]
pub struct PlanCommand {
    /// Text to plan
    #[arg(required = true)]
    text: Vec<String>,
}

impl PlanCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let (_, options) = get_context(cli)?;
        let speaker = create_cmdline_speaker(&options)?;

        let invocations = speaker.plan(&join_text(&self.text));
        print_verbose(cli, &format!("Invocations: {}", invocations.len()));
        output(cli).write(&invocations)
    }
}

/// List samples in the order they are tried.
#[derive(Args)]
pub struct SamplesCommand;

#[derive(Serialize)]
struct SampleList<'a> {
    dir: String,
    suffix: &'a str,
    samples: Vec<&'a str>,
}

impl SamplesCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let (_, options) = get_context(cli)?;
        let speaker = create_cmdline_speaker(&options)?;

        let (Some(catalog), Some(dir)) = (speaker.catalog(), speaker.sample_dir()) else {
            anyhow::bail!("context has no sample_dir and sample_suffix configured");
        };

        output(cli).write(&SampleList {
            dir: dir.display().to_string(),
            suffix: catalog.suffix(),
            samples: catalog.names().collect(),
        })
    }
}

//! Speak command.

use clap::Args;
use samplespeech_speech::SpeechRegistry;

use super::{get_context, join_text, print_verbose};
use crate::Cli;

/// Speak text through the context's speaker.
///
/// Waits until playback has finished before exiting.
#[derive(Args)]
pub struct SayCommand {
    /// Text to speak
    #[arg(required = true)]
    text: Vec<String>,
}

impl SayCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let (ctx, options) = get_context(cli)?;
        let text = join_text(&self.text);

        print_verbose(cli, &format!("Using context: {}", ctx.name));
        print_verbose(cli, &format!("Speaker: {}", ctx.speaker_kind()));

        let registry = SpeechRegistry::with_defaults();
        let speaker = registry.create(ctx.speaker_kind(), &options).await?;

        speaker.say(&text).await?;
        speaker.close().await?;
        Ok(())
    }
}

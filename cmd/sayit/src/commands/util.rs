//! Utility functions for CLI commands.

use std::sync::Arc;

use samplespeech_cli::config::{load_config, Config, Context};
use samplespeech_cli::{Output, OutputFormat};
use samplespeech_speech::{CmdlineSpeaker, CommandSpawner, SpeechOptions};

use crate::Cli;

const APP_NAME: &str = "sayit";

/// Gets the global configuration.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(APP_NAME, cli.config.as_deref())
}

/// Gets the context configuration to use, with the speech options it
/// resolves to.
pub fn get_context(cli: &Cli) -> anyhow::Result<(Context, SpeechOptions)> {
    let cfg = get_config(cli)?;

    let ctx = match (cfg.resolve_context(cli.context.as_deref()), cli.context.as_deref()) {
        (Some(ctx), _) => ctx.clone(),
        (None, None) => anyhow::bail!(
            "no context specified. Use -c flag or set a default context with 'sayit config use-context'"
        ),
        (None, Some(name)) => anyhow::bail!("context '{}' not found", name),
    };

    let options = ctx.speech_options(cfg.dir())?;
    Ok((ctx, options))
}

/// Builds a command line speaker for inspection; nothing is spawned until
/// `say` is called.
pub fn create_cmdline_speaker(options: &SpeechOptions) -> anyhow::Result<CmdlineSpeaker> {
    Ok(CmdlineSpeaker::new(options, Arc::new(CommandSpawner))?)
}

/// Returns the output configured by global flags.
pub fn output(cli: &Cli) -> Output {
    Output::new(OutputFormat::from_json_flag(cli.json), cli.output.clone())
}

/// Joins positional words into one utterance.
pub fn join_text(words: &[String]) -> String {
    words.join(" ")
}

/// Prints verbose output if enabled.
pub fn print_verbose(cli: &Cli, msg: &str) {
    if cli.verbose {
        eprintln!("[verbose] {}", msg);
    }
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}

//! Configuration management commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use samplespeech_cli::config::Context as CliContext;

use super::{get_config, print_success};
use crate::Cli;

/// Manage CLI configuration.
///
/// Contexts allow you to keep several speech setups (sample sets, players,
/// synthesizers), similar to kubectl's context management.
///
/// Configuration is stored in ~/.samplespeech/sayit/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Add a new context
    #[command(name = "add-context")]
    AddContext {
        /// Context name
        name: String,
        /// Primary command, e.g. "aplay %s" (required)
        #[arg(long)]
        cmdline: String,
        /// Fallback synthesizer command, e.g. "espeak %s"
        #[arg(long)]
        cmdline_tts: Option<String>,
        /// File whose first non-empty line is the fallback synthesizer command
        #[arg(long)]
        cmdline_tts_file: Option<PathBuf>,
        /// Directory holding the recorded samples
        #[arg(long)]
        sample_dir: Option<PathBuf>,
        /// File name suffix of the samples, e.g. ".wav"
        #[arg(long)]
        sample_suffix: Option<String>,
        /// Sample file names are percent-encoded
        #[arg(long)]
        decode_names: bool,
        /// Registered speaker to use (default: cmdline)
        #[arg(long)]
        kind: Option<String>,
    },
    /// Delete a context
    #[command(name = "delete-context")]
    DeleteContext {
        /// Context name
        name: String,
    },
    /// Set the current context
    #[command(name = "use-context")]
    UseContext {
        /// Context name
        name: String,
    },
    /// Display the current context
    #[command(name = "get-context")]
    GetContext,
    /// List all contexts
    #[command(name = "list-contexts", alias = "get-contexts")]
    ListContexts,
    /// View the current configuration
    View,
}

impl ConfigCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ConfigSubcommand::AddContext {
                name,
                cmdline,
                cmdline_tts,
                cmdline_tts_file,
                sample_dir,
                sample_suffix,
                decode_names,
                kind,
            } => {
                let mut cfg = get_config(cli)?;

                let ctx = CliContext {
                    kind: kind.clone().unwrap_or_default(),
                    cmdline: cmdline.clone(),
                    cmdline_tts: cmdline_tts.clone().unwrap_or_default(),
                    cmdline_tts_file: cmdline_tts_file.clone(),
                    sample_dir: sample_dir.clone(),
                    sample_suffix: sample_suffix.clone().unwrap_or_default(),
                    decode_names: *decode_names,
                    ..Default::default()
                };

                cfg.add_context(name, ctx)?;
                print_success(&format!("Context \"{}\" added successfully", name));
                Ok(())
            }

            ConfigSubcommand::DeleteContext { name } => {
                let mut cfg = get_config(cli)?;
                cfg.delete_context(name)?;
                print_success(&format!("Context \"{}\" deleted", name));
                Ok(())
            }

            ConfigSubcommand::UseContext { name } => {
                let mut cfg = get_config(cli)?;
                cfg.use_context(name)?;
                print_success(&format!("Switched to context \"{}\"", name));
                Ok(())
            }

            ConfigSubcommand::GetContext => {
                let cfg = get_config(cli)?;
                if cfg.current_context.is_empty() {
                    println!("No current context set");
                } else {
                    println!("{}", cfg.current_context);
                }
                Ok(())
            }

            ConfigSubcommand::ListContexts => {
                let cfg = get_config(cli)?;

                if cfg.contexts.is_empty() {
                    println!("No contexts configured");
                    return Ok(());
                }

                // Print table header
                println!("{:<8} {:<20} {:<30} {}", "CURRENT", "NAME", "SAMPLE_DIR", "CMDLINE");

                for name in cfg.list_contexts() {
                    let Some(ctx) = cfg.get_context(name) else {
                        continue;
                    };
                    let current = if name == cfg.current_context { "*" } else { "" };
                    let sample_dir = ctx
                        .sample_dir
                        .as_ref()
                        .map(|d| d.display().to_string())
                        .unwrap_or_else(|| "(none)".to_string());
                    println!("{:<8} {:<20} {:<30} {}", current, name, sample_dir, ctx.cmdline);
                }

                Ok(())
            }

            ConfigSubcommand::View => {
                let cfg = get_config(cli)?;

                println!("Config file: {}", cfg.path().display());
                println!("Current context: {}", cfg.current_context);
                println!("Contexts: {}", cfg.contexts.len());

                if !cfg.contexts.is_empty() {
                    println!("\nContext details:");

                    for name in cfg.list_contexts() {
                        let Some(ctx) = cfg.get_context(name) else {
                            continue;
                        };
                        println!("\n  {}:", name);
                        println!("    Speaker: {}", ctx.speaker_kind());
                        println!("    Command: {}", ctx.cmdline);
                        if !ctx.cmdline_tts.is_empty() {
                            println!("    Fallback command: {}", ctx.cmdline_tts);
                        }
                        if let Some(file) = &ctx.cmdline_tts_file {
                            println!("    Fallback command file: {}", file.display());
                        }
                        if let Some(dir) = &ctx.sample_dir {
                            println!("    Sample dir: {}", dir.display());
                        }
                        if !ctx.sample_suffix.is_empty() {
                            println!("    Sample suffix: {}", ctx.sample_suffix);
                        }
                        if ctx.decode_names {
                            println!("    Decode names: yes");
                        }
                    }
                }

                Ok(())
            }
        }
    }
}

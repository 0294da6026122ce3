//! Speaker that plays recorded samples and synthesizes the rest.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use samplespeech_segment::{segment, SampleCatalog, Segment};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    plan_samples, plan_text, scan_samples, CommandTemplate, Invocation, InvocationKind,
    ProcessSpawner, Sequencer, Speaker, SpeechError,
};

/// Options for [`CmdlineSpeaker`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechOptions {
    /// Primary command. Plays samples, or speaks the whole text when no
    /// samples are configured.
    pub cmdline: String,

    /// Fallback synthesizer for text no sample covers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmdline_tts: Option<String>,

    /// Directory holding the samples.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_dir: Option<PathBuf>,

    /// File name suffix of the samples, e.g. `.wav`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_suffix: Option<String>,

    /// Sample file names are percent-encoded.
    #[serde(default)]
    pub decode_names: bool,
}

struct Samples {
    dir: PathBuf,
    catalog: SampleCatalog,
    decode: bool,
}

/// Speaks through external commands, preferring recorded samples.
///
/// With a sample directory and suffix configured, each utterance is segmented
/// against the sample catalog: matched samples go to the primary command and
/// the remaining text to the fallback synthesizer. Otherwise the primary
/// command speaks the whole text.
pub struct CmdlineSpeaker {
    playback: CommandTemplate,
    synthesis: Option<CommandTemplate>,
    samples: Option<Samples>,
    sequencer: Sequencer,
}

impl CmdlineSpeaker {
    /// Creates a speaker, scanning the sample directory if one is configured.
    pub fn new(
        options: &SpeechOptions,
        spawner: Arc<dyn ProcessSpawner>,
    ) -> Result<Self, SpeechError> {
        let names = match (&options.sample_dir, &options.sample_suffix) {
            (Some(dir), Some(_)) => scan_samples(dir)?,
            _ => Vec::new(),
        };
        Self::with_sample_names(options, names, spawner)
    }

    /// Creates a speaker from sample file names listed by the caller.
    ///
    /// The names are ignored unless both a sample directory and suffix are
    /// configured.
    pub fn with_sample_names<I, S>(
        options: &SpeechOptions,
        names: I,
        spawner: Arc<dyn ProcessSpawner>,
    ) -> Result<Self, SpeechError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let playback = CommandTemplate::parse(&options.cmdline)?;
        let synthesis = options
            .cmdline_tts
            .as_deref()
            .filter(|line| !line.trim().is_empty())
            .map(CommandTemplate::parse)
            .transpose()?;

        let samples = match (&options.sample_dir, &options.sample_suffix) {
            (Some(dir), Some(suffix)) => {
                let catalog = SampleCatalog::build(names, suffix);
                info!(dir = %dir.display(), suffix = %suffix, count = catalog.len(), "speech: samples loaded");
                Some(Samples {
                    dir: dir.clone(),
                    catalog,
                    decode: options.decode_names,
                })
            }
            _ => None,
        };

        Ok(Self {
            playback,
            synthesis,
            samples,
            sequencer: Sequencer::new(spawner),
        })
    }

    /// Returns the sample catalog, if samples are configured.
    pub fn catalog(&self) -> Option<&SampleCatalog> {
        self.samples.as_ref().map(|s| &s.catalog)
    }

    /// Returns the sample directory, if samples are configured.
    pub fn sample_dir(&self) -> Option<&Path> {
        self.samples.as_ref().map(|s| s.dir.as_path())
    }

    /// Splits the text into segments.
    ///
    /// Without samples the whole text is a single literal without the missing
    /// marker.
    pub fn segments(&self, text: &str) -> Vec<Segment> {
        match &self.samples {
            Some(samples) => segment(&samples.catalog, text, samples.decode),
            None if text.is_empty() => Vec::new(),
            None => vec![Segment::Literal(text.to_string())],
        }
    }

    /// Plans the invocations that speak the text.
    pub fn plan(&self, text: &str) -> Vec<Invocation> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let Some(samples) = &self.samples else {
            return vec![plan_text(text, InvocationKind::Playback, &self.playback)];
        };

        if samples.catalog.is_empty() {
            debug!(text = %text, "speech: sample catalog is empty, synthesizing text");
            return vec![match &self.synthesis {
                Some(tpl) => plan_text(text, InvocationKind::Synthesis, tpl),
                None => plan_text(text, InvocationKind::Playback, &self.playback),
            }];
        }

        let segments = segment(&samples.catalog, text, samples.decode);
        let matched = segments.iter().filter(|s| s.is_matched()).count();
        debug!(text = %text, matched, segments = segments.len(), "speech: found samples");
        if matched == 0 {
            error!(text = %text, "speech: no matching samples found");
        }

        plan_samples(
            &segments,
            &samples.dir,
            &self.playback,
            self.synthesis.as_ref(),
        )
    }

    /// Speaks the text. Returns once the last process has been started.
    pub async fn say(&self, text: &str) -> Result<(), SpeechError> {
        debug!(text = %text, "speech: speaking");
        let invocations = self.plan(text);
        self.sequencer.run_all(&invocations).await
    }

    /// Waits until the last started process exits.
    pub async fn wait_idle(&self) {
        self.sequencer.wait_idle().await;
    }
}

#[async_trait]
impl Speaker for CmdlineSpeaker {
    async fn say(&self, text: &str) -> Result<(), SpeechError> {
        CmdlineSpeaker::say(self, text).await
    }

    async fn close(&self) -> Result<(), SpeechError> {
        self.wait_idle().await;
        Ok(())
    }
}

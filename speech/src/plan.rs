//! Turning segments into process invocations.

use std::path::Path;

use samplespeech_segment::Segment;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::CommandTemplate;

/// Which command an invocation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationKind {
    /// The primary command: plays samples, or speaks text when no samples
    /// are configured.
    Playback,
    /// The fallback synthesizer.
    Synthesis,
}

/// One external process to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub kind: InvocationKind,
    pub argv: Vec<String>,
}

impl Invocation {
    /// Creates a playback invocation.
    pub fn playback(argv: Vec<String>) -> Self {
        Self {
            kind: InvocationKind::Playback,
            argv,
        }
    }

    /// Creates a synthesis invocation.
    pub fn synthesis(argv: Vec<String>) -> Self {
        Self {
            kind: InvocationKind::Synthesis,
            argv,
        }
    }
}

/// Returns the path a sample is played from.
pub fn sample_path(sample_dir: &Path, name: &str) -> String {
    format!("{}/{}", sample_dir.display(), name)
}

/// Plans invocations for segments produced from a sample catalog.
///
/// Consecutive matched samples are played by a single playback invocation.
/// Each literal run closes the pending batch and gets its own synthesis
/// invocation with the missing marker removed. Literal runs are dropped with
/// a warning when there is no synthesis template.
pub fn plan_samples(
    segments: &[Segment],
    sample_dir: &Path,
    playback: &CommandTemplate,
    synthesis: Option<&CommandTemplate>,
) -> Vec<Invocation> {
    let mut invocations = Vec::new();
    let mut batch: Vec<String> = Vec::new();

    for segment in segments {
        match segment {
            Segment::Matched(name) => batch.push(sample_path(sample_dir, name)),
            Segment::Literal(_) => {
                flush_batch(&mut invocations, playback, &mut batch);

                let text = segment.strip_marker().unwrap_or_default();
                match synthesis {
                    Some(tpl) => invocations.push(Invocation::synthesis(tpl.expand([text]))),
                    None => warn!(text = %text, "speech: no fallback command, skipping text"),
                }
            }
        }
    }
    flush_batch(&mut invocations, playback, &mut batch);

    invocations
}

/// Plans a single invocation speaking the whole text.
pub fn plan_text(text: &str, kind: InvocationKind, template: &CommandTemplate) -> Invocation {
    Invocation {
        kind,
        argv: template.expand([text]),
    }
}

fn flush_batch(
    invocations: &mut Vec<Invocation>,
    playback: &CommandTemplate,
    batch: &mut Vec<String>,
) {
    if !batch.is_empty() {
        invocations.push(Invocation::playback(playback.expand(batch.drain(..))));
    }
}

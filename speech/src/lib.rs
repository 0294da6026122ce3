//! Speech output through external command line programs.
//!
//! This crate provides:
//! - [`CommandTemplate`]: Command lines with a `%s` placeholder
//! - [`Invocation`] and [`plan_samples`]: Turning segments into process invocations
//! - [`ProcessSpawner`] and [`Sequencer`]: Running one speech process at a time
//! - [`CmdlineSpeaker`]: Sample playback with a fallback synthesizer
//! - [`Speaker`] and [`SpeechRegistry`]: Speech backends registered by name
//!
//! # Example
//!
//! ```rust,ignore
//! use samplespeech_speech::{SpeechOptions, SpeechRegistry};
//!
//! let options = SpeechOptions {
//!     cmdline: "aplay %s".to_string(),
//!     cmdline_tts: Some("espeak %s".to_string()),
//!     sample_dir: Some("/usr/share/samples".into()),
//!     sample_suffix: Some(".wav".to_string()),
//!     decode_names: false,
//! };
//!
//! let registry = SpeechRegistry::with_defaults();
//! let speaker = registry.create("cmdline", &options).await?;
//! speaker.say("turn left, then right").await?;
//! speaker.close().await?;
//! ```

mod cmdline;
mod plan;
mod process;
mod scan;
mod speaker;
mod template;

pub use cmdline::*;
pub use plan::*;
pub use process::*;
pub use scan::*;
pub use speaker::*;
pub use template::*;

#[cfg(test)]
mod tests;

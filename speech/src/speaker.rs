//! Speaker interface and registry.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;

use crate::{CmdlineSpeaker, CommandSpawner, SpeechOptions};

/// Name the command line speaker is registered under.
pub const CMDLINE: &str = "cmdline";

/// Error type for speech operations.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("invalid command template: {0}")]
    InvalidTemplate(String),
    #[error("cannot read sample directory {}: {source}", path.display())]
    SampleDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}")]
    Exit { program: String, status: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("speaker not found: {0}")]
    NotFound(String),
}

/// Interface for a speech output backend.
#[async_trait]
pub trait Speaker: Send + Sync {
    /// Speaks the text.
    ///
    /// May return before the audio has finished playing; the next call waits
    /// for it.
    async fn say(&self, text: &str) -> Result<(), SpeechError>;

    /// Waits for pending output and releases resources.
    async fn close(&self) -> Result<(), SpeechError>;
}

/// Function that builds a speaker from options.
pub type SpeakerFactory =
    Box<dyn Fn(&SpeechOptions) -> Result<Arc<dyn Speaker>, SpeechError> + Send + Sync>;

/// Speaker factories by name.
pub struct SpeechRegistry {
    factories: Arc<RwLock<HashMap<String, SpeakerFactory>>>,
}

impl Default for SpeechRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            factories: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a registry with the built-in speakers.
    pub fn with_defaults() -> Self {
        let mut factories: HashMap<String, SpeakerFactory> = HashMap::new();
        factories.insert(
            CMDLINE.to_string(),
            Box::new(|options: &SpeechOptions| {
                let speaker = CmdlineSpeaker::new(options, Arc::new(CommandSpawner))?;
                Ok(Arc::new(speaker) as Arc<dyn Speaker>)
            }),
        );
        Self {
            factories: Arc::new(RwLock::new(factories)),
        }
    }

    /// Registers a factory, replacing any previous one with the same name.
    pub async fn register(&self, name: &str, factory: SpeakerFactory) {
        let mut factories = self.factories.write().await;
        if factories.insert(name.to_string(), factory).is_some() {
            warn!(name = %name, "speech: speaker already registered, replacing");
        }
    }

    /// Builds the speaker registered under `name`.
    pub async fn create(
        &self,
        name: &str,
        options: &SpeechOptions,
    ) -> Result<Arc<dyn Speaker>, SpeechError> {
        let factories = self.factories.read().await;
        let factory = factories
            .get(name)
            .ok_or_else(|| SpeechError::NotFound(name.to_string()))?;
        factory(options)
    }

    /// Returns the registered names, sorted.
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.read().await.keys().cloned().collect();
        names.sort();
        names
    }
}

//! Integration tests for the speech crate.

use super::*;
use async_trait::async_trait;
use samplespeech_segment::{SampleCatalog, Segment};
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Implementations
// ============================================================================

/// Records spawn and wait events in order.
#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl Recorder {
    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

struct MockSpawner {
    recorder: Arc<Recorder>,
    /// Processes for this program fail when waited on.
    failing: Option<String>,
    /// This program cannot be spawned.
    unspawnable: Option<String>,
}

impl MockSpawner {
    fn new(recorder: Arc<Recorder>) -> Self {
        Self {
            recorder,
            failing: None,
            unspawnable: None,
        }
    }
}

impl ProcessSpawner for MockSpawner {
    fn spawn(&self, argv: &[String]) -> Result<Box<dyn SpeechProcess>, SpeechError> {
        let label = argv.join(" ");
        if self.unspawnable.as_deref() == Some(argv[0].as_str()) {
            return Err(SpeechError::Spawn {
                program: argv[0].clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }
        self.recorder.push(format!("spawn {label}"));
        Ok(Box::new(MockProcess {
            recorder: Arc::clone(&self.recorder),
            fail: self.failing.as_deref() == Some(argv[0].as_str()),
            label,
        }))
    }
}

struct MockProcess {
    recorder: Arc<Recorder>,
    fail: bool,
    label: String,
}

#[async_trait]
impl SpeechProcess for MockProcess {
    async fn wait(&mut self) -> Result<(), SpeechError> {
        self.recorder.push(format!("wait {}", self.label));
        if self.fail {
            Err(SpeechError::Exit {
                program: self.label.clone(),
                status: "exit status: 1".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

fn sample_options() -> SpeechOptions {
    SpeechOptions {
        cmdline: "aplay %s".to_string(),
        cmdline_tts: Some("espeak %s".to_string()),
        sample_dir: Some("/samples".into()),
        sample_suffix: Some(".wav".to_string()),
        decode_names: false,
    }
}

fn plain_options() -> SpeechOptions {
    SpeechOptions {
        cmdline: "espeak -v en %s".to_string(),
        ..Default::default()
    }
}

fn speaker_with(options: &SpeechOptions, names: &[&str]) -> (CmdlineSpeaker, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let spawner = Arc::new(MockSpawner::new(Arc::clone(&recorder)));
    let speaker = CmdlineSpeaker::with_sample_names(options, names.iter().copied(), spawner).unwrap();
    (speaker, recorder)
}

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Planning
// ============================================================================

#[test]
fn test_plan_turn_left_then_right() {
    let (speaker, _) = speaker_with(&sample_options(), &["left.wav", "right.wav", "turnleft.wav"]);

    assert_eq!(
        speaker.plan("turnleft, then right"),
        vec![
            Invocation::playback(argv(&["aplay", "/samples/turnleft.wav"])),
            Invocation::synthesis(argv(&["espeak", "then"])),
            Invocation::playback(argv(&["aplay", "/samples/right.wav"])),
        ]
    );
}

#[test]
fn test_plan_batches_consecutive_samples() {
    let (speaker, _) = speaker_with(&sample_options(), &["turn.wav", "left.wav", "right.wav"]);

    assert_eq!(
        speaker.plan("turn left then right left"),
        vec![
            Invocation::playback(argv(&["aplay", "/samples/turn.wav", "/samples/left.wav"])),
            Invocation::synthesis(argv(&["espeak", "then"])),
            Invocation::playback(argv(&["aplay", "/samples/right.wav", "/samples/left.wav"])),
        ]
    );
}

#[test]
fn test_plan_consecutive_literals() {
    let (speaker, _) = speaker_with(&sample_options(), &["left.wav"]);

    assert_eq!(
        speaker.plan("go straight"),
        vec![
            Invocation::synthesis(argv(&["espeak", "go"])),
            Invocation::synthesis(argv(&["espeak", "straight"])),
        ]
    );
}

#[test]
fn test_plan_bare_marker_synthesizes_empty_text() {
    let (speaker, _) = speaker_with(&sample_options(), &["left.wav"]);

    assert_eq!(
        speaker.segments(" left"),
        vec![
            Segment::Literal("missing".to_string()),
            Segment::Matched("left.wav".to_string()),
        ]
    );
    assert_eq!(
        speaker.plan(" left"),
        vec![
            Invocation::synthesis(argv(&["espeak", ""])),
            Invocation::playback(argv(&["aplay", "/samples/left.wav"])),
        ]
    );
}

#[test]
fn test_plan_without_fallback_skips_literals() {
    let options = SpeechOptions {
        cmdline_tts: None,
        ..sample_options()
    };
    let (speaker, _) = speaker_with(&options, &["left.wav", "right.wav"]);

    assert_eq!(
        speaker.plan("left then right"),
        vec![
            Invocation::playback(argv(&["aplay", "/samples/left.wav"])),
            Invocation::playback(argv(&["aplay", "/samples/right.wav"])),
        ]
    );
}

#[test]
fn test_plan_decoded_names_keep_stored_path() {
    let options = SpeechOptions {
        decode_names: true,
        ..sample_options()
    };
    let (speaker, _) = speaker_with(&options, &["turn%20left.wav"]);

    assert_eq!(
        speaker.plan("turn left"),
        vec![Invocation::playback(argv(&["aplay", "/samples/turn%20left.wav"]))]
    );
}

#[test]
fn test_plain_mode_speaks_whole_text() {
    let (speaker, _) = speaker_with(&plain_options(), &["left.wav"]);

    assert!(speaker.catalog().is_none());
    assert!(speaker.sample_dir().is_none());
    assert_eq!(
        speaker.segments("missing turn, go left"),
        vec![Segment::Literal("missing turn, go left".to_string())]
    );
    assert_eq!(
        speaker.plan("missing turn, go left"),
        vec![Invocation::playback(argv(&["espeak", "-v", "en", "missing turn, go left"]))]
    );
}

#[test]
fn test_suffix_without_dir_is_plain_mode() {
    let options = SpeechOptions {
        sample_dir: None,
        ..sample_options()
    };
    let (speaker, _) = speaker_with(&options, &["left.wav"]);

    assert!(speaker.catalog().is_none());
    assert_eq!(
        speaker.plan("left"),
        vec![Invocation::playback(argv(&["aplay", "left"]))]
    );
}

#[test]
fn test_empty_catalog_synthesizes_whole_text() {
    let (speaker, _) = speaker_with(&sample_options(), &["readme.txt"]);

    assert!(speaker.catalog().unwrap().is_empty());
    assert_eq!(
        speaker.segments("go straight"),
        vec![Segment::Literal("go straight".to_string())]
    );
    assert_eq!(
        speaker.plan("go straight"),
        vec![Invocation::synthesis(argv(&["espeak", "go straight"]))]
    );

    let options = SpeechOptions {
        cmdline_tts: None,
        ..sample_options()
    };
    let (speaker, _) = speaker_with(&options, &[]);
    assert_eq!(
        speaker.plan("go straight"),
        vec![Invocation::playback(argv(&["aplay", "go straight"]))]
    );
}

#[test]
fn test_plan_nothing_to_say() {
    let (speaker, _) = speaker_with(&sample_options(), &["left.wav"]);
    assert!(speaker.plan("").is_empty());
    assert!(speaker.plan(" , - ").is_empty());
    assert!(speaker.segments(" , - ").is_empty());

    let (speaker, _) = speaker_with(&plain_options(), &[]);
    assert!(speaker.plan("").is_empty());
    assert!(speaker.segments("").is_empty());
}

#[test]
fn test_blank_fallback_is_ignored() {
    let options = SpeechOptions {
        cmdline_tts: Some("  ".to_string()),
        ..sample_options()
    };
    let (speaker, _) = speaker_with(&options, &["left.wav"]);
    assert_eq!(
        speaker.plan("left then"),
        vec![Invocation::playback(argv(&["aplay", "/samples/left.wav"]))]
    );
}

#[test]
fn test_invalid_primary_template() {
    let options = SpeechOptions {
        cmdline: String::new(),
        ..sample_options()
    };
    let recorder = Arc::new(Recorder::default());
    let result = CmdlineSpeaker::with_sample_names(
        &options,
        ["left.wav"],
        Arc::new(MockSpawner::new(recorder)),
    );
    assert!(matches!(result, Err(SpeechError::InvalidTemplate(_))));
}

// ============================================================================
// Sequencing
// ============================================================================

#[tokio::test]
async fn test_say_waits_for_previous_process() {
    let (speaker, recorder) = speaker_with(&sample_options(), &["left.wav", "right.wav"]);

    speaker.say("left then right").await.unwrap();
    assert_eq!(
        recorder.events(),
        vec![
            "spawn aplay /samples/left.wav",
            "wait aplay /samples/left.wav",
            "spawn espeak then",
            "wait espeak then",
            "spawn aplay /samples/right.wav",
        ]
    );

    speaker.say("left").await.unwrap();
    speaker.wait_idle().await;
    assert_eq!(
        recorder.events()[5..],
        [
            "wait aplay /samples/right.wav",
            "spawn aplay /samples/left.wav",
            "wait aplay /samples/left.wav",
        ]
    );

    // Nothing left to wait for.
    speaker.wait_idle().await;
    assert_eq!(recorder.events().len(), 8);
}

#[tokio::test]
async fn test_close_waits_for_last_process() {
    let (speaker, recorder) = speaker_with(&plain_options(), &[]);
    let speaker: Arc<dyn Speaker> = Arc::new(speaker);

    speaker.say("hello").await.unwrap();
    speaker.close().await.unwrap();
    assert_eq!(
        recorder.events(),
        vec!["spawn espeak -v en hello", "wait espeak -v en hello"]
    );
}

#[tokio::test]
async fn test_failed_process_does_not_block() {
    let recorder = Arc::new(Recorder::default());
    let spawner = MockSpawner {
        failing: Some("espeak".to_string()),
        ..MockSpawner::new(Arc::clone(&recorder))
    };
    let speaker =
        CmdlineSpeaker::with_sample_names(&sample_options(), ["left.wav"], Arc::new(spawner))
            .unwrap();

    speaker.say("then left").await.unwrap();
    assert_eq!(
        recorder.events(),
        vec![
            "spawn espeak then",
            "wait espeak then",
            "spawn aplay /samples/left.wav",
        ]
    );
}

#[tokio::test]
async fn test_spawn_error_does_not_stop_utterance() {
    let recorder = Arc::new(Recorder::default());
    let spawner = MockSpawner {
        unspawnable: Some("espeak".to_string()),
        ..MockSpawner::new(Arc::clone(&recorder))
    };
    let speaker = CmdlineSpeaker::with_sample_names(
        &sample_options(),
        ["left.wav", "right.wav"],
        Arc::new(spawner),
    )
    .unwrap();

    let result = speaker.say("left then right").await;
    assert!(matches!(result, Err(SpeechError::Spawn { ref program, .. }) if program == "espeak"));
    assert_eq!(
        recorder.events(),
        vec![
            "spawn aplay /samples/left.wav",
            "wait aplay /samples/left.wav",
            "spawn aplay /samples/right.wav",
        ]
    );

    speaker.wait_idle().await;
    assert_eq!(recorder.events().last().map(String::as_str), Some("wait aplay /samples/right.wav"));
}

#[tokio::test]
async fn test_command_spawner_errors() {
    let spawner = CommandSpawner;

    let result = spawner.spawn(&[]);
    assert!(matches!(result, Err(SpeechError::InvalidTemplate(_))));

    let result = spawner.spawn(&argv(&["/nonexistent/samplespeech-player"]));
    assert!(matches!(result, Err(SpeechError::Spawn { .. })));
}

// ============================================================================
// Sample directory
// ============================================================================

#[test]
fn test_new_scans_sample_dir() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["left.wav", "right.wav", "notes.txt", "turn%20left.wav"] {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }

    let options = SpeechOptions {
        sample_dir: Some(dir.path().to_path_buf()),
        decode_names: true,
        ..sample_options()
    };
    let recorder = Arc::new(Recorder::default());
    let speaker = CmdlineSpeaker::new(&options, Arc::new(MockSpawner::new(recorder))).unwrap();

    let catalog = speaker.catalog().unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.names().next(), Some("turn%20left.wav"));
    assert_eq!(speaker.sample_dir(), Some(dir.path()));

    let expected = format!("{}/turn%20left.wav", dir.path().display());
    assert_eq!(
        speaker.plan("turn left"),
        vec![Invocation::playback(vec!["aplay".to_string(), expected])]
    );
}

#[test]
fn test_new_missing_sample_dir() {
    let options = SpeechOptions {
        sample_dir: Some("/nonexistent/samplespeech/samples".into()),
        ..sample_options()
    };
    let recorder = Arc::new(Recorder::default());
    let result = CmdlineSpeaker::new(&options, Arc::new(MockSpawner::new(recorder)));
    assert!(matches!(result, Err(SpeechError::SampleDir { .. })));
}

#[test]
fn test_scan_samples_lists_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.wav"), b"").unwrap();
    std::fs::write(dir.path().join("b.ogg"), b"").unwrap();

    let mut names = scan_samples(dir.path()).unwrap();
    names.sort();
    assert_eq!(names, vec!["a.wav", "b.ogg"]);
}

#[test]
fn test_scan_samples_ties_follow_directory_order() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["ab.wav", "cd.wav", "ef.wav"] {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }

    let listed: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();

    let mut scanned = scan_samples(dir.path()).unwrap();
    scanned.reverse();
    assert_eq!(scanned, listed);

    let catalog = SampleCatalog::build(scan_samples(dir.path()).unwrap(), ".wav");
    let names: Vec<String> = catalog.names().map(str::to_string).collect();
    assert_eq!(names, listed);
}

// ============================================================================
// Options and registry
// ============================================================================

#[test]
fn test_options_yaml_defaults() {
    let options: SpeechOptions = serde_yaml::from_str("cmdline: espeak %s\n").unwrap();
    assert_eq!(options, SpeechOptions {
        cmdline: "espeak %s".to_string(),
        ..Default::default()
    });

    let yaml = "cmdline: aplay %s\ncmdline_tts: espeak %s\nsample_dir: /samples\nsample_suffix: .wav\ndecode_names: true\n";
    let options: SpeechOptions = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(options, SpeechOptions {
        decode_names: true,
        ..sample_options()
    });
}

#[tokio::test]
async fn test_registry_creates_cmdline_speaker() {
    let registry = SpeechRegistry::with_defaults();
    let speaker = registry.create(CMDLINE, &plain_options()).await;
    assert!(speaker.is_ok());

    let result = registry.create(CMDLINE, &SpeechOptions::default()).await;
    assert!(matches!(result, Err(SpeechError::InvalidTemplate(_))));
}

#[tokio::test]
async fn test_registry_register_custom() {
    let recorder = Arc::new(Recorder::default());
    let registry = SpeechRegistry::with_defaults();

    let factory_recorder = Arc::clone(&recorder);
    registry
        .register(
            "mock",
            Box::new(move |options: &SpeechOptions| {
                let spawner = Arc::new(MockSpawner::new(Arc::clone(&factory_recorder)));
                let speaker = CmdlineSpeaker::with_sample_names(options, Vec::<String>::new(), spawner)?;
                Ok(Arc::new(speaker) as Arc<dyn Speaker>)
            }),
        )
        .await;
    assert_eq!(registry.names().await, vec![CMDLINE.to_string(), "mock".to_string()]);

    let speaker = registry.create("mock", &plain_options()).await.unwrap();
    speaker.say("hi").await.unwrap();
    speaker.close().await.unwrap();
    assert_eq!(recorder.events(), vec!["spawn espeak -v en hi", "wait espeak -v en hi"]);
}

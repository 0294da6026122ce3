//! Greedy segmentation of utterances into pre-recorded speech samples.
//!
//! A [`SampleCatalog`] holds the sample file names known to a speaker, ordered
//! longest first. [`segment`] walks an utterance left to right and splits it
//! into [`Segment`]s:
//! - [`Segment::Matched`] - a sample whose name (minus the suffix) prefixes the
//!   remaining text, compared ASCII case-insensitively
//! - [`Segment::Literal`] - a run of characters no sample covers, tagged with
//!   the [`MISSING_MARKER`] prefix for the fallback synthesizer
//!
//! Matching is greedy and never backtracks. Spaces, commas and hyphens separate
//! match attempts and are dropped from the output.
//!
//! # Example
//!
//! ```rust
//! use samplespeech_segment::{segment, SampleCatalog, Segment};
//!
//! let catalog = SampleCatalog::build(["left.wav", "right.wav", "turnleft.wav"], ".wav");
//! let segments = segment(&catalog, "turnleft, then right", false);
//!
//! assert_eq!(
//!     segments,
//!     vec![
//!         Segment::Matched("turnleft.wav".to_string()),
//!         Segment::Literal("missingthen".to_string()),
//!         Segment::Matched("right.wav".to_string()),
//!     ]
//! );
//! ```

mod catalog;
mod segmenter;

pub use catalog::*;
pub use segmenter::*;

//! Greedy longest-first segmentation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Sample, SampleCatalog};

/// Prefix carried by every literal run the segmenter produces.
pub const MISSING_MARKER: &str = "missing";

/// Characters that separate match attempts.
pub const DELIMITERS: [char; 3] = [' ', ',', '-'];

/// One unit of speech output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Segment {
    /// A sample to play, by its file name in the catalog.
    Matched(String),
    /// Text for the fallback synthesizer.
    Literal(String),
}

impl Segment {
    /// Returns true for [`Segment::Matched`].
    pub fn is_matched(&self) -> bool {
        matches!(self, Segment::Matched(_))
    }

    /// Returns the sample file name of a matched segment.
    pub fn sample_name(&self) -> Option<&str> {
        match self {
            Segment::Matched(name) => Some(name),
            Segment::Literal(_) => None,
        }
    }

    /// Returns the literal run with [`MISSING_MARKER`] removed.
    ///
    /// Runs without the marker (a whole utterance passed through unsegmented)
    /// are returned unchanged.
    pub fn strip_marker(&self) -> Option<&str> {
        match self {
            Segment::Matched(_) => None,
            Segment::Literal(run) => Some(run.strip_prefix(MISSING_MARKER).unwrap_or(run)),
        }
    }
}

/// Returns true if `c` separates match attempts.
pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// Splits `text` into matched samples and literal runs.
///
/// When `decode` is set, sample names are percent-decoded before comparison;
/// matched segments always carry the name as stored in the catalog.
///
/// An empty catalog passes the whole utterance through as one unmarked
/// literal. Text made of delimiters only produces no segments.
pub fn segment(catalog: &SampleCatalog, text: &str, decode: bool) -> Vec<Segment> {
    let mut segments = Vec::new();

    if text.chars().all(is_delimiter) {
        return segments;
    }

    if catalog.is_empty() {
        debug!(text = %text, "segment: no samples, passing text through");
        segments.push(Segment::Literal(text.to_string()));
        return segments;
    }

    debug!(text = %text, "segment: searching samples");

    let mut rest = text;
    while !rest.is_empty() {
        match find_sample(catalog, rest, decode) {
            Some((sample, len)) => {
                debug!(sample = %sample.name(), "segment: sample matched");
                segments.push(Segment::Matched(sample.name().to_string()));
                rest = &rest[len..];
            }
            None => {
                // A leading delimiter yields the bare marker.
                let end = rest.find(is_delimiter).unwrap_or(rest.len());
                let mut run = String::with_capacity(MISSING_MARKER.len() + end);
                run.push_str(MISSING_MARKER);
                run.push_str(&rest[..end]);
                debug!(run = %run, "segment: no sample matched");
                segments.push(Segment::Literal(run));
                rest = &rest[end..];
            }
        }

        rest = rest.trim_start_matches(DELIMITERS);
    }

    segments
}

/// Finds the first sample in catalog order whose comparison prefix starts
/// `text`. Returns the sample and the number of bytes it consumes.
fn find_sample<'c>(
    catalog: &'c SampleCatalog,
    text: &str,
    decode: bool,
) -> Option<(&'c Sample, usize)> {
    let suffix_len = catalog.suffix().len();

    catalog.iter().find_map(|sample| {
        let len = sample.compare_len(decode, suffix_len)?;
        let head = text.as_bytes().get(..len)?;
        let key = &sample.key(decode)[..len];

        // Non-ASCII bytes only match themselves, and a match must not end
        // inside a multi-byte character.
        (head.eq_ignore_ascii_case(key) && text.is_char_boundary(len)).then_some((sample, len))
    })
}

//! Sample directory scanning.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::SpeechError;

/// Lists the file names in a sample directory.
///
/// Names come out in reverse directory order, so that equal-length samples
/// in the built catalog are tried in directory order. Names that are not
/// valid UTF-8 are skipped. Filtering by suffix is left to
/// [`SampleCatalog::build`](samplespeech_segment::SampleCatalog::build).
pub fn scan_samples(dir: &Path) -> Result<Vec<String>, SpeechError> {
    let sample_dir_err = |source| SpeechError::SampleDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(sample_dir_err)? {
        let entry = entry.map_err(sample_dir_err)?;
        match entry.file_name().into_string() {
            Ok(name) => {
                debug!(name = %name, "speech: found sample file");
                names.push(name);
            }
            Err(name) => debug!(name = ?name, "speech: skipping non UTF-8 file name"),
        }
    }

    names.reverse();
    Ok(names)
}

//! Sample catalog ordered for longest-first matching.

use std::slice;

/// A sample file known to the catalog.
///
/// The stored name is kept verbatim so it can be joined onto the sample
/// directory later. The percent-decoded form is computed once here and used
/// for comparisons when decoding is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    name: String,
    decoded: Vec<u8>,
}

impl Sample {
    fn new(name: String) -> Self {
        let decoded = urlencoding::decode_binary(name.as_bytes()).into_owned();
        Self { name, decoded }
    }

    /// Returns the file name as found in the sample directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the percent-decoded file name bytes.
    pub fn decoded(&self) -> &[u8] {
        &self.decoded
    }

    /// Returns the bytes compared against text, suffix included.
    pub(crate) fn key(&self, decode: bool) -> &[u8] {
        if decode {
            &self.decoded
        } else {
            self.name.as_bytes()
        }
    }

    /// Returns how many bytes of text this sample covers, or `None` when the
    /// name is no longer than the suffix.
    pub(crate) fn compare_len(&self, decode: bool, suffix_len: usize) -> Option<usize> {
        self.key(decode)
            .len()
            .checked_sub(suffix_len)
            .filter(|&n| n > 0)
    }
}

/// Sample names in match priority order: longest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleCatalog {
    samples: Vec<Sample>,
    suffix: String,
}

impl SampleCatalog {
    /// Builds a catalog from raw file names.
    ///
    /// Names that do not end with `suffix`, or that consist of the suffix
    /// alone, are dropped. The rest are sorted by descending length; names of
    /// equal length come out in reverse input order.
    pub fn build<I, S>(names: I, suffix: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut samples: Vec<Sample> = names
            .into_iter()
            .map(Into::into)
            .filter(|name| name.len() > suffix.len() && name.ends_with(suffix))
            .map(Sample::new)
            .collect();

        // Stable ascending sort, then reverse: ties end up reversed.
        samples.sort_by_key(|sample| sample.name.len());
        samples.reverse();

        Self {
            samples,
            suffix: suffix.to_string(),
        }
    }

    /// Returns the suffix every sample name ends with.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the catalog holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterates over the samples in match order.
    pub fn iter(&self) -> slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Iterates over the sample names in match order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.samples.iter().map(Sample::name)
    }
}

impl<'a> IntoIterator for &'a SampleCatalog {
    type Item = &'a Sample;
    type IntoIter = slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

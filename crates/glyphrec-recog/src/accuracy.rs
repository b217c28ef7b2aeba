//! Accuracy against hand-counted ground truth
//!
//! Ground truth for `page.jpg` lives next to it in `page.accuracy.json`,
//! a JSON object mapping single characters to expected counts:
//!
//! ```json
//! { "a": 12, "7": 3 }
//! ```
//!
//! Each character with a positive expected count gets the ratio
//! `detected / expected`; the overall figure weighs those ratios by the
//! expected counts.

use crate::recognize::Histogram;
use crate::{RecogError, RecogResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Expected character counts of one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundTruth {
    counts: BTreeMap<char, u64>,
}

impl GroundTruth {
    /// Create ground truth from (character, expected count) pairs
    pub fn new<I: IntoIterator<Item = (char, u64)>>(counts: I) -> Self {
        Self {
            counts: counts.into_iter().collect(),
        }
    }

    /// Parse the JSON form.
    ///
    /// # Errors
    /// - [`RecogError::Json`] if the text is not an object of non-negative
    ///   integers
    /// - [`RecogError::MalformedGroundTruth`] if a key is not exactly one
    ///   character
    pub fn from_json(text: &str) -> RecogResult<Self> {
        let raw: BTreeMap<String, u64> = serde_json::from_str(text)?;
        let mut counts = BTreeMap::new();
        for (key, count) in raw {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    counts.insert(c, count);
                }
                _ => {
                    return Err(RecogError::MalformedGroundTruth(format!(
                        "key {:?} is not a single character",
                        key
                    )));
                }
            }
        }
        Ok(Self { counts })
    }

    /// Read and parse a ground-truth file.
    ///
    /// # Errors
    /// Returns [`RecogError::MissingFile`] if `path` does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> RecogResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(RecogError::MissingFile(path.to_path_buf()));
        }
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Expected count of `c`, if listed
    pub fn expected(&self, c: char) -> Option<u64> {
        self.counts.get(&c).copied()
    }

    /// Listed characters with their counts, in character order
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }
}

/// Ground-truth path for an image: `<dir>/<stem>.accuracy.json`
pub fn ground_truth_path<P: AsRef<Path>>(image: P) -> PathBuf {
    let image = image.as_ref();
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    image.with_file_name(format!("{}.accuracy.json", stem))
}

/// Accuracy of one character
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CharAccuracy {
    pub character: char,
    pub expected: u64,
    pub detected: u64,
    /// `detected / expected`; may exceed 1 for over-detection
    pub ratio: f64,
}

/// Accuracy of one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyReport {
    /// Characters with a positive expected count, in character order
    pub characters: Vec<CharAccuracy>,
    /// Characters detected or listed with zero, but without a positive
    /// expected count
    pub no_ground_truth: Vec<char>,
    /// Expected-count weighted mean of the ratios; `None` when nothing is
    /// expected
    pub overall: Option<f64>,
}

/// Compare detected counts with ground truth.
pub fn evaluate(detected: &Histogram, truth: &GroundTruth) -> AccuracyReport {
    let mut characters = Vec::new();
    let mut no_ground_truth = Vec::new();
    let (mut weighted, mut total) = (0.0f64, 0u64);

    for (c, expected) in truth.iter() {
        if expected == 0 {
            no_ground_truth.push(c);
            continue;
        }
        let found = detected.get(c);
        let ratio = found as f64 / expected as f64;
        weighted += ratio * expected as f64;
        total += expected;
        characters.push(CharAccuracy {
            character: c,
            expected,
            detected: found,
            ratio,
        });
    }
    for (c, found) in detected.iter() {
        if found > 0 && truth.expected(c).is_none() {
            no_ground_truth.push(c);
        }
    }
    no_ground_truth.sort_unstable();

    AccuracyReport {
        characters,
        no_ground_truth,
        overall: (total > 0).then(|| weighted / total as f64),
    }
}

/// Evaluate `detected` against the ground truth stored next to `image`.
///
/// Accuracy is optional: a missing, unreadable or malformed ground-truth
/// file is logged and yields `None`.
pub fn evaluate_for_image<P: AsRef<Path>>(
    image: P,
    detected: &Histogram,
) -> Option<AccuracyReport> {
    let path = ground_truth_path(image);
    if !path.is_file() {
        tracing::warn!(path = %path.display(), "no ground truth, skipping accuracy");
        return None;
    }
    match GroundTruth::load(&path) {
        Ok(truth) => Some(evaluate(detected, &truth)),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "unusable ground truth, skipping accuracy");
            None
        }
    }
}

//! The labeled-sample knowledge base
//!
//! Samples are kept in discovery order with their labels in a parallel
//! vector. On disk the base is two text tables in one directory:
//!
//! - `matched_characters.txt`: one row per sample holding the label's
//!   character code
//! - `matched_images.txt`: one row per sample holding its values
//!
//! Values use the table format of [`glyphrec_io::table`], which
//! round-trips `f32` exactly.

use crate::segment::{NormalizedSample, SAMPLE_HEIGHT, SAMPLE_WIDTH};
use crate::{RecogError, RecogResult};
use glyphrec_io::{read_table_file, write_table_file};
use std::path::{Path, PathBuf};

/// File name of the label table
pub const LABELS_FILE: &str = "matched_characters.txt";

/// File name of the sample table
pub const SAMPLES_FILE: &str = "matched_images.txt";

/// A label with its sample
#[derive(Debug, Clone, Copy)]
pub struct LabeledSample<'a> {
    pub label: char,
    pub sample: &'a NormalizedSample,
}

/// Append-only collection of labeled samples
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    sample_width: u32,
    sample_height: u32,
    labels: Vec<char>,
    samples: Vec<NormalizedSample>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeBase {
    /// Create an empty base for 30x30 samples
    pub fn new() -> Self {
        Self::with_sample_size(SAMPLE_WIDTH, SAMPLE_HEIGHT)
    }

    /// Create an empty base for samples of the given size
    pub fn with_sample_size(width: u32, height: u32) -> Self {
        Self {
            sample_width: width,
            sample_height: height,
            labels: Vec::new(),
            samples: Vec::new(),
        }
    }

    /// Append a labeled sample.
    ///
    /// # Errors
    /// Returns [`RecogError::InvalidParameter`] if the sample size differs
    /// from the base's sample size.
    pub fn append(&mut self, label: char, sample: NormalizedSample) -> RecogResult<()> {
        if (sample.width(), sample.height()) != (self.sample_width, self.sample_height) {
            return Err(RecogError::InvalidParameter(format!(
                "sample is {}x{}, knowledge base holds {}x{}",
                sample.width(),
                sample.height(),
                self.sample_width,
                self.sample_height
            )));
        }
        self.labels.push(label);
        self.samples.push(sample);
        Ok(())
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the base holds no samples
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sample size as (width, height)
    pub fn sample_size(&self) -> (u32, u32) {
        (self.sample_width, self.sample_height)
    }

    /// Labels in insertion order
    pub fn labels(&self) -> &[char] {
        &self.labels
    }

    /// Samples in insertion order
    pub fn samples(&self) -> &[NormalizedSample] {
        &self.samples
    }

    /// Get the labeled sample at `index`
    pub fn get(&self, index: usize) -> Option<LabeledSample<'_>> {
        Some(LabeledSample {
            label: *self.labels.get(index)?,
            sample: self.samples.get(index)?,
        })
    }

    /// Iterate labeled samples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = LabeledSample<'_>> {
        self.labels
            .iter()
            .zip(&self.samples)
            .map(|(&label, sample)| LabeledSample { label, sample })
    }

    /// Write both tables into `dir`, replacing existing files.
    ///
    /// # Errors
    /// Returns [`RecogError::MissingDirectory`] if `dir` does not exist.
    pub fn persist<P: AsRef<Path>>(&self, dir: P) -> RecogResult<()> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(RecogError::MissingDirectory(dir.to_path_buf()));
        }
        let codes: Vec<[f32; 1]> = self.labels.iter().map(|&c| [c as u32 as f32]).collect();
        write_table_file(dir.join(LABELS_FILE), &codes)?;
        write_table_file(dir.join(SAMPLES_FILE), &self.samples)?;
        tracing::info!(dir = %dir.display(), samples = self.len(), "saved knowledge base");
        Ok(())
    }

    /// Load the tables written by [`persist`](Self::persist) from `dir`.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> RecogResult<Self> {
        let dir = dir.as_ref();
        Self::load(dir.join(LABELS_FILE), dir.join(SAMPLES_FILE))
    }

    /// Load a base of 30x30 samples from its two tables.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(labels_path: P, samples_path: Q) -> RecogResult<Self> {
        Self::load_with_sample_size(labels_path, samples_path, SAMPLE_WIDTH, SAMPLE_HEIGHT)
    }

    /// Load a base from its two tables.
    ///
    /// # Errors
    /// - [`RecogError::MissingFile`] if either path does not exist
    /// - [`RecogError::CorruptKnowledgeBase`] if the row counts differ, a
    ///   label row is not a single character code, or a sample row does not
    ///   hold `width * height` values
    pub fn load_with_sample_size<P: AsRef<Path>, Q: AsRef<Path>>(
        labels_path: P,
        samples_path: Q,
        width: u32,
        height: u32,
    ) -> RecogResult<Self> {
        let labels_path = existing(labels_path.as_ref())?;
        let samples_path = existing(samples_path.as_ref())?;

        let label_rows = read_table_file(&labels_path).map_err(|e| corrupt(&labels_path, e))?;
        let sample_rows = read_table_file(&samples_path).map_err(|e| corrupt(&samples_path, e))?;
        if label_rows.len() != sample_rows.len() {
            return Err(RecogError::CorruptKnowledgeBase(format!(
                "{} labels but {} samples",
                label_rows.len(),
                sample_rows.len()
            )));
        }

        let mut kb = Self::with_sample_size(width, height);
        let expected = (width as usize) * (height as usize);
        for (i, (label_row, values)) in label_rows.into_iter().zip(sample_rows).enumerate() {
            let label = decode_label(&label_row).ok_or_else(|| {
                RecogError::CorruptKnowledgeBase(format!(
                    "row {}: {:?} is not a character code",
                    i + 1,
                    label_row
                ))
            })?;
            if values.len() != expected {
                return Err(RecogError::CorruptKnowledgeBase(format!(
                    "row {}: expected {} values, found {}",
                    i + 1,
                    expected,
                    values.len()
                )));
            }
            kb.labels.push(label);
            kb.samples.push(NormalizedSample::new(width, height, values)?);
        }

        tracing::debug!(samples = kb.len(), "loaded knowledge base");
        Ok(kb)
    }
}

fn existing(path: &Path) -> RecogResult<PathBuf> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(RecogError::MissingFile(path.to_path_buf()))
    }
}

fn corrupt(path: &Path, err: glyphrec_io::IoError) -> RecogError {
    RecogError::CorruptKnowledgeBase(format!("{}: {}", path.display(), err))
}

fn decode_label(row: &[f32]) -> Option<char> {
    let [code] = row else {
        return None;
    };
    if code.fract() != 0.0 || *code < 0.0 {
        return None;
    }
    char::from_u32(*code as u32)
}

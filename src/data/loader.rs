// ============================================================
// Layer 4 — CSV Sample Source
// ============================================================
// Reads the Sign Language MNIST file layout: one header row,
// then one row per sample with the class label in the first
// column and the 784 row-major pixel values after it.
//
// Validation happens here, at the parse boundary, so every
// later stage can rely on well-formed samples: exactly 785
// columns, label within 0..25, pixels within u8 range. A
// malformed row aborts the load with its row number.
//
// Reference: Rust Book §9 (Error Handling), §12 (I/O)

use anyhow::{bail, Context, Result};
use std::{fs::File, path::PathBuf};

use crate::domain::sample::{GestureSample, IMAGE_PIXELS, NUM_CLASSES};
use crate::domain::traits::SampleSource;

/// Loads gesture samples from a CSV file on disk.
pub struct CsvGestureSource {
    path: PathBuf,
}

impl CsvGestureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SampleSource for CsvGestureSource {
    fn load_all(&self) -> Result<Vec<GestureSample>> {
        let file = File::open(&self.path)
            .with_context(|| format!("cannot open dataset file '{}'", self.path.display()))?;

        // csv::Reader skips the single header row by default
        let mut reader = csv::Reader::from_reader(file);
        let mut samples = Vec::new();

        for (row_idx, record) in reader.records().enumerate() {
            // Data rows are numbered from 1, after the header
            let row = row_idx + 1;
            let record = record
                .with_context(|| format!("cannot read row {row} of '{}'", self.path.display()))?;

            if record.len() != IMAGE_PIXELS + 1 {
                bail!(
                    "row {row} of '{}' has {} columns, expected {} (label + {} pixels)",
                    self.path.display(),
                    record.len(),
                    IMAGE_PIXELS + 1,
                    IMAGE_PIXELS,
                );
            }

            let label: usize = record[0]
                .trim()
                .parse()
                .with_context(|| format!("row {row}: label '{}' is not an integer", &record[0]))?;
            if label >= NUM_CLASSES {
                bail!("row {row}: label {label} is outside 0..{NUM_CLASSES}");
            }

            let pixels = record
                .iter()
                .skip(1)
                .map(|field| {
                    field.trim().parse::<u8>().with_context(|| {
                        format!("row {row}: pixel value '{field}' is not in 0..=255")
                    })
                })
                .collect::<Result<Vec<u8>>>()?;

            samples.push(GestureSample::new(pixels, label));
        }

        if samples.is_empty() {
            bail!("dataset file '{}' contains no samples", self.path.display());
        }

        tracing::debug!("Loaded {} samples from '{}'", samples.len(), self.path.display());
        Ok(samples)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Write a syntactically valid dataset file with `rows` samples,
    /// where sample i has label `i % 25` and constant pixel value i.
    fn write_csv(rows: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let header: Vec<String> = std::iter::once("label".to_string())
            .chain((1..=IMAGE_PIXELS).map(|i| format!("pixel{i}")))
            .collect();
        writeln!(file, "{}", header.join(",")).unwrap();
        for i in 0..rows {
            let mut fields = vec![(i % NUM_CLASSES).to_string()];
            fields.extend(std::iter::repeat((i % 256).to_string()).take(IMAGE_PIXELS));
            writeln!(file, "{}", fields.join(",")).unwrap();
        }
        file
    }

    #[test]
    fn test_loads_all_rows_in_file_order() {
        let file = write_csv(7);
        let samples = CsvGestureSource::new(file.path()).load_all().unwrap();
        assert_eq!(samples.len(), 7);
        for (i, sample) in samples.iter().enumerate() {
            assert_eq!(sample.label, i % NUM_CLASSES);
            assert_eq!(sample.pixels.len(), IMAGE_PIXELS);
            assert_eq!(sample.pixels[0], i as u8);
        }
    }

    #[test]
    fn test_rejects_wrong_column_count() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "label,pixel1,pixel2").unwrap();
        writeln!(file, "3,10,20").unwrap();
        let err = CsvGestureSource::new(file.path())
            .load_all()
            .unwrap_err()
            .to_string();
        assert!(err.contains("row 1"));
        assert!(err.contains("785"));
    }

    #[test]
    fn test_rejects_label_out_of_range() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let header: Vec<String> = std::iter::once("label".to_string())
            .chain((1..=IMAGE_PIXELS).map(|i| format!("pixel{i}")))
            .collect();
        writeln!(file, "{}", header.join(",")).unwrap();
        let mut fields = vec!["25".to_string()];
        fields.extend(std::iter::repeat("0".to_string()).take(IMAGE_PIXELS));
        writeln!(file, "{}", fields.join(",")).unwrap();

        let err = CsvGestureSource::new(file.path())
            .load_all()
            .unwrap_err()
            .to_string();
        assert!(err.contains("label 25"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = CsvGestureSource::new("no/such/file.csv")
            .load_all()
            .unwrap_err()
            .to_string();
        assert!(err.contains("no/such/file.csv"));
    }
}

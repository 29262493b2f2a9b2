// 📝 Unified Writer - the single output destination for all normalized rows

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::transform::NormalizedRecord;

/// UnifiedWriter - owns the unified output CSV
///
/// Created once per run. Truncates any existing output, writes the header
/// exactly once before any data row, then appends one row per normalized
/// record in the order they arrive. `csv::Writer` flushes on drop, so even
/// an aborted run leaves whatever was already written, never a torn row.
pub struct UnifiedWriter {
    inner: csv::Writer<File>,
    path: PathBuf,
}

impl UnifiedWriter {
    /// Open the destination (truncating) and write the header row.
    pub fn create(path: &Path, column_titles: &[String]) -> Result<UnifiedWriter> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;

        // Header comes from the configuration, not from struct field names.
        let mut inner = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        inner
            .write_record(column_titles)
            .with_context(|| format!("Failed to write header to {}", path.display()))?;

        Ok(UnifiedWriter {
            inner,
            path: path.to_path_buf(),
        })
    }

    /// Append one normalized record.
    pub fn write_row(&mut self, record: &NormalizedRecord) -> Result<()> {
        self.inner
            .serialize(record)
            .with_context(|| format!("Failed to write row to {}", self.path.display()))
    }

    /// Flush and close the destination.
    pub fn finish(mut self) -> Result<()> {
        self.inner
            .flush()
            .with_context(|| format!("Failed to flush output file: {}", self.path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn titles() -> Vec<String> {
        ["timestamp", "type", "amount", "from", "to"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_header_only_when_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let writer = UnifiedWriter::create(&path, &titles()).unwrap();
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "timestamp,type,amount,from,to\n");
    }

    #[test]
    fn test_rows_follow_header_in_field_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut writer = UnifiedWriter::create(&path, &titles()).unwrap();
        writer
            .write_row(&NormalizedRecord {
                date: NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
                kind: "add".to_string(),
                amount: "10.05".to_string(),
                from: "198".to_string(),
                to: "182".to_string(),
            })
            .unwrap();
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "timestamp,type,amount,from,to\n2023-01-05,add,10.05,198,182\n"
        );
    }

    #[test]
    fn test_create_truncates_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale content\nfrom a previous run\n").unwrap();

        let writer = UnifiedWriter::create(&path, &titles()).unwrap();
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "timestamp,type,amount,from,to\n");
    }
}

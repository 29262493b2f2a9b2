// 📂 File Processor - stream one export file through its transformer

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use crate::transform::{RawRecord, RecordTransformer};
use crate::writer::UnifiedWriter;

/// Process one input file: read its header, treat each following line as a
/// raw record keyed by that header, transform, and write each normalized
/// record to the shared writer immediately.
///
/// Returns the number of rows written. Does not own the writer's lifetime.
/// Any open, read, or transform failure aborts with file and line context.
pub fn process_file(
    path: &Path,
    transformer: &dyn RecordTransformer,
    writer: &mut UnifiedWriter,
) -> Result<usize> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header of {}", file_name))?
        .clone();

    let mut rows = 0;
    for (idx, result) in reader.records().enumerate() {
        // +2: lines are 1-indexed and the header is line 1
        let line = idx + 2;
        let row = result
            .with_context(|| format!("Failed to read CSV line {} in {}", line, file_name))?;

        let raw = RawRecord::from_row(&headers, &row, format!("{} line {}", file_name, line));
        let normalized = transformer
            .transform(&raw)
            .with_context(|| format!("Failed to normalize line {} in {}", line, file_name))?;

        writer.write_row(&normalized)?;
        rows += 1;
    }

    Ok(rows)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::transformer_for;
    use crate::transform::BankType;

    fn titles() -> Vec<String> {
        ["timestamp", "type", "amount", "from", "to"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_process_bank1_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bank1.csv");
        std::fs::write(
            &input,
            "timestamp,type,amount,from,to\n\
             Oct 1 2019,remove,99.20,198,182\n\
             Jan 5 2023,add,2000.10,188,198\n",
        )
        .unwrap();

        let output = dir.path().join("out.csv");
        let mut writer = UnifiedWriter::create(&output, &titles()).unwrap();
        let transformer = transformer_for(BankType::Bank1);

        let rows = process_file(&input, transformer.as_ref(), &mut writer).unwrap();
        writer.finish().unwrap();

        assert_eq!(rows, 2);
        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            content,
            "timestamp,type,amount,from,to\n\
             2019-10-01,remove,99.20,198,182\n\
             2023-01-05,add,2000.10,188,198\n"
        );
    }

    #[test]
    fn test_rows_preserve_source_order() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bank2.csv");
        std::fs::write(
            &input,
            "date,transaction,amounts,to,from\n\
             03-01-2023,add,3.00,1,2\n\
             01-01-2023,add,1.00,1,2\n\
             02-01-2023,add,2.00,1,2\n",
        )
        .unwrap();

        let output = dir.path().join("out.csv");
        let mut writer = UnifiedWriter::create(&output, &titles()).unwrap();
        let transformer = transformer_for(BankType::Bank2);

        process_file(&input, transformer.as_ref(), &mut writer).unwrap();
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        let amounts: Vec<&str> = content
            .lines()
            .skip(1)
            .map(|l| l.split(',').nth(2).unwrap())
            .collect();
        assert_eq!(amounts, vec!["3.00", "1.00", "2.00"]);
    }

    #[test]
    fn test_malformed_row_aborts_with_line_context() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bank1.csv");
        std::fs::write(
            &input,
            "timestamp,type,amount,from,to\n\
             Oct 1 2019,remove,99.20,198,182\n\
             not-a-date,add,1.00,1,2\n",
        )
        .unwrap();

        let output = dir.path().join("out.csv");
        let mut writer = UnifiedWriter::create(&output, &titles()).unwrap();
        let transformer = transformer_for(BankType::Bank1);

        let err = process_file(&input, transformer.as_ref(), &mut writer).unwrap_err();
        assert!(format!("{:#}", err).contains("line 3"));
    }

    #[test]
    fn test_unreadable_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let mut writer = UnifiedWriter::create(&output, &titles()).unwrap();
        let transformer = transformer_for(BankType::Bank1);

        let missing = dir.path().join("no_such_file.csv");
        assert!(process_file(&missing, transformer.as_ref(), &mut writer).is_err());
    }
}

// 🚦 Dispatcher - route each input file to its transformer

use std::fs;

use anyhow::{anyhow, Context, Result};

use crate::config::Config;
use crate::error::UnifyError;
use crate::processor::process_file;
use crate::transform::transformer_for;
use crate::writer::UnifiedWriter;

/// What a completed run produced, for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub rows: usize,
}

/// Run the full unification pass.
///
/// Creates the output (header included) before scanning, so an empty data
/// directory still yields a header-only file. Input files are processed in
/// lexicographic name order rather than directory enumeration order, which
/// makes output byte-identical across runs and platforms. Subdirectories
/// are skipped. A file without a configuration entry aborts the run; rows
/// already written stay written.
pub fn run(config: &Config) -> Result<RunSummary> {
    let mut writer = UnifiedWriter::create(
        &config.settings.output_path,
        &config.settings.column_titles,
    )?;

    let entries = fs::read_dir(&config.settings.data_dir).with_context(|| {
        format!(
            "Failed to list data directory: {}",
            config.settings.data_dir.display()
        )
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| {
            format!(
                "Failed to read entry of {}",
                config.settings.data_dir.display()
            )
        })?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry
            .file_name()
            .into_string()
            .map_err(|name| anyhow!("Non-UTF-8 file name in data directory: {:?}", name))?;
        names.push(name);
    }
    names.sort();

    let mut rows = 0;
    for name in &names {
        let bank = config
            .sources
            .lookup(name)
            .ok_or_else(|| UnifyError::UnconfiguredFile(name.clone()))?;

        let transformer = transformer_for(bank);
        let path = config.settings.data_dir.join(name);
        rows += process_file(&path, transformer.as_ref(), &mut writer)
            .with_context(|| format!("Failed to process {} as {}", name, bank.name()))?;
    }

    writer.finish()?;

    Ok(RunSummary {
        files: names.len(),
        rows,
    })
}

// ============================================================================
// TESTS
// ============================================================================

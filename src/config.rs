// ⚙️ Configuration - load, validate, split into routing table + run settings

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::UnifyError;
use crate::transform::BankType;

/// Number of columns in the unified output schema.
pub const OUTPUT_COLUMNS: usize = 5;

// ============================================================================
// ON-DISK SHAPE
// ============================================================================

/// RawConfig - the configuration file as written on disk (JSON)
///
/// ```json
/// {
///   "path_to_data_files": "./data",
///   "banks_unified_file_name": "banks_unified",
///   "banks_unified_file_format": "csv",
///   "output_file_column_titles": ["timestamp", "type", "amount", "from", "to"],
///   "files": { "bank1.csv": "bank1_csv", "bank2.csv": "bank2_csv" }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct RawConfig {
    pub path_to_data_files: PathBuf,
    pub banks_unified_file_name: String,
    pub banks_unified_file_format: String,
    pub output_file_column_titles: Vec<String>,
    pub files: BTreeMap<String, String>,
}

// ============================================================================
// VALIDATED SHAPE
// ============================================================================

/// SourceTable - which bank layout each known input file uses
#[derive(Debug)]
pub struct SourceTable(BTreeMap<String, BankType>);

impl SourceTable {
    pub fn lookup(&self, file_name: &str) -> Option<BankType> {
        self.0.get(file_name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// RunSettings - everything about a run that is not file routing
#[derive(Debug)]
pub struct RunSettings {
    /// Directory scanned for input files.
    pub data_dir: PathBuf,
    /// Unified output file, `{name}.csv` in the working directory.
    pub output_path: PathBuf,
    /// Header row for the output file; exactly `OUTPUT_COLUMNS` titles.
    pub column_titles: Vec<String>,
}

/// Config - validated configuration, immutable for the duration of a run
#[derive(Debug)]
pub struct Config {
    pub sources: SourceTable,
    pub settings: RunSettings,
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Config> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let raw: RawConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Config::from_raw(raw)
    }

    /// Validate an already-deserialized configuration.
    ///
    /// Rejects, at load time rather than mid-run: unsupported output
    /// formats, a header with the wrong column count, and bank tags with
    /// no transformer behind them.
    pub fn from_raw(raw: RawConfig) -> Result<Config> {
        if raw.banks_unified_file_format != "csv" {
            return Err(UnifyError::UnsupportedFormat(raw.banks_unified_file_format).into());
        }

        if raw.output_file_column_titles.len() != OUTPUT_COLUMNS {
            return Err(UnifyError::ColumnTitleCount {
                expected: OUTPUT_COLUMNS,
                actual: raw.output_file_column_titles.len(),
            }
            .into());
        }

        let mut sources = BTreeMap::new();
        for (file, tag) in raw.files {
            let bank = BankType::from_tag(&tag)
                .ok_or(UnifyError::UnknownBankTag { file: file.clone(), tag })?;
            sources.insert(file, bank);
        }

        let output_path = PathBuf::from(format!(
            "{}.{}",
            raw.banks_unified_file_name, raw.banks_unified_file_format
        ));

        Ok(Config {
            sources: SourceTable(sources),
            settings: RunSettings {
                data_dir: raw.path_to_data_files,
                output_path,
                column_titles: raw.output_file_column_titles,
            },
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

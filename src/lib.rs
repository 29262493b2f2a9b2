// Bank Export Unifier - Core Library
// Normalizes per-bank transaction exports into one unified CSV

pub mod config;
pub mod dispatch;
pub mod error;
pub mod processor;
pub mod transform;
pub mod writer;

// Re-export commonly used types
pub use config::{Config, RawConfig, RunSettings, SourceTable, OUTPUT_COLUMNS};
pub use dispatch::{run, RunSummary};
pub use error::UnifyError;
pub use processor::process_file;
pub use transform::{
    transformer_for, Bank1Transformer, Bank2Transformer, Bank3Transformer, BankType,
    NormalizedRecord, RawRecord, RecordTransformer,
};
pub use writer::UnifiedWriter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

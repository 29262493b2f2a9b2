// 🏦 Record Transformers
// Polymorphic per-bank normalization: raw export row → unified record

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::UnifyError;

// ============================================================================
// BANK TYPE
// ============================================================================

/// BankType - identifies which export layout a file uses
///
/// Closed set: adding a bank means adding a variant here plus a transformer
/// below. Dispatch past configuration load is fully typed, never by string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankType {
    Bank1,
    Bank2,
    Bank3,
}

impl BankType {
    /// Parse the tag string used in the configuration file.
    pub fn from_tag(tag: &str) -> Option<BankType> {
        match tag {
            "bank1_csv" => Some(BankType::Bank1),
            "bank2_csv" => Some(BankType::Bank2),
            "bank3_csv" => Some(BankType::Bank3),
            _ => None,
        }
    }

    /// The configuration tag for this bank type.
    pub fn tag(&self) -> &'static str {
        match self {
            BankType::Bank1 => "bank1_csv",
            BankType::Bank2 => "bank2_csv",
            BankType::Bank3 => "bank3_csv",
        }
    }

    /// Human-readable name for progress output.
    pub fn name(&self) -> &'static str {
        match self {
            BankType::Bank1 => "Bank 1",
            BankType::Bank2 => "Bank 2",
            BankType::Bank3 => "Bank 3",
        }
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// RawRecord - one input row as a field-name→value mapping
///
/// Built from a CSV header plus one data row. `context` names the source
/// (file and line) so missing-field errors point at the offending input.
#[derive(Debug, Clone)]
pub struct RawRecord {
    fields: HashMap<String, String>,
    context: String,
}

impl RawRecord {
    pub fn new(fields: HashMap<String, String>, context: String) -> Self {
        RawRecord { fields, context }
    }

    /// Build from a CSV header row and a data row. Extra data cells beyond
    /// the header are ignored; missing cells simply leave the field absent.
    pub fn from_row(
        headers: &csv::StringRecord,
        row: &csv::StringRecord,
        context: String,
    ) -> Self {
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        RawRecord { fields, context }
    }

    /// Look up a field by name, failing with the source context if absent.
    pub fn field(&self, name: &str) -> Result<&str, UnifyError> {
        self.fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| UnifyError::MissingField {
                field: name.to_string(),
                context: self.context.clone(),
            })
    }
}

/// NormalizedRecord - the unified output row
///
/// Serializes in field order: date, type, amount, from, to. The date renders
/// as an ISO calendar date (YYYY-MM-DD) via chrono's serde support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub from: String,
    pub to: String,
}

// ============================================================================
// TRANSFORMER TRAIT
// ============================================================================

/// RecordTransformer - core trait, one impl per bank layout
///
/// Pure mapping from a raw row to a normalized record. No side effects;
/// the same input always produces the same output.
pub trait RecordTransformer {
    /// Normalize one raw row.
    ///
    /// The row is expected to carry this bank's field set; a missing field
    /// or a malformed date/amount is an error, not a row to skip.
    fn transform(&self, raw: &RawRecord) -> Result<NormalizedRecord>;

    /// The bank layout this transformer handles.
    fn bank_type(&self) -> BankType;
}

/// Get the transformer for a bank type.
///
/// Factory: the match is exhaustive, so a `BankType` can never reach the
/// dispatcher without a transformer behind it.
pub fn transformer_for(bank_type: BankType) -> Box<dyn RecordTransformer> {
    match bank_type {
        BankType::Bank1 => Box::new(Bank1Transformer),
        BankType::Bank2 => Box::new(Bank2Transformer),
        BankType::Bank3 => Box::new(Bank3Transformer),
    }
}

fn parse_date(raw: &RawRecord, field: &str, format: &str) -> Result<NaiveDate> {
    let value = raw.field(field)?;
    NaiveDate::parse_from_str(value, format)
        .with_context(|| format!("Invalid date `{}` in field `{}`", value, field))
}

// ============================================================================
// BANK 1
// ============================================================================

/// Bank 1 export layout: timestamp,type,amount,from,to
/// Dates look like "Jan 5 2023"; the amount is taken verbatim.
pub struct Bank1Transformer;

impl RecordTransformer for Bank1Transformer {
    fn transform(&self, raw: &RawRecord) -> Result<NormalizedRecord> {
        Ok(NormalizedRecord {
            date: parse_date(raw, "timestamp", "%b %d %Y")?,
            kind: raw.field("type")?.to_string(),
            amount: raw.field("amount")?.to_string(),
            from: raw.field("from")?.to_string(),
            to: raw.field("to")?.to_string(),
        })
    }

    fn bank_type(&self) -> BankType {
        BankType::Bank1
    }
}

// ============================================================================
// BANK 2
// ============================================================================

/// Bank 2 export layout: date,transaction,amounts,to,from
/// Dates look like "05-01-2023" (day first); the amount is taken verbatim.
pub struct Bank2Transformer;

impl RecordTransformer for Bank2Transformer {
    fn transform(&self, raw: &RawRecord) -> Result<NormalizedRecord> {
        Ok(NormalizedRecord {
            date: parse_date(raw, "date", "%d-%m-%Y")?,
            kind: raw.field("transaction")?.to_string(),
            amount: raw.field("amounts")?.to_string(),
            from: raw.field("from")?.to_string(),
            to: raw.field("to")?.to_string(),
        })
    }

    fn bank_type(&self) -> BankType {
        BankType::Bank2
    }
}

// ============================================================================
// BANK 3
// ============================================================================

/// Bank 3 export layout: date_readable,type,euro,cents,to,from
/// Dates look like "5 Jan 2023"; the amount is split into integer euro and
/// cents columns and has to be reassembled with exactly two fraction digits.
pub struct Bank3Transformer;

impl RecordTransformer for Bank3Transformer {
    fn transform(&self, raw: &RawRecord) -> Result<NormalizedRecord> {
        let euro: i64 = raw
            .field("euro")?
            .parse()
            .with_context(|| format!("Invalid euro amount `{}`", raw.field("euro").unwrap_or("")))?;
        let cents: i64 = raw.field("cents")?.parse().with_context(|| {
            format!("Invalid cents amount `{}`", raw.field("cents").unwrap_or(""))
        })?;

        // Reassemble in total cents so cents >= 100 carry into the units.
        let total = euro * 100 + cents;

        Ok(NormalizedRecord {
            date: parse_date(raw, "date_readable", "%d %b %Y")?,
            kind: raw.field("type")?.to_string(),
            amount: format!("{}.{:02}", total / 100, total % 100),
            from: raw.field("from")?.to_string(),
            to: raw.field("to")?.to_string(),
        })
    }

    fn bank_type(&self) -> BankType {
        BankType::Bank3
    }
}

// ============================================================================
// TESTS
// ============================================================================

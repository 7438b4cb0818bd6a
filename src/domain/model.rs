use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};

/// Symbol record as written by the metadata collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub reference: String,
    pub title: String,
    pub user: String,
    pub userid: i64,
    pub url: String,
    pub license: String,
    #[serde(default)]
    pub license_url: String,
    pub description: String,
    pub description_url: String,
}

/// 一個 ISO 7000 符號；`reference` 保證非空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SymbolRecord")]
pub struct Symbol {
    reference: String,
    pub title: String,
    pub user: String,
    pub userid: i64,
    pub url: String,
    pub license: String,
    pub license_url: String,
    pub description: String,
    pub description_url: String,
}

impl TryFrom<SymbolRecord> for Symbol {
    type Error = EtlError;

    fn try_from(record: SymbolRecord) -> Result<Self> {
        if record.reference.trim().is_empty() {
            return Err(EtlError::InvalidSymbolError {
                message: format!(
                    "Symbol reference must not be empty (title={})",
                    record.title
                ),
            });
        }

        Ok(Self {
            reference: record.reference,
            title: record.title,
            user: record.user,
            userid: record.userid,
            url: record.url,
            license: record.license,
            license_url: record.license_url,
            description: record.description,
            description_url: record.description_url,
        })
    }
}

impl Symbol {
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// File name shared by the raw cache and the processed directory.
    pub fn svg_name(&self) -> String {
        format!("{}.svg", self.reference)
    }
}

/// Parse the collector's JSON array, rejecting the file on any invalid record.
pub fn parse_symbols(data: &[u8]) -> Result<Vec<Symbol>> {
    let mut symbols: Vec<Symbol> = serde_json::from_slice(data)?;
    symbols.sort_by(|a, b| a.reference.cmp(&b.reference));
    Ok(symbols)
}

/// Per-batch counters; one file never fails the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformSummary {
    pub normalized: usize,
    pub up_to_date: usize,
    pub missing: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl TransformSummary {
    pub fn total(&self) -> usize {
        self.normalized + self.up_to_date + self.missing + self.skipped + self.failed
    }
}

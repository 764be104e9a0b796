// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Flattens decode results into presentation rows.
//!
//! One row per record, in the order the engine returned them. Nothing is
//! deduplicated, sorted or re-ranked here.

use crate::decode::{DecodeBatch, DecodeRecord};
use std::fmt;

/// Uniform presentation tuple for one decoded symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationRow {
    pub format: String,
    pub text: String,
    /// Decimal byte values joined by `", "`.
    pub raw_bytes: String,
    /// `(x, y)` pairs joined by spaces.
    pub points: String,
    /// One `"key: value"` line per metadata entry, engine order.
    pub metadata: Vec<String>,
}

impl From<&DecodeRecord> for PresentationRow {
    fn from(record: &DecodeRecord) -> Self {
        Self {
            format: record.format.name().to_string(),
            text: record.text.clone(),
            raw_bytes: join_bytes(&record.raw_bytes),
            points: record
                .points
                .iter()
                .map(|point| format!("({}, {})", point.x, point.y))
                .collect::<Vec<_>>()
                .join(" "),
            metadata: record
                .metadata
                .iter()
                .map(|entry| format!("{}: {}", entry.kind, entry.value))
                .collect(),
        }
    }
}

impl fmt::Display for PresentationRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Format:    {}", self.format)?;
        writeln!(f, "Text:      {}", self.text)?;
        writeln!(f, "Raw bytes: {}", self.raw_bytes)?;
        writeln!(f, "Points:    {}", self.points)?;
        write!(f, "Metadata:")?;
        if self.metadata.is_empty() {
            write!(f, " none")?;
        }
        for line in &self.metadata {
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}

pub fn aggregate_record(record: &DecodeRecord) -> PresentationRow {
    PresentationRow::from(record)
}

pub fn aggregate_batch(batch: &DecodeBatch) -> Vec<PresentationRow> {
    batch.iter().map(PresentationRow::from).collect()
}

fn join_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

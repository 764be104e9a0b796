// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::{BarcodeFormat, MetadataEntry};

/// A 2D coordinate in image space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// One decoded symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeRecord {
    pub format: BarcodeFormat,
    pub text: String,
    pub raw_bytes: Vec<u8>,
    pub num_bits: usize,
    pub points: Vec<Point>,
    /// Engine-provided order.
    pub metadata: Vec<MetadataEntry>,
    /// Milliseconds since the Unix epoch, as stamped by the engine.
    pub timestamp: i64,
}

/// Ordered result of a multi-symbol scan, in engine detection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeBatch(Vec<DecodeRecord>);

impl DecodeBatch {
    pub fn new(records: Vec<DecodeRecord>) -> Self {
        Self(records)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &[DecodeRecord] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecodeRecord> {
        self.0.iter()
    }

    pub fn into_records(self) -> Vec<DecodeRecord> {
        self.0
    }
}

impl IntoIterator for DecodeBatch {
    type Item = DecodeRecord;
    type IntoIter = std::vec::IntoIter<DecodeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DecodeBatch {
    type Item = &'a DecodeRecord;
    type IntoIter = std::slice::Iter<'a, DecodeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

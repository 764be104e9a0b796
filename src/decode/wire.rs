// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! JSON envelope returned by the engine's decode entry points.
//!
//! ```text
//! {"ok": <record | [record, ...]>}
//! {"not_found": "<diagnostic>"}
//! {"error": "<diagnostic>"}
//! ```

use super::{BarcodeFormat, DecodeBatch, DecodeRecord, MetadataEntry, MetadataKind, MetadataValue, Point};
use crate::errors::DecodeError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Envelope<T> {
    Ok(T),
    NotFound(String),
    Error(String),
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireRecord {
    format: BarcodeFormat,
    text: String,
    #[serde(default)]
    raw_bytes: Vec<u8>,
    #[serde(default)]
    num_bits: usize,
    /// Flattened `x, y` pairs.
    #[serde(default)]
    points: Vec<f32>,
    #[serde(default)]
    metadata: Vec<(String, MetadataValue)>,
    #[serde(default)]
    timestamp: i64,
}

impl TryFrom<WireRecord> for DecodeRecord {
    type Error = DecodeError;

    fn try_from(wire: WireRecord) -> Result<Self, Self::Error> {
        if wire.points.len() % 2 != 0 {
            return Err(DecodeError::Engine(format!(
                "odd number of point coordinates: {}",
                wire.points.len()
            )));
        }

        Ok(DecodeRecord {
            format: wire.format,
            text: wire.text,
            raw_bytes: wire.raw_bytes,
            num_bits: wire.num_bits,
            points: wire
                .points
                .chunks_exact(2)
                .map(|pair| Point { x: pair[0], y: pair[1] })
                .collect(),
            metadata: wire
                .metadata
                .into_iter()
                .map(|(name, value)| MetadataEntry::new(MetadataKind::from_name(&name), value))
                .collect(),
            timestamp: wire.timestamp,
        })
    }
}

/// Single-decode response: "nothing found" is an error.
pub(crate) fn parse_single(bytes: &[u8]) -> Result<DecodeRecord, DecodeError> {
    match serde_json::from_slice::<Envelope<WireRecord>>(bytes)? {
        Envelope::Ok(record) => record.try_into(),
        Envelope::NotFound(message) => Err(DecodeError::NotFound(message)),
        Envelope::Error(message) => Err(DecodeError::Engine(message)),
    }
}

/// Multi-decode response: "nothing found" is an empty batch.
pub(crate) fn parse_multi(bytes: &[u8]) -> Result<DecodeBatch, DecodeError> {
    match serde_json::from_slice::<Envelope<Vec<WireRecord>>>(bytes)? {
        Envelope::Ok(records) => records
            .into_iter()
            .map(DecodeRecord::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(DecodeBatch::new),
        Envelope::NotFound(_) => Ok(DecodeBatch::default()),
        Envelope::Error(message) => Err(DecodeError::Engine(message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "format": 11,
        "text": "hello",
        "raw_bytes": [64, 86],
        "num_bits": 16,
        "points": [1.0, 2.0, 3.5, 4.5],
        "metadata": [["Orientation", 0], ["Error_Correction_Level", "L"], ["Is_Mirrored", false]],
        "timestamp": 1700000000000
    }"#;

    #[test]
    fn test_parse_single_record() {
        let record = parse_single(format!(r#"{{"ok": {RECORD}}}"#).as_bytes()).unwrap();
        assert_eq!(record.format, BarcodeFormat::QrCode);
        assert_eq!(record.text, "hello");
        assert_eq!(record.raw_bytes, vec![64, 86]);
        assert_eq!(record.points, vec![Point { x: 1.0, y: 2.0 }, Point { x: 3.5, y: 4.5 }]);
        assert_eq!(record.metadata[0].kind, MetadataKind::Orientation);
        assert_eq!(record.metadata[1].value, MetadataValue::Text("L".to_string()));
        assert_eq!(record.metadata[2].value, MetadataValue::Flag(false));
    }

    #[test]
    fn test_single_not_found_is_error() {
        let result = parse_single(br#"{"not_found": "not found"}"#);
        match result {
            Err(DecodeError::NotFound(message)) => assert_eq!(message, "not found"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_multi_not_found_is_empty_batch() {
        let batch = parse_multi(br#"{"not_found": "not found"}"#).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_multi_keeps_engine_order() {
        let second = RECORD.replace("\"hello\"", "\"world\"");
        let body = format!(r#"{{"ok": [{RECORD}, {second}]}}"#);
        let batch = parse_multi(body.as_bytes()).unwrap();
        let texts: Vec<_> = batch.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["hello", "world"]);
    }

    #[test]
    fn test_engine_error_and_garbage() {
        assert!(matches!(
            parse_multi(br#"{"error": "bad dimensions"}"#),
            Err(DecodeError::Engine(_))
        ));
        assert!(matches!(parse_single(b"not json"), Err(DecodeError::Wire(_))));
    }

    #[test]
    fn test_odd_point_coordinates_rejected() {
        let body = r#"{"ok": {"format": 0, "text": "", "points": [1.0]}}"#;
        assert!(matches!(parse_single(body.as_bytes()), Err(DecodeError::Engine(_))));
    }

    #[test]
    fn test_fractional_metadata_value_accepted() {
        let body = r#"{"ok": {"format": 14, "text": "012345678905",
            "metadata": [["Suggested_Price", 1.99], ["Issue_Number", 4]]}}"#;
        let record = parse_single(body.as_bytes()).unwrap();
        assert_eq!(record.metadata[0].kind, MetadataKind::SuggestedPrice);
        assert_eq!(record.metadata[0].value, MetadataValue::Number(1.99));
        assert_eq!(record.metadata[1].value, MetadataValue::Integer(4));
    }
}

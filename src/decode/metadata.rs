// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fmt;

/// Closed set of result metadata kinds reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    Other,
    Orientation,
    ByteSegments,
    ErrorCorrectionLevel,
    IssueNumber,
    SuggestedPrice,
    PossibleCountry,
    UpcEanExtension,
    Pdf417ExtraMetadata,
    StructuredAppendSequence,
    StructuredAppendParity,
    SymbologyIdentifier,
    IsMirrored,
    ContentType,
    IsInverted,
}

/// Value type each metadata kind carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataValueType {
    Text,
    Integer,
    Flag,
}

const KINDS: [MetadataKind; 15] = [
    MetadataKind::Other,
    MetadataKind::Orientation,
    MetadataKind::ByteSegments,
    MetadataKind::ErrorCorrectionLevel,
    MetadataKind::IssueNumber,
    MetadataKind::SuggestedPrice,
    MetadataKind::PossibleCountry,
    MetadataKind::UpcEanExtension,
    MetadataKind::Pdf417ExtraMetadata,
    MetadataKind::StructuredAppendSequence,
    MetadataKind::StructuredAppendParity,
    MetadataKind::SymbologyIdentifier,
    MetadataKind::IsMirrored,
    MetadataKind::ContentType,
    MetadataKind::IsInverted,
];

impl MetadataKind {
    /// Name used on the wire and in presentation.
    pub fn name(self) -> &'static str {
        match self {
            MetadataKind::Other => "OTHER",
            MetadataKind::Orientation => "Orientation",
            MetadataKind::ByteSegments => "Byte_Segments",
            MetadataKind::ErrorCorrectionLevel => "Error_Correction_Level",
            MetadataKind::IssueNumber => "Issue_Number",
            MetadataKind::SuggestedPrice => "Suggested_Price",
            MetadataKind::PossibleCountry => "Possible_Country",
            MetadataKind::UpcEanExtension => "UPC/EAN_Extension",
            MetadataKind::Pdf417ExtraMetadata => "PDF417_Extra_MetaData",
            MetadataKind::StructuredAppendSequence => "Structured_Append_Sequence",
            MetadataKind::StructuredAppendParity => "Structured_Append_Parity",
            MetadataKind::SymbologyIdentifier => "Symbology_Identifier",
            MetadataKind::IsMirrored => "Is_Mirrored",
            MetadataKind::ContentType => "Content_Type",
            MetadataKind::IsInverted => "Is_Inverted",
        }
    }

    /// Unknown names collapse to [`MetadataKind::Other`].
    pub fn from_name(name: &str) -> Self {
        KINDS
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .unwrap_or(MetadataKind::Other)
    }

    pub fn value_type(self) -> MetadataValueType {
        match self {
            MetadataKind::Orientation
            | MetadataKind::IssueNumber
            | MetadataKind::StructuredAppendSequence
            | MetadataKind::StructuredAppendParity => MetadataValueType::Integer,
            MetadataKind::IsMirrored | MetadataKind::IsInverted => MetadataValueType::Flag,
            _ => MetadataValueType::Text,
        }
    }
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A metadata value as carried on the wire.
///
/// Whole numbers decode as `Integer`; any other JSON number is a `Number`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Flag(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl MetadataValue {
    /// Coerce a textual value into the type `kind` expects, when it parses.
    pub fn conform(self, kind: MetadataKind) -> Self {
        match (kind.value_type(), self) {
            (MetadataValueType::Integer, MetadataValue::Text(text)) => text
                .trim()
                .parse()
                .map(MetadataValue::Integer)
                .unwrap_or(MetadataValue::Text(text)),
            (MetadataValueType::Flag, MetadataValue::Text(text)) => text
                .parse()
                .map(MetadataValue::Flag)
                .unwrap_or(MetadataValue::Text(text)),
            (_, value) => value,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Flag(flag) => write!(f, "{flag}"),
            MetadataValue::Integer(number) => write!(f, "{number}"),
            MetadataValue::Number(number) => write!(f, "{number}"),
            MetadataValue::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetadataEntry {
    pub kind: MetadataKind,
    pub value: MetadataValue,
}

impl MetadataEntry {
    pub fn new(kind: MetadataKind, value: MetadataValue) -> Self {
        Self {
            value: value.conform(kind),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in KINDS {
            assert_eq!(MetadataKind::from_name(kind.name()), kind);
        }
        assert_eq!(MetadataKind::from_name("Made_Up"), MetadataKind::Other);
    }

    #[test]
    fn test_values_conform_to_kind() {
        let entry = MetadataEntry::new(
            MetadataKind::Orientation,
            MetadataValue::Text("90".to_string()),
        );
        assert_eq!(entry.value, MetadataValue::Integer(90));

        let entry = MetadataEntry::new(
            MetadataKind::IsMirrored,
            MetadataValue::Text("true".to_string()),
        );
        assert_eq!(entry.value, MetadataValue::Flag(true));

        let entry = MetadataEntry::new(
            MetadataKind::IssueNumber,
            MetadataValue::Text("n/a".to_string()),
        );
        assert_eq!(entry.value, MetadataValue::Text("n/a".to_string()));
    }

    #[test]
    fn test_untagged_value_decoding() {
        let values: Vec<MetadataValue> =
            serde_json::from_str(r#"[true, 7, 1.99, "L"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                MetadataValue::Flag(true),
                MetadataValue::Integer(7),
                MetadataValue::Number(1.99),
                MetadataValue::Text("L".to_string()),
            ]
        );
    }

    #[test]
    fn test_fractional_price_keeps_record_intact() {
        let entry = MetadataEntry::new(MetadataKind::SuggestedPrice, MetadataValue::Number(1.99));
        assert_eq!(entry.value, MetadataValue::Number(1.99));
        assert_eq!(format!("{}: {}", entry.kind, entry.value), "Suggested_Price: 1.99");
    }
}

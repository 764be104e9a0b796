// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;

/// Barcode symbologies, numbered in the engine's order.
///
/// Codes the host does not know map to [`BarcodeFormat::Unsupported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum BarcodeFormat {
    Aztec,
    Codabar,
    Code39,
    Code93,
    Code128,
    DataMatrix,
    Ean8,
    Ean13,
    Itf,
    MaxiCode,
    Pdf417,
    QrCode,
    Rss14,
    RssExpanded,
    UpcA,
    UpcE,
    UpcEanExtension,
    MicroQr,
    Telepen,
    RectangularMicroQr,
    Unsupported,
}

const FORMATS: [BarcodeFormat; 21] = [
    BarcodeFormat::Aztec,
    BarcodeFormat::Codabar,
    BarcodeFormat::Code39,
    BarcodeFormat::Code93,
    BarcodeFormat::Code128,
    BarcodeFormat::DataMatrix,
    BarcodeFormat::Ean8,
    BarcodeFormat::Ean13,
    BarcodeFormat::Itf,
    BarcodeFormat::MaxiCode,
    BarcodeFormat::Pdf417,
    BarcodeFormat::QrCode,
    BarcodeFormat::Rss14,
    BarcodeFormat::RssExpanded,
    BarcodeFormat::UpcA,
    BarcodeFormat::UpcE,
    BarcodeFormat::UpcEanExtension,
    BarcodeFormat::MicroQr,
    BarcodeFormat::Telepen,
    BarcodeFormat::RectangularMicroQr,
    BarcodeFormat::Unsupported,
];

impl BarcodeFormat {
    pub fn from_code(code: u32) -> Self {
        FORMATS
            .get(code as usize)
            .copied()
            .unwrap_or(BarcodeFormat::Unsupported)
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    /// Human-readable symbology name.
    pub fn name(self) -> &'static str {
        match self {
            BarcodeFormat::Aztec => "Aztec",
            BarcodeFormat::Codabar => "Codabar",
            BarcodeFormat::Code39 => "Code 39",
            BarcodeFormat::Code93 => "Code 93",
            BarcodeFormat::Code128 => "Code 128",
            BarcodeFormat::DataMatrix => "Data Matrix",
            BarcodeFormat::Ean8 => "EAN-8",
            BarcodeFormat::Ean13 => "EAN-13",
            BarcodeFormat::Itf => "ITF",
            BarcodeFormat::MaxiCode => "MaxiCode",
            BarcodeFormat::Pdf417 => "PDF417",
            BarcodeFormat::QrCode => "QR Code",
            BarcodeFormat::Rss14 => "RSS-14",
            BarcodeFormat::RssExpanded => "RSS Expanded",
            BarcodeFormat::UpcA => "UPC-A",
            BarcodeFormat::UpcE => "UPC-E",
            BarcodeFormat::UpcEanExtension => "UPC/EAN Extension",
            BarcodeFormat::MicroQr => "Micro QR Code",
            BarcodeFormat::Telepen => "Telepen",
            BarcodeFormat::RectangularMicroQr => "Rectangular Micro QR Code",
            BarcodeFormat::Unsupported => "Unsupported",
        }
    }
}

impl From<u32> for BarcodeFormat {
    fn from(code: u32) -> Self {
        BarcodeFormat::from_code(code)
    }
}

impl From<BarcodeFormat> for u32 {
    fn from(format: BarcodeFormat) -> Self {
        format.code()
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

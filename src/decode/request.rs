// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::DecodeError;
use crate::hints::HintConfiguration;
use crate::luma::{pixel_count, PixelBuffer};
use serde::Deserialize;

/// Which engine entry point a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    #[default]
    Single,
    Multi,
}

impl ScanMode {
    pub fn export_name(self) -> &'static str {
        match self {
            ScanMode::Single => "decode_barcode",
            ScanMode::Multi => "decode_multi",
        }
    }
}

/// One scan attempt. Built fresh per attempt and consumed by the call.
#[derive(Debug, Clone)]
pub struct DecodeRequest {
    luma: Vec<u8>,
    width: u32,
    height: u32,
    hints: HintConfiguration,
    filter_image: bool,
}

impl DecodeRequest {
    /// Checks that `luma` holds exactly one byte per pixel.
    pub fn new(
        luma: Vec<u8>,
        width: u32,
        height: u32,
        hints: HintConfiguration,
        filter_image: bool,
    ) -> Result<Self, DecodeError> {
        let expected = pixel_count(width, height)?;
        if luma.len() != expected {
            return Err(DecodeError::MalformedInput(format!(
                "luma buffer holds {} bytes, {}x{} needs {}",
                luma.len(),
                width,
                height,
                expected
            )));
        }

        Ok(Self {
            luma,
            width,
            height,
            hints,
            filter_image,
        })
    }

    /// Convert a host pixel buffer and wrap it into a request.
    pub fn from_pixels(
        pixels: &PixelBuffer<'_>,
        hints: HintConfiguration,
        filter_image: bool,
    ) -> Result<Self, DecodeError> {
        let luma = pixels.to_luma()?;
        Self::new(luma, pixels.width(), pixels.height(), hints, filter_image)
    }

    pub fn luma(&self) -> &[u8] {
        &self.luma
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn hints(&self) -> &HintConfiguration {
        &self.hints
    }

    pub fn filter_image(&self) -> bool {
        self.filter_image
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Decode request and response model.
//!
//! * `request` - what is sent to the engine per scan attempt
//! * `record` - what comes back: one record or an ordered batch
//! * `symbology` / `metadata` - closed enumerations used inside records
//! * `wire` - the JSON envelope spoken across the engine boundary

mod metadata;
mod record;
mod request;
mod symbology;
pub(crate) mod wire;

pub use metadata::{MetadataEntry, MetadataKind, MetadataValue, MetadataValueType};
pub use record::{DecodeBatch, DecodeRecord, Point};
pub use request::{DecodeRequest, ScanMode};
pub use symbology::BarcodeFormat;

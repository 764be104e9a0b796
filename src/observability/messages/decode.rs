// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for decode calls.

use std::fmt::{Display, Formatter};

/// Decode call issued to the engine.
///
/// # Log Level
/// `debug!` - Per-call event
///
/// # Example
/// ```
/// use scanbridge::observability::messages::decode::DecodeStarted;
///
/// let msg = DecodeStarted {
///     entry_point: "decode_barcode",
///     width: 640,
///     height: 480,
///     hint_count: 2,
///     filter_image: false,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct DecodeStarted<'a> {
    pub entry_point: &'a str,
    pub width: u32,
    pub height: u32,
    pub hint_count: usize,
    pub filter_image: bool,
}

impl Display for DecodeStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Calling {} on {}x{} luma image: hints={}, filter_image={}",
            self.entry_point, self.width, self.height, self.hint_count, self.filter_image
        )
    }
}

/// Decode call returned records.
///
/// # Log Level
/// `info!` - Operational event
pub struct DecodeCompleted<'a> {
    pub entry_point: &'a str,
    pub record_count: usize,
    pub execution_time_ms: u128,
}

impl Display for DecodeCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} returned {} record(s) in {}ms",
            self.entry_point, self.record_count, self.execution_time_ms
        )
    }
}

/// Decode call failed.
///
/// # Log Level
/// `warn!` - Recoverable, surfaced to the user
pub struct DecodeFailed<'a> {
    pub entry_point: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for DecodeFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.entry_point, self.error)
    }
}

/// Log line written by the engine through the host shim.
///
/// # Log Level
/// `debug!` - Guest diagnostics
pub struct GuestLog<'a> {
    pub namespace: &'a str,
    pub message: &'a str,
}

impl Display for GuestLog<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[engine:{}] {}", self.namespace, self.message)
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! WASM binary encoding check.
//!
//! The decoding engine must be a classic core module. Component Model
//! binaries are rejected up front with a clear error instead of a less
//! legible compile failure.

use crate::errors::{ModuleLoadError, COMPONENT_NOT_SUPPORTED};
use wasmparser::{Encoding, Parser, Payload};

/// Parse the image's section structure and require a core module encoding.
///
/// # Errors
/// * `InvalidBinary` if the input is empty, truncated or otherwise malformed
/// * `UnsupportedEncoding` if the input is a Component Model binary
pub fn ensure_core_module(bytes: &[u8]) -> Result<(), ModuleLoadError> {
    let mut encoding = None;

    for payload in Parser::new(0).parse_all(bytes) {
        if let Payload::Version { encoding: enc, .. } = payload? {
            encoding = Some(enc);
        }
    }

    match encoding {
        Some(Encoding::Module) => Ok(()),
        Some(Encoding::Component) => Err(ModuleLoadError::UnsupportedEncoding(
            COMPONENT_NOT_SUPPORTED.to_string(),
        )),
        None => Err(ModuleLoadError::InvalidBinary(
            "missing WASM version header".to_string(),
        )),
    }
}

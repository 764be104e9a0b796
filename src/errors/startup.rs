// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Startup error types.
//!
//! Both error families are fatal: a caller that receives one of them must not
//! go on to issue decode requests. There is no degraded mode.

use thiserror::Error;

/// Error message for component model binaries handed to the core module loader.
pub const COMPONENT_NOT_SUPPORTED: &str =
    "Component Model binaries are not supported; the decoding engine must be a core WASM module";

/// The binary module image could not be read, parsed, compiled or instantiated.
#[derive(Error, Debug)]
pub enum ModuleLoadError {
    /// File I/O error while reading the image.
    #[error("I/O error reading module image '{source_name}': {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    /// Image exceeds the configured size ceiling.
    #[error("Module image too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: usize, max: usize },

    /// Image is not a well-formed WASM binary.
    #[error("Invalid WASM binary: {0}")]
    InvalidBinary(String),

    /// Image is well-formed but uses an encoding the loader does not accept.
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Wasmtime engine creation or configuration error.
    #[error("Engine creation error: {0}")]
    Engine(String),

    /// Module compilation or validation error.
    #[error("WASM module compilation failed: {0}")]
    Compile(String),

    /// Instantiation rejected, usually an import the host shim does not provide.
    #[error("WASM module instantiation failed under namespace '{namespace}': {reason}")]
    Instantiate { namespace: String, reason: String },
}

impl From<wasmparser::BinaryReaderError> for ModuleLoadError {
    fn from(error: wasmparser::BinaryReaderError) -> Self {
        ModuleLoadError::InvalidBinary(error.to_string())
    }
}

/// The instantiated module does not expose a compatible binding shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingNotFoundError {
    /// None of the installer candidates resolved to a callable export.
    #[error("No binding installer export found (tried: {})", tried.join(", "))]
    NoInstaller { tried: Vec<&'static str> },

    /// The installer ran but a required entry point is missing or mistyped.
    #[error("Required export '{name}' missing or not of type {signature}")]
    MissingExport {
        name: &'static str,
        signature: &'static str,
    },
}

/// Any failure of the one-time initialization sequence.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    ModuleLoad(#[from] ModuleLoadError),

    #[error(transparent)]
    BindingNotFound(#[from] BindingNotFoundError),
}

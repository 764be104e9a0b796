// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Per-call decode failure.
///
/// Recoverable: the caller reports it to the user and may re-invoke with a
/// different capture or different hints. Nothing here is retried automatically.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The engine could not locate or parse any symbol.
    #[error("{0}")]
    NotFound(String),

    /// The engine rejected the request.
    #[error("engine error: {0}")]
    Engine(String),

    /// The request failed host-side validation before reaching the engine.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The engine trapped, including a guest throw routed through the shim.
    #[error("engine trap: {0}")]
    Trap(#[from] wasmtime::Error),

    /// Allocation or access error in the engine's linear memory.
    #[error("memory error: {0}")]
    Memory(String),

    /// The engine answered with an envelope the host could not decode.
    #[error("undecodable engine response: {0}")]
    Wire(#[from] serde_json::Error),
}

impl DecodeError {
    /// Text surfaced to the user as-is.
    pub fn diagnostic(&self) -> String {
        match self {
            DecodeError::NotFound(message) | DecodeError::Engine(message) => message.clone(),
            // include the guest message beneath any backtrace context
            DecodeError::Trap(error) => format!("engine trap: {error:#}"),
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DecodeError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_diagnostic_is_verbatim() {
        let error = DecodeError::NotFound("not found".to_string());
        assert_eq!(error.diagnostic(), "not found");
        assert!(error.is_not_found());

        let error = DecodeError::Engine("bad hints".to_string());
        assert_eq!(error.diagnostic(), "bad hints");
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_host_side_diagnostic_carries_context() {
        let error = DecodeError::MalformedInput("width is zero".to_string());
        assert_eq!(error.diagnostic(), "malformed input: width is zero");
    }
}

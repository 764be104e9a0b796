// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the one-time startup sequence.

use std::fmt::{Display, Formatter};

/// Module image read successfully.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use scanbridge::observability::messages::bridge::ModuleImageLoaded;
///
/// let msg = ModuleImageLoaded {
///     source: "pkg/engine_bg.wasm",
///     size_bytes: 4096,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ModuleImageLoaded<'a> {
    pub source: &'a str,
    pub size_bytes: usize,
}

impl Display for ModuleImageLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded module image: {} ({} bytes)",
            self.source, self.size_bytes
        )
    }
}

/// Module startup failed.
///
/// # Log Level
/// `error!` - Fatal, no decode call is reachable afterwards
pub struct StartupFailed<'a> {
    pub source: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for StartupFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to start decoding engine from '{}': {}",
            self.source, self.error
        )
    }
}

/// Import namespace chosen for the host shim.
///
/// # Log Level
/// `info!` when discovered, `warn!` when the fallback key is used
pub struct LinkageSelected<'a> {
    pub namespace: &'a str,
    pub fallback: bool,
}

impl Display for LinkageSelected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.fallback {
            write!(
                f,
                "Module declares no imports; linking host shim under fallback namespace '{}'",
                self.namespace
            )
        } else {
            write!(f, "Linking host shim under namespace '{}'", self.namespace)
        }
    }
}

/// Installer candidate present but not callable with the expected signature.
///
/// # Log Level
/// `warn!` - Candidate skipped
pub struct InstallerSkipped<'a> {
    pub name: &'a str,
    pub reason: &'a str,
}

impl Display for InstallerSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Skipping binding installer '{}': {}", self.name, self.reason)
    }
}

/// Installer selected and invoked.
///
/// # Log Level
/// `info!` - Important operational event
pub struct InstallerInvoked<'a> {
    pub name: &'a str,
    pub generation: &'a str,
}

impl Display for InstallerInvoked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Invoked binding installer '{}' ({} engine builds)",
            self.name, self.generation
        )
    }
}

/// Binding table populated.
///
/// # Log Level
/// `info!` - Important operational event
pub struct BindingsInstalled<'a> {
    pub entry_points: &'a [&'a str],
}

impl Display for BindingsInstalled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Binding table ready: {}", self.entry_points.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linkage_selected_mentions_fallback() {
        let msg = LinkageSelected {
            namespace: "wbg",
            fallback: true,
        };
        assert!(msg.to_string().contains("fallback namespace 'wbg'"));

        let msg = LinkageSelected {
            namespace: "env",
            fallback: false,
        };
        assert_eq!(msg.to_string(), "Linking host shim under namespace 'env'");
    }

    #[test]
    fn test_bindings_installed_lists_entry_points() {
        let msg = BindingsInstalled {
            entry_points: &["decode_barcode", "decode_multi"],
        };
        assert_eq!(msg.to_string(), "Binding table ready: decode_barcode, decode_multi");
    }
}

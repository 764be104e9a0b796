// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use wasmtime::Module;

/// Namespace used when a module declares no imports at all.
///
/// Fixed compatibility constant; it is not derived from anything.
pub const FALLBACK_NAMESPACE: &str = "wbg";

/// Namespace under which the module expects its host callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLinkage {
    namespace: String,
    fallback: bool,
}

impl ImportLinkage {
    /// Take the namespace of the first declared import.
    pub fn discover(module: &Module) -> Self {
        Self::from_namespaces(module.imports().map(|import| import.module()))
    }

    pub fn from_namespaces<'a>(mut namespaces: impl Iterator<Item = &'a str>) -> Self {
        match namespaces.next() {
            Some(namespace) => Self {
                namespace: namespace.to_string(),
                fallback: false,
            },
            None => Self {
                namespace: FALLBACK_NAMESPACE.to_string(),
                fallback: true,
            },
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

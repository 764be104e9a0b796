// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Bridge between the host and the binary decoding engine.
//!
//! Startup runs once, strictly in this order, and each step consumes the
//! previous step's output so the order cannot be skipped:
//!
//! ```text
//! ModuleSource ──read──▶ BinaryModuleImage ──ensure_core_module──▶ Module
//!     ──ImportLinkage::discover──▶ InstantiatedModule (host shim linked)
//!     ──BindingResolver::resolve──▶ installer invoked
//!     ──BindingTable::bind──▶ DecoderHandle
//! ```
//!
//! After that the handle is the only way to reach the engine. Its binding
//! table is never mutated; decode calls borrow it for the length of one call.

mod detector;
mod handle;
mod linkage;
mod loader;
mod resolver;
mod shim;
mod source;
mod table;

#[cfg(test)]
pub(crate) mod test_engine;

pub use detector::ensure_core_module;
pub use handle::DecoderHandle;
pub use linkage::{ImportLinkage, FALLBACK_NAMESPACE};
pub use loader::{InstantiatedModule, ModuleLoader};
pub use resolver::{BindingResolver, Capability, InstallerStrategy, INSTALLER_STRATEGIES};
pub use shim::{HostShim, ShimState};
pub use source::{read_image, BinaryModuleImage, BytesSource, FileSource, ModuleSource};
pub use table::BindingTable;

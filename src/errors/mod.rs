// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod decode;
mod startup;

pub use decode::DecodeError;
pub use startup::{BindingNotFoundError, ModuleLoadError, StartupError, COMPONENT_NOT_SUPPORTED};

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Default ceiling for the module image size (16 MB)
pub const DEFAULT_MAX_MODULE_SIZE: usize = 16 * 1024 * 1024;
/// Minimum fuel budget accepted per decode call (1 million instructions)
pub const MIN_FUEL_LEVEL: u64 = 1_000_000;

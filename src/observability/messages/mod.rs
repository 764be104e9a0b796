// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! * `bridge` - module image loading, linkage, installer and binding events
//! * `decode` - decode call lifecycle and guest log forwarding

pub mod bridge;
pub mod decode;

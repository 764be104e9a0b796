// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging.
//!
//! Log text lives in message structs implementing `Display`, so call sites
//! carry no magic strings and every event reads the same wherever it is
//! emitted.
//!
//! # Usage
//!
//! ```rust
//! use scanbridge::observability::messages::bridge::LinkageSelected;
//!
//! let msg = LinkageSelected {
//!     namespace: "wbg",
//!     fallback: true,
//! };
//!
//! tracing::info!("{}", msg);
//! ```

pub mod messages;

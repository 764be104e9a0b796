// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod aggregate;     // presentation rows
pub mod bridge;        // engine startup + decoder handle
pub mod config;        // config loading
pub mod decode;        // requests, records, wire envelope
pub mod errors;        // error handling
pub mod hints;         // decode hint configuration
pub mod luma;          // pixel → luma conversion
pub mod observability;

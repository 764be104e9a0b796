// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Host callbacks the engine may import.
//!
//! Every callback is registered under the single namespace discovered from the
//! module. A module importing anything not listed in [`HostShim::CALLBACKS`]
//! fails to instantiate.

use crate::observability::messages::decode::GuestLog;
use std::time::{SystemTime, UNIX_EPOCH};
use wasmtime::{Caller, Extern, Linker};

/// Per-store host state.
#[derive(Debug, Clone)]
pub struct ShimState {
    namespace: String,
}

impl ShimState {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

pub struct HostShim;

impl HostShim {
    pub const THROW: &'static str = "__wbindgen_throw";
    pub const LOG: &'static str = "__wbg_log";
    pub const NOW: &'static str = "__wbg_now";

    pub const CALLBACKS: [&'static str; 3] = [Self::THROW, Self::LOG, Self::NOW];

    /// Define every callback on `linker` under `namespace`.
    pub fn link(linker: &mut Linker<ShimState>, namespace: &str) -> wasmtime::Result<()> {
        linker.func_wrap(
            namespace,
            Self::THROW,
            |mut caller: Caller<'_, ShimState>, ptr: i32, len: i32| -> wasmtime::Result<()> {
                let message = read_guest_str(&mut caller, ptr, len)?;
                Err(wasmtime::Error::msg(message))
            },
        )?;

        linker.func_wrap(
            namespace,
            Self::LOG,
            |mut caller: Caller<'_, ShimState>, ptr: i32, len: i32| -> wasmtime::Result<()> {
                let message = read_guest_str(&mut caller, ptr, len)?;
                tracing::debug!(
                    "{}",
                    GuestLog {
                        namespace: caller.data().namespace(),
                        message: &message,
                    }
                );
                Ok(())
            },
        )?;

        linker.func_wrap(namespace, Self::NOW, || -> f64 {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs_f64() * 1000.0)
                .unwrap_or_default()
        })?;

        Ok(())
    }
}

/// Copy a UTF-8 string (lossily) out of the caller's exported memory.
fn read_guest_str(
    caller: &mut Caller<'_, ShimState>,
    ptr: i32,
    len: i32,
) -> wasmtime::Result<String> {
    let memory = caller
        .get_export("memory")
        .and_then(Extern::into_memory)
        .ok_or_else(|| wasmtime::Error::msg("engine does not export 'memory'"))?;

    let start = ptr as u32 as usize;
    let end = start
        .checked_add(len as u32 as usize)
        .ok_or_else(|| wasmtime::Error::msg("guest string length overflows"))?;

    let bytes = memory.data(&*caller).get(start..end).ok_or_else(|| {
        wasmtime::Error::msg(format!("guest string {start}..{end} out of bounds"))
    })?;

    Ok(String::from_utf8_lossy(bytes).into_owned())
}

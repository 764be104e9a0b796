// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed handles to the engine's entry points.
//!
//! Built once, after the installer has run, and never mutated afterwards.
//! Guest memory helpers follow the engine's C-style convention: the host
//! asks the guest to `allocate`, writes into linear memory, and hands the
//! buffer back with `deallocate` once the call is over. The response buffer
//! is allocated by the engine with the same allocator and released by the
//! host.

use crate::bridge::shim::ShimState;
use crate::decode::ScanMode;
use crate::errors::{BindingNotFoundError, DecodeError};
use crate::observability::messages::bridge::BindingsInstalled;
use wasmtime::{Instance, Memory, Store, TypedFunc, WasmParams, WasmResults};

/// `(luma_ptr, luma_len, width, height, hints_ptr, hints_len, filter, out_len_ptr) -> result_ptr`
pub type DecodeFn = TypedFunc<(i32, i32, i32, i32, i32, i32, i32, i32), i32>;

const DECODE_SIGNATURE: &str = "(i32, i32, i32, i32, i32, i32, i32, i32) -> i32";

/// A buffer living in guest linear memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GuestSlice {
    pub ptr: i32,
    pub len: i32,
}

pub struct BindingTable {
    memory: Memory,
    allocate: TypedFunc<i32, i32>,
    deallocate: TypedFunc<(i32, i32), ()>,
    decode_single: DecodeFn,
    decode_multi: DecodeFn,
}

impl BindingTable {
    pub const ENTRY_POINTS: [&'static str; 5] = [
        "memory",
        "allocate",
        "deallocate",
        "decode_barcode",
        "decode_multi",
    ];

    /// Resolve every entry point or fail; a partially bound table is never returned.
    pub fn bind(
        store: &mut Store<ShimState>,
        instance: &Instance,
    ) -> Result<Self, BindingNotFoundError> {
        let memory = instance
            .get_memory(&mut *store, "memory")
            .ok_or(BindingNotFoundError::MissingExport {
                name: "memory",
                signature: "memory",
            })?;

        let table = Self {
            memory,
            allocate: typed(store, instance, "allocate", "(i32) -> i32")?,
            deallocate: typed(store, instance, "deallocate", "(i32, i32) -> ()")?,
            decode_single: typed(store, instance, ScanMode::Single.export_name(), DECODE_SIGNATURE)?,
            decode_multi: typed(store, instance, ScanMode::Multi.export_name(), DECODE_SIGNATURE)?,
        };

        tracing::info!(
            "{}",
            BindingsInstalled {
                entry_points: &Self::ENTRY_POINTS,
            }
        );

        Ok(table)
    }

    pub fn entry_point(&self, mode: ScanMode) -> &DecodeFn {
        match mode {
            ScanMode::Single => &self.decode_single,
            ScanMode::Multi => &self.decode_multi,
        }
    }

    /// Allocate a guest buffer and copy `bytes` into it.
    pub(crate) fn write_guest(
        &self,
        store: &mut Store<ShimState>,
        bytes: &[u8],
    ) -> Result<GuestSlice, DecodeError> {
        let len = i32::try_from(bytes.len()).map_err(|_| {
            DecodeError::MalformedInput(format!("{} byte buffer exceeds guest address space", bytes.len()))
        })?;

        let ptr = self.allocate.call(&mut *store, len)?;
        if ptr == 0 {
            return Err(DecodeError::Memory(format!(
                "engine failed to allocate {len} bytes"
            )));
        }

        self.memory
            .write(&mut *store, ptr as u32 as usize, bytes)
            .map_err(|e| DecodeError::Memory(format!("failed to write guest memory: {e}")))?;

        Ok(GuestSlice { ptr, len })
    }

    pub(crate) fn read_guest(
        &self,
        store: &Store<ShimState>,
        slice: GuestSlice,
    ) -> Result<Vec<u8>, DecodeError> {
        let mut bytes = vec![0u8; slice.len as u32 as usize];
        self.memory
            .read(store, slice.ptr as u32 as usize, &mut bytes)
            .map_err(|e| DecodeError::Memory(format!("failed to read guest memory: {e}")))?;
        Ok(bytes)
    }

    pub(crate) fn free_guest(
        &self,
        store: &mut Store<ShimState>,
        slice: GuestSlice,
    ) -> Result<(), DecodeError> {
        self.deallocate.call(&mut *store, (slice.ptr, slice.len))?;
        Ok(())
    }
}

fn typed<Params, Results>(
    store: &mut Store<ShimState>,
    instance: &Instance,
    name: &'static str,
    signature: &'static str,
) -> Result<TypedFunc<Params, Results>, BindingNotFoundError>
where
    Params: WasmParams,
    Results: WasmResults,
{
    instance
        .get_typed_func::<Params, Results>(&mut *store, name)
        .map_err(|_| BindingNotFoundError::MissingExport { name, signature })
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The decoder handle: the single owner of the engine instance.
//!
//! `initialize` runs the whole startup protocol. Decode calls are synchronous
//! and run to completion; there is no retry, timeout or cancellation at this
//! layer (a configured fuel budget surfaces as an ordinary trap).

use crate::bridge::detector::ensure_core_module;
use crate::bridge::linkage::ImportLinkage;
use crate::bridge::loader::ModuleLoader;
use crate::bridge::resolver::{BindingResolver, InstallerStrategy};
use crate::bridge::shim::ShimState;
use crate::bridge::source::{read_image, ModuleSource};
use crate::bridge::table::{BindingTable, GuestSlice};
use crate::config::EngineOptions;
use crate::decode::wire::{parse_multi, parse_single};
use crate::decode::{DecodeBatch, DecodeRecord, DecodeRequest, ScanMode};
use crate::errors::{DecodeError, StartupError};
use crate::hints::HintConfiguration;
use crate::luma::PixelBuffer;
use crate::observability::messages::bridge::StartupFailed;
use crate::observability::messages::decode::{DecodeCompleted, DecodeFailed, DecodeStarted};
use std::time::Instant;
use wasmtime::Store;

pub struct DecoderHandle {
    store: Store<ShimState>,
    bindings: BindingTable,
    linkage: ImportLinkage,
    installer: InstallerStrategy,
    fuel: Option<u64>,
}

impl DecoderHandle {
    /// Load, link and bind the engine. Any error here is fatal.
    pub async fn initialize(
        source: &dyn ModuleSource,
        options: &EngineOptions,
    ) -> Result<Self, StartupError> {
        Self::start(source, options).await.map_err(|error| {
            tracing::error!(
                "{}",
                StartupFailed {
                    source: &source.describe(),
                    error: &error,
                }
            );
            error
        })
    }

    async fn start(
        source: &dyn ModuleSource,
        options: &EngineOptions,
    ) -> Result<Self, StartupError> {
        let image = read_image(source, options.max_module_size).await?;
        ensure_core_module(image.bytes())?;

        let module = ModuleLoader::load(&image, options).await?;
        let (mut module, installer) = BindingResolver::resolve(module)?;
        let bindings = BindingTable::bind(&mut module.store, &module.instance)?;

        Ok(Self {
            store: module.store,
            bindings,
            linkage: module.linkage,
            installer,
            fuel: options.fuel,
        })
    }

    pub fn linkage(&self) -> &ImportLinkage {
        &self.linkage
    }

    /// The installer candidate that was selected at startup.
    pub fn installer(&self) -> &InstallerStrategy {
        &self.installer
    }

    /// Decode exactly one symbol. "Nothing found" is a [`DecodeError::NotFound`].
    pub fn decode_single(&mut self, request: DecodeRequest) -> Result<DecodeRecord, DecodeError> {
        let started = Instant::now();
        let outcome = self
            .call_entry_point(ScanMode::Single, &request)
            .and_then(|bytes| parse_single(&bytes));
        log_outcome(ScanMode::Single, started, outcome.as_ref().map(|_| 1));
        outcome
    }

    /// Decode every symbol in the image, in engine detection order.
    ///
    /// "Nothing found" is an empty batch; errors mean the input was rejected.
    pub fn decode_multi(&mut self, request: DecodeRequest) -> Result<DecodeBatch, DecodeError> {
        let started = Instant::now();
        let outcome = self
            .call_entry_point(ScanMode::Multi, &request)
            .and_then(|bytes| parse_multi(&bytes));
        log_outcome(ScanMode::Multi, started, outcome.as_ref().map(DecodeBatch::len));
        outcome
    }

    /// Convert a host image, build the request and route it by `mode`.
    ///
    /// A single decode comes back as a batch of one.
    pub fn scan(
        &mut self,
        pixels: &PixelBuffer<'_>,
        hints: HintConfiguration,
        filter_image: bool,
        mode: ScanMode,
    ) -> Result<DecodeBatch, DecodeError> {
        let request = DecodeRequest::from_pixels(pixels, hints, filter_image)?;
        match mode {
            ScanMode::Single => self
                .decode_single(request)
                .map(|record| DecodeBatch::new(vec![record])),
            ScanMode::Multi => self.decode_multi(request),
        }
    }

    fn call_entry_point(
        &mut self,
        mode: ScanMode,
        request: &DecodeRequest,
    ) -> Result<Vec<u8>, DecodeError> {
        tracing::debug!(
            "{}",
            DecodeStarted {
                entry_point: mode.export_name(),
                width: request.width(),
                height: request.height(),
                hint_count: request.hints().len(),
                filter_image: request.filter_image(),
            }
        );

        if let Some(fuel) = self.fuel {
            self.store.set_fuel(fuel)?;
        }

        let mut scratch = Vec::with_capacity(4);
        let outcome = invoke(&mut self.store, &self.bindings, mode, request, &mut scratch);

        // A call that ran out of fuel leaves none for `deallocate`.
        if let Some(fuel) = self.fuel {
            if let Err(error) = self.store.set_fuel(fuel) {
                tracing::warn!("Failed to refuel store before releasing guest buffers: {}", error);
            }
        }

        for slice in scratch {
            if let Err(error) = self.bindings.free_guest(&mut self.store, slice) {
                tracing::warn!("Failed to release guest buffer at {}: {}", slice.ptr, error);
            }
        }

        outcome
    }
}

#[cfg(test)]
impl DecoderHandle {
    /// Copy of guest linear memory, for inspecting engine state.
    pub(crate) fn guest_bytes(&self, ptr: i32, len: i32) -> Result<Vec<u8>, DecodeError> {
        self.bindings.read_guest(&self.store, GuestSlice { ptr, len })
    }
}

/// Marshal one request into guest memory, call, and copy the response out.
///
/// Every guest buffer touched is pushed to `scratch` so the caller can free
/// them all, whether or not the call succeeded.
fn invoke(
    store: &mut Store<ShimState>,
    bindings: &BindingTable,
    mode: ScanMode,
    request: &DecodeRequest,
    scratch: &mut Vec<GuestSlice>,
) -> Result<Vec<u8>, DecodeError> {
    let width = to_guest_int(request.width(), "width")?;
    let height = to_guest_int(request.height(), "height")?;
    let hints_json = request.hints().to_wire_json()?;

    let luma = bindings.write_guest(store, request.luma())?;
    scratch.push(luma);
    let hints = bindings.write_guest(store, &hints_json)?;
    scratch.push(hints);
    let out_len = bindings.write_guest(store, &[0u8; 4])?;
    scratch.push(out_len);

    let result_ptr = bindings.entry_point(mode).call(
        &mut *store,
        (
            luma.ptr,
            luma.len,
            width,
            height,
            hints.ptr,
            hints.len,
            request.filter_image() as i32,
            out_len.ptr,
        ),
    )?;

    let len_bytes = bindings.read_guest(store, out_len)?;
    let len = i32::from_le_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]]);

    if result_ptr == 0 || len <= 0 {
        return Err(DecodeError::Memory(format!(
            "{} returned an empty response (ptr={result_ptr}, len={len})",
            mode.export_name()
        )));
    }

    let response = GuestSlice {
        ptr: result_ptr,
        len,
    };
    scratch.push(response);
    bindings.read_guest(store, response)
}

fn to_guest_int(value: u32, what: &str) -> Result<i32, DecodeError> {
    i32::try_from(value)
        .map_err(|_| DecodeError::MalformedInput(format!("{what} {value} exceeds engine limits")))
}

fn log_outcome(mode: ScanMode, started: Instant, outcome: Result<usize, &DecodeError>) {
    match outcome {
        Ok(record_count) => tracing::info!(
            "{}",
            DecodeCompleted {
                entry_point: mode.export_name(),
                record_count,
                execution_time_ms: started.elapsed().as_millis(),
            }
        ),
        Err(error) => tracing::warn!(
            "{}",
            DecodeFailed {
                entry_point: mode.export_name(),
                error,
            }
        ),
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Compile and instantiate the engine module.
//!
//! ## Responsibilities
//! - Create the wasmtime Engine with a fixed, conservative feature set
//! - Compile the image off the async runtime's worker threads
//! - Discover the import linkage and link the host shim under it
//! - Instantiate, failing with `ModuleLoadError` on any import mismatch

use crate::bridge::linkage::ImportLinkage;
use crate::bridge::shim::{HostShim, ShimState};
use crate::bridge::source::BinaryModuleImage;
use crate::config::EngineOptions;
use crate::errors::ModuleLoadError;
use crate::observability::messages::bridge::LinkageSelected;
use wasmtime::{Config, Engine, Instance, Linker, Module, Store};

/// A freshly instantiated module whose bindings have not been installed yet.
pub struct InstantiatedModule {
    pub(crate) store: Store<ShimState>,
    pub(crate) instance: Instance,
    pub(crate) linkage: ImportLinkage,
}

impl InstantiatedModule {
    pub fn linkage(&self) -> &ImportLinkage {
        &self.linkage
    }
}

pub struct ModuleLoader;

impl ModuleLoader {
    /// Compile and instantiate `image` in one step.
    pub async fn load(
        image: &BinaryModuleImage,
        options: &EngineOptions,
    ) -> Result<InstantiatedModule, ModuleLoadError> {
        let engine = Self::create_engine(options)?;
        let module = Self::compile(&engine, image).await?;
        Self::instantiate(&engine, &module, options)
    }

    /// Create wasmtime engine with a fixed feature set
    pub fn create_engine(options: &EngineOptions) -> Result<Engine, ModuleLoadError> {
        let mut config = Config::new();

        config.wasm_threads(false);
        config.wasm_multi_memory(false);
        config.wasm_memory64(false);

        // fuel only bounds a call when a budget is configured
        config.consume_fuel(options.fuel.is_some());
        config.epoch_interruption(false);

        Engine::new(&config).map_err(|e| ModuleLoadError::Engine(e.to_string()))
    }

    /// Compile on a blocking task; compilation is the second startup suspension point.
    pub async fn compile(
        engine: &Engine,
        image: &BinaryModuleImage,
    ) -> Result<Module, ModuleLoadError> {
        let engine = engine.clone();
        let image = image.clone();

        tokio::task::spawn_blocking(move || Module::new(&engine, image.bytes()))
            .await
            .map_err(|e| ModuleLoadError::Compile(e.to_string()))?
            .map_err(|e| ModuleLoadError::Compile(format!("{e:#}")))
    }

    /// Link the shim under the discovered namespace and instantiate.
    pub fn instantiate(
        engine: &Engine,
        module: &Module,
        options: &EngineOptions,
    ) -> Result<InstantiatedModule, ModuleLoadError> {
        let linkage = ImportLinkage::discover(module);
        let namespace = linkage.namespace().to_string();

        let selected = LinkageSelected {
            namespace: &namespace,
            fallback: linkage.is_fallback(),
        };
        if linkage.is_fallback() {
            tracing::warn!("{}", selected);
        } else {
            tracing::info!("{}", selected);
        }

        let instantiate_error = |reason: String| ModuleLoadError::Instantiate {
            namespace: namespace.clone(),
            reason,
        };

        let mut linker = Linker::new(engine);
        HostShim::link(&mut linker, &namespace).map_err(|e| instantiate_error(format!("{e:#}")))?;

        let mut store = Store::new(engine, ShimState::new(namespace.clone()));
        if let Some(fuel) = options.fuel {
            store
                .set_fuel(fuel)
                .map_err(|e| instantiate_error(format!("{e:#}")))?;
        }

        let instance = linker
            .instantiate(&mut store, module)
            .map_err(|e| instantiate_error(format!("{e:#}")))?;

        Ok(InstantiatedModule {
            store,
            instance,
            linkage,
        })
    }
}

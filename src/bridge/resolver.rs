// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Binding installer resolution.
//!
//! Engine builds have exported the "install bindings" entry point under
//! several names over time. The candidates form a closed list ordered by
//! recency; adding a name is an explicit change to [`INSTALLER_STRATEGIES`].

use crate::bridge::loader::InstantiatedModule;
use crate::bridge::shim::ShimState;
use crate::errors::{BindingNotFoundError, ModuleLoadError, StartupError};
use crate::observability::messages::bridge::{InstallerInvoked, InstallerSkipped};
use wasmtime::{Extern, FuncType, Instance, Store, TypedFunc};

/// One named installer candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallerStrategy {
    pub name: &'static str,
    /// Which family of engine builds uses this name.
    pub generation: &'static str,
}

/// Installer candidates, highest priority first.
pub const INSTALLER_STRATEGIES: [InstallerStrategy; 4] = [
    InstallerStrategy {
        name: "__wbg_set_wasm",
        generation: "current",
    },
    InstallerStrategy {
        name: "__wbindgen_set_wasm",
        generation: "legacy",
    },
    InstallerStrategy {
        name: "__wbg_setWasm",
        generation: "legacy camel-case",
    },
    InstallerStrategy {
        name: "set_wasm",
        generation: "bare setter",
    },
];

/// What a candidate name resolves to on a given instance.
pub enum Capability {
    /// Exported function of type `[] -> []`.
    Callable(TypedFunc<(), ()>),
    /// Exported function of some other type.
    WrongSignature(FuncType),
    /// Exported, but not a function.
    NotAFunction,
    Absent,
}

impl InstallerStrategy {
    /// Capability check: exists and is callable with the installer signature.
    pub fn probe(&self, store: &mut Store<ShimState>, instance: &Instance) -> Capability {
        match instance.get_export(&mut *store, self.name) {
            Some(Extern::Func(func)) => match func.typed::<(), ()>(&*store) {
                Ok(typed) => Capability::Callable(typed),
                Err(_) => Capability::WrongSignature(func.ty(&*store)),
            },
            Some(_) => Capability::NotAFunction,
            None => Capability::Absent,
        }
    }
}

pub struct BindingResolver;

impl BindingResolver {
    /// First callable candidate in priority order.
    pub fn select(
        store: &mut Store<ShimState>,
        instance: &Instance,
    ) -> Result<(InstallerStrategy, TypedFunc<(), ()>), BindingNotFoundError> {
        for strategy in INSTALLER_STRATEGIES {
            match strategy.probe(store, instance) {
                Capability::Callable(installer) => return Ok((strategy, installer)),
                Capability::WrongSignature(ty) => tracing::warn!(
                    "{}",
                    InstallerSkipped {
                        name: strategy.name,
                        reason: &format!("expected [] -> [], found {ty:?}"),
                    }
                ),
                Capability::NotAFunction => tracing::warn!(
                    "{}",
                    InstallerSkipped {
                        name: strategy.name,
                        reason: "export is not a function",
                    }
                ),
                Capability::Absent => {}
            }
        }

        Err(BindingNotFoundError::NoInstaller {
            tried: INSTALLER_STRATEGIES.iter().map(|s| s.name).collect(),
        })
    }

    /// Select the installer and invoke it exactly once.
    ///
    /// Consumes the module so the installer cannot run twice on one instance.
    pub fn resolve(
        mut module: InstantiatedModule,
    ) -> Result<(InstantiatedModule, InstallerStrategy), StartupError> {
        let (strategy, installer) = Self::select(&mut module.store, &module.instance)?;

        installer.call(&mut module.store, ()).map_err(|e| {
            StartupError::ModuleLoad(ModuleLoadError::Instantiate {
                namespace: module.linkage.namespace().to_string(),
                reason: format!("binding installer '{}' trapped: {e:#}", strategy.name),
            })
        })?;

        tracing::info!(
            "{}",
            InstallerInvoked {
                name: strategy.name,
                generation: strategy.generation,
            }
        );

        Ok((module, strategy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::source::BinaryModuleImage;
    use crate::bridge::ModuleLoader;
    use crate::config::EngineOptions;

    async fn load(exports: &str) -> InstantiatedModule {
        let wat = format!(
            r#"(module
                (global $calls (export "calls") (mut i32) (i32.const 0))
                (global $which (export "which") (mut i32) (i32.const 0))
                {exports})"#
        );
        let image = BinaryModuleImage::new("inline", wat::parse_str(&wat).unwrap());
        ModuleLoader::load(&image, &EngineOptions::default()).await.unwrap()
    }

    fn installer(name: &str, id: i32) -> String {
        format!(
            r#"(func (export "{name}")
                (global.set $calls (i32.add (global.get $calls) (i32.const 1)))
                (global.set $which (i32.const {id})))"#
        )
    }

    fn global(module: &mut InstantiatedModule, name: &str) -> i32 {
        module
            .instance
            .get_global(&mut module.store, name)
            .unwrap()
            .get(&mut module.store)
            .i32()
            .unwrap()
    }

    #[tokio::test]
    async fn test_highest_priority_candidate_wins() {
        let exports = [
            installer("set_wasm", 4),
            installer("__wbindgen_set_wasm", 2),
            installer("__wbg_set_wasm", 1),
        ]
        .join("\n");
        let module = load(&exports).await;

        let (mut module, strategy) = BindingResolver::resolve(module).unwrap();
        assert_eq!(strategy.name, "__wbg_set_wasm");
        assert_eq!(global(&mut module, "which"), 1);
        assert_eq!(global(&mut module, "calls"), 1);
    }

    #[tokio::test]
    async fn test_legacy_candidates_in_order() {
        let exports = [installer("set_wasm", 4), installer("__wbg_setWasm", 3)].join("\n");
        let (mut module, strategy) = BindingResolver::resolve(load(&exports).await).unwrap();
        assert_eq!(strategy.name, "__wbg_setWasm");
        assert_eq!(global(&mut module, "which"), 3);
    }

    #[tokio::test]
    async fn test_uncallable_candidates_are_skipped() {
        let exports = format!(
            r#"(global (export "__wbg_set_wasm") i32 (i32.const 0))
               (func (export "__wbindgen_set_wasm") (param i32))
               {}"#,
            installer("set_wasm", 4)
        );
        let (_, strategy) = BindingResolver::resolve(load(&exports).await).unwrap();
        assert_eq!(strategy.name, "set_wasm");
    }

    #[tokio::test]
    async fn test_no_candidate_is_fatal() {
        let module = load(r#"(func (export "init"))"#).await;
        match BindingResolver::resolve(module) {
            Err(StartupError::BindingNotFound(BindingNotFoundError::NoInstaller { tried })) => {
                assert_eq!(
                    tried,
                    vec!["__wbg_set_wasm", "__wbindgen_set_wasm", "__wbg_setWasm", "set_wasm"]
                );
            }
            Err(other) => panic!("Expected NoInstaller, got {:?}", other),
            Ok(_) => panic!("Expected NoInstaller error"),
        }
    }

    #[tokio::test]
    async fn test_trapping_installer_aborts_startup() {
        let module = load(r#"(func (export "__wbg_set_wasm") unreachable)"#).await;
        assert!(matches!(
            BindingResolver::resolve(module),
            Err(StartupError::ModuleLoad(ModuleLoadError::Instantiate { .. }))
        ));
    }
}

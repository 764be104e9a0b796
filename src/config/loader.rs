// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_MAX_MODULE_SIZE, MIN_FUEL_LEVEL};
use crate::decode::ScanMode;
use crate::hints::{HintConfiguration, HintForm};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Bridge configuration, loaded from YAML or TOML.
///
/// # Fields
/// * `module` - Path to the engine's binary module image; relative paths are
///   resolved against the directory holding the config file
/// * `engine` - Wasmtime engine options (optional)
/// * `scan` - Decode mode, pre-filtering flag and hint form state (optional)
///
/// # Example
/// ```yaml
/// module: pkg/engine_bg.wasm
/// engine:
///   fuel: 500000000
/// scan:
///   mode: multi
///   filter_image: true
///   text_hints:
///     CharacterSet: UTF-8
///   flag_hints:
///     TryHarder: true
///     PureBarcode: false
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    pub module: PathBuf,
    #[serde(default)]
    pub engine: EngineOptions,
    #[serde(default)]
    pub scan: ScanOptions,
}

/// Wasmtime engine options.
///
/// # Fields
/// * `fuel` - Instruction budget applied to each engine call; absent means unlimited
/// * `max_module_size` - Largest module image accepted, in bytes (defaults to 16 MB)
#[derive(Debug, Clone, Deserialize)]
pub struct EngineOptions {
    #[serde(default)]
    pub fuel: Option<u64>,
    #[serde(default = "default_max_module_size")]
    pub max_module_size: usize,
}

fn default_max_module_size() -> usize {
    DEFAULT_MAX_MODULE_SIZE
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            fuel: None,
            max_module_size: DEFAULT_MAX_MODULE_SIZE,
        }
    }
}

/// Per-scan options: entry point, pre-filtering and hint form state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanOptions {
    #[serde(default)]
    pub mode: ScanMode,
    #[serde(default)]
    pub filter_image: bool,
    #[serde(flatten)]
    pub hints: HintForm,
}

impl ScanOptions {
    pub fn hint_configuration(&self) -> HintConfiguration {
        HintConfiguration::from_form(&self.hints)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config file extension: '{0}' (expected .yaml, .yml or .toml)")]
    UnsupportedFormat(String),

    #[error("Configuration validation failed:\n{}", .0.join("\n"))]
    Invalid(Vec<String>),
}

/// Load a config from a YAML or TOML file, chosen by extension.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BridgeConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let mut cfg: BridgeConfig = match extension.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content)?,
        "toml" => toml::from_str(&content)?,
        other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
    };

    if cfg.module.is_relative() {
        if let Some(dir) = path.parent() {
            cfg.module = dir.join(&cfg.module);
        }
    }

    Ok(cfg)
}

/// Check cross-field rules serde cannot express.
pub fn validate_config(cfg: &BridgeConfig) -> Result<(), ConfigError> {
    let mut problems = Vec::new();

    if cfg.engine.max_module_size == 0 {
        problems.push("engine.max_module_size must be greater than zero".to_string());
    }

    if let Some(fuel) = cfg.engine.fuel {
        if fuel < MIN_FUEL_LEVEL {
            problems.push(format!(
                "engine.fuel must be at least {MIN_FUEL_LEVEL}, got {fuel}"
            ));
        }
    }

    for kind in cfg.scan.hints.misplaced_kinds() {
        let section = if kind.is_flag() { "text_hints" } else { "flag_hints" };
        problems.push(format!("hint '{kind}' does not belong in scan.{section}"));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(problems))
    }
}

/// Load a config file and validate it.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<BridgeConfig, ConfigError> {
    let cfg = load_config(path)?;
    validate_config(&cfg)?;
    Ok(cfg)
}

// src/config.rs

//! Configuration for the runtime registration tooling.
//!
//! The configuration is read from a JSON file. Every section carries
//! defaults, so a partial file (or none at all) is fine.

use anyhow::{Context, Result};
use log::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::platform::resolve_target;

/// Root of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Which runtime library we register.
    pub runtime: RuntimeConfig,
    /// Format of the manifests we write.
    pub manifest: ManifestConfig,
}

// --- Runtime ---

/// Identity and location of the runtime library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Name written into (and compared against) the runtime manifest.
    pub name: String,
    /// Library name without platform prefix/suffix ("aethervr" -> libaethervr.so).
    pub library_stem: String,
    /// Directory holding the runtime library. `None` means next to the
    /// running executable.
    pub runtime_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            name: "AetherVR".to_string(),
            library_stem: "aethervr".to_string(),
            runtime_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Directory the runtime library lives in.
    pub fn resolved_runtime_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.runtime_dir {
            return Ok(dir.clone());
        }
        let exe = std::env::current_exe().context("Failed to locate the running executable")?;
        exe.parent()
            .map(Path::to_path_buf)
            .with_context(|| format!("Executable path {} has no parent", exe.display()))
    }

    /// Full path of the runtime library for the build target.
    pub fn library_path(&self) -> Result<PathBuf> {
        let target = resolve_target();
        let file_name = target
            .runtime_library_name(&self.library_stem)
            .with_context(|| format!("No runtime library naming convention for {target}"))?;
        Ok(self.resolved_runtime_dir()?.join(file_name))
    }
}

// --- Manifest ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ManifestConfig {
    /// `file_format_version` written into new manifests.
    pub file_format_version: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            file_format_version: "1.0.0".to_string(),
        }
    }
}

// --- Loading ---

impl Config {
    /// Reads a configuration file. Missing sections fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(
                "Config file {} not found, using defaults",
                path.display()
            );
            return Ok(Config::default());
        }
        Config::load(path)
    }
}

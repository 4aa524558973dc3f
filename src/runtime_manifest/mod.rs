// src/runtime_manifest/mod.rs

//! Active OpenXR runtime registration.
//!
//! The OpenXR loader finds the active runtime through a JSON manifest. On
//! Linux the manifest lives in an XDG config directory; on Windows the
//! registry value `HKLM\SOFTWARE\Khronos\OpenXR\1\ActiveRuntime` points at
//! it. This module finds that manifest, tells whether it refers to our
//! runtime, and registers our runtime as the active one.

use anyhow::{bail, Context, Result};
use log::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::platform::{resolve_target, PlatformTarget};

mod search_paths;
#[cfg(windows)]
mod registry;

pub use search_paths::ManifestSearchPaths;

#[cfg(test)]
mod tests;

/// Contents of an OpenXR runtime manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeManifest {
    pub file_format_version: String,
    pub runtime: RuntimeInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub library_path: PathBuf,
}

/// How the system's active runtime relates to the configured one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeStatus {
    /// Our runtime, at our library path.
    Ok,
    /// Our runtime name, but a different library (another build or install).
    DifferentVersion,
    /// Some other runtime is active.
    DifferentRuntime,
    /// No active runtime manifest was found.
    NotInstalled,
}

/// A manifest together with the file it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveManifest {
    pub path: PathBuf,
    pub manifest: RuntimeManifest,
}

impl RuntimeManifest {
    /// The manifest that registers the configured runtime.
    pub fn for_runtime(config: &Config) -> Result<Self> {
        Ok(RuntimeManifest {
            file_format_version: config.manifest.file_format_version.clone(),
            runtime: RuntimeInfo {
                name: Some(config.runtime.name.clone()),
                library_path: config.runtime.library_path()?,
            },
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read runtime manifest {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse runtime manifest {}", path.display()))
    }

    /// Writes the manifest as indented JSON, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let mut text =
            serde_json::to_string_pretty(self).context("Failed to serialize runtime manifest")?;
        text.push('\n');
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write runtime manifest {}", path.display()))
    }

    /// Display name of the runtime.
    ///
    /// Falls back to the library name when the manifest has no `name`:
    /// `foo.dll` and `libfoo.so` both give `foo`; anything else gives the
    /// path as written.
    pub fn runtime_name(&self) -> String {
        if let Some(name) = &self.runtime.name {
            return name.clone();
        }

        let path = &self.runtime.library_path;
        let extension = path.extension().and_then(|ext| ext.to_str());
        let stem = path.file_stem().and_then(|stem| stem.to_str());
        match (extension, stem) {
            (Some("dll"), Some(stem)) => stem.to_string(),
            (Some("so"), Some(stem)) if stem.starts_with("lib") => stem["lib".len()..].to_string(),
            _ => path.display().to_string(),
        }
    }
}

impl ActiveManifest {
    /// Library path with relative paths resolved against the manifest's
    /// directory.
    pub fn resolved_library_path(&self) -> PathBuf {
        let manifest_dir = self.path.parent().unwrap_or_else(|| Path::new(""));
        absolute(&manifest_dir.join(&self.manifest.runtime.library_path))
    }

    /// Compares this manifest against the runtime we would register.
    pub fn status(&self, name: &str, library_path: &Path) -> RuntimeStatus {
        if self.manifest.runtime.name.as_deref() != Some(name) {
            return RuntimeStatus::DifferentRuntime;
        }
        if self.resolved_library_path() == absolute(library_path) {
            RuntimeStatus::Ok
        } else {
            RuntimeStatus::DifferentVersion
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Locates the active runtime manifest for the build target.
pub fn find_active_manifest() -> Result<Option<PathBuf>> {
    match resolve_target() {
        PlatformTarget::Linux => Ok(ManifestSearchPaths::from_env()?.find()),
        #[cfg(windows)]
        PlatformTarget::Windows => registry::read_active_runtime(),
        target => {
            debug!("No active runtime lookup for {target}");
            Ok(None)
        }
    }
}

/// Finds and parses the active runtime manifest.
pub fn load_active_manifest() -> Result<Option<ActiveManifest>> {
    load_manifest_at(find_active_manifest()?)
}

/// Like [`load_active_manifest`], searching `paths` instead of the
/// build target's default location.
pub fn load_active_manifest_in(paths: &ManifestSearchPaths) -> Result<Option<ActiveManifest>> {
    load_manifest_at(paths.find())
}

fn load_manifest_at(path: Option<PathBuf>) -> Result<Option<ActiveManifest>> {
    let Some(path) = path else {
        return Ok(None);
    };
    debug!("Active runtime manifest: {}", path.display());
    let manifest = RuntimeManifest::load(&path)?;
    Ok(Some(ActiveManifest { path, manifest }))
}

/// Name of the active runtime, if one is registered.
pub fn active_runtime_name() -> Result<Option<String>> {
    Ok(load_active_manifest()?.map(|active| active.manifest.runtime_name()))
}

/// How the system's active runtime relates to the configured runtime.
pub fn status(config: &Config) -> Result<RuntimeStatus> {
    classify(load_active_manifest()?.as_ref(), config)
}

/// Like [`status`], searching `paths` for the active manifest.
pub fn status_in(paths: &ManifestSearchPaths, config: &Config) -> Result<RuntimeStatus> {
    classify(load_active_manifest_in(paths)?.as_ref(), config)
}

/// Classifies an already loaded manifest; `None` means nothing is registered.
pub fn classify(active: Option<&ActiveManifest>, config: &Config) -> Result<RuntimeStatus> {
    let Some(active) = active else {
        return Ok(RuntimeStatus::NotInstalled);
    };
    let status = active.status(&config.runtime.name, &config.runtime.library_path()?);
    info!(
        "Active runtime '{}' at {}: {:?}",
        active.manifest.runtime_name(),
        active.path.display(),
        status
    );
    Ok(status)
}

/// Registers the configured runtime as the system's active runtime and
/// returns the manifest path the loader will now read.
pub fn activate(config: &Config) -> Result<PathBuf> {
    let manifest = RuntimeManifest::for_runtime(config)?;
    match resolve_target() {
        PlatformTarget::Linux => activate_in(&ManifestSearchPaths::from_env()?, &manifest),
        #[cfg(windows)]
        PlatformTarget::Windows => {
            let path = config
                .runtime
                .resolved_runtime_dir()?
                .join(registry::MANIFEST_FILE_NAME);
            if !path.exists() {
                manifest.write(&path)?;
            }
            registry::write_active_runtime(&path)?;
            info!("Registered {} as the active runtime", path.display());
            Ok(path)
        }
        target => bail!("Registering an OpenXR runtime is not supported on {target}"),
    }
}

/// Writes `manifest` as the user's active runtime under `paths`.
pub fn activate_in(paths: &ManifestSearchPaths, manifest: &RuntimeManifest) -> Result<PathBuf> {
    let path = paths.user_manifest_path();
    manifest.write(&path)?;
    info!(
        "Registered '{}' as the active runtime in {}",
        manifest.runtime_name(),
        path.display()
    );
    Ok(path)
}

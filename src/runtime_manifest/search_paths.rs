// src/runtime_manifest/search_paths.rs

use anyhow::{Context, Result};
use log::*;
use std::ffi::OsString;
use std::path::PathBuf;

const ARCH_MANIFEST: &str = "active_runtime.x86_64.json";
const MANIFEST: &str = "active_runtime.json";

/// XDG directories the loader searches for `openxr/1/active_runtime*.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSearchPaths {
    /// `$XDG_CONFIG_HOME`, or `~/.config`.
    pub config_home: PathBuf,
    /// `$XDG_CONFIG_DIRS`, or `/etc/xdg`.
    pub config_dirs: Vec<PathBuf>,
    /// Searched last; `/etc`.
    pub system_dir: PathBuf,
}

impl ManifestSearchPaths {
    /// Reads the XDG variables from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var_os("XDG_CONFIG_HOME"),
            std::env::var_os("HOME"),
            std::env::var("XDG_CONFIG_DIRS").ok().as_deref(),
        )
    }

    /// Builds the search paths from the values of `XDG_CONFIG_HOME`, `HOME`
    /// and `XDG_CONFIG_DIRS`.
    pub fn from_vars(
        xdg_config_home: Option<OsString>,
        home: Option<OsString>,
        xdg_config_dirs: Option<&str>,
    ) -> Result<Self> {
        let config_home = match xdg_config_home.filter(|value| !value.is_empty()) {
            Some(value) => PathBuf::from(value),
            None => {
                let home = home.context("Neither XDG_CONFIG_HOME nor HOME is set")?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(Self::new(config_home, xdg_config_dirs))
    }

    /// `config_dirs` is a colon-separated list, as in `XDG_CONFIG_DIRS`.
    pub fn new(config_home: PathBuf, config_dirs: Option<&str>) -> Self {
        let config_dirs = match config_dirs {
            Some(value) => value
                .split(':')
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
                .collect(),
            None => vec![PathBuf::from("/etc/xdg")],
        };
        ManifestSearchPaths {
            config_home,
            config_dirs,
            system_dir: PathBuf::from("/etc"),
        }
    }

    /// Replaces the directory searched last.
    pub fn with_system_dir(mut self, system_dir: PathBuf) -> Self {
        self.system_dir = system_dir;
        self
    }

    /// Every candidate manifest path in search order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        std::iter::once(self.config_home.as_path())
            .chain(self.config_dirs.iter().map(PathBuf::as_path))
            .chain(std::iter::once(self.system_dir.as_path()))
            .flat_map(|dir| {
                let base = dir.join("openxr").join("1");
                [base.join(ARCH_MANIFEST), base.join(MANIFEST)]
            })
            .collect()
    }

    /// First existing candidate.
    pub fn find(&self) -> Option<PathBuf> {
        let found = self.candidates().into_iter().find(|path| path.is_file());
        if found.is_none() {
            debug!("No active runtime manifest in {:?}", self);
        }
        found
    }

    /// Where a per-user registration is written.
    pub fn user_manifest_path(&self) -> PathBuf {
        self.config_home.join("openxr").join("1").join(MANIFEST)
    }
}

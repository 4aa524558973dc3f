// src/platform/mod.rs
//
// Resolves the platform target this crate was built for. Exactly one of the
// target modules below is compiled in; each one only supplies a constant.

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(any(windows, target_os = "linux", target_os = "macos")))]
mod unknown;
#[cfg(windows)]
mod win32;

#[cfg(target_os = "linux")]
use self::linux as selected;
#[cfg(target_os = "macos")]
use self::macos as selected;
#[cfg(not(any(windows, target_os = "linux", target_os = "macos")))]
use self::unknown as selected;
#[cfg(windows)]
use self::win32 as selected;


/// The operating system / windowing environment a build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformTarget {
    Windows,
    Linux,
    MacOs,
    /// Any target without a known OpenXR integration.
    Unknown,
}

/// Returns the target selected at build configuration time.
///
/// There is no failure mode: targets without an integration resolve to
/// [`PlatformTarget::Unknown`], and it is up to the caller to decide whether
/// that is fatal.
pub const fn resolve_target() -> PlatformTarget {
    selected::TARGET
}

impl PlatformTarget {
    /// All targets, supported ones first.
    pub const ALL: [PlatformTarget; 4] = [
        PlatformTarget::Windows,
        PlatformTarget::Linux,
        PlatformTarget::MacOs,
        PlatformTarget::Unknown,
    ];

    /// Same as [`resolve_target`].
    pub const fn current() -> Self {
        resolve_target()
    }

    /// Name of the toolchain target the runtime's build output is keyed by.
    pub const fn target_name(self) -> &'static str {
        match self {
            PlatformTarget::Windows => "x86_64-windows-msvc",
            PlatformTarget::Linux => "x86_64-linux-gnu",
            PlatformTarget::MacOs => "aarch64-macos",
            PlatformTarget::Unknown => "unknown",
        }
    }

    /// File name of a shared library called `stem` on this target.
    ///
    /// `None` for [`PlatformTarget::Unknown`], which has no library
    /// convention we know of.
    pub fn runtime_library_name(self, stem: &str) -> Option<String> {
        match self {
            PlatformTarget::Windows => Some(format!("{stem}.dll")),
            PlatformTarget::Linux => Some(format!("lib{stem}.so")),
            PlatformTarget::MacOs => Some(format!("lib{stem}.dylib")),
            PlatformTarget::Unknown => None,
        }
    }
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlatformTarget::Windows => "Windows",
            PlatformTarget::Linux => "Linux",
            PlatformTarget::MacOs => "macOS",
            PlatformTarget::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

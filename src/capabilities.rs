// src/capabilities.rs

//! Graphics API and windowing backend capability table.
//!
//! The table is a `const fn` over [`PlatformTarget`], so the descriptor for
//! the build target is a compile-time constant. Nothing here is ever mutated
//! after resolution, so any thread may read it without locking.

use bitflags::bitflags;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::platform::{resolve_target, PlatformTarget};

bitflags! {
    /// Graphics APIs an OpenXR session may bind to on a target.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct GraphicsApis: u8 {
        const OPENGL = 1 << 0;
        const VULKAN = 1 << 1;
        const D3D11 = 1 << 2;
        const METAL = 1 << 3;
    }
}

bitflags! {
    /// Windowing / platform integrations available on a target.
    /// The empty set stands for "no windowing integration".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct WindowingBackends: u8 {
        const WIN32 = 1 << 0;
        const XLIB = 1 << 1;
        const XCB = 1 << 2;
    }
}

/// Returns the graphics APIs and windowing backends for `target`.
///
/// `Unknown` yields two empty sets.
pub const fn capabilities_for(target: PlatformTarget) -> (GraphicsApis, WindowingBackends) {
    match target {
        PlatformTarget::Windows => (
            GraphicsApis::VULKAN.union(GraphicsApis::D3D11),
            WindowingBackends::WIN32,
        ),
        PlatformTarget::Linux => (
            GraphicsApis::VULKAN,
            WindowingBackends::XLIB.union(WindowingBackends::XCB),
        ),
        PlatformTarget::MacOs => (GraphicsApis::METAL, WindowingBackends::empty()),
        PlatformTarget::Unknown => (GraphicsApis::empty(), WindowingBackends::empty()),
    }
}

// Feature-test macro names understood by the OpenXR platform headers,
// in the order they are emitted.
const GRAPHICS_DEFINES: [(GraphicsApis, &str); 4] = [
    (GraphicsApis::OPENGL, "XR_USE_GRAPHICS_API_OPENGL"),
    (GraphicsApis::VULKAN, "XR_USE_GRAPHICS_API_VULKAN"),
    (GraphicsApis::D3D11, "XR_USE_GRAPHICS_API_D3D11"),
    (GraphicsApis::METAL, "XR_USE_GRAPHICS_API_METAL"),
];
const PLATFORM_DEFINES: [(WindowingBackends, &str); 3] = [
    (WindowingBackends::WIN32, "XR_USE_PLATFORM_WIN32"),
    (WindowingBackends::XLIB, "XR_USE_PLATFORM_XLIB"),
    (WindowingBackends::XCB, "XR_USE_PLATFORM_XCB"),
];

static CURRENT: PlatformDescriptor = PlatformDescriptor::for_target(resolve_target());

static CURRENT_DEFINES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let defines = CURRENT.feature_defines();
    log::debug!("Feature defines for {}: {:?}", CURRENT.target, defines);
    defines
});

/// Capabilities of one platform target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformDescriptor {
    pub target: PlatformTarget,
    pub graphics_apis: GraphicsApis,
    pub windowing_backends: WindowingBackends,
}

impl PlatformDescriptor {
    /// Builds the descriptor for an arbitrary target.
    pub const fn for_target(target: PlatformTarget) -> Self {
        let (graphics_apis, windowing_backends) = capabilities_for(target);
        Self {
            target,
            graphics_apis,
            windowing_backends,
        }
    }

    /// The descriptor of the build target.
    pub fn current() -> &'static PlatformDescriptor {
        &CURRENT
    }

    /// `false` only for the `Unknown` target.
    pub const fn is_supported(&self) -> bool {
        !matches!(self.target, PlatformTarget::Unknown)
    }

    /// Feature-test macro names implied by this descriptor, graphics APIs
    /// first, then platform integrations.
    pub fn feature_defines(&self) -> Vec<&'static str> {
        let graphics = GRAPHICS_DEFINES
            .iter()
            .filter(|(api, _)| self.graphics_apis.contains(*api))
            .map(|(_, name)| *name);
        let platforms = PLATFORM_DEFINES
            .iter()
            .filter(|(backend, _)| self.windowing_backends.contains(*backend))
            .map(|(_, name)| *name);
        graphics.chain(platforms).collect()
    }
}

/// Feature defines of the build target, computed on first use.
pub fn current_feature_defines() -> &'static [&'static str] {
    &CURRENT_DEFINES
}

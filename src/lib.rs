// src/lib.rs

//! Build-target description for an OpenXR runtime and its binding layer.
//!
//! The crate answers three questions for the target it was compiled for:
//! which platform is active, which graphics APIs and windowing backends are
//! available there, and which opaque handle types cross the interface
//! boundary. Everything is resolved at build time; the runtime surface only
//! reads constants.

pub mod capabilities;
pub mod config;
pub mod handle;
pub mod int_types;
pub mod platform;
pub mod runtime_manifest;

pub use capabilities::{capabilities_for, GraphicsApis, PlatformDescriptor, WindowingBackends};
pub use config::Config;
pub use handle::{Action, ActionSet, Instance, Session, Space, Swapchain};
pub use platform::{resolve_target, PlatformTarget};
pub use runtime_manifest::{RuntimeManifest, RuntimeStatus};

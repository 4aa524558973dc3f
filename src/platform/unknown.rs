// src/platform/unknown.rs
//
// Fallback for targets with no OpenXR integration (BSDs, wasm, Android, ...).

use super::PlatformTarget;

pub(super) const TARGET: PlatformTarget = PlatformTarget::Unknown;

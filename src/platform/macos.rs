// src/platform/macos.rs

use super::PlatformTarget;

pub(super) const TARGET: PlatformTarget = PlatformTarget::MacOs;

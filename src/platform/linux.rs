// src/platform/linux.rs

use super::PlatformTarget;

pub(super) const TARGET: PlatformTarget = PlatformTarget::Linux;

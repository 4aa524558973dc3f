// src/platform/win32.rs

use super::PlatformTarget;

pub(super) const TARGET: PlatformTarget = PlatformTarget::Windows;

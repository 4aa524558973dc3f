// src/runtime_manifest/registry.rs
//
// Windows registry access for the active runtime pointer.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::os::windows::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, ERROR_SUCCESS};
use windows::Win32::System::Registry::{
    RegGetValueW, RegSetKeyValueW, HKEY_LOCAL_MACHINE, REG_SZ, RRF_RT_REG_SZ,
};

pub(super) const MANIFEST_FILE_NAME: &str = "openxr_runtime.json";

const KEY: PCWSTR = w!("SOFTWARE\\Khronos\\OpenXR\\1");
const VALUE: PCWSTR = w!("ActiveRuntime");

pub(super) fn read_active_runtime() -> Result<Option<PathBuf>> {
    let mut size: u32 = 0;
    let status = unsafe {
        RegGetValueW(HKEY_LOCAL_MACHINE, KEY, VALUE, RRF_RT_REG_SZ, None, None, Some(&mut size))
    };
    if status == ERROR_FILE_NOT_FOUND {
        return Ok(None);
    }
    status
        .ok()
        .context("Failed to query the ActiveRuntime registry value")?;

    let mut buffer = vec![0u16; (size as usize).div_ceil(2)];
    let status = unsafe {
        RegGetValueW(
            HKEY_LOCAL_MACHINE,
            KEY,
            VALUE,
            RRF_RT_REG_SZ,
            None,
            Some(buffer.as_mut_ptr().cast()),
            Some(&mut size),
        )
    };
    if status != ERROR_SUCCESS {
        status
            .ok()
            .context("Failed to read the ActiveRuntime registry value")?;
    }

    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    Ok(Some(PathBuf::from(OsString::from_wide(&buffer[..len]))))
}

pub(super) fn write_active_runtime(manifest_path: &Path) -> Result<()> {
    let data: Vec<u16> = manifest_path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();
    let status = unsafe {
        RegSetKeyValueW(
            HKEY_LOCAL_MACHINE,
            KEY,
            VALUE,
            REG_SZ.0,
            Some(data.as_ptr().cast()),
            (data.len() * std::mem::size_of::<u16>()) as u32,
        )
    };
    status
        .ok()
        .context("Failed to set the ActiveRuntime registry value (administrator rights required)")
}

// src/int_types.rs

//! Fixed-width integer aliases used by the binding layer.
//!
//! With the `libc` feature (the default) these are the system definitions.
//! Without it, the fallback module below provides width-correct aliases so
//! generated bindings still have the names they expect.

#![allow(non_camel_case_types)]

#[cfg(feature = "libc")]
pub use libc::{int16_t, int32_t, int64_t, int8_t, size_t, uint16_t, uint32_t, uint64_t, uint8_t};

#[cfg(not(feature = "libc"))]
pub use fallback::*;

#[cfg(not(feature = "libc"))]
mod fallback {
    pub type int8_t = i8;
    pub type int16_t = i16;
    pub type int32_t = i32;
    pub type int64_t = i64;
    pub type uint8_t = u8;
    pub type uint16_t = u16;
    pub type uint32_t = u32;
    pub type uint64_t = u64;
    pub type size_t = usize;
}

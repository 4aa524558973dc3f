// src/handle.rs

//! Opaque handle types.
//!
//! A handle is an identifier issued by some external subsystem (the OpenXR
//! runtime, a graphics driver). This crate never looks behind it: the only
//! valid operations are identity comparison and passing it back across the
//! interface boundary. Every handle kind is its own nominal type, so a
//! session can't be handed to something that expects an instance:
//!
//! ```compile_fail
//! use xr_platform::{Instance, Session};
//!
//! let session: Session = Instance::null();
//! ```
//!
//! All handle types share the layout of a pointer:
//!
//! ```
//! use xr_platform::{Session, Swapchain};
//!
//! assert_eq!(std::mem::size_of::<Session>(), std::mem::size_of::<*mut ()>());
//! assert_eq!(std::mem::size_of::<Swapchain>(), std::mem::size_of::<usize>());
//! ```

/// Defines a nominal, pointer-sized opaque handle type.
///
/// ```
/// xr_platform::define_opaque_handle!(
///     /// A handle issued by some driver.
///     pub DeviceHandle
/// );
///
/// let a = DeviceHandle::from_raw(0x10 as *mut _);
/// assert_eq!(a, DeviceHandle::from_raw(0x10 as *mut _));
/// assert!(!a.is_null());
/// ```
#[macro_export]
macro_rules! define_opaque_handle {
    ($(#[$meta:meta])* $vis:vis $name:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name(*mut ::core::ffi::c_void);

        impl $name {
            /// The null handle (`XR_NULL_HANDLE`).
            pub const fn null() -> Self {
                Self(::core::ptr::null_mut())
            }

            /// Wraps a raw value received from the issuing subsystem.
            pub const fn from_raw(raw: *mut ::core::ffi::c_void) -> Self {
                Self(raw)
            }

            /// The raw value, for passing back across the boundary.
            pub const fn as_raw(self) -> *mut ::core::ffi::c_void {
                self.0
            }

            /// `true` for [`Self::null`].
            pub const fn is_null(self) -> bool {
                self.0.is_null()
            }
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self::null()
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::write!(f, "{}({:p})", stringify!($name), self.0)
            }
        }

        // SAFETY: the pointer is an identifier only and is never dereferenced.
        unsafe impl ::core::marker::Send for $name {}
        // SAFETY: see above.
        unsafe impl ::core::marker::Sync for $name {}
    };
}

define_opaque_handle!(
    /// `XrInstance`
    pub Instance
);
define_opaque_handle!(
    /// `XrSession`
    pub Session
);
define_opaque_handle!(
    /// `XrSpace`
    pub Space
);
define_opaque_handle!(
    /// `XrAction`
    pub Action
);
define_opaque_handle!(
    /// `XrActionSet`
    pub ActionSet
);
define_opaque_handle!(
    /// `XrSwapchain`
    pub Swapchain
);

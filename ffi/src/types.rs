//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with a C-compatible layout: `*mut c_char`
//! instead of `String`, pointer plus length instead of `Vec`, and enums with
//! explicit discriminants. Conversion helpers live here to keep `lib.rs`
//! focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use reqmodel_core::{HttpMethod, RequestError, RequestModel};

/// Opaque handle to a `RequestModel`. C callers receive a pointer to this
/// and pass it back into every `reqmodel_request_*` function.
pub struct FfiRequest {
    pub(crate) inner: RequestModel,
}

/// Outcome of every mutating call.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiStatus {
    Ok = 0,
    /// A required pointer was null, a string was not UTF-8, or the core
    /// rejected the value. The request is unchanged.
    InvalidArgument = 1,
    /// The request lacks a url or method, so no response can be attached.
    MissingField = 2,
    Transport = 3,
    Panic = 4,
}

impl From<&RequestError> for FfiStatus {
    fn from(err: &RequestError) -> Self {
        match err {
            RequestError::InvalidArgument(_) => FfiStatus::InvalidArgument,
            RequestError::MissingField(_) => FfiStatus::MissingField,
            RequestError::Transport(_) | RequestError::DeserializationError(_) => FfiStatus::Transport,
        }
    }
}

/// HTTP method discriminants accepted by `reqmodel_request_set_http_method`
/// and returned by `reqmodel_request_get_http_method`.
///
/// Methods cross the boundary as `int32_t` so an out-of-range value from C
/// is rejected instead of being read as an invalid enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

impl FfiHttpMethod {
    pub(crate) fn from_raw(raw: i32) -> Option<HttpMethod> {
        match raw {
            0 => Some(HttpMethod::Get),
            1 => Some(HttpMethod::Post),
            2 => Some(HttpMethod::Put),
            3 => Some(HttpMethod::Delete),
            _ => None,
        }
    }
}

/// One response header supplied by the C host. Both strings are required.
#[repr(C)]
pub struct FfiHeader {
    pub key: *const c_char,
    pub value: *const c_char,
}

/// A server response as C-compatible plain data.
///
/// The C host builds this on the stack after performing the exchange and
/// passes it to `reqmodel_request_complete`. The FFI layer reads but does
/// not free these fields. A null `status_message` or `body` is read as
/// empty; `headers` may be null only when `headers_len` is 0. Repeated
/// header keys keep their values in array order.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub status_message: *const c_char,
    pub headers: *const FfiHeader,
    pub headers_len: u32,
    pub body: *const c_char,
}

/// A list of strings exposed to C. Free with `reqmodel_free_string_list`.
#[repr(C)]
pub struct FfiStringList {
    pub items: *mut *mut c_char,
    pub len: u32,
}

impl FfiStringList {
    pub(crate) fn from_strs<'a>(values: impl IntoIterator<Item = &'a str>) -> *mut Self {
        let items: Box<[*mut c_char]> = values.into_iter().map(to_c_string).collect();
        let len = items.len() as u32;
        let items = if items.is_empty() {
            std::ptr::null_mut()
        } else {
            Box::into_raw(items) as *mut *mut c_char
        };
        Box::into_raw(Box::new(FfiStringList { items, len }))
    }
}

/// Copy `s` into a heap C string owned by the caller.
///
/// Strings that entered through the C API cannot hold interior NULs; any
/// other source that does is returned as null.
pub(crate) fn to_c_string(s: &str) -> *mut c_char {
    CString::new(s).map(CString::into_raw).unwrap_or(std::ptr::null_mut())
}

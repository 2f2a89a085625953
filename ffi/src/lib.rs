//! C-ABI wrapper around `reqmodel-core`.
//!
//! # Overview
//! Exposes `RequestModel` through `extern "C"` functions so any language
//! with a C FFI can assemble a request, perform the exchange itself, and hand
//! the response back.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Mutators return `FfiStatus`. A null required argument is
//!   `InvalidArgument` and leaves the request untouched. `set_url` is the
//!   exception: null clears the url.
//! - The C host acts as the transport: it enumerates the request through the
//!   `*_names` / `*_keys` getters, performs the exchange, and
//!   `reqmodel_request_complete` attaches the response through
//!   `reqmodel_core::send`, the only path that writes it.
//! - The C caller owns all returned pointers and must call the matching
//!   `reqmodel_free_*` / `reqmodel_request_free` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, UnwindSafe};

use reqmodel_core::{send, RequestError, RequestModel, ResponseModel, Transport, Url};

use types::*;

/// Run a mutator, folding its outcome and any panic into an `FfiStatus`.
fn guarded(f: impl FnOnce() -> Result<(), FfiStatus> + UnwindSafe) -> FfiStatus {
    match catch_unwind(f) {
        Ok(Ok(())) => FfiStatus::Ok,
        Ok(Err(status)) => status,
        Err(_) => FfiStatus::Panic,
    }
}

/// Borrow the request behind `req`, or `InvalidArgument` when null.
///
/// # Safety
/// `req` must be null or a live pointer from `reqmodel_request_new`.
unsafe fn request_mut<'a>(req: *mut FfiRequest) -> Result<&'a mut RequestModel, FfiStatus> {
    unsafe { req.as_mut() }
        .map(|r| &mut r.inner)
        .ok_or(FfiStatus::InvalidArgument)
}

/// Read a required UTF-8 argument.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn required_str<'a>(ptr: *const c_char) -> Result<&'a str, FfiStatus> {
    if ptr.is_null() {
        return Err(FfiStatus::InvalidArgument);
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| FfiStatus::InvalidArgument)
}

/// Read an optional UTF-8 argument; null reads as empty.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn optional_str<'a>(ptr: *const c_char) -> Result<&'a str, FfiStatus> {
    if ptr.is_null() {
        return Ok("");
    }
    unsafe { required_str(ptr) }
}

/// Copy a host-supplied response into a `ResponseModel`.
///
/// # Safety
/// Every non-null pointer in `response` must be valid for reads, and
/// `headers` must point to `headers_len` entries.
unsafe fn response_from_host(response: &FfiHttpResponse) -> Result<ResponseModel, FfiStatus> {
    let mut model = ResponseModel::new(response.status);
    model.status_message = unsafe { optional_str(response.status_message) }?.to_string();
    model.body = unsafe { optional_str(response.body) }?.to_string();

    if response.headers_len > 0 {
        if response.headers.is_null() {
            return Err(FfiStatus::InvalidArgument);
        }
        let headers = unsafe { std::slice::from_raw_parts(response.headers, response.headers_len as usize) };
        for header in headers {
            let key = unsafe { required_str(header.key) }?;
            let value = unsafe { required_str(header.value) }?;
            model.headers.entry(key.to_string()).or_default().push(value.to_string());
        }
    }
    Ok(model)
}

/// Hands back the response the C host already obtained.
struct HostReply(ResponseModel);

impl Transport for HostReply {
    fn execute(&self, _request: &RequestModel) -> Result<ResponseModel, RequestError> {
        Ok(self.0.clone())
    }
}

// ---------------------------------------------------------------------------
// Request lifecycle
// ---------------------------------------------------------------------------

/// Create an empty request.
///
/// The caller must free the returned pointer with `reqmodel_request_free`.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_new() -> *mut FfiRequest {
    catch_unwind(|| {
        Box::into_raw(Box::new(FfiRequest {
            inner: RequestModel::new(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a request created by `reqmodel_request_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_free(req: *mut FfiRequest) {
    if !req.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(req) });
        });
    }
}

// ---------------------------------------------------------------------------
// Mutators
// ---------------------------------------------------------------------------

/// Append `value` to the values stored under header `key`.
///
/// `InvalidArgument` if any argument is null. An empty key is a valid key.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_add_header(
    req: *mut FfiRequest,
    key: *const c_char,
    value: *const c_char,
) -> FfiStatus {
    guarded(|| {
        let req = unsafe { request_mut(req) }?;
        let key = unsafe { required_str(key) }?;
        let value = unsafe { required_str(value) }?;
        req.add_header(key, value);
        Ok(())
    })
}

/// Store `value` under url-data `key`, replacing any previous value.
///
/// `InvalidArgument` if any argument is null. An empty key is a valid key.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_add_url_data(
    req: *mut FfiRequest,
    key: *const c_char,
    value: *const c_char,
) -> FfiStatus {
    guarded(|| {
        let req = unsafe { request_mut(req) }?;
        let key = unsafe { required_str(key) }?;
        let value = unsafe { required_str(value) }?;
        req.add_url_data(key, value);
        Ok(())
    })
}

/// Replace the body. `InvalidArgument` if `body` is null.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_set_body(req: *mut FfiRequest, body: *const c_char) -> FfiStatus {
    guarded(|| {
        let req = unsafe { request_mut(req) }?;
        let body = unsafe { required_str(body) }?;
        req.set_body(body);
        Ok(())
    })
}

/// Replace the method with an `FfiHttpMethod` discriminant.
///
/// `InvalidArgument` for any value outside `FfiHttpMethod`.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_set_http_method(req: *mut FfiRequest, method: i32) -> FfiStatus {
    guarded(|| {
        let req = unsafe { request_mut(req) }?;
        let method = FfiHttpMethod::from_raw(method).ok_or(FfiStatus::InvalidArgument)?;
        req.set_http_method(method);
        Ok(())
    })
}

/// Replace the url. A null `url` clears it; a string that does not parse as
/// an absolute url is `InvalidArgument`.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_set_url(req: *mut FfiRequest, url: *const c_char) -> FfiStatus {
    guarded(|| {
        let req = unsafe { request_mut(req) }?;
        if url.is_null() {
            req.set_url(None);
            return Ok(());
        }
        let url = unsafe { required_str(url) }?;
        let url = Url::parse(url).map_err(|_| FfiStatus::InvalidArgument)?;
        req.set_url(url);
        Ok(())
    })
}

/// Attach the response the C host received for this request.
///
/// `InvalidArgument` if `response` is null or malformed (a null header
/// string, null `headers` with a non-zero length, or non-UTF-8 text);
/// `MissingField` if the request has no url or method yet. On failure any
/// previously attached response is kept.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_complete(
    req: *mut FfiRequest,
    response: *const FfiHttpResponse,
) -> FfiStatus {
    guarded(|| {
        let req = unsafe { request_mut(req) }?;
        let response = unsafe { response.as_ref() }.ok_or(FfiStatus::InvalidArgument)?;
        let reply = HostReply(unsafe { response_from_host(response) }?);
        send(&reply, req).map(|_| ()).map_err(|e| FfiStatus::from(&e))
    })
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

/// Copy of the body, or null if unset. Free with `reqmodel_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_get_body(req: *const FfiRequest) -> *mut c_char {
    catch_unwind(|| match unsafe { req.as_ref() }.and_then(|r| r.inner.body()) {
        Some(body) => to_c_string(body),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Copy of the url, or null if unset. Free with `reqmodel_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_get_url(req: *const FfiRequest) -> *mut c_char {
    catch_unwind(|| match unsafe { req.as_ref() }.and_then(|r| r.inner.url()) {
        Some(url) => to_c_string(url.as_str()),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// The `FfiHttpMethod` discriminant, or -1 if unset or `req` is null.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_get_http_method(req: *const FfiRequest) -> i32 {
    catch_unwind(|| {
        unsafe { req.as_ref() }
            .and_then(|r| r.inner.http_method())
            .map_or(-1, |m| FfiHttpMethod::from(m) as i32)
    })
    .unwrap_or(-1)
}

/// Values stored under header `key` in insertion order, or null if absent.
/// Free with `reqmodel_free_string_list`.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_get_header_values(
    req: *const FfiRequest,
    key: *const c_char,
) -> *mut FfiStringList {
    catch_unwind(|| {
        let Some(req) = (unsafe { req.as_ref() }) else {
            return std::ptr::null_mut();
        };
        let Ok(key) = (unsafe { required_str(key) }) else {
            return std::ptr::null_mut();
        };
        match req.inner.header_values(key) {
            Some(values) => FfiStringList::from_strs(values.iter().map(String::as_str)),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Copy of the url-data value under `key`, or null if absent.
/// Free with `reqmodel_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_get_url_data(req: *const FfiRequest, key: *const c_char) -> *mut c_char {
    catch_unwind(|| {
        let Some(req) = (unsafe { req.as_ref() }) else {
            return std::ptr::null_mut();
        };
        let Ok(key) = (unsafe { required_str(key) }) else {
            return std::ptr::null_mut();
        };
        match req.inner.url_data().get(key) {
            Some(value) => to_c_string(value),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Header names in insertion order. An empty request yields an empty list;
/// null only if `req` is null. Free with `reqmodel_free_string_list`.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_get_header_names(req: *const FfiRequest) -> *mut FfiStringList {
    catch_unwind(|| match unsafe { req.as_ref() } {
        Some(req) => FfiStringList::from_strs(req.inner.headers().keys().map(String::as_str)),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Url-data keys in insertion order. An empty request yields an empty list;
/// null only if `req` is null. Free with `reqmodel_free_string_list`.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_get_url_data_keys(req: *const FfiRequest) -> *mut FfiStringList {
    catch_unwind(|| match unsafe { req.as_ref() } {
        Some(req) => FfiStringList::from_strs(req.inner.url_data().keys().map(String::as_str)),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Status code of the attached response, or -1 if none is attached.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_get_response_status(req: *const FfiRequest) -> i32 {
    catch_unwind(|| {
        unsafe { req.as_ref() }
            .and_then(|r| r.inner.response())
            .map_or(-1, |resp| i32::from(resp.status))
    })
    .unwrap_or(-1)
}

/// Copy of the attached response body, or null if none is attached.
/// Free with `reqmodel_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_get_response_body(req: *const FfiRequest) -> *mut c_char {
    catch_unwind(|| match unsafe { req.as_ref() }.and_then(|r| r.inner.response()) {
        Some(resp) => to_c_string(&resp.body),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Reason phrase of the attached response, or null if none is attached.
/// Free with `reqmodel_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_get_response_status_message(req: *const FfiRequest) -> *mut c_char {
    catch_unwind(|| match unsafe { req.as_ref() }.and_then(|r| r.inner.response()) {
        Some(resp) => to_c_string(&resp.status_message),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Header names of the attached response, or null if none is attached.
/// Free with `reqmodel_free_string_list`.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_get_response_header_names(req: *const FfiRequest) -> *mut FfiStringList {
    catch_unwind(|| match unsafe { req.as_ref() }.and_then(|r| r.inner.response()) {
        Some(resp) => FfiStringList::from_strs(resp.headers.keys().map(String::as_str)),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Values of response header `key` (exact match) in arrival order, or null
/// if no response is attached or the header is absent.
/// Free with `reqmodel_free_string_list`.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_request_get_response_header_values(
    req: *const FfiRequest,
    key: *const c_char,
) -> *mut FfiStringList {
    catch_unwind(|| {
        let Some(resp) = (unsafe { req.as_ref() }).and_then(|r| r.inner.response()) else {
            return std::ptr::null_mut();
        };
        let Ok(key) = (unsafe { required_str(key) }) else {
            return std::ptr::null_mut();
        };
        match resp.headers.get(key) {
            Some(values) => FfiStringList::from_strs(values.iter().map(String::as_str)),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a C string returned by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

/// Free an `FfiStringList` and every string in it. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn reqmodel_free_string_list(list: *mut FfiStringList) {
    if list.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let list = unsafe { Box::from_raw(list) };
        if !list.items.is_null() && list.len > 0 {
            let items = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(list.items, list.len as usize))
            };
            for item in items.iter() {
                reqmodel_free_string(*item);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#![allow(clippy::missing_safety_doc)]

use core::panic::UnwindSafe;
use serde::de::DeserializeOwned;
use std::ffi::{c_char, CStr, CString};
use std::io::{Error, ErrorKind};

pub mod memory;
pub mod validation;

pub const ERR_PANIC: i64 = -100;

/// # Safety
///
/// The pointer passed in must be a valid cstr pointer.
pub unsafe fn read_json<T: DeserializeOwned>(raw_value: *const c_char) -> Result<T, Error> {
    let c_str = unsafe { CStr::from_ptr(raw_value) };
    let val = c_str.to_string_lossy();
    let jd = &mut serde_json::Deserializer::from_str(&val);

    match serde_path_to_error::deserialize(jd) {
        Ok(value) => Ok(value),
        Err(e) => {
            let path = e.path().to_string();
            Err(Error::new(
                ErrorKind::InvalidData,
                format!("Failed to deserialize JSON: {e} at path: {path}"),
            ))
        }
    }
}

/// Hands a string to the host. The host must release it with `free_string`.
pub fn into_raw_string(value: String) -> i64 {
    let c_string = CString::new(value).unwrap_or_else(|_| {
        CString::new("{\"is_valid\":false,\"error_message\":\"Unrepresentable response\"}")
            .unwrap_or_default()
    });
    c_string.into_raw() as i64
}

///
/// err: The error to report
/// error_out: An optional pointer to store the error message (if one exists)
pub fn handle_native_error(err: NativeError, error_out: Option<*mut *const c_char>) {
    // This code MUST NOT panic, since it is handling a panic.

    let c_str = CString::new(err.message).unwrap_or_else(|_| {
        CString::new("Rust panicked. No more information is available.").unwrap_or_default()
    });
    if let Some(error_out) = error_out {
        if error_out.is_null() {
            return;
        }
        let raw = c_str.into_raw();
        unsafe {
            *error_out = raw;
        }
    }
}

#[derive(Debug)]
pub struct NativeError {
    pub message: String,
}

/// Runs `f`, returning null (and reporting the panic through `error_out`) if it panics.
pub fn handle_panic_ptr_return(
    error_out: Option<*mut *const c_char>,
    f: impl FnOnce() -> i64 + UnwindSafe,
) -> i64 {
    match convert_panic_to_native_error(f) {
        Ok(ptr) => ptr,
        Err(err) => {
            handle_native_error(err, error_out);
            0
        }
    }
}

/// Runs `f`, returning [ERR_PANIC] (and reporting the panic through `error_out`) if it panics.
pub fn handle_panic_code_return(
    error_out: Option<*mut *const c_char>,
    f: impl FnOnce() -> i64 + UnwindSafe,
) -> i64 {
    match convert_panic_to_native_error(f) {
        Ok(code) => code,
        Err(err) => {
            handle_native_error(err, error_out);
            ERR_PANIC
        }
    }
}

pub fn convert_panic_to_native_error<R>(
    f: impl FnOnce() -> R + UnwindSafe,
) -> Result<R, NativeError> {
    match std::panic::catch_unwind(f) {
        Ok(result) => Ok(result),
        Err(err) => {
            let message = if let Some(string) = err.downcast_ref::<&str>() {
                string.to_string()
            } else if let Some(string) = err.downcast_ref::<String>() {
                string.to_string()
            } else {
                "Rust panicked. No more information is available.".to_string()
            };
            Err(NativeError { message })
        }
    }
}

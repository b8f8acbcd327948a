use crate::native::{
    handle_native_error, handle_panic_code_return, handle_panic_ptr_return, into_raw_string,
    read_json, NativeError,
};
use safa_identity::{validate_identity_number_with, ValidationResult, ValidatorConfig};
use std::ffi::{c_char, CStr};

fn result_to_json(result: &ValidationResult) -> String {
    serde_json::to_string(result).unwrap_or_else(|_| {
        "{\"is_valid\":false,\"error_message\":\"Failed to serialize the validation result\"}"
            .to_string()
    })
}

/// # Safety
///
/// This function dereferences `candidate` and `error_out` which are pointers to c_char.
/// The caller must ensure that the pointers are valid.
///
/// Thread Safety: This is safe to call simultaneously from multiple threads.
/// Return value: A JSON-encoded validation result, to be released with `free_string`,
/// or `null` if the call panicked.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn validate_identity_number(
    candidate: *const c_char,
    error_out: *mut *const c_char,
) -> *const c_char {
    handle_panic_ptr_return(Some(error_out), || {
        let candidate = unsafe { CStr::from_ptr(candidate).to_string_lossy().into_owned() };

        let result = validate_identity_number_with(&candidate, &ValidatorConfig::default());
        into_raw_string(result_to_json(&result))
    }) as *const c_char
}

/// # Safety
///
/// This function dereferences `candidate`, `config` and `error_out` which are pointers
/// to c_char. The caller must ensure that the pointers are valid.
///
/// Thread Safety: This is safe to call simultaneously from multiple threads.
/// Return value: A JSON-encoded validation result, to be released with `free_string`.
/// `null` if `config` is not a valid JSON `ValidatorConfig`, with the reason written
/// to `error_out`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn validate_identity_number_with_config(
    candidate: *const c_char,
    config: *const c_char,
    error_out: *mut *const c_char,
) -> *const c_char {
    handle_panic_ptr_return(Some(error_out), || {
        let candidate = unsafe { CStr::from_ptr(candidate).to_string_lossy().into_owned() };
        let config: ValidatorConfig = match unsafe { read_json(config) } {
            Ok(config) => config,
            Err(err) => {
                handle_native_error(
                    NativeError {
                        message: err.to_string(),
                    },
                    Some(error_out),
                );
                return 0;
            }
        };

        let result = validate_identity_number_with(&candidate, &config);
        into_raw_string(result_to_json(&result))
    }) as *const c_char
}

/// # Safety
///
/// This function dereferences `candidate` and `error_out` which are pointers to c_char.
/// The caller must ensure that the pointers are valid.
///
/// Thread Safety: This is safe to call simultaneously from multiple threads.
/// Return value: `0` if the identity number is valid, otherwise the negative code of
/// the failed rule. Lets hosts that only need a verdict skip the JSON round trip.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn identity_number_error_code(
    candidate: *const c_char,
    error_out: *mut *const c_char,
) -> i64 {
    handle_panic_code_return(Some(error_out), || {
        let candidate = unsafe { CStr::from_ptr(candidate).to_string_lossy().into_owned() };

        match validate_identity_number_with(&candidate, &ValidatorConfig::default()).error() {
            None => 0,
            Some(err) => err.into(),
        }
    })
}

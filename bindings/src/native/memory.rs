use std::ffi::{c_char, CString};

/// # Safety
///
/// `value` must be null or a string previously returned by this library, and
/// must not be used after this call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_string(value: *const c_char) {
    if value.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(value as *mut c_char) });
}

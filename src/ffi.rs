//! C FFI layer for embedding the highlighter in non-Rust hosts.

use crate::highlight::highlight_named;
use crate::panel::CodePanel;
use crate::preview::prepare_preview;
use crate::settings::{validate_editor_parameters, Direction, SaveMode};
use libc::{c_char, c_int};
use std::ffi::{CStr, CString};
use std::ptr;

/// Result type for FFI operations.
#[repr(C)]
pub struct MmpResult {
    /// Pointer to result string (caller must free with mmp_free_string)
    pub data: *mut c_char,
    /// Error message if data is null (caller must free with mmp_free_string)
    pub error: *mut c_char,
}

impl MmpResult {
    fn ok(data: String) -> Self {
        Self {
            data: into_c_string(data),
            error: ptr::null_mut(),
        }
    }

    fn err(error: String) -> Self {
        Self {
            data: ptr::null_mut(),
            error: into_c_string(error),
        }
    }
}

fn into_c_string(s: String) -> *mut c_char {
    CString::new(s)
        .map(CString::into_raw)
        .unwrap_or(ptr::null_mut())
}

unsafe fn borrow_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok()
}

/// Highlight escaped markup for a mode name (`xml`, `image` or `base64`).
///
/// Unknown mode names return a copy of the input.
///
/// # Safety
///
/// - `text` and `mode` must be valid null-terminated UTF-8 strings.
/// - The returned string must be freed with `mmp_free_string`.
/// - Returns null if either argument is null or not UTF-8.
#[no_mangle]
pub unsafe extern "C" fn mmp_highlight(text: *const c_char, mode: *const c_char) -> *mut c_char {
    let (Some(text), Some(mode)) = (borrow_str(text), borrow_str(mode)) else {
        return ptr::null_mut();
    };

    into_c_string(highlight_named(text, mode))
}

/// Escape and highlight editor content as a code panel.
///
/// # Safety
///
/// - `content` and `save_mode` must be valid null-terminated UTF-8 strings.
/// - The returned result must be freed with `mmp_free_result`.
#[no_mangle]
pub unsafe extern "C" fn mmp_render_code_panel(
    content: *const c_char,
    save_mode: *const c_char,
) -> MmpResult {
    let Some(content) = borrow_str(content) else {
        return MmpResult::err("Invalid content pointer".to_string());
    };
    let Some(save_mode) = borrow_str(save_mode) else {
        return MmpResult::err("Invalid save mode pointer".to_string());
    };

    match save_mode.parse::<SaveMode>() {
        Ok(mode) => MmpResult::ok(CodePanel::render(content, mode)),
        Err(e) => MmpResult::err(e.to_string()),
    }
}

/// Copy image alt text into titles for the preview.
///
/// # Safety
///
/// - `html` must be a valid null-terminated UTF-8 string.
/// - The returned string must be freed with `mmp_free_string`.
#[no_mangle]
pub unsafe extern "C" fn mmp_prepare_preview(html: *const c_char) -> *mut c_char {
    match borrow_str(html) {
        Some(html) => into_c_string(prepare_preview(html)),
        None => ptr::null_mut(),
    }
}

/// Validate editor parameters, returning them re-serialized on success.
///
/// # Safety
///
/// - `json` must be a valid null-terminated UTF-8 string.
/// - The returned result must be freed with `mmp_free_result`.
#[no_mangle]
pub unsafe extern "C" fn mmp_validate_parameters(json: *const c_char) -> MmpResult {
    let Some(json) = borrow_str(json) else {
        return MmpResult::err("Invalid parameters pointer".to_string());
    };

    match validate_editor_parameters(json) {
        Ok(value) => MmpResult::ok(value.to_string()),
        Err(e) => MmpResult::err(e.to_string()),
    }
}

/// Text direction for a language code: 0 = left-to-right, 1 = right-to-left.
///
/// # Safety
///
/// - `lang` must be a valid null-terminated UTF-8 string, or null.
#[no_mangle]
pub unsafe extern "C" fn mmp_text_direction(lang: *const c_char) -> c_int {
    match borrow_str(lang).map(Direction::for_language) {
        Some(Direction::Rtl) => 1,
        _ => 0,
    }
}

/// Free a string returned by mmp functions.
///
/// # Safety
///
/// - `s` must be a pointer returned by a mmp function, or null.
#[no_mangle]
pub unsafe extern "C" fn mmp_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Free a result struct.
///
/// # Safety
///
/// - `result` must be a valid MmpResult.
#[no_mangle]
pub unsafe extern "C" fn mmp_free_result(result: MmpResult) {
    mmp_free_string(result.data);
    mmp_free_string(result.error);
}

/// Get the library version.
///
/// The returned string is static and must not be freed.
#[no_mangle]
pub extern "C" fn mmp_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr() as *const c_char
}

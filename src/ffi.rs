//! FFI interface for C/C++ hosts
//!
//! Provides C-compatible functions for extracting records from HTML.
//! Records and configuration cross the boundary as JSON.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use serde::Serialize;
use serde_json::json;

use crate::config::ExtractorConfig;
use crate::error::ExtractResult;
use crate::extractors::Extractor;

/// Result struct returned to the host
/// Both pointers are owned by Rust and must be freed via hunt_free_result
#[repr(C)]
pub struct ExtractionResultFFI {
    /// JSON-serialized records (null-terminated)
    pub json_ptr: *mut c_char,
    /// Error message if extraction failed (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Extract all post cards from an index page.
///
/// On success `json_ptr` holds an array of post summaries.
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - `config_json` must be null or a valid null-terminated C string
/// - Caller must free the result via `hunt_free_result`
#[no_mangle]
pub unsafe extern "C" fn hunt_parse_index(
    html_ptr: *const c_char,
    html_len: usize,
    config_json: *const c_char,
) -> ExtractionResultFFI {
    run(html_ptr, html_len, config_json, |extractor, html| {
        extractor.extract_index(html).map(|posts| json!(posts))
    })
}

/// Extract a post page.
///
/// On success `json_ptr` holds `{"post": {...}, "comment_errors": [...]}`;
/// `comment_errors` is only non-empty when the config selects the `skip`
/// comment policy.
///
/// # Safety
/// Same as hunt_parse_index
#[no_mangle]
pub unsafe extern "C" fn hunt_parse_post(
    html_ptr: *const c_char,
    html_len: usize,
    config_json: *const c_char,
) -> ExtractionResultFFI {
    run(html_ptr, html_len, config_json, |extractor, html| {
        extractor.extract_post(html).map(|extraction| {
            let errors: Vec<String> = extraction
                .comment_errors
                .iter()
                .map(ToString::to_string)
                .collect();
            json!({ "post": extraction.post, "comment_errors": errors })
        })
    })
}

/// Extract a single comment fragment.
///
/// # Safety
/// Same as hunt_parse_index
#[no_mangle]
pub unsafe extern "C" fn hunt_parse_comment(
    html_ptr: *const c_char,
    html_len: usize,
    config_json: *const c_char,
) -> ExtractionResultFFI {
    run(html_ptr, html_len, config_json, |extractor, html| {
        extractor.extract_comment(html).map(|comment| json!(comment))
    })
}

/// Free an ExtractionResultFFI returned by one of the hunt_parse_* functions
///
/// # Safety
/// - `result` must have been returned by a hunt_parse_* function
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn hunt_free_result(result: ExtractionResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

// Shared argument handling for the hunt_parse_* entry points
unsafe fn run<T: Serialize>(
    html_ptr: *const c_char,
    html_len: usize,
    config_json: *const c_char,
    extract: impl FnOnce(&Extractor, &str) -> ExtractResult<T>,
) -> ExtractionResultFFI {
    let html = if html_ptr.is_null() || html_len == 0 {
        ""
    } else {
        let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
        match std::str::from_utf8(slice) {
            Ok(s) => s,
            Err(_) => return make_error_result("Invalid UTF-8 in HTML content"),
        }
    };

    let config = if config_json.is_null() {
        ExtractorConfig::default()
    } else {
        let config_str = match CStr::from_ptr(config_json).to_str() {
            Ok(s) => s,
            Err(_) => return make_error_result("Invalid UTF-8 in config JSON"),
        };
        match ExtractorConfig::from_json(config_str) {
            Ok(config) => config,
            Err(e) => return make_error_result(&e.to_string()),
        }
    };

    let extractor = match Extractor::new(&config) {
        Ok(extractor) => extractor,
        Err(e) => return make_error_result(&e.to_string()),
    };

    match extract(&extractor, html) {
        Ok(records) => make_json_result(&records),
        Err(e) => make_error_result(&e.to_string()),
    }
}

fn make_json_result<T: Serialize>(records: &T) -> ExtractionResultFFI {
    match serde_json::to_string(records) {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => ExtractionResultFFI {
                json_ptr: cstr.into_raw(),
                error_ptr: ptr::null_mut(),
            },
            Err(_) => make_error_result("Result JSON contains null bytes"),
        },
        Err(e) => make_error_result(&format!("Failed to serialize result: {}", e)),
    }
}

// Helper to create error result
fn make_error_result(msg: &str) -> ExtractionResultFFI {
    let error_cstr = CString::new(msg.replace('\0', " ")).unwrap_or_default();
    ExtractionResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr: error_cstr.into_raw(),
    }
}

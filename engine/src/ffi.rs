//! FFI layer for a native mobile shell.
//!
//! This module provides C-compatible functions that a mobile host (Dart,
//! Swift, Kotlin) can call to drive the catalog state. All data crosses the
//! boundary as JSON strings.
//!
//! # Memory Management
//!
//! - Strings returned by `catalog_*` functions are allocated by Rust
//! - Caller must free them with `catalog_string_free`
//! - State pointers must be freed with `catalog_state_free`
//!
//! # Error Handling
//!
//! Functions return JSON with either:
//! - `{"ok": <result>}` on success
//! - `{"error": "<message>"}` on failure

use crate::snapshot::{decode_favorites, decode_products};
use crate::{reduce, Action, CatalogState, FavoriteSet};
use std::ffi::{c_char, CStr, CString};
use std::ptr;

/// Result wrapper for FFI responses.
#[derive(serde::Serialize)]
#[serde(untagged)]
enum FfiResult<T: serde::Serialize> {
    Ok { ok: T },
    Err { error: String },
}

impl<T: serde::Serialize> FfiResult<T> {
    fn ok(value: T) -> Self {
        FfiResult::Ok { ok: value }
    }

    fn err(message: impl Into<String>) -> Self {
        FfiResult::Err {
            error: message.into(),
        }
    }

    fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"error":"serialization failed: {}"}}"#, e))
    }
}

/// Convert a Rust string to a C string pointer.
/// Caller must free with `catalog_string_free`.
fn to_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(cs) => cs.into_raw(),
        Err(_) => {
            // Product text with an embedded NUL cannot cross as a C string
            let fallback = r#"{"error":"string contained null bytes"}"#;
            CString::new(fallback)
                .map(CString::into_raw)
                .unwrap_or(ptr::null_mut())
        }
    }
}

/// Convert a C string pointer to a Rust string.
/// Returns None if pointer is null or invalid UTF-8.
unsafe fn from_c_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

// ============================================================================
// State Lifecycle
// ============================================================================

/// Create a new catalog state.
///
/// # Returns
/// Pointer to CatalogState, or null if `page_size` is 0.
///
/// # Safety
/// - Caller must free the returned pointer with `catalog_state_free`
#[no_mangle]
pub unsafe extern "C" fn catalog_state_new(page_size: u32) -> *mut CatalogState {
    match CatalogState::new(page_size as usize) {
        Ok(state) => Box::into_raw(Box::new(state)),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a catalog state.
///
/// # Safety
/// - `state` must be a valid pointer from `catalog_state_new`
/// - Must not be called twice on the same pointer
#[no_mangle]
pub unsafe extern "C" fn catalog_state_free(state: *mut CatalogState) {
    if !state.is_null() {
        drop(Box::from_raw(state));
    }
}

/// Free a string allocated by the engine.
///
/// # Safety
/// - `s` must be a valid pointer from a `catalog_*` function
/// - Must not be called twice on the same pointer
#[no_mangle]
pub unsafe extern "C" fn catalog_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

// ============================================================================
// State Transitions
// ============================================================================

/// Apply an action and replace the state with the result.
///
/// # Arguments
/// - `state`: State pointer
/// - `action_json`: JSON string of Action, e.g. `{"type": "toggleFavorite", "id": 3}`
///
/// # Returns
/// JSON string: `{"ok": CatalogView}` or `{"error": "message"}`
///
/// # Safety
/// - `state` must be a valid pointer from `catalog_state_new` or null
/// - `action_json` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `catalog_string_free`
#[no_mangle]
pub unsafe extern "C" fn catalog_dispatch(
    state: *mut CatalogState,
    action_json: *const c_char,
) -> *mut c_char {
    let state = match state.as_mut() {
        Some(s) => s,
        None => return to_c_string(FfiResult::<()>::err("null state pointer").to_json()),
    };

    let action_str = match from_c_string(action_json) {
        Some(s) => s,
        None => return to_c_string(FfiResult::<()>::err("invalid action JSON").to_json()),
    };

    let action: Action = match serde_json::from_str(&action_str) {
        Ok(a) => a,
        Err(e) => {
            return to_c_string(FfiResult::<()>::err(format!("parse error: {}", e)).to_json())
        }
    };

    *state = reduce(state, action);
    to_c_string(FfiResult::ok(state.view()).to_json())
}

/// Hydrate the state from the two storage blobs.
///
/// This is the offline start path: the host reads `cachedProducts` and
/// `favoriteProductIds` from its own storage and hands them over verbatim.
///
/// # Arguments
/// - `products_blob`: JSON array of product records
/// - `favorites_blob`: JSON array of ids, or null for none
///
/// # Returns
/// JSON string: `{"ok": CatalogView}` or `{"error": "message"}`
///
/// # Safety
/// - `state` must be a valid pointer from `catalog_state_new` or null
/// - `products_blob` must be a valid null-terminated C string or null
/// - `favorites_blob` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `catalog_string_free`
#[no_mangle]
pub unsafe extern "C" fn catalog_hydrate_from_blobs(
    state: *mut CatalogState,
    products_blob: *const c_char,
    favorites_blob: *const c_char,
) -> *mut c_char {
    let state = match state.as_mut() {
        Some(s) => s,
        None => return to_c_string(FfiResult::<()>::err("null state pointer").to_json()),
    };

    let products_str = match from_c_string(products_blob) {
        Some(s) => s,
        None => return to_c_string(FfiResult::<()>::err("invalid products blob").to_json()),
    };

    let records = match decode_products(&products_str) {
        Ok(r) => r,
        Err(e) => return to_c_string(FfiResult::<()>::err(e.to_string()).to_json()),
    };

    let favorites = match from_c_string(favorites_blob) {
        Some(blob) => match decode_favorites(&blob) {
            Ok(f) => f,
            Err(e) => return to_c_string(FfiResult::<()>::err(e.to_string()).to_json()),
        },
        None => FavoriteSet::new(),
    };

    *state = reduce(state, Action::Hydrated { records, favorites });
    to_c_string(FfiResult::ok(state.view()).to_json())
}

// ============================================================================
// Queries
// ============================================================================

/// Get the current view.
///
/// # Returns
/// JSON string: `{"ok": CatalogView}` or `{"error": "message"}`
///
/// # Safety
/// - `state` must be a valid pointer from `catalog_state_new` or null
/// - Caller must free the returned string with `catalog_string_free`
#[no_mangle]
pub unsafe extern "C" fn catalog_view(state: *const CatalogState) -> *mut c_char {
    let state = match state.as_ref() {
        Some(s) => s,
        None => return to_c_string(FfiResult::<()>::err("null state pointer").to_json()),
    };

    to_c_string(FfiResult::ok(state.view()).to_json())
}

/// Get the favorite-id set to persist under `favoriteProductIds`.
///
/// # Returns
/// JSON string: `{"ok": [ids]}` or `{"error": "message"}`
///
/// # Safety
/// - `state` must be a valid pointer from `catalog_state_new` or null
/// - Caller must free the returned string with `catalog_string_free`
#[no_mangle]
pub unsafe extern "C" fn catalog_favorites(state: *const CatalogState) -> *mut c_char {
    let state = match state.as_ref() {
        Some(s) => s,
        None => return to_c_string(FfiResult::<()>::err("null state pointer").to_json()),
    };

    to_c_string(FfiResult::ok(state.favorites()).to_json())
}

// ============================================================================
// Utilities
// ============================================================================

/// Get the engine version.
///
/// # Returns
/// Static string pointer (do not free)
#[no_mangle]
pub extern "C" fn catalog_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

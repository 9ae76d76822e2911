//! WASM bindings for the contact crate.

use crate::{ContactDisplay, Viewer};
use wasm_bindgen::prelude::*;

/// Mask a phone number for display.
#[wasm_bindgen(js_name = maskPhone)]
pub fn mask_phone(phone: &str) -> String {
    crate::mask_phone(phone)
}

/// Mask an email address for display.
#[wasm_bindgen(js_name = maskEmail)]
pub fn mask_email(email: &str) -> String {
    crate::mask_email(email)
}

/// Format a phone number for display.
#[wasm_bindgen(js_name = formatPhone)]
pub fn format_phone(phone: &str) -> String {
    crate::format_phone(phone)
}

/// Check an email address before submitting a listing.
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email(email: &str) -> bool {
    crate::is_valid_email(email)
}

/// Contact details for a viewer, as JSON `{phone, email, masked}`.
///
/// `viewer_json` is `{"kind": "anonymous" | "signed_in" | "owner", "revealed": bool}`.
#[wasm_bindgen(js_name = contactForViewer)]
pub fn contact_for_viewer(phone: Option<String>, email: &str, viewer_json: &str) -> Result<String, JsValue> {
    let viewer: Viewer = serde_json::from_str(viewer_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;
    let shown = ContactDisplay::for_viewer(phone.as_deref(), email, viewer);
    serde_json::to_string(&shown).map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

// ============================================================================
// QR DECODER FFI - jsQR binding
// ============================================================================
// jsQR is loaded by the host page as a global. Stateless wrapper only.
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `jsQR(data, width, height, options)`; returns `null` when no code is
    /// found and throws a ReferenceError if the script is missing.
    #[wasm_bindgen(js_name = jsQR, catch)]
    pub fn js_qr(
        data: &js_sys::Uint8ClampedArray,
        width: u32,
        height: u32,
        options: &JsValue,
    ) -> Result<JsValue, JsValue>;
}

/// Runs jsQR over RGBA pixels and returns the decoded text
pub fn decode_rgba(data: &[u8], width: u32, height: u32) -> Option<String> {
    let pixels = js_sys::Uint8ClampedArray::from(data);
    let result = match js_qr(&pixels, width, height, &JsValue::UNDEFINED) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("⚠️ [QR] jsQR unavailable: {:?}", e);
            return None;
        }
    };
    if result.is_null() || result.is_undefined() {
        return None;
    }

    js_sys::Reflect::get(&result, &"data".into())
        .ok()?
        .as_string()
        .filter(|text| !text.is_empty())
}

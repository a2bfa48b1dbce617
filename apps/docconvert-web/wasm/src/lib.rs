//! WASM bindings for the CV-DocConvert pages
//!
//! Validation, submission and checkout logic all live in `docconvert-core`.
//! This crate supplies the browser pieces: a `fetch` transport, views that
//! write into the page's elements, and the exports page scripts call.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { FormKind, mountConversionForm, mountDonationForm,
//!                preventCodeInjection, validatePdfFiles } from './pkg/docconvert_wasm.js';
//!
//! await init();
//!
//! mountConversionForm(FormKind.MergePdfs);   // #merge-form, #merge-input, ...
//! mountDonationForm();                       // #donate-button, .amount-btn[data-amount]
//! preventCodeInjection(document.getElementById('contact-name'));
//!
//! const check = validatePdfFiles(input.files);
//! if (!check.valid) showHint(check.error);
//! ```

pub mod convert_form;
pub mod dom;
pub mod donation_form;
pub mod fetch;
pub mod files;
pub mod injection;
pub mod validation;

use docconvert_core::ConversionKind;
use wasm_bindgen::prelude::*;
use web_sys::File;

pub use fetch::FetchTransport;
pub use files::BrowserFile;
pub use validation::ValidationResult;

/// Conversion forms a page can mount
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    ImagesToPdf,
    MergePdfs,
    SplitPdf,
}

impl From<FormKind> for ConversionKind {
    fn from(kind: FormKind) -> Self {
        match kind {
            FormKind::ImagesToPdf => ConversionKind::ImagesToPdf,
            FormKind::MergePdfs => ConversionKind::MergePdfs,
            FormKind::SplitPdf => ConversionKind::SplitPdf,
        }
    }
}

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Wire a conversion form to its controller
#[wasm_bindgen(js_name = mountConversionForm)]
pub fn mount_conversion_form(kind: FormKind) -> Result<(), JsValue> {
    convert_form::mount(kind.into())
}

#[wasm_bindgen(js_name = mountDonationForm)]
pub fn mount_donation_form() -> Result<(), JsValue> {
    donation_form::mount()
}

/// Page count and size of a PDF, as reported by the server
#[wasm_bindgen(js_name = getPdfInfo)]
pub async fn get_pdf_info(file: File) -> Result<JsValue, JsValue> {
    let info = docconvert_core::fetch_pdf_info(&FetchTransport, &BrowserFile(file))
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&info)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Publishable Stripe key for the checkout widget
#[wasm_bindgen(js_name = getStripePublicKey)]
pub async fn get_stripe_public_key() -> Result<String, JsValue> {
    docconvert_core::fetch_public_key(&FetchTransport)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `$1,234.56` display of an amount in cents
#[wasm_bindgen(js_name = formatAmount)]
pub fn format_amount(cents: u32) -> String {
    docconvert_core::format_amount(cents)
}

/// Format bytes as human-readable string
#[wasm_bindgen(js_name = formatBytes)]
pub fn format_bytes(bytes: f64) -> String {
    docconvert_core::file::format_bytes(bytes.max(0.0) as u64)
}

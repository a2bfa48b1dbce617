//! Validators callable from JavaScript
//!
//! Results cross the boundary as `{valid, error?, files?, totalSize?, fileCount?}`
//! so page scripts can show them without catching exceptions. `files` holds the
//! validated `File` objects, in selection order.

use docconvert_core::{ValidatedFiles, ValidationConfig, ValidationError};
use js_sys::{Array, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileList};

use crate::files::{files_from_list, BrowserFile};

/// Outcome of a validation as seen by page scripts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_count: Option<usize>,
}

impl ValidationResult {
    pub fn from_check(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(err) => Self::failed(err),
        }
    }

    pub fn from_files<F>(result: Result<ValidatedFiles<'_, F>, ValidationError>) -> Self {
        match result {
            Ok(validated) => Self {
                total_size: Some(validated.total_size),
                file_count: Some(validated.files.len()),
                ..Self::ok()
            },
            Err(err) => Self::failed(err),
        }
    }

    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
            total_size: None,
            file_count: None,
        }
    }

    fn failed(err: ValidationError) -> Self {
        Self {
            valid: false,
            error: Some(err.message().to_string()),
            total_size: None,
            file_count: None,
        }
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// List result with the accepted `File` objects attached as `files`
fn files_to_js(
    result: Result<ValidatedFiles<'_, BrowserFile>, ValidationError>,
) -> Result<JsValue, JsValue> {
    let files: Option<Array> = result
        .as_ref()
        .ok()
        .map(|validated| validated.files.iter().map(|file| &file.0).collect());

    let value = to_js(&ValidationResult::from_files(result))?;
    if let Some(files) = files {
        Reflect::set(&value, &JsValue::from_str("files"), &files)?;
    }
    Ok(value)
}

#[wasm_bindgen(js_name = getValidationConfig)]
pub fn get_validation_config() -> Result<JsValue, JsValue> {
    to_js(&ValidationConfig::DEFAULT)
}

#[wasm_bindgen(js_name = validateFileSize)]
pub fn validate_file_size(file: File) -> Result<JsValue, JsValue> {
    let result = docconvert_core::validate_file_size(&BrowserFile(file));
    to_js(&ValidationResult::from_check(result))
}

#[wasm_bindgen(js_name = validateImageFile)]
pub fn validate_image_file(file: File) -> Result<JsValue, JsValue> {
    let result = docconvert_core::validate_image_file(&BrowserFile(file));
    to_js(&ValidationResult::from_check(result))
}

#[wasm_bindgen(js_name = validatePdfFile)]
pub fn validate_pdf_file(file: File) -> Result<JsValue, JsValue> {
    let result = docconvert_core::validate_pdf_file(&BrowserFile(file));
    to_js(&ValidationResult::from_check(result))
}

#[wasm_bindgen(js_name = validateImageFiles)]
pub fn validate_image_files(files: &FileList) -> Result<JsValue, JsValue> {
    let files = files_from_list(files);
    files_to_js(docconvert_core::validate_image_files(&files))
}

#[wasm_bindgen(js_name = validatePdfFiles)]
pub fn validate_pdf_files(files: &FileList) -> Result<JsValue, JsValue> {
    let files = files_from_list(files);
    files_to_js(docconvert_core::validate_pdf_files(&files))
}

/// `amount_cents` is a JS number, so fractional and NaN inputs are possible
#[wasm_bindgen(js_name = validateDonationAmount)]
pub fn validate_donation_amount(amount_cents: f64) -> Result<JsValue, JsValue> {
    to_js(&ValidationResult::from_check(
        docconvert_core::validate_donation_amount(amount_cents).map(|_| ()),
    ))
}

#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email(text: &str) -> bool {
    docconvert_core::validate_email(text).is_ok()
}

#[wasm_bindgen(js_name = sanitizeFilename)]
pub fn sanitize_filename(name: &str) -> String {
    docconvert_core::sanitize_filename(name)
}

#[wasm_bindgen(js_name = sanitizeText)]
pub fn sanitize_text(text: &str) -> String {
    docconvert_core::sanitize_text(text)
}

/// Truncate, strip control characters and escape; `max_length` defaults to 1000
#[wasm_bindgen(js_name = sanitizeInput)]
pub fn sanitize_input(text: &str, max_length: Option<usize>) -> String {
    docconvert_core::sanitize_input(
        text,
        max_length.unwrap_or(docconvert_core::sanitize::DEFAULT_INPUT_MAX_LENGTH),
    )
}

#[wasm_bindgen(js_name = getFileExtension)]
pub fn get_file_extension(name: &str) -> String {
    docconvert_core::get_file_extension(name)
}

#[wasm_bindgen(js_name = isValidFilename)]
pub fn is_valid_filename(name: &str) -> bool {
    docconvert_core::is_valid_filename(name)
}

#[wasm_bindgen(js_name = isSafeRedirectUrl)]
pub fn is_safe_redirect_url(target: &str) -> bool {
    docconvert_core::is_safe_redirect_url(target)
}

//! Static upload and donation limits
//!
//! Initialized at compile time and never changed at runtime. The same values are
//! exported to JavaScript through `ValidationConfig` so the page can show them.

use serde::Serialize;

/// Largest single upload accepted (16 MiB)
pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Largest combined upload accepted (50 MiB)
pub const MAX_TOTAL_SIZE: u64 = 50 * 1024 * 1024;

pub const MIN_FILES: usize = 1;
pub const MAX_FILES: usize = 20;

pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/jpg"];
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg"];
pub const ALLOWED_PDF_TYPE: &str = "application/pdf";
pub const ALLOWED_PDF_EXTENSION: &str = ".pdf";

/// Stripe's minimum charge ($0.50)
pub const MIN_DONATION_CENTS: u32 = 50;
/// $999,999.99
pub const MAX_DONATION_CENTS: u32 = 99_999_999;
/// Preselected donation ($10.00)
pub const DEFAULT_DONATION_CENTS: u32 = 1000;

/// Process-wide validation limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationConfig {
    pub max_file_size: u64,
    pub max_total_size: u64,
    pub allowed_image_types: &'static [&'static str],
    pub allowed_image_extensions: &'static [&'static str],
    pub allowed_pdf_type: &'static str,
    pub allowed_pdf_extension: &'static str,
    pub min_files: usize,
    pub max_files: usize,
    pub min_donation_cents: u32,
    pub max_donation_cents: u32,
}

impl ValidationConfig {
    pub const DEFAULT: ValidationConfig = ValidationConfig {
        max_file_size: MAX_FILE_SIZE,
        max_total_size: MAX_TOTAL_SIZE,
        allowed_image_types: ALLOWED_IMAGE_TYPES,
        allowed_image_extensions: ALLOWED_IMAGE_EXTENSIONS,
        allowed_pdf_type: ALLOWED_PDF_TYPE,
        allowed_pdf_extension: ALLOWED_PDF_EXTENSION,
        min_files: MIN_FILES,
        max_files: MAX_FILES,
        min_donation_cents: MIN_DONATION_CENTS,
        max_donation_cents: MAX_DONATION_CENTS,
    };
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

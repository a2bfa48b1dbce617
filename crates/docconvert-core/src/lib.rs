//! Client-side logic for CV-DocConvert
//!
//! Upload validation, conversion submission and donation checkout, independent
//! of where it runs. The browser build and the command-line client supply a
//! [`Transport`] for the network and views for output:
//! - `UploadController`: one per conversion form (images to PDF, merge, split)
//! - `DonationController`: amount selection and checkout redirect

pub mod config;
pub mod donation;
pub mod error;
pub mod file;
pub mod page_range;
pub mod protocol;
pub mod sanitize;
pub mod transport;
pub mod upload;
pub mod validator;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ValidationConfig;
pub use donation::{fetch_public_key, format_amount, DonationController, DonationView};
pub use error::{ClientError, TransportError, ValidationError};
pub use file::{sniff_mime, FileMeta, SelectedFile};
pub use page_range::PageRange;
pub use protocol::{ConversionResponse, ConversionSuccess, PdfInfo};
pub use sanitize::{
    get_file_extension, is_checkout_url, is_safe_redirect_url, is_valid_filename,
    sanitize_filename, sanitize_input, sanitize_text, strip_injection_patterns, validate_email,
};
pub use transport::{FormPart, Transport, UploadForm};
pub use upload::{fetch_pdf_info, ConversionKind, Ticket, UploadController, UploadState, UploadView};
pub use validator::{
    validate_donation_amount, validate_file_size, validate_image_file, validate_image_files,
    validate_pdf_file, validate_pdf_files, ValidatedFiles,
};

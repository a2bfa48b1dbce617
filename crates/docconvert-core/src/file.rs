//! Selected files and content sniffing
//!
//! A selection is supplied by the platform (browser file picker, files on disk)
//! and is only ever read here.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_PNG: &str = "image/png";
pub const MIME_JPEG: &str = "image/jpeg";

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_SOI: &[u8] = &[0xFF, 0xD8, 0xFF];

/// One entry of a file selection: name, size in bytes and declared MIME type
pub trait SelectedFile {
    fn name(&self) -> String;
    fn size(&self) -> u64;
    fn mime_type(&self) -> String;
}

impl<T: SelectedFile + ?Sized> SelectedFile for &T {
    fn name(&self) -> String {
        (**self).name()
    }

    fn size(&self) -> u64 {
        (**self).size()
    }

    fn mime_type(&self) -> String {
        (**self).mime_type()
    }
}

/// Plain file metadata, used when only the description of a file is known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }
}

impl SelectedFile for FileMeta {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }
}

/// Detect the MIME type from magic bytes
///
/// Only the types the converter accepts are recognized.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"%PDF-") {
        Some(MIME_PDF)
    } else if bytes.starts_with(PNG_SIGNATURE) {
        Some(MIME_PNG)
    } else if bytes.starts_with(JPEG_SOI) {
        Some(MIME_JPEG)
    } else {
        None
    }
}

/// Quick structural check for a PDF without parsing it
pub fn quick_check_pdf(name: &str, bytes: &[u8]) -> Result<(), ValidationError> {
    if bytes.len() < 8 {
        return Err(ValidationError::new(format!(
            "El archivo {} es demasiado pequeño para ser un PDF",
            name
        )));
    }

    if !bytes.starts_with(b"%PDF-") {
        return Err(ValidationError::new(format!(
            "El archivo {} no es un PDF válido",
            name
        )));
    }

    // %%EOF should sit near the end
    let tail = if bytes.len() > 1024 {
        &bytes[bytes.len() - 1024..]
    } else {
        bytes
    };

    if !tail.windows(5).any(|w| w == b"%%EOF") {
        return Err(ValidationError::new(format!(
            "El archivo {} parece estar incompleto",
            name
        )));
    }

    Ok(())
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

//! Wire types for the conversion and checkout endpoints
//!
//! Request and response bodies are JSON. Error bodies from the server may omit
//! `success`, so every field defaults.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::sanitize::{is_checkout_url, is_safe_redirect_url};

pub mod endpoints {
    pub const IMAGES_TO_PDF: &str = "/convert/upload/images-to-pdf";
    pub const MERGE_PDFS: &str = "/convert/upload/merge-pdfs";
    pub const SPLIT_PDF: &str = "/convert/upload/split-pdf";
    pub const PDF_INFO: &str = "/convert/pdf-info";
    pub const CREATE_CHECKOUT_SESSION: &str = "/stripe/create-checkout-session";
    pub const STRIPE_CONFIG: &str = "/stripe/config";
}

/// Multipart field names
pub mod fields {
    pub const FILES: &str = "files[]";
    pub const FILE: &str = "file";
    pub const START_PAGE: &str = "start_page";
    pub const END_PAGE: &str = "end_page";
}

pub const UNKNOWN_ERROR: &str = "Error desconocido";
const DEFAULT_SUCCESS_MESSAGE: &str = "Conversión completada";

/// Response from the three conversion endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// What the success panel shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionSuccess {
    pub message: String,
    pub download_url: String,
    pub filename: Option<String>,
}

impl ConversionResponse {
    /// Interpret the body as a success or a business failure
    ///
    /// A success whose `download_url` is missing or not a same-origin path is
    /// treated as a failure so it never becomes a link.
    pub fn into_outcome(self) -> Result<ConversionSuccess, ClientError> {
        if !self.success {
            let error = self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            return Err(ClientError::Business(error));
        }

        let download_url = match self.download_url {
            Some(url) if is_safe_redirect_url(&url) => url,
            Some(_) => {
                return Err(ClientError::Business(
                    "El servidor devolvió un enlace de descarga no válido".to_string(),
                ))
            }
            None => {
                return Err(ClientError::Business(
                    "El servidor no devolvió un enlace de descarga".to_string(),
                ))
            }
        };

        Ok(ConversionSuccess {
            message: self
                .message
                .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
            download_url,
            filename: self.filename,
        })
    }
}

/// Body of `POST /stripe/create-checkout-session`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Amount in cents
    pub amount: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckoutResponse {
    /// The redirect target, or the business error to display
    pub fn into_redirect(self) -> Result<String, ClientError> {
        if let Some(error) = self.error.filter(|e| !e.trim().is_empty()) {
            return Err(ClientError::Business(error));
        }

        match self.url {
            Some(url) if is_checkout_url(&url) => Ok(url),
            Some(_) => Err(ClientError::Business(
                "El servidor devolvió una URL de pago no válida".to_string(),
            )),
            None => Err(ClientError::Business(UNKNOWN_ERROR.to_string())),
        }
    }
}

/// Response from `POST /convert/pdf-info`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PdfInfoResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<PdfInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// PDF details reported by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PdfInfo {
    pub pages: u32,
    pub size_bytes: u64,
    #[serde(default)]
    pub size_mb: f64,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl PdfInfoResponse {
    pub fn into_info(self) -> Result<PdfInfo, ClientError> {
        match (self.success, self.info) {
            (true, Some(info)) => Ok(info),
            _ => Err(ClientError::Business(
                self.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            )),
        }
    }
}

/// Response from `GET /stripe/config`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StripeConfigResponse {
    #[serde(rename = "publicKey", default)]
    pub public_key: Option<String>,
}

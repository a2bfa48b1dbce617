//! HTTP seam between the controllers and the platform
//!
//! The browser build implements [`Transport`] over `fetch`, the CLI over
//! `reqwest`. Tests use an in-memory double. Futures are `?Send` because the
//! browser transport holds JS values across awaits.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::file::SelectedFile;

/// One multipart field
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart<'a, F> {
    File { field: &'static str, file: &'a F },
    Text { field: &'static str, value: String },
}

/// Multipart body in field order
#[derive(Debug, Clone, PartialEq)]
pub struct UploadForm<'a, F> {
    parts: Vec<FormPart<'a, F>>,
}

impl<'a, F> Default for UploadForm<'a, F> {
    fn default() -> Self {
        Self { parts: Vec::new() }
    }
}

impl<'a, F: SelectedFile> UploadForm<'a, F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, field: &'static str, file: &'a F) -> Self {
        self.parts.push(FormPart::File { field, file });
        self
    }

    pub fn text(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            field,
            value: value.into(),
        });
        self
    }

    pub fn parts(&self) -> &[FormPart<'a, F>] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<FormPart<'a, F>> {
        self.parts
    }

    /// Names of the attached files, in order
    pub fn file_names(&self) -> Vec<String> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                FormPart::File { file, .. } => Some(file.name()),
                FormPart::Text { .. } => None,
            })
            .collect()
    }

    pub fn text_value(&self, field: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { field: f, value } if *f == field => Some(value.as_str()),
            _ => None,
        })
    }
}

/// Request/response transport for relative endpoints
///
/// Every method resolves to the parsed JSON body regardless of HTTP status,
/// since the server reports business failures in the body. An `Err` means no
/// JSON body was obtained at all.
#[async_trait(?Send)]
pub trait Transport {
    type File: SelectedFile;

    async fn post_form(
        &self,
        endpoint: &str,
        form: UploadForm<'_, Self::File>,
    ) -> Result<Value, TransportError>;

    async fn post_json(&self, endpoint: &str, body: Value) -> Result<Value, TransportError>;

    async fn get_json(&self, endpoint: &str) -> Result<Value, TransportError>;
}

/// Parse a raw response body regardless of HTTP status
///
/// The server reports validation and business failures as JSON with a 4xx/5xx
/// status, so only a body that is not JSON at all is a transport failure.
pub fn parse_body(status: u16, text: &str) -> Result<Value, TransportError> {
    serde_json::from_str(text).map_err(|_| {
        TransportError(format!(
            "Respuesta inválida del servidor (HTTP {})",
            status
        ))
    })
}

/// Decode a response body into a wire type
pub fn decode<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, TransportError> {
    serde_json::from_value(body)
        .map_err(|e| TransportError(format!("Respuesta inválida del servidor: {}", e)))
}

//! `reqwest` transport
//!
//! Endpoints are relative; they are joined to the configured origin here.
//! Bodies are read as text and parsed without looking at the status, the same
//! way the browser transport does.

use async_trait::async_trait;
use docconvert_core::transport::parse_body;
use docconvert_core::{FormPart, SelectedFile, Transport, TransportError, UploadForm};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::local_file::LocalFile;

const USER_AGENT: &str = concat!("docconvert-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn read(request: reqwest::RequestBuilder) -> Result<Value, TransportError> {
        let response = request.send().await.map_err(request_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(request_error)?;
        debug!(status, bytes = text.len(), "Response received");
        parse_body(status, &text)
    }
}

async fn multipart(form: UploadForm<'_, LocalFile>) -> Result<Form, TransportError> {
    let mut multipart = Form::new();
    for part in form.into_parts() {
        multipart = match part {
            FormPart::File { field, file } => {
                let bytes = tokio::fs::read(file.path()).await.map_err(|e| {
                    TransportError(format!("No se pudo leer {}: {}", file.name(), e))
                })?;
                let part = Part::bytes(bytes)
                    .file_name(file.name())
                    .mime_str(&file.mime_type())
                    .map_err(request_error)?;
                multipart.part(field, part)
            }
            FormPart::Text { field, value } => multipart.text(field, value),
        };
    }
    Ok(multipart)
}

fn request_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError("Tiempo de espera agotado".to_string())
    } else if err.is_connect() {
        TransportError("No se pudo conectar con el servidor".to_string())
    } else {
        TransportError(err.to_string())
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    type File = LocalFile;

    async fn post_form(
        &self,
        endpoint: &str,
        form: UploadForm<'_, LocalFile>,
    ) -> Result<Value, TransportError> {
        debug!(endpoint, files = form.file_names().len(), "POST multipart");
        let body = multipart(form).await?;
        Self::read(self.client.post(self.url(endpoint)).multipart(body)).await
    }

    async fn post_json(&self, endpoint: &str, body: Value) -> Result<Value, TransportError> {
        debug!(endpoint, "POST json");
        Self::read(self.client.post(self.url(endpoint)).json(&body)).await
    }

    async fn get_json(&self, endpoint: &str) -> Result<Value, TransportError> {
        debug!(endpoint, "GET");
        Self::read(self.client.get(self.url(endpoint))).await
    }
}

//! `fetch`-based transport
//!
//! Requests go to the relative endpoint paths on the page's own origin. The
//! response body is read as text and parsed here, so a non-JSON error page
//! becomes a transport error instead of a rejected promise.

use async_trait::async_trait;
use docconvert_core::transport::parse_body;
use docconvert_core::{FormPart, Transport, TransportError, UploadForm};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, Response};

use crate::files::BrowserFile;

/// Same-origin transport for the page's own server
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    async fn send(&self, endpoint: &str, opts: &RequestInit) -> Result<Value, TransportError> {
        let (status, text) = self.fetch_text(endpoint, opts).await.map_err(js_error)?;
        parse_body(status, &text)
    }

    async fn fetch_text(
        &self,
        endpoint: &str,
        opts: &RequestInit,
    ) -> Result<(u16, String), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

        let request = Request::new_with_str_and_init(endpoint, opts)?;
        let response = JsFuture::from(window.fetch_with_request(&request)).await?;
        let response: Response = response.dyn_into()?;

        let text = JsFuture::from(response.text()?).await?;
        Ok((response.status(), text.as_string().unwrap_or_default()))
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    type File = BrowserFile;

    async fn post_form(
        &self,
        endpoint: &str,
        form: UploadForm<'_, BrowserFile>,
    ) -> Result<Value, TransportError> {
        let body = form_data(form).map_err(js_error)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(body.as_ref());

        self.send(endpoint, &opts).await
    }

    async fn post_json(&self, endpoint: &str, body: Value) -> Result<Value, TransportError> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&JsValue::from_str(&body.to_string()));
        let headers = web_sys::Headers::new().map_err(js_error)?;
        headers
            .set("Content-Type", "application/json")
            .map_err(js_error)?;
        opts.set_headers(headers.as_ref());

        self.send(endpoint, &opts).await
    }

    async fn get_json(&self, endpoint: &str) -> Result<Value, TransportError> {
        let opts = RequestInit::new();
        opts.set_method("GET");

        self.send(endpoint, &opts).await
    }
}

fn form_data(form: UploadForm<'_, BrowserFile>) -> Result<FormData, JsValue> {
    let data = FormData::new()?;
    for part in form.into_parts() {
        match part {
            FormPart::File { field, file } => {
                data.append_with_blob_and_filename(field, &file.0, &file.0.name())?
            }
            FormPart::Text { field, value } => data.append_with_str(field, &value)?,
        }
    }
    Ok(data)
}

/// Best-effort message from a rejected JS promise
pub(crate) fn js_error(err: JsValue) -> TransportError {
    if let Some(message) = err.as_string() {
        return TransportError(message);
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return TransportError(String::from(error.message()));
    }
    TransportError("Error desconocido".to_string())
}

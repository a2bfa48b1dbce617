//! In-memory transport and view doubles for unit tests

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::Value;

use crate::donation::DonationView;
use crate::error::TransportError;
use crate::file::{FileMeta, SelectedFile};
use crate::transport::{FormPart, Transport, UploadForm};
use crate::upload::UploadView;

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub endpoint: String,
    pub files: Vec<String>,
    pub fields: Vec<(String, String)>,
    pub json: Option<Value>,
}

/// Replays queued outcomes in order; the last one repeats
#[derive(Default)]
pub struct MockTransport {
    outcomes: RefCell<VecDeque<Result<Value, TransportError>>>,
    calls: RefCell<Vec<Call>>,
}

impl MockTransport {
    pub fn responding(body: Value) -> Self {
        Self::with(Ok(body))
    }

    pub fn failing(message: &str) -> Self {
        Self::with(Err(TransportError(message.to_string())))
    }

    fn with(outcome: Result<Value, TransportError>) -> Self {
        let transport = Self::default();
        transport.outcomes.borrow_mut().push_back(outcome);
        transport
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn next(&self, call: Call) -> Result<Value, TransportError> {
        self.calls.borrow_mut().push(call);
        let mut outcomes = self.outcomes.borrow_mut();
        if outcomes.len() > 1 {
            outcomes.pop_front().unwrap_or(Ok(Value::Null))
        } else {
            outcomes.front().cloned().unwrap_or(Ok(Value::Null))
        }
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    type File = FileMeta;

    async fn post_form(
        &self,
        endpoint: &str,
        form: UploadForm<'_, FileMeta>,
    ) -> Result<Value, TransportError> {
        let mut files = Vec::new();
        let mut fields = Vec::new();
        for part in form.into_parts() {
            match part {
                FormPart::File { file, .. } => files.push(file.name()),
                FormPart::Text { field, value } => fields.push((field.to_string(), value)),
            }
        }
        self.next(Call {
            endpoint: endpoint.to_string(),
            files,
            fields,
            json: None,
        })
    }

    async fn post_json(&self, endpoint: &str, body: Value) -> Result<Value, TransportError> {
        self.next(Call {
            endpoint: endpoint.to_string(),
            files: Vec::new(),
            fields: Vec::new(),
            json: Some(body),
        })
    }

    async fn get_json(&self, endpoint: &str) -> Result<Value, TransportError> {
        self.next(Call {
            endpoint: endpoint.to_string(),
            files: Vec::new(),
            fields: Vec::new(),
            json: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    ShowLoading,
    HideLoading,
    ClearPanels,
    Success(String, String),
    Error(String),
    Amount(String),
    ClearCustomAmount,
    Submitting(bool),
    Redirect(String),
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
}

impl UploadView for RecordingView {
    fn show_loading(&mut self) {
        self.events.push(ViewEvent::ShowLoading);
    }

    fn hide_loading(&mut self) {
        self.events.push(ViewEvent::HideLoading);
    }

    fn clear_panels(&mut self) {
        self.events.push(ViewEvent::ClearPanels);
    }

    fn show_success(&mut self, message: &str, download_url: &str) {
        self.events.push(ViewEvent::Success(
            message.to_string(),
            download_url.to_string(),
        ));
    }

    fn show_error(&mut self, message: &str) {
        self.events.push(ViewEvent::Error(message.to_string()));
    }
}

impl DonationView for RecordingView {
    fn show_amount(&mut self, formatted: &str) {
        self.events.push(ViewEvent::Amount(formatted.to_string()));
    }

    fn clear_custom_amount(&mut self) {
        self.events.push(ViewEvent::ClearCustomAmount);
    }

    fn set_submitting(&mut self, submitting: bool) {
        self.events.push(ViewEvent::Submitting(submitting));
    }

    fn show_error(&mut self, message: &str) {
        self.events.push(ViewEvent::Error(message.to_string()));
    }

    fn redirect(&mut self, url: &str) {
        self.events.push(ViewEvent::Redirect(url.to_string()));
    }
}

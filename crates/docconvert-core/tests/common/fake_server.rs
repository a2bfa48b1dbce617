//! Scripted stand-in for the conversion server

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use docconvert_core::file::FileMeta;
use docconvert_core::{FormPart, SelectedFile, Transport, TransportError, UploadForm};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub endpoint: String,
    pub files: Vec<(String, String)>,
    pub fields: Vec<(String, String)>,
    pub json: Option<Value>,
}

/// Answers per endpoint from a queue; unknown endpoints fail like a dropped connection
#[derive(Default)]
pub struct FakeServer {
    routes: RefCell<HashMap<String, VecDeque<Result<Value, TransportError>>>>,
    requests: RefCell<Vec<Request>>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, endpoint: &str, body: Value) -> Self {
        self.push(endpoint, Ok(body));
        self
    }

    #[allow(dead_code)]
    pub fn fail(self, endpoint: &str, message: &str) -> Self {
        self.push(endpoint, Err(TransportError(message.to_string())));
        self
    }

    fn push(&self, endpoint: &str, outcome: Result<Value, TransportError>) {
        self.routes
            .borrow_mut()
            .entry(endpoint.to_string())
            .or_default()
            .push_back(outcome);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    fn answer(&self, request: Request) -> Result<Value, TransportError> {
        let outcome = self
            .routes
            .borrow_mut()
            .get_mut(&request.endpoint)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(TransportError("Failed to fetch".to_string())));
        self.requests.borrow_mut().push(request);
        outcome
    }
}

#[async_trait(?Send)]
impl Transport for FakeServer {
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
                FormPart::File { field, file } => files.push((field.to_string(), file.name())),
                FormPart::Text { field, value } => fields.push((field.to_string(), value)),
            }
        }
        self.answer(Request {
            endpoint: endpoint.to_string(),
            files,
            fields,
            json: None,
        })
    }

    async fn post_json(&self, endpoint: &str, body: Value) -> Result<Value, TransportError> {
        self.answer(Request {
            endpoint: endpoint.to_string(),
            files: Vec::new(),
            fields: Vec::new(),
            json: Some(body),
        })
    }

    async fn get_json(&self, endpoint: &str) -> Result<Value, TransportError> {
        self.answer(Request {
            endpoint: endpoint.to_string(),
            files: Vec::new(),
            fields: Vec::new(),
            json: None,
        })
    }
}

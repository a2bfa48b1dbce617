//! Transport double that serves canned bodies for local files

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use docconvert_cli::LocalFile;
use docconvert_core::{FormPart, SelectedFile, Transport, TransportError, UploadForm};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Sent {
    pub endpoint: String,
    pub files: Vec<String>,
    pub fields: Vec<(String, String)>,
    pub json: Option<Value>,
}

#[derive(Default)]
pub struct Scripted {
    bodies: HashMap<String, Value>,
    sent: RefCell<Vec<Sent>>,
}

impl Scripted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, endpoint: &str, body: Value) -> Self {
        self.bodies.insert(endpoint.to_string(), body);
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.borrow().clone()
    }

    fn answer(&self, sent: Sent) -> Result<Value, TransportError> {
        let body = self.bodies.get(&sent.endpoint).cloned();
        self.sent.borrow_mut().push(sent);
        body.ok_or_else(|| TransportError("No se pudo conectar con el servidor".to_string()))
    }
}

#[async_trait(?Send)]
impl Transport for Scripted {
    type File = LocalFile;

    async fn post_form(
        &self,
        endpoint: &str,
        form: UploadForm<'_, LocalFile>,
    ) -> Result<Value, TransportError> {
        let mut files = Vec::new();
        let mut fields = Vec::new();
        for part in form.into_parts() {
            match part {
                FormPart::File { file, .. } => files.push(file.name()),
                FormPart::Text { field, value } => fields.push((field.to_string(), value)),
            }
        }
        self.answer(Sent {
            endpoint: endpoint.to_string(),
            files,
            fields,
            json: None,
        })
    }

    async fn post_json(&self, endpoint: &str, body: Value) -> Result<Value, TransportError> {
        self.answer(Sent {
            endpoint: endpoint.to_string(),
            files: Vec::new(),
            fields: Vec::new(),
            json: Some(body),
        })
    }

    async fn get_json(&self, endpoint: &str) -> Result<Value, TransportError> {
        self.answer(Sent {
            endpoint: endpoint.to_string(),
            files: Vec::new(),
            fields: Vec::new(),
            json: None,
        })
    }
}

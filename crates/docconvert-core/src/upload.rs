//! Conversion submission
//!
//! One [`UploadController`] drives one conversion form. A submission moves the
//! controller from `Idle` to `Submitting`, and the server's answer moves it to
//! `Success` or `Failed`. The next submission starts over from `Idle`.
//!
//! Submissions are split into [`UploadController::begin`] and
//! [`UploadController::finish`] so a caller can drop its borrow of the
//! controller while the request is in flight. Each `begin` issues a [`Ticket`];
//! `finish` ignores tickets that are no longer current.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{ClientError, TransportError, ValidationError};
use crate::file::SelectedFile;
use crate::page_range::PageRange;
use crate::protocol::{
    endpoints, fields, ConversionResponse, ConversionSuccess, PdfInfo, PdfInfoResponse,
};
use crate::transport::{decode, Transport, UploadForm};
use crate::validator::{validate_image_files, validate_pdf_files, ValidatedFiles};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    ImagesToPdf,
    MergePdfs,
    SplitPdf,
}

impl ConversionKind {
    pub fn endpoint(self) -> &'static str {
        match self {
            ConversionKind::ImagesToPdf => endpoints::IMAGES_TO_PDF,
            ConversionKind::MergePdfs => endpoints::MERGE_PDFS,
            ConversionKind::SplitPdf => endpoints::SPLIT_PDF,
        }
    }

    /// Multipart field the files are attached under
    pub fn file_field(self) -> &'static str {
        match self {
            ConversionKind::ImagesToPdf | ConversionKind::MergePdfs => fields::FILES,
            ConversionKind::SplitPdf => fields::FILE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConversionKind::ImagesToPdf => "images-to-pdf",
            ConversionKind::MergePdfs => "merge-pdfs",
            ConversionKind::SplitPdf => "split-pdf",
        }
    }

    /// Form-level selection count check, run before the file validator
    fn check_selection(self, count: usize) -> Result<(), ValidationError> {
        match self {
            ConversionKind::ImagesToPdf if count < 1 => Err(ValidationError::new(
                "Por favor selecciona al menos una imagen",
            )),
            ConversionKind::MergePdfs if count < 2 => {
                Err(ValidationError::new("Por favor selecciona al menos 2 PDFs"))
            }
            ConversionKind::SplitPdf if count != 1 => {
                Err(ValidationError::new("Por favor selecciona un archivo PDF"))
            }
            _ => Ok(()),
        }
    }

    /// Run the full list validator for this kind of input
    pub fn validate<F: SelectedFile>(
        self,
        files: &[F],
    ) -> Result<ValidatedFiles<'_, F>, ValidationError> {
        match self {
            ConversionKind::ImagesToPdf => validate_image_files(files),
            ConversionKind::MergePdfs | ConversionKind::SplitPdf => validate_pdf_files(files),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Submitting,
    Success(ConversionSuccess),
    Failed(String),
}

/// Identifies one submission of one controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Where a conversion form shows its progress and results
pub trait UploadView {
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    /// Hide the result and error panels of a previous submission
    fn clear_panels(&mut self);
    fn show_success(&mut self, message: &str, download_url: &str);
    fn show_error(&mut self, message: &str);
}

pub struct UploadController<V> {
    kind: ConversionKind,
    state: UploadState,
    generation: u64,
    view: V,
}

impl<V: UploadView> UploadController<V> {
    pub fn new(kind: ConversionKind, view: V) -> Self {
        Self {
            kind,
            state: UploadState::Idle,
            generation: 0,
            view,
        }
    }

    pub fn kind(&self) -> ConversionKind {
        self.kind
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Validate the selection and build the request body
    ///
    /// `pages` carries the raw start/end page fields and is only read for
    /// splits. A refusal is shown on the view, leaves the controller `Idle`,
    /// and never produces a request. Either way, responses to earlier tickets
    /// are ignored from here on.
    pub fn begin<'f, F: SelectedFile>(
        &mut self,
        files: &'f [F],
        pages: Option<(&str, &str)>,
    ) -> Result<(Ticket, UploadForm<'f, F>), ValidationError> {
        // Any response still in flight belongs to an older action now
        let previous = std::mem::take(&mut self.state);
        self.generation += 1;

        let form = match self.build_form(files, pages) {
            Ok(form) => form,
            Err(err) => {
                debug!(kind = self.kind.name(), error = %err, "Submission refused locally");
                if previous == UploadState::Submitting {
                    self.view.hide_loading();
                }
                self.view.show_error(err.message());
                return Err(err);
            }
        };

        self.state = UploadState::Submitting;
        self.view.clear_panels();
        self.view.show_loading();

        info!(
            kind = self.kind.name(),
            files = files.len(),
            ticket = self.generation,
            "Submitting conversion"
        );

        Ok((Ticket(self.generation), form))
    }

    fn build_form<'f, F: SelectedFile>(
        &self,
        files: &'f [F],
        pages: Option<(&str, &str)>,
    ) -> Result<UploadForm<'f, F>, ValidationError> {
        self.kind.check_selection(files.len())?;

        let range = match self.kind {
            ConversionKind::SplitPdf => {
                let (start, end) = pages.unwrap_or_default();
                Some(PageRange::parse(start, end)?)
            }
            _ => None,
        };

        let validated = self.kind.validate(files)?;

        let field = self.kind.file_field();
        let mut form = validated
            .files
            .iter()
            .fold(UploadForm::new(), |form, file| form.file(field, file));

        if let Some(range) = range {
            form = form
                .text(fields::START_PAGE, range.start.to_string())
                .text(fields::END_PAGE, range.end.to_string());
        }

        Ok(form)
    }

    /// Apply the outcome of the request issued for `ticket`
    ///
    /// Returns `None` when a newer submission has started since, in which case
    /// neither the state nor the view is touched.
    pub fn finish(
        &mut self,
        ticket: Ticket,
        outcome: Result<Value, TransportError>,
    ) -> Option<Result<ConversionSuccess, ClientError>> {
        if ticket.0 != self.generation {
            debug!(
                kind = self.kind.name(),
                ticket = ticket.0,
                current = self.generation,
                "Discarding stale conversion response"
            );
            return None;
        }

        self.view.hide_loading();

        let result = outcome
            .and_then(decode::<ConversionResponse>)
            .map_err(ClientError::from)
            .and_then(ConversionResponse::into_outcome);

        match &result {
            Ok(success) => {
                info!(kind = self.kind.name(), url = %success.download_url, "Conversion finished");
                self.view
                    .show_success(&success.message, &success.download_url);
                self.state = UploadState::Success(success.clone());
            }
            Err(err) => {
                warn!(kind = self.kind.name(), error = %err, "Conversion failed");
                let message = err.to_string();
                self.view.show_error(&message);
                self.state = UploadState::Failed(message);
            }
        }

        Some(result)
    }

    /// Validate, post, and apply the response in one call
    pub async fn submit<T>(
        &mut self,
        transport: &T,
        files: &[T::File],
        pages: Option<(&str, &str)>,
    ) -> Result<ConversionSuccess, ClientError>
    where
        T: Transport,
    {
        let (ticket, form) = self.begin(files, pages)?;
        let outcome = transport.post_form(self.kind.endpoint(), form).await;
        self.finish(ticket, outcome)
            .unwrap_or(Err(ClientError::Superseded))
    }
}

/// Ask the server for the page count and size of a single PDF
pub async fn fetch_pdf_info<T: Transport>(
    transport: &T,
    file: &T::File,
) -> Result<PdfInfo, ClientError> {
    validate_pdf_files(std::slice::from_ref(file))?;

    let form = UploadForm::new().file(fields::FILE, file);
    let body = transport.post_form(endpoints::PDF_INFO, form).await?;
    let info = decode::<PdfInfoResponse>(body)?.into_info()?;

    debug!(pages = info.pages, size = info.size_bytes, "Fetched PDF info");
    Ok(info)
}

//! DOM-backed views
//!
//! Elements are found by ID once, when a form is mounted. Server and user text
//! only ever goes in through `textContent`.

use docconvert_core::{ConversionKind, DonationView, UploadView};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlAnchorElement, HtmlButtonElement, HtmlInputElement,
};

const HIDDEN: &str = "hidden";

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document"))
}

pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Element #{} not found", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{} has an unexpected type", id)))
}

pub fn set_visible(element: &Element, visible: bool) {
    let classes = element.class_list();
    let result = if visible {
        classes.remove_1(HIDDEN)
    } else {
        classes.add_1(HIDDEN)
    };
    if let Err(err) = result {
        web_sys::console::warn_2(&"Could not toggle visibility".into(), &err);
    }
}

/// Register `handler` for the page's lifetime
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn log_error(context: &str, err: &JsValue) {
    web_sys::console::error_2(&JsValue::from_str(context), err);
}

/// Element IDs of one conversion form, derived from its prefix
///
/// `images-form`, `images-input`, `images-loading`, `images-result`,
/// `images-message`, `images-download`, `images-error`; the split form adds
/// `split-start-page` and `split-end-page`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormIds {
    pub form: String,
    pub input: String,
    pub loading: String,
    pub result: String,
    pub message: String,
    pub download: String,
    pub error: String,
    pub pages: Option<(String, String)>,
}

impl FormIds {
    pub fn for_kind(kind: ConversionKind) -> Self {
        let prefix = match kind {
            ConversionKind::ImagesToPdf => "images",
            ConversionKind::MergePdfs => "merge",
            ConversionKind::SplitPdf => "split",
        };
        let id = |suffix: &str| format!("{}-{}", prefix, suffix);

        Self {
            form: id("form"),
            input: id("input"),
            loading: id("loading"),
            result: id("result"),
            message: id("message"),
            download: id("download"),
            error: id("error"),
            pages: (kind == ConversionKind::SplitPdf).then(|| (id("start-page"), id("end-page"))),
        }
    }
}

pub struct DomUploadView {
    loading: Element,
    result: Element,
    message: Element,
    download: HtmlAnchorElement,
    error: Element,
}

impl DomUploadView {
    pub fn from_ids(document: &Document, ids: &FormIds) -> Result<Self, JsValue> {
        Ok(Self {
            loading: by_id(document, &ids.loading)?,
            result: by_id(document, &ids.result)?,
            message: by_id(document, &ids.message)?,
            download: by_id(document, &ids.download)?,
            error: by_id(document, &ids.error)?,
        })
    }
}

impl UploadView for DomUploadView {
    fn show_loading(&mut self) {
        set_visible(&self.loading, true);
    }

    fn hide_loading(&mut self) {
        set_visible(&self.loading, false);
    }

    fn clear_panels(&mut self) {
        set_visible(&self.result, false);
        set_visible(&self.error, false);
    }

    fn show_success(&mut self, message: &str, download_url: &str) {
        self.message.set_text_content(Some(message));
        self.download.set_href(download_url);
        set_visible(&self.error, false);
        set_visible(&self.result, true);
    }

    fn show_error(&mut self, message: &str) {
        self.error.set_text_content(Some(message));
        set_visible(&self.result, false);
        set_visible(&self.error, true);
    }
}

pub const DONATION_AMOUNT_ID: &str = "donation-amount";
pub const CUSTOM_AMOUNT_ID: &str = "custom-amount";
pub const DONATE_BUTTON_ID: &str = "donate-button";
pub const DONATION_ERROR_ID: &str = "donation-error";
/// Preset buttons carry their amount in cents in `data-amount`
pub const AMOUNT_BUTTON_SELECTOR: &str = ".amount-btn";

pub struct DomDonationView {
    amount: Element,
    custom: HtmlInputElement,
    button: HtmlButtonElement,
    error: Element,
}

impl DomDonationView {
    pub fn from_document(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            amount: by_id(document, DONATION_AMOUNT_ID)?,
            custom: by_id(document, CUSTOM_AMOUNT_ID)?,
            button: by_id(document, DONATE_BUTTON_ID)?,
            error: by_id(document, DONATION_ERROR_ID)?,
        })
    }
}

impl DonationView for DomDonationView {
    fn show_amount(&mut self, formatted: &str) {
        self.amount.set_text_content(Some(formatted));
        set_visible(&self.error, false);
    }

    fn clear_custom_amount(&mut self) {
        self.custom.set_value("");
    }

    fn set_submitting(&mut self, submitting: bool) {
        self.button.set_disabled(submitting);
    }

    fn show_error(&mut self, message: &str) {
        self.error.set_text_content(Some(message));
        set_visible(&self.error, true);
    }

    fn redirect(&mut self, url: &str) {
        let result = web_sys::window()
            .ok_or_else(|| JsValue::from_str("No window"))
            .and_then(|w| w.location().set_href(url));
        if let Err(err) = result {
            log_error("Redirect failed", &err);
            self.button.set_disabled(false);
        }
    }
}

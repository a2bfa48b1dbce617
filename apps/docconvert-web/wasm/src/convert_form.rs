//! Conversion form wiring
//!
//! The submit handler reads the selection, then hands it to a spawned task
//! that validates, posts and applies the response. The controller is only
//! borrowed between awaits, never across one.

use std::cell::RefCell;
use std::rc::Rc;

use docconvert_core::{ConversionKind, Transport, UploadController};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlFormElement, HtmlInputElement};

use crate::dom::{self, DomUploadView, FormIds};
use crate::fetch::FetchTransport;
use crate::files::selected_files;

struct ConvertForm {
    controller: Rc<RefCell<UploadController<DomUploadView>>>,
    input: HtmlInputElement,
    pages: Option<(HtmlInputElement, HtmlInputElement)>,
}

impl ConvertForm {
    fn on_submit(&self, event: Event) {
        event.prevent_default();

        let files = selected_files(&self.input);
        let pages = self
            .pages
            .as_ref()
            .map(|(start, end)| (start.value(), end.value()));
        let controller = Rc::clone(&self.controller);

        spawn_local(async move {
            let fields = pages.as_ref().map(|(s, e)| (s.as_str(), e.as_str()));
            let begun = controller.borrow_mut().begin(&files, fields);
            let Ok((ticket, form)) = begun else {
                return;
            };

            let endpoint = controller.borrow().kind().endpoint();
            let outcome = FetchTransport.post_form(endpoint, form).await;

            if let Some(Err(err)) = controller.borrow_mut().finish(ticket, outcome) {
                web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
            }
        });
    }
}

/// Attach a conversion controller to its form
pub fn mount(kind: ConversionKind) -> Result<(), JsValue> {
    let document = dom::document()?;
    let ids = FormIds::for_kind(kind);

    let form: HtmlFormElement = dom::by_id(&document, &ids.form)?;
    let view = DomUploadView::from_ids(&document, &ids)?;
    let pages = match &ids.pages {
        Some((start, end)) => Some((dom::by_id(&document, start)?, dom::by_id(&document, end)?)),
        None => None,
    };

    let state = ConvertForm {
        controller: Rc::new(RefCell::new(UploadController::new(kind, view))),
        input: dom::by_id(&document, &ids.input)?,
        pages,
    };

    dom::listen(&form, "submit", move |event: Event| state.on_submit(event))
}

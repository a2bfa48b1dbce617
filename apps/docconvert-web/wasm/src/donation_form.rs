//! Donation form wiring

use std::cell::RefCell;
use std::rc::Rc;

use docconvert_core::protocol::endpoints;
use docconvert_core::{DonationController, Transport, TransportError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlElement, HtmlInputElement};

use crate::dom::{
    self, listen, DomDonationView, AMOUNT_BUTTON_SELECTOR, CUSTOM_AMOUNT_ID, DONATE_BUTTON_ID,
};
use crate::fetch::FetchTransport;

const SELECTED: &str = "selected";

type Controller = Rc<RefCell<DonationController<DomDonationView>>>;

/// Attach the donation controller to the amount buttons, the custom amount
/// field and the donate button
pub fn mount() -> Result<(), JsValue> {
    let document = dom::document()?;
    let controller: Controller = Rc::new(RefCell::new(DonationController::new(
        DomDonationView::from_document(&document)?,
    )));

    let buttons = amount_buttons(&document)?;
    for button in &buttons {
        let Some(cents) = preset_cents(button) else {
            continue;
        };
        let controller = Rc::clone(&controller);
        let all = buttons.clone();
        listen(button, "click", move |event: Event| {
            event.prevent_default();
            controller.borrow_mut().select_amount(cents);
            let pressed = event
                .current_target()
                .and_then(|t| t.dyn_into::<Element>().ok());
            mark_selected(&all, pressed.as_ref());
        })?;
    }

    // Keystrokes only preview; errors wait until the field is committed
    let custom: HtmlInputElement = dom::by_id(&document, CUSTOM_AMOUNT_ID)?;
    {
        let controller = Rc::clone(&controller);
        let all = buttons.clone();
        listen(&custom, "input", move |event: Event| {
            let Some(raw) = input_value(&event) else {
                return;
            };
            if controller.borrow_mut().preview_custom_amount(&raw).is_some() {
                mark_selected(&all, None);
            }
        })?;
    }
    {
        let controller = Rc::clone(&controller);
        let all = buttons.clone();
        listen(&custom, "change", move |event: Event| {
            let Some(raw) = input_value(&event) else {
                return;
            };
            if controller.borrow_mut().select_custom_amount(&raw).is_ok() {
                mark_selected(&all, None);
            }
        })?;
    }

    let donate: HtmlElement = dom::by_id(&document, DONATE_BUTTON_ID)?;
    listen(&donate, "click", move |event: Event| {
        event.prevent_default();
        let controller = Rc::clone(&controller);
        spawn_local(donate_flow(controller));
    })?;

    Ok(())
}

async fn donate_flow(controller: Controller) {
    let prepared = controller.borrow_mut().prepare_checkout();
    let Ok(request) = prepared else {
        return;
    };

    let outcome = match serde_json::to_value(request) {
        Ok(body) => {
            FetchTransport
                .post_json(endpoints::CREATE_CHECKOUT_SESSION, body)
                .await
        }
        Err(e) => Err(TransportError(e.to_string())),
    };

    if let Err(err) = controller.borrow_mut().complete_checkout(outcome) {
        web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    }
}

/// Non-empty value of the input that fired `event`
fn input_value(event: &Event) -> Option<String> {
    let input = event.target()?.dyn_into::<HtmlInputElement>().ok()?;
    let raw = input.value();
    (!raw.trim().is_empty()).then_some(raw)
}

fn amount_buttons(document: &web_sys::Document) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(AMOUNT_BUTTON_SELECTOR)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn preset_cents(button: &Element) -> Option<u32> {
    button.get_attribute("data-amount")?.trim().parse().ok()
}

fn mark_selected(buttons: &[Element], pressed: Option<&Element>) {
    for button in buttons {
        let classes = button.class_list();
        let result = if pressed == Some(button) {
            classes.add_1(SELECTED)
        } else {
            classes.remove_1(SELECTED)
        };
        if let Err(err) = result {
            dom::log_error("Could not update amount buttons", &err);
        }
    }
}

//! Live input filtering
//!
//! Strips the first occurrence of each denylisted pattern as the user types.
//! This only tidies the field; anything displayed still goes in as text.

use docconvert_core::strip_injection_patterns;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement};

use crate::dom;

/// Attach the filter to an input's `input` event
#[wasm_bindgen(js_name = preventCodeInjection)]
pub fn prevent_code_injection(input: &HtmlInputElement) -> Result<(), JsValue> {
    dom::listen(input, "input", on_input)
}

fn on_input(event: Event) {
    let Some(input) = event
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };

    let value = input.value();
    let cleaned = strip_injection_patterns(&value);
    if cleaned != value {
        input.set_value(&cleaned);
    }
}

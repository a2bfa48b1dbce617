//! Donation amount selection and checkout
//!
//! The selected amount lives in the controller, in cents. Checkout posts the
//! amount to the server, which answers with a hosted checkout URL the page
//! redirects to.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_DONATION_CENTS, MIN_DONATION_CENTS};
use crate::error::{ClientError, TransportError, ValidationError};
use crate::protocol::{endpoints, CheckoutRequest, CheckoutResponse, StripeConfigResponse};
use crate::transport::{decode, Transport};
use crate::validator::validate_donation_amount;

/// Where the donation form shows its state
pub trait DonationView {
    fn show_amount(&mut self, formatted: &str);
    fn clear_custom_amount(&mut self);
    /// Disable or re-enable the donate button
    fn set_submitting(&mut self, submitting: bool);
    fn show_error(&mut self, message: &str);
    /// Leave the page for `url`
    fn redirect(&mut self, url: &str);
}

pub struct DonationController<V> {
    selected_amount_cents: u32,
    view: V,
}

impl<V: DonationView> DonationController<V> {
    pub fn new(view: V) -> Self {
        Self {
            selected_amount_cents: DEFAULT_DONATION_CENTS,
            view,
        }
    }

    pub fn selected_amount_cents(&self) -> u32 {
        self.selected_amount_cents
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// A preset amount button was pressed
    pub fn select_amount(&mut self, cents: u32) {
        self.selected_amount_cents = cents;
        self.view.clear_custom_amount();
        self.view.show_amount(&format_amount(cents));
    }

    /// The custom amount field changed; `raw` is in dollars
    ///
    /// A rejected value leaves the previous selection in place and is reported
    /// on the view.
    pub fn select_custom_amount(&mut self, raw: &str) -> Result<u32, ValidationError> {
        match parse_dollars(raw) {
            Ok(cents) => {
                self.selected_amount_cents = cents;
                self.view.show_amount(&format_amount(cents));
                Ok(cents)
            }
            Err(err) => {
                debug!(raw, error = %err, "Custom amount rejected");
                self.view.show_error(err.message());
                Err(err)
            }
        }
    }

    /// Live update while the custom amount is being typed
    ///
    /// Applies a valid amount like [`select_custom_amount`](Self::select_custom_amount)
    /// but stays silent on anything else, so a partly typed `0.5` shows no error.
    pub fn preview_custom_amount(&mut self, raw: &str) -> Option<u32> {
        let cents = parse_dollars(raw).ok()?;
        self.selected_amount_cents = cents;
        self.view.show_amount(&format_amount(cents));
        Some(cents)
    }

    /// Validate the selection and disable the form for submission
    pub fn prepare_checkout(&mut self) -> Result<CheckoutRequest, ValidationError> {
        let amount = validate_donation_amount(self.selected_amount_cents).map_err(|err| {
            self.view.show_error(err.message());
            err
        })?;

        self.view.set_submitting(true);
        info!(amount, "Creating checkout session");
        Ok(CheckoutRequest { amount })
    }

    /// Redirect on success; otherwise show the error and re-enable the form
    pub fn complete_checkout(
        &mut self,
        outcome: Result<Value, TransportError>,
    ) -> Result<String, ClientError> {
        let result = outcome
            .and_then(decode::<CheckoutResponse>)
            .map_err(ClientError::from)
            .and_then(CheckoutResponse::into_redirect);

        match &result {
            Ok(url) => self.view.redirect(url),
            Err(err) => {
                warn!(error = %err, "Checkout session failed");
                self.view.show_error(&err.to_string());
                self.view.set_submitting(false);
            }
        }

        result
    }

    pub async fn handle_donate<T: Transport>(
        &mut self,
        transport: &T,
    ) -> Result<String, ClientError> {
        let request = self.prepare_checkout()?;
        let outcome = match serde_json::to_value(request) {
            Ok(body) => {
                transport
                    .post_json(endpoints::CREATE_CHECKOUT_SESSION, body)
                    .await
            }
            Err(e) => Err(TransportError(e.to_string())),
        };
        self.complete_checkout(outcome)
    }
}

/// Publishable key for the checkout widget
pub async fn fetch_public_key<T: Transport>(transport: &T) -> Result<String, ClientError> {
    let body = transport.get_json(endpoints::STRIPE_CONFIG).await?;
    decode::<StripeConfigResponse>(body)?
        .public_key
        .filter(|key| !key.is_empty())
        .ok_or_else(|| ClientError::Business("Stripe no está configurado".to_string()))
}

/// Parse a dollar amount typed by the user into cents
fn parse_dollars(raw: &str) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();

    let dollars: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::new("Monto inválido"))?;

    if !dollars.is_finite() {
        return Err(ValidationError::new("Monto inválido"));
    }
    // The minimum applies to the typed amount, not the rounded cents
    if dollars < f64::from(MIN_DONATION_CENTS) / 100.0 {
        return Err(ValidationError::new("El monto mínimo es $0.50"));
    }

    validate_donation_amount((dollars * 100.0).round())
}

/// `$1,234.56` style display of an amount in cents
pub fn format_amount(cents: u32) -> String {
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${}.{:02}", grouped, cents % 100)
}

//! Page panels as plain state, the way the DOM would show them

use docconvert_core::{DonationView, UploadView};

#[derive(Debug, Default)]
pub struct Panels {
    pub loading: bool,
    pub success: Option<(String, String)>,
    pub error: Option<String>,
    pub amount: Option<String>,
    pub custom_amount_cleared: bool,
    pub submit_disabled: bool,
    pub redirected_to: Option<String>,
}

impl UploadView for Panels {
    fn show_loading(&mut self) {
        self.loading = true;
    }

    fn hide_loading(&mut self) {
        self.loading = false;
    }

    fn clear_panels(&mut self) {
        self.success = None;
        self.error = None;
    }

    fn show_success(&mut self, message: &str, download_url: &str) {
        self.success = Some((message.to_string(), download_url.to_string()));
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}

impl DonationView for Panels {
    fn show_amount(&mut self, formatted: &str) {
        self.amount = Some(formatted.to_string());
    }

    fn clear_custom_amount(&mut self) {
        self.custom_amount_cleared = true;
    }

    fn set_submitting(&mut self, submitting: bool) {
        self.submit_disabled = submitting;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn redirect(&mut self, url: &str) {
        self.redirected_to = Some(url.to_string());
    }
}

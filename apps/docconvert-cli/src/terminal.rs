//! Views that print to a terminal
//!
//! Errors are only logged here; `main` reports them once through `anyhow`.

use docconvert_core::{DonationView, UploadView};
use std::io::Write;
use tracing::{debug, info, warn};

pub struct TerminalView<W: Write> {
    out: W,
    base_url: String,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, base_url: impl Into<String>) -> Self {
        Self {
            out,
            base_url: base_url.into(),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!(error = %e, "Failed to write output");
        }
    }
}

/// Join a server-relative path to the origin; absolute URLs pass through
pub fn absolute_url(base_url: &str, path: &str) -> String {
    let lower = path.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        path.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl<W: Write> UploadView for TerminalView<W> {
    fn show_loading(&mut self) {
        info!("Procesando...");
    }

    fn hide_loading(&mut self) {}

    fn clear_panels(&mut self) {}

    fn show_success(&mut self, message: &str, download_url: &str) {
        let url = absolute_url(&self.base_url, download_url);
        self.line(message);
        self.line(&url);
    }

    fn show_error(&mut self, message: &str) {
        debug!(error = message, "Error reported to caller");
    }
}

impl<W: Write> DonationView for TerminalView<W> {
    fn show_amount(&mut self, formatted: &str) {
        self.line(&format!("Monto: {}", formatted));
    }

    fn clear_custom_amount(&mut self) {}

    fn set_submitting(&mut self, submitting: bool) {
        if submitting {
            info!("Creando sesión de pago...");
        }
    }

    fn show_error(&mut self, message: &str) {
        debug!(error = message, "Error reported to caller");
    }

    fn redirect(&mut self, url: &str) {
        self.line(url);
    }
}

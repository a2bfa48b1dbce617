//! Page range fields of the split form
//!
//! The server clamps out-of-range pages to the document, so only the shape of
//! the range is checked here: two positive integers with `start <= end`.

use serde::Serialize;

use crate::error::ValidationError;

/// Inclusive, 1-indexed page range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    /// Parse the raw `start_page` / `end_page` field values
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() || end.is_empty() {
            return Err(ValidationError::new(
                "Por favor ingresa la página inicial y la página final",
            ));
        }

        let start = parse_page(start)?;
        let end = parse_page(end)?;

        if start > end {
            return Err(ValidationError::new(format!(
                "La página inicial ({}) no puede ser mayor que la final ({})",
                start, end
            )));
        }

        Ok(Self { start, end })
    }

    /// Number of pages the range covers
    pub fn page_count(&self) -> u32 {
        self.end - self.start + 1
    }
}

fn parse_page(raw: &str) -> Result<u32, ValidationError> {
    let page: u32 = raw
        .parse()
        .map_err(|_| ValidationError::new(format!("Número de página inválido: {}", raw)))?;

    if page == 0 {
        return Err(ValidationError::new(
            "Los números de página deben ser mayores o iguales a 1",
        ));
    }

    Ok(page)
}

//! Upload and donation validation
//!
//! Every check is pure and synchronous and returns a `Result`; nothing panics.
//! List validation is fail-fast: the first failing file's error is returned
//! verbatim, and the total size is only checked once every file has passed.

use crate::config::{
    ALLOWED_IMAGE_EXTENSIONS, ALLOWED_IMAGE_TYPES, ALLOWED_PDF_EXTENSION, ALLOWED_PDF_TYPE,
    MAX_DONATION_CENTS, MAX_FILES, MAX_FILE_SIZE, MAX_TOTAL_SIZE, MIN_DONATION_CENTS, MIN_FILES,
};
use crate::error::ValidationError;
use crate::file::{format_bytes, SelectedFile};
use crate::sanitize::get_file_extension;

/// A selection that passed every check
#[derive(Debug)]
pub struct ValidatedFiles<'a, F> {
    pub files: &'a [F],
    pub total_size: u64,
}

/// Rejects empty files and files above the single-file limit
pub fn validate_file_size<F: SelectedFile + ?Sized>(file: &F) -> Result<(), ValidationError> {
    let size = file.size();

    if size == 0 {
        return Err(ValidationError::new(format!(
            "El archivo {} está vacío",
            file.name()
        )));
    }

    if size > MAX_FILE_SIZE {
        return Err(ValidationError::new(format!(
            "El archivo {} ({}) excede el tamaño máximo de {}",
            file.name(),
            format_bytes(size),
            format_bytes(MAX_FILE_SIZE)
        )));
    }

    Ok(())
}

/// Both the declared MIME type and the extension must be an accepted image kind
pub fn validate_image_file<F: SelectedFile + ?Sized>(file: &F) -> Result<(), ValidationError> {
    let mime = file.mime_type().to_ascii_lowercase();
    let extension = get_file_extension(&file.name());

    let mime_ok = ALLOWED_IMAGE_TYPES.contains(&mime.as_str());
    let extension_ok = ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str());

    if !(mime_ok && extension_ok) {
        return Err(ValidationError::new(format!(
            "Formato no permitido: {}. Solo se aceptan imágenes PNG o JPG",
            file.name()
        )));
    }

    Ok(())
}

/// Both the declared MIME type and the extension must say PDF
pub fn validate_pdf_file<F: SelectedFile + ?Sized>(file: &F) -> Result<(), ValidationError> {
    let mime = file.mime_type().to_ascii_lowercase();
    let extension = get_file_extension(&file.name());

    if mime != ALLOWED_PDF_TYPE || extension != ALLOWED_PDF_EXTENSION {
        return Err(ValidationError::new(format!(
            "Solo se permiten archivos PDF: {}",
            file.name()
        )));
    }

    Ok(())
}

pub fn validate_image_files<F: SelectedFile>(
    files: &[F],
) -> Result<ValidatedFiles<'_, F>, ValidationError> {
    validate_files(files, validate_image_file::<F>)
}

pub fn validate_pdf_files<F: SelectedFile>(
    files: &[F],
) -> Result<ValidatedFiles<'_, F>, ValidationError> {
    validate_files(files, validate_pdf_file::<F>)
}

fn validate_files<F, C>(
    files: &[F],
    check_type: C,
) -> Result<ValidatedFiles<'_, F>, ValidationError>
where
    F: SelectedFile,
    C: Fn(&F) -> Result<(), ValidationError>,
{
    if files.len() < MIN_FILES {
        return Err(ValidationError::new(format!(
            "Debes seleccionar al menos {} archivo",
            MIN_FILES
        )));
    }

    if files.len() > MAX_FILES {
        return Err(ValidationError::new(format!(
            "Puedes subir como máximo {} archivos (seleccionaste {})",
            MAX_FILES,
            files.len()
        )));
    }

    let mut total_size: u64 = 0;
    for file in files {
        validate_file_size(file)?;
        check_type(file)?;
        total_size = total_size.saturating_add(file.size());
    }

    if total_size > MAX_TOTAL_SIZE {
        return Err(ValidationError::new(format!(
            "El tamaño total ({}) excede el máximo de {}",
            format_bytes(total_size),
            format_bytes(MAX_TOTAL_SIZE)
        )));
    }

    Ok(ValidatedFiles { files, total_size })
}

/// Validate an amount in cents for a checkout session
///
/// Accepts anything convertible to `f64` so raw numeric input can be checked
/// before it is trusted as an integer.
pub fn validate_donation_amount(amount_cents: impl Into<f64>) -> Result<u32, ValidationError> {
    let amount = amount_cents.into();

    if !amount.is_finite() || amount.fract() != 0.0 {
        return Err(ValidationError::new("Monto inválido"));
    }

    if amount < f64::from(MIN_DONATION_CENTS) {
        return Err(ValidationError::new("El monto mínimo es $0.50"));
    }

    if amount > f64::from(MAX_DONATION_CENTS) {
        return Err(ValidationError::new("El monto máximo es $999,999.99"));
    }

    Ok(amount as u32)
}

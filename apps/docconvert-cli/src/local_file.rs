//! Files on disk as a selection
//!
//! Only the header is read up front. The declared type comes from the magic
//! bytes, so the extension check and the MIME check are independent.

use anyhow::Context;
use docconvert_core::file::{quick_check_pdf, MIME_PDF};
use docconvert_core::{sniff_mime, SelectedFile};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

const OCTET_STREAM: &str = "application/octet-stream";
const HEADER_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    size: u64,
    mime_type: String,
}

impl LocalFile {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let size = file
            .metadata()
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .len();

        let mut header = Vec::with_capacity(HEADER_LEN);
        file.by_ref()
            .take(HEADER_LEN as u64)
            .read_to_end(&mut header)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size,
            mime_type: sniff_mime(&header).unwrap_or(OCTET_STREAM).to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Structural check of a PDF that is small enough to upload
    ///
    /// Files that will be refused for their size or type are left to the
    /// validator, so nothing large is read here.
    pub fn check_pdf_structure(&self, max_size: u64) -> anyhow::Result<()> {
        if self.mime_type != MIME_PDF || self.size == 0 || self.size > max_size {
            return Ok(());
        }
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        quick_check_pdf(&self.name, &bytes)?;
        Ok(())
    }
}

impl SelectedFile for LocalFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }
}

//! Browser file selections

use docconvert_core::SelectedFile;
use web_sys::{File, FileList, HtmlInputElement};

/// A `File` from a file picker or drop
#[derive(Debug, Clone)]
pub struct BrowserFile(pub File);

impl SelectedFile for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }
}

pub fn files_from_list(list: &FileList) -> Vec<BrowserFile> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(BrowserFile)
        .collect()
}

/// Current selection of a file input, in picker order
pub fn selected_files(input: &HtmlInputElement) -> Vec<BrowserFile> {
    input
        .files()
        .map(|list| files_from_list(&list))
        .unwrap_or_default()
}

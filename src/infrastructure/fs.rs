//! File system listing

use crate::error::Result;
use walkdir::WalkDir;

/// Lists the candidate files under a dataset root.
pub trait PathLister {
    /// All files under `root`, recursively. A missing root is an error; an
    /// empty listing is a valid result the caller turns into `NoFilesFound`.
    fn list(&self, root: &str) -> Result<Vec<String>>;
}

/// Local-disk lister walking the root recursively in file-name order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileLister;

impl PathLister for LocalFileLister {
    fn list(&self, root: &str) -> Result<Vec<String>> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() {
                paths.push(entry.path().to_string_lossy().into_owned());
            }
        }
        Ok(paths)
    }
}

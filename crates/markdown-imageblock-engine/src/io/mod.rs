use relative_path::RelativePathBuf;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid document root: {0}")]
    InvalidRoot(String),
}

/// Read a markdown file by path
pub fn read_path(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Scan for markdown files under `root`, sorted
pub fn scan_markdown_files(root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !root.is_dir() {
        return Err(IoError::InvalidRoot(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut files = Vec::new();
    scan_directory_recursive(root, &mut files)?;
    files.sort();
    Ok(files)
}

/// The identity a document contributes to block ids.
///
/// Paths under `root` become forward-slash relative paths so ids are stable
/// across machines and platforms; anything else is used as given.
pub fn document_label(path: &Path, root: Option<&Path>) -> String {
    root.and_then(|root| path.strip_prefix(root).ok())
        .and_then(|rel| RelativePathBuf::from_path(rel).ok())
        .map(|rel| rel.normalize().into_string())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

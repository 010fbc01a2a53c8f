use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{KoseiError, Result};

/// Plain-text style reference files on disk.
///
/// The library is a flat folder of `.txt` files. Listing creates the folder
/// if it does not exist, so a fresh install starts with an empty library
/// rather than an error.
#[derive(Debug, Clone)]
pub struct ReferenceLibrary {
    folder: PathBuf,
}

impl ReferenceLibrary {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// List reference file names, sorted. Non-`.txt` entries are skipped.
    pub fn list(&self) -> Result<Vec<String>> {
        std::fs::create_dir_all(&self.folder)?;
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.folder)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        debug!("Listed {} reference files in {}", names.len(), self.folder.display());
        Ok(names)
    }

    /// Read one reference file by name.
    ///
    /// The name must be a bare file name as returned by [`list`](Self::list);
    /// path separators and parent references are rejected.
    pub fn read(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(KoseiError::Reference(
                "reference file name is empty".to_string(),
            ));
        }
        // A bare file name resolves to itself; anything with separators,
        // parent references, or a drive prefix does not. Backslash and colon
        // are checked explicitly so Windows-style names are rejected on
        // every platform.
        let is_bare = Path::new(name)
            .file_name()
            .map(|n| n == name)
            .unwrap_or(false);
        if !is_bare || name.contains('\\') || name.contains(':') {
            return Err(KoseiError::Reference(format!(
                "invalid reference file name: {name}"
            )));
        }
        let path = self.folder.join(name);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            KoseiError::Reference(format!("failed to read {}: {e}", path.display()))
        })?;
        info!("Loaded reference file {}", path.display());
        Ok(content)
    }
}

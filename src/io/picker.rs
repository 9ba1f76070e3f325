use std::path::{Path, PathBuf};

/// One asset returned by an image picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedAsset {
    pub uri: String,
}

/// Error type for image pickers
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    #[error("no such file: {0}")]
    Missing(PathBuf),
    #[error("{path} is not a file")]
    NotAFile { path: PathBuf },
    #[error("could not resolve {path}: {source}")]
    Resolve {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Source of a device image for a task.
///
/// `Ok(None)` and `Ok(Some(vec![]))` both mean the user made no selection.
/// When several assets come back only the first is used.
pub trait ImagePicker {
    fn pick(&mut self) -> Result<Option<Vec<PickedAsset>>, PickerError>;
}

/// Picks the image at a path the user typed.
///
/// A blank path is "no selection". The file is not inspected beyond checking
/// it exists; any file type is accepted.
#[derive(Debug, Clone)]
pub struct PathPicker {
    input: String,
    base: PathBuf,
}

impl PathPicker {
    /// Resolve `input` relative to the current directory
    pub fn new(input: impl Into<String>) -> Self {
        PathPicker {
            input: input.into(),
            base: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Resolve `input` relative to `base`
    pub fn relative_to(input: impl Into<String>, base: &Path) -> Self {
        PathPicker {
            input: input.into(),
            base: base.to_path_buf(),
        }
    }
}

impl ImagePicker for PathPicker {
    fn pick(&mut self) -> Result<Option<Vec<PickedAsset>>, PickerError> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let path = self.base.join(trimmed);
        if !path.exists() {
            return Err(PickerError::Missing(path));
        }
        if !path.is_file() {
            return Err(PickerError::NotAFile { path });
        }
        let canonical = path
            .canonicalize()
            .map_err(|source| PickerError::Resolve { path, source })?;
        Ok(Some(vec![PickedAsset {
            uri: file_uri(&canonical),
        }]))
    }
}

/// `file://` URI for an absolute path
pub fn file_uri(path: &Path) -> String {
    let display = path.to_string_lossy().replace('\\', "/");
    if display.starts_with('/') {
        format!("file://{}", display)
    } else {
        format!("file:///{}", display)
    }
}

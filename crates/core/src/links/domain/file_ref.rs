use std::path::{Path, PathBuf};

/// Handle to a file returned by a link resolver.
///
/// `path` is the store-relative, `/`-separated path shown to users.
/// `absolute` is only present when the store is a plain local filesystem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRef {
    pub path: String,
    absolute: Option<PathBuf>,
}

impl FileRef {
    pub fn local(path: impl Into<String>, absolute: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            absolute: Some(absolute.into()),
        }
    }

    /// A file that exists in the store but has no local filesystem location.
    pub fn remote(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            absolute: None,
        }
    }

    pub fn absolute_path(&self) -> Option<&Path> {
        self.absolute.as_deref()
    }
}

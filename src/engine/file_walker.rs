//! File discovery
//!
//! Enumerates every regular file under a project root. The walker applies no
//! filtering of its own: hidden files are included and VCS ignore files are not
//! consulted, since exclusion is the job of [`crate::engine::path_filter`].

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file walking
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("'{}' is not a readable directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Iterator source over the regular files below a root
pub struct FileWalker {
    walker: ignore::Walk,
}

impl FileWalker {
    /// Creates a new FileWalker rooted at `root`
    ///
    /// # Errors
    ///
    /// Returns `FileWalkerError::NotADirectory` if `root` is not a directory,
    /// and `FileWalkerError::Io` if it cannot be read.
    pub fn new(root: &Path) -> Result<Self, FileWalkerError> {
        let metadata = std::fs::metadata(root)?;
        if !metadata.is_dir() {
            return Err(FileWalkerError::NotADirectory(root.to_path_buf()));
        }
        // Surface permission problems up front rather than as a walk error.
        drop(std::fs::read_dir(root)?);

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        Ok(Self { walker })
    }

    /// Walks the directory tree and returns an iterator over regular files
    ///
    /// Entries are yielded in a stable order: depth first, siblings sorted by
    /// file name.
    pub fn walk(self) -> impl Iterator<Item = Result<PathBuf, FileWalkerError>> {
        self.walker.filter_map(|result| match result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file()) {
                    Some(Ok(entry.into_path()))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(FileWalkerError::Walk(e))),
        })
    }
}

/// Collects all regular files under `root`
///
/// # Errors
///
/// Fails if the root is not an accessible directory or an entry cannot be read.
pub fn discover_files(root: &Path) -> Result<Vec<PathBuf>, FileWalkerError> {
    FileWalker::new(root)?.walk().collect()
}

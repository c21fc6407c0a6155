//! Error types for the academic_report crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`ReportError`].
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that abort staging or report generation.
///
/// Missing diagram sources and missing staged images are not errors; they are skipped or
/// rendered as placeholders respectively.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Copying an existing source image into the working directory failed.
    #[error("failed to stage {} into {}", .source_path.display(), .destination.display())]
    Stage {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        error: io::Error,
    },

    /// No usable font family could be loaded.
    #[error("failed to load fonts: {0}")]
    FontLoad(#[source] genpdf::error::Error),

    /// The layout engine failed while building or rendering the document.
    #[error("failed to render PDF: {0}")]
    Render(#[from] genpdf::error::Error),

    /// Writing the rendered PDF to disk failed.
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    /// An asset override did not follow the `NAME=PATH` form.
    #[error("invalid asset mapping `{0}`; expected NAME=PATH")]
    InvalidAssetMapping(String),

    /// An asset override named a file that is not one of the report figures.
    #[error("unknown asset `{0}`; expected one of the report figure file names")]
    UnknownAsset(String),

    /// Adding the chapter outline to the rendered PDF failed.
    #[cfg(feature = "bookmarks")]
    #[error(transparent)]
    Bookmarks(#[from] crate::bookmarks::BookmarkError),
}

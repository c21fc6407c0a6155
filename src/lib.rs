//! Core entry point for the academic_report crate.
//!
//! The crate stages a fixed set of diagram images into a working directory and renders the
//! mini-project report (cover, table of contents, nine chapters) to a single PDF file.

pub mod builder;
pub mod config;
pub mod content;
pub mod elements;
pub mod encoding;
pub mod error;
pub mod fonts;
pub mod model;
pub mod report;
pub mod richtext;
pub mod staging;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use config::{AssetMapping, ReportConfig};
pub use error::{ReportError, Result};
pub use report::generate_report;
pub use staging::{stage_assets, StagingReport};

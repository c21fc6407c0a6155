//! Copies the report figures into the working directory.
//!
//! A source that does not exist is skipped without error so the report can still be generated
//! with placeholders. Any other copy failure aborts the run.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::config::AssetMapping;
use crate::error::{ReportError, Result};

/// Which figures were copied and which were skipped because their source was absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StagingReport {
    pub copied: Vec<String>,
    pub skipped: Vec<String>,
}

/// Copies every existing asset source to `work_dir/<name>`, overwriting previous copies.
pub fn stage_assets(work_dir: &Path, assets: &[AssetMapping]) -> Result<StagingReport> {
    let mut report = StagingReport::default();

    for asset in assets {
        let destination = work_dir.join(asset.name());
        if !asset.source().exists() {
            debug!(
                "Skipping {}: source {} not found",
                asset.name(),
                asset.source().display()
            );
            report.skipped.push(asset.name().to_string());
            continue;
        }

        fs::copy(asset.source(), &destination).map_err(|error| ReportError::Stage {
            source_path: asset.source().to_path_buf(),
            destination: destination.clone(),
            error,
        })?;
        info!(
            "Staged {} from {}",
            destination.display(),
            asset.source().display()
        );
        report.copied.push(asset.name().to_string());
    }

    Ok(report)
}

//! Run configuration: where to work, where to write, and where each figure comes from.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::content;
use crate::error::{ReportError, Result};

/// File name of the generated report, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "Rapport_Mini_Projet_Spring_Boot.pdf";

/// A figure file name in the working directory and the path it is staged from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetMapping {
    name: String,
    source: PathBuf,
}

impl AssetMapping {
    /// Creates a mapping staging `source` as `name`.
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Destination file name in the working directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source path copied from.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl FromStr for AssetMapping {
    type Err = ReportError;

    /// Parses `NAME=PATH`, splitting on the first `=`.
    fn from_str(value: &str) -> Result<Self> {
        match value.split_once('=') {
            Some((name, source)) if !name.trim().is_empty() && !source.is_empty() => {
                Ok(Self::new(name.trim(), source))
            }
            _ => Err(ReportError::InvalidAssetMapping(value.to_string())),
        }
    }
}

/// Everything a run needs to know about the filesystem.
///
/// The default reproduces the fixed behaviour: work in the current directory, write
/// [`DEFAULT_OUTPUT_FILE`], and stage the five figures from their authoring-environment paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    work_dir: PathBuf,
    output_file: PathBuf,
    assets: Vec<AssetMapping>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            assets: content::default_asset_mappings(),
        }
    }
}

impl ReportConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory receiving staged figures and the output file.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Output file, relative to the working directory unless absolute.
    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Figure mappings in staging order.
    pub fn assets(&self) -> &[AssetMapping] {
        &self.assets
    }

    /// Resolved path of the generated PDF.
    pub fn output_path(&self) -> PathBuf {
        self.work_dir.join(&self.output_file)
    }

    /// Resolved path a figure is staged to and read from.
    pub fn staged_path(&self, name: &str) -> PathBuf {
        self.work_dir.join(name)
    }

    /// Sets the working directory and returns the updated configuration.
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    /// Sets the output file and returns the updated configuration.
    pub fn with_output_file(mut self, output_file: impl Into<PathBuf>) -> Self {
        self.output_file = output_file.into();
        self
    }

    /// Replaces the source of one figure. Fails for names that are not report figures.
    pub fn with_asset_override(mut self, mapping: AssetMapping) -> Result<Self> {
        let entry = self
            .assets
            .iter_mut()
            .find(|existing| existing.name == mapping.name)
            .ok_or_else(|| ReportError::UnknownAsset(mapping.name.clone()))?;
        *entry = mapping;
        Ok(self)
    }

    /// Looks every figure up by its file name inside `dir`.
    pub fn with_source_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        for asset in &mut self.assets {
            asset.source = dir.join(&asset.name);
        }
        self
    }
}

//! Font loading utilities for the academic_report crate.
//!
//! The report is emitted with the builtin PDF Helvetica family, so no font is embedded in the
//! output. `genpdf` still needs TrueType files to measure text; Liberation Sans is used because
//! it is metric-compatible with Helvetica. Arial from a Windows installation is the fallback.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, Builtin, FontData, FontFamily};
use log::{debug, warn};

/// Name of the metric font family searched for in the font directories.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "LiberationSans";

/// Environment variable naming an explicit font directory.
pub const FONTS_DIR_ENV: &str = "REPORT_FONTS_DIR";

/// Environment variable naming the Windows fonts directory used for the Arial fallback.
pub const WINDOWS_FONTS_DIR_ENV: &str = "REPORT_WINDOWS_FONTS_DIR";

const FONT_FILES: &[&str] = &[
    "LiberationSans-Regular.ttf",
    "LiberationSans-Bold.ttf",
    "LiberationSans-Italic.ttf",
    "LiberationSans-BoldItalic.ttf",
];

const SYSTEM_FONT_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation",
    "/usr/local/share/fonts/liberation",
];

const WINDOWS_FALLBACK_FAMILY_NAME: &str = "Arial";

struct WindowsFontFiles {
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

const WINDOWS_FONT_FILES: WindowsFontFiles = WindowsFontFiles {
    regular: "arial.ttf",
    bold: "arialbd.ttf",
    italic: "ariali.ttf",
    bold_italic: "arialbi.ttf",
};

/// Directory holding fonts shipped next to the crate manifest.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn push_unique(candidates: &mut Vec<PathBuf>, candidate: PathBuf) {
    if !candidates.iter().any(|existing| existing == &candidate) {
        candidates.push(candidate);
    }
}

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        candidates.push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push_unique(&mut candidates, bin_dir.join("assets/fonts"));
        }
    }

    push_unique(&mut candidates, bundled_fonts_source_dir());

    for directory in SYSTEM_FONT_DIRECTORIES {
        push_unique(&mut candidates, PathBuf::from(directory));
    }

    candidates
}

fn missing_font_files(path: &Path) -> Vec<PathBuf> {
    FONT_FILES
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

fn resolve_font_directory() -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        let exists = candidate.is_dir();
        let missing = missing_font_files(&candidate);

        if exists && missing.is_empty() {
            debug!("Using metric fonts from {}", candidate.display());
            return Ok(candidate);
        }

        let reason = if !exists {
            format!("directory missing at {}", candidate.display())
        } else {
            let missing_list = missing
                .iter()
                .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
                .collect::<Vec<_>>()
                .join(", ");
            format!("missing files [{}]", missing_list)
        };

        attempts.push(format!("{} ({})", candidate.display(), reason));
    }

    Err(Error::new(
        format!(
            "Unable to locate the {} font family. Checked: {}. Install Liberation Sans or set {}.",
            DEFAULT_FONT_FAMILY_NAME,
            attempts.join(", "),
            FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "metric fonts directory not found"),
    ))
}

fn load_metric_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory()?;

    fonts::from_files(&directory, DEFAULT_FONT_FAMILY_NAME, Some(Builtin::Helvetica)).map_err(
        |err| {
            Error::new(
                format!(
                    "Failed to load font family '{}' from {}: {}",
                    DEFAULT_FONT_FAMILY_NAME,
                    directory.display(),
                    err
                ),
                io::Error::new(io::ErrorKind::Other, err.to_string()),
            )
        },
    )
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn windows_font_directory() -> Option<PathBuf> {
    if let Some(path) = env_path(WINDOWS_FONTS_DIR_ENV) {
        return Some(path);
    }

    #[cfg(windows)]
    {
        for var in ["WINDIR", "SystemRoot"] {
            if let Some(root) = env_path(var) {
                let candidate = root.join("Fonts");
                if candidate.is_dir() {
                    return Some(candidate);
                }
            }
        }
    }

    None
}

fn load_windows_font(
    directory: &Path,
    file: &str,
    builtin: printpdf::BuiltinFont,
    style: &str,
) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, Some(builtin)).map_err(|err| {
        let io_kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!(
                "Failed to load Windows fallback {} font at {}: {}",
                style,
                path.display(),
                err
            ),
            io::Error::new(io_kind, err.to_string()),
        )
    })
}

fn windows_fallback_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = windows_font_directory().ok_or_else(|| {
        Error::new(
            "Windows font directory not found for fallback",
            io::Error::new(io::ErrorKind::NotFound, "windows fonts directory not found"),
        )
    })?;

    use printpdf::BuiltinFont::{
        Helvetica, HelveticaBold, HelveticaBoldOblique, HelveticaOblique,
    };

    Ok(FontFamily {
        regular: load_windows_font(&directory, WINDOWS_FONT_FILES.regular, Helvetica, "regular")?,
        bold: load_windows_font(&directory, WINDOWS_FONT_FILES.bold, HelveticaBold, "bold")?,
        italic: load_windows_font(
            &directory,
            WINDOWS_FONT_FILES.italic,
            HelveticaOblique,
            "italic",
        )?,
        bold_italic: load_windows_font(
            &directory,
            WINDOWS_FONT_FILES.bold_italic,
            HelveticaBoldOblique,
            "bold italic",
        )?,
    })
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Returns the Liberation Sans metric family mapped onto builtin Helvetica, falling back to the
/// Windows Arial family when Liberation Sans cannot be found.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    match load_metric_font_family() {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => match windows_fallback_font_family() {
            Ok(fallback) => {
                warn!(
                    "Metric fonts unavailable ({}); falling back to Windows '{}' family.",
                    err, WINDOWS_FALLBACK_FAMILY_NAME
                );
                Ok(fallback)
            }
            Err(fallback_err) => {
                warn!(
                    "Metric fonts unavailable ({}); Windows fallback failed: {}",
                    err, fallback_err
                );
                Err(Error::new(
                    format!(
                        "Metric fonts unavailable and Windows fallback failed: {}",
                        fallback_err
                    ),
                    io::Error::new(io::ErrorKind::NotFound, "default fonts are not available"),
                ))
            }
        },
        Err(err) => Err(err),
    }
}

/// Indicates whether a font family for rendering can be found on this machine.
pub fn default_fonts_available() -> bool {
    resolve_font_directory().is_ok()
        || windows_font_directory()
            .map(|directory| directory.join(WINDOWS_FONT_FILES.regular).is_file())
            .unwrap_or(false)
}

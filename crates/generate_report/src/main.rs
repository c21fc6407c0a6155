use std::error::Error;
use std::path::PathBuf;

use academic_report::{generate_report, stage_assets, AssetMapping, ReportConfig};
use clap::Parser;
use log::info;

/// Stages the report diagrams and renders the mini-project report to PDF.
///
/// Without arguments the diagrams are copied from their default locations into the current
/// directory and `Rapport_Mini_Projet_Spring_Boot.pdf` is written there. Metric fonts are
/// looked up as described in the `academic_report::fonts` module (set `REPORT_FONTS_DIR` to
/// point at a directory holding the Liberation Sans files).
#[derive(Parser)]
#[command(author, version, about = "Generate the mini-project PDF report")]
struct Cli {
    /// Directory receiving the staged diagrams and the PDF.
    #[arg(long, value_name = "DIR", default_value = ".")]
    work_dir: PathBuf,

    /// Output file name, relative to the working directory.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Directory holding the diagrams under their report file names.
    #[arg(long, value_name = "DIR")]
    source_dir: Option<PathBuf>,

    /// Override the source of one diagram, e.g. `class_diagram.png=/tmp/classes.png`.
    #[arg(long = "asset", value_name = "NAME=PATH", value_parser = parse_asset)]
    assets: Vec<AssetMapping>,

    /// Render with whatever diagrams are already in the working directory.
    #[arg(long)]
    skip_staging: bool,
}

fn parse_asset(value: &str) -> Result<AssetMapping, String> {
    value.parse().map_err(|err: academic_report::ReportError| err.to_string())
}

impl Cli {
    fn into_config(self) -> Result<ReportConfig, Box<dyn Error>> {
        let mut config = ReportConfig::new().with_work_dir(self.work_dir);
        if let Some(output) = self.output {
            config = config.with_output_file(output);
        }
        if let Some(source_dir) = self.source_dir {
            config = config.with_source_dir(source_dir);
        }
        for mapping in self.assets {
            config = config.with_asset_override(mapping)?;
        }
        Ok(config)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let skip_staging = cli.skip_staging;

    let result = cli.into_config().and_then(|config| run(&config, skip_staging));

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run(config: &ReportConfig, skip_staging: bool) -> Result<(), Box<dyn Error>> {
    if skip_staging {
        info!("Staging skipped");
    } else {
        let staged = stage_assets(config.work_dir(), config.assets())?;
        info!(
            "Staged {} diagram(s), {} source(s) missing",
            staged.copied.len(),
            staged.skipped.len()
        );
    }

    generate_report(config)?;
    println!("PDF genere avec succes.");
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}

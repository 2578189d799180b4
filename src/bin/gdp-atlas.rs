use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Build a per-region GDP dataset with a language-model oracle and animate it on a map.
#[derive(Parser, Debug)]
#[command(name = "gdp-atlas", version)]
struct Cli {
    /// Run configuration JSON (camelCase keys); flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Full country name.
    #[arg(long)]
    country: Option<String>,

    /// First year to query.
    #[arg(long)]
    first_year: Option<i32>,

    /// Last year to query (inclusive, at most the oracle's knowledge cutoff).
    #[arg(long)]
    last_year: Option<i32>,

    /// Marker area, in square pixels, of the largest GDP value.
    #[arg(long)]
    max_marker_size: Option<u32>,

    /// World boundaries as a GeoJSON FeatureCollection. Without it the map has no borders.
    #[arg(long)]
    basemap: Option<PathBuf>,

    /// Parent directory of the run directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

impl Cli {
    fn run_config(&self) -> anyhow::Result<gdp_atlas::RunConfig> {
        let mut cfg = match &self.config {
            Some(path) => gdp_atlas::RunConfig::from_path(path)?,
            None => gdp_atlas::RunConfig::default(),
        };
        if let Some(country) = &self.country {
            cfg.country = country.clone();
        }
        if let Some(y) = self.first_year {
            cfg.first_year = y;
        }
        if let Some(y) = self.last_year {
            cfg.last_year = y;
        }
        if let Some(m) = self.max_marker_size {
            cfg.max_marker_size = m;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.run_config()?;

    dotenvy::dotenv().ok();
    let oracle = gdp_atlas::OpenAiOracle::from_env().context("configure oracle")?;

    let basemap = match &cli.basemap {
        Some(path) => gdp_atlas::Basemap::from_path(path)?,
        None => {
            tracing::warn!("no --basemap given; frames will have no boundaries");
            gdp_atlas::Basemap::empty()
        }
    };
    let renderer = gdp_atlas::FrameRenderer::new(
        gdp_atlas::pipeline::frame_style(&config),
        Arc::new(basemap),
    );

    let run_dir = gdp_atlas::RunDirectory::create_unique(&cli.out_dir, &config.country)?;
    eprintln!("all data for this run goes to {}", run_dir.path().display());

    let report = gdp_atlas::run(&config, &oracle, &renderer, &run_dir)?;

    for (year, reason) in &report.failed_years {
        eprintln!("{year}: FAIL ({reason})");
    }
    eprintln!(
        "{} of {} years rendered; wrote {}",
        report.years_with_data.len(),
        report.years_with_data.len() + report.failed_years.len(),
        report.animation.display()
    );
    Ok(())
}

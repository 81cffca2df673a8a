use std::process::ExitCode;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};

use galaxyview::constants::{Year, ANIMATION_MAX_END_YEAR, DEFAULT_SAMPLE_SIZE, TAP_TIMEOUT_SECS};
use galaxyview::display::CatalogSummary;
use galaxyview::env_state::GalaxyEnv;
use galaxyview::gaia_request::fetch_star_catalog_blocking;
use galaxyview::palette::Palette;
use galaxyview::views::DashboardViews;
use galaxyview::{DashboardConfig, GalaxyError, StarCatalog};

#[derive(Parser, Debug)]
#[command(name = "galaxyview", version)]
#[command(about = "Explore Gaia DR3 host stars in motion, space, and classification")]
struct Cli {
    /// Star sample size (100-5000)
    #[arg(short = 'n', long = "limit", default_value_t = DEFAULT_SAMPLE_SIZE)]
    limit: u32,

    /// Skip the proper motion animation
    #[arg(long = "no-motion")]
    no_motion: bool,

    /// Animate to year (2025-2125, by steps of 10)
    #[arg(long = "end-year", default_value_t = ANIMATION_MAX_END_YEAR)]
    end_year: Year,

    /// Color scheme: Viridis, Plasma or Cividis
    #[arg(long = "palette", default_value_t = Palette::Viridis)]
    palette: Palette,

    /// Directory receiving the view charts (SVG) and tables (CSV)
    #[arg(short = 'o', long = "output", default_value = "galaxyview_out")]
    output: Utf8PathBuf,

    /// TAP service to query [default: $GALAXYVIEW_TAP_URL or the Gaia archive]
    #[arg(long = "tap-url", value_name = "URL")]
    tap_url: Option<String>,

    /// Read the sample from a saved CSV instead of querying the archive,
    /// keeping its first `--limit` rows
    #[arg(long = "from-csv", value_name = "FILE")]
    from_csv: Option<Utf8PathBuf>,

    /// Digits printed in the summary table
    #[arg(long = "precision", default_value_t = 3)]
    precision: usize,

    /// Also save the fetched sample as CSV
    #[arg(long = "save-sample", value_name = "FILE")]
    save_sample: Option<Utf8PathBuf>,
}

impl Cli {
    fn dashboard_config(&self) -> DashboardConfig {
        DashboardConfig {
            sample_size: self.limit,
            show_motion: !self.no_motion,
            end_year: self.end_year,
            palette: self.palette,
        }
    }
}

fn load_catalog(cli: &Cli, config: &DashboardConfig) -> Result<StarCatalog, GalaxyError> {
    if let Some(path) = &cli.from_csv {
        info!("Loading sample from {path}");
        let catalog = StarCatalog::from_csv_path(path)?;
        return Ok(catalog.truncated(config.sample_size as usize));
    }

    let env = match &cli.tap_url {
        Some(url) => GalaxyEnv::new(url, Duration::from_secs(TAP_TIMEOUT_SECS))?,
        None => GalaxyEnv::from_env()?,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Fetching Gaia data...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = fetch_star_catalog_blocking(&env, config.sample_size);
    spinner.finish_and_clear();
    result
}

fn run(cli: Cli) -> Result<(), GalaxyError> {
    let config = cli.dashboard_config().validated()?;
    debug!("Dashboard controls: {config:?}");

    let catalog = load_catalog(&cli, &config)?;

    if let Some(path) = &cli.save_sample {
        catalog.write_csv(std::fs::File::create(path)?)?;
        info!("Saved sample to {path}");
    }

    let views = DashboardViews::render(&catalog, &config);
    let written = views.write_all(&cli.output)?;

    println!(
        "{}",
        CatalogSummary::new(&catalog)
            .with_frames(views.frame_count)
            .with_precision(cli.precision)
    );
    println!("Palette: {}", config.palette);
    for path in written {
        println!("  wrote {path}");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

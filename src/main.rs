//! Board - executive portfolio dashboard
//!
//! Opens the terminal dashboard by default; `summary` and `show` print
//! plain-text reports instead.

use board::{
    config::AppConfig,
    data::{DataError, Portfolio},
    log_error, log_info, logging, report,
    ui::{DashboardApp, Screen},
};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Print the executive summary for the whole portfolio
    Summary,
    /// Print the full report for one project
    Show {
        /// Project id (ims, mngo, ai-vision)
        id: String,
    },
}

#[derive(Parser, Debug)]
#[command(name = "board")]
#[command(version)]
#[command(about = "Executive portfolio dashboard", long_about = None)]
struct Args {
    /// Configuration file path (overrides defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory with company.json and the project documents
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Show progress values without animating them
    #[arg(long)]
    no_animation: bool,

    /// Open the dashboard on this project
    #[arg(long)]
    project: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Write debug lines to the log file in TUI mode
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let tui_mode = args.command.is_none();

    // Logging comes up first so config loading is recorded
    init_logging(args.verbose, tui_mode, args.debug);

    let config = load_config(&args)?;
    if tui_mode {
        logging::set_debug_mode(config.debug || args.verbose);
        log_info!(
            "Config: animation {} ({} steps / {} ms), data from {}",
            if config.animation.enabled { "on" } else { "off" },
            config.animation.steps,
            config.animation.duration_ms,
            config
                .data_dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| "bundled documents".to_string())
        );
    }

    let portfolio = Portfolio::load(config.data_dir.as_deref())?;
    tracing::info!("Loaded {} projects", portfolio.projects.len());

    match args.command {
        Some(Command::Summary) => {
            print!("{}", report::executive_summary(&portfolio));
        }
        Some(Command::Show { id }) => {
            let project = portfolio.project(&id)?;
            print!("{}", report::project_report(project));
        }
        None => run_dashboard(portfolio, config, args.project).await?,
    }

    Ok(())
}

/// Config file and environment, then command-line overrides
fn load_config(args: &Args) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(dir) = &args.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if args.no_animation {
        config.animation.enabled = false;
    }
    config.debug |= args.debug;
    Ok(config)
}

fn init_logging(verbose: bool, tui_mode: bool, debug_mode: bool) {
    // The dashboard owns the terminal, so TUI mode logs to a file
    if tui_mode {
        let _ = logging::init_logger();
        logging::set_debug_mode(debug_mode || verbose);
        return;
    }

    let filter = if verbose || debug_mode {
        "board=debug,info"
    } else {
        "board=info,warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

async fn run_dashboard(
    portfolio: Portfolio,
    config: AppConfig,
    project: Option<String>,
) -> anyhow::Result<()> {
    let start = match project {
        Some(id) => {
            let index = portfolio
                .projects
                .iter()
                .position(|p| p.id == id)
                .ok_or(DataError::UnknownProject(id))?;
            Screen::Detail(index)
        }
        None => Screen::Overview,
    };

    log_info!("Starting dashboard (log file: {})", logging::get_log_path_display());

    let mut app = DashboardApp::new(portfolio, config)?;
    app.start_at(start);
    if let Err(e) = app.run().await {
        log_error!("Dashboard error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

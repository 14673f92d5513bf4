use anyhow::Result;
use clap::{Parser, Subcommand};

use biospace_explorer::{cli, config, logging, render, web};

#[derive(Debug, Parser)]
#[command(name = "biospace")]
#[command(about = "Search and chart NASA bioscience publications")]
struct App {
    /// Override the backend base URL for this invocation
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print matching publication cards and the category chart
    List {
        /// Case-insensitive substring matched against title and organism
        #[arg(long)]
        search: Option<String>,
        /// Category to keep; `All` keeps every record
        #[arg(long)]
        category: Option<String>,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show publication counts per category
    Chart {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List the category filter options
    Categories,
    /// Interactive search: every line re-filters the cards
    Browse,
    /// Launch the web dashboard
    Web {
        /// Listen address (default from config: 127.0.0.1:9747)
        #[arg(long)]
        addr: Option<String>,
        /// Don't open the browser automatically
        #[arg(long)]
        no_open: bool,
    },
    /// Check config files and backend reachability
    Health,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective (merged) configuration
    Show,
    /// Write a default config file to ~/.biospace/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set a value using a dotted key, e.g. `source.api_base_url`
    Set { key: String, value: String },
    /// Reset configuration to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    let mut cfg = logging::with_bootstrap(config::load);
    if let Some(url) = app.api_url {
        cfg.source.api_base_url = url;
    }
    logging::init(&cfg.logging.level);

    match app.command {
        Commands::List {
            search,
            category,
            format,
        } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_list(&cfg, search, category, fmt)
        }
        Commands::Chart { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_chart(&cfg, fmt)
        }
        Commands::Categories => cli::run_categories(&cfg),
        Commands::Browse => {
            let session = cli::start_session(&cfg)?;
            let chart = render::BarChart::from_config(&cfg.chart);
            cli::browse::run(&session, &chart)
        }
        Commands::Web { addr, no_open } => {
            let session = cli::start_session(&cfg)?;
            let options = web::WebOptions {
                addr: addr.unwrap_or_else(|| cfg.web.addr.clone()),
                open_browser: cfg.web.open_browser && !no_open,
                bar_color: cfg.chart.bar_color.clone(),
            };
            web::serve(&session, &options)
        }
        Commands::Health => cli::run_health(&cfg),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(&cfg),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}

//! CLI command implementations.
//!
//! Provides subcommand handlers for:
//! - `biospace list`: search/filter records and print cards plus the chart
//! - `biospace chart`: category breakdown only
//! - `biospace categories`: the category filter's option set
//! - `biospace browse`: interactive search loop (see [`browse`])
//! - `biospace health`: config files and endpoint reachability
//! - `biospace config show|init|set|reset`: configuration management

pub mod browse;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::{self, ExplorerConfig};
use crate::explore::{Body, CategoryCount, CategoryFilter, Query, Session};
use crate::render::{self, BarChart, Card};
use crate::source::{HttpSource, RecordSource};

/// Output format for record and chart commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// Session helpers
// ---------------------------------------------------------------------------

/// Start the one-shot fetch against the configured endpoint.
pub fn start_session(cfg: &ExplorerConfig) -> Result<Session> {
    start_session_from(HttpSource::from_config(&cfg.source))
}

fn start_session_from<S: RecordSource>(source: S) -> Result<Session> {
    Session::start(source).context("failed to start fetch thread")
}

/// Start a session and block behind the loading gate until it settles.
fn settled_session(cfg: &ExplorerConfig, format: OutputFormat) -> Result<Session> {
    let mut session = start_session(cfg)?;
    if format == OutputFormat::Table {
        eprintln!("{}", crate::explore::LOADING_MESSAGE.dimmed());
    }
    session.wait_settled();
    Ok(session)
}

fn print_banner(total: usize) {
    println!("{}", "🧬 BioSpace Explorer".bold().cyan());
    println!(
        "{}",
        format!(
            "Exploring {} NASA Bioscience Publications 🚀",
            format_number(total)
        )
        .dimmed()
    );
    println!("{}", "=".repeat(50));
    println!();
}

// ---------------------------------------------------------------------------
// biospace list
// ---------------------------------------------------------------------------

/// Print the filtered cards and, in table format, the category chart.
pub fn run_list(
    cfg: &ExplorerConfig,
    search: Option<String>,
    category: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let session = settled_session(cfg, format)?;
    let explorer = session.lock();
    let query = Query::new(
        search.unwrap_or_default(),
        CategoryFilter::parse(category.as_deref().unwrap_or_default()),
    );
    let view = explorer.view_for(&query);

    let cards: Vec<Card> = match &view.body {
        Body::Cards(records) => records.iter().map(|r| Card::from_record(r)).collect(),
        Body::Loading | Body::Empty => Vec::new(),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cards)?),
        OutputFormat::Csv => print_cards_csv(&cards),
        OutputFormat::Table => {
            print_banner(view.total);
            print!(
                "{}",
                render::render_frame(&view, &BarChart::from_config(&cfg.chart))
            );
        }
    }

    Ok(())
}

fn print_cards_csv(cards: &[Card]) {
    println!("id,title,organism,category,impact,url");
    for c in cards {
        println!(
            "{},{},{},{},{},{}",
            csv_field(&c.id),
            csv_field(&c.title),
            csv_field(&c.organism),
            csv_field(&c.category),
            csv_field(&c.impact),
            csv_field(&c.url),
        );
    }
}

// ---------------------------------------------------------------------------
// biospace chart
// ---------------------------------------------------------------------------

/// Print the category aggregate of all loaded records.
pub fn run_chart(cfg: &ExplorerConfig, format: OutputFormat) -> Result<()> {
    let session = settled_session(cfg, format)?;
    let explorer = session.lock();
    let view = explorer.view();

    let Some(data) = view.chart else {
        if format == OutputFormat::Table {
            println!("{}", crate::explore::EMPTY_MESSAGE.yellow());
        } else if format == OutputFormat::Json {
            println!("[]");
        } else {
            println!("category,count");
        }
        return Ok(());
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&data)?),
        OutputFormat::Csv => print_counts_csv(&data),
        OutputFormat::Table => print!("{}", BarChart::from_config(&cfg.chart).render(&data)),
    }

    Ok(())
}

fn print_counts_csv(data: &[CategoryCount]) {
    println!("category,count");
    for d in data {
        println!("{},{}", csv_field(&d.category), d.count);
    }
}

// ---------------------------------------------------------------------------
// biospace categories
// ---------------------------------------------------------------------------

/// Print the category filter's options, sentinel first.
pub fn run_categories(cfg: &ExplorerConfig) -> Result<()> {
    let session = settled_session(cfg, OutputFormat::Table)?;
    let options = session.lock().category_options();

    for option in options {
        if option == crate::explore::derive::ALL_SENTINEL {
            println!("{} {}", option.bold(), "(All Categories)".dimmed());
        } else {
            println!("{option}");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// biospace health
// ---------------------------------------------------------------------------

/// Check config files and whether the experiments endpoint answers.
pub fn run_health(cfg: &ExplorerConfig) -> Result<()> {
    println!("{}", "BioSpace Explorer Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.biospace/config.toml found"
        } else {
            "not found (run `biospace config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".biospace.toml found"
        } else {
            "none (optional)"
        },
    );

    let source = HttpSource::from_config(&cfg.source);
    let reachable = source.is_reachable();
    let detail = if reachable {
        format!("reachable at {}", source.endpoint())
    } else {
        format!("not reachable: {}", source.endpoint())
    };
    print_health_item("Experiments endpoint", reachable, &detail);

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<25} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// biospace config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show(cfg: &ExplorerConfig) -> Result<()> {
    let toml_str = config::to_toml(cfg)?;
    println!("{}", "Effective Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source_line("~/.biospace/config.toml", global_exists);
    print_source_line(".biospace.toml", project_exists);
    println!(
        "  {} {}",
        "·".dimmed(),
        "BIOSPACE_* environment variables".dimmed()
    );
    println!("  {} {}", "·".dimmed(), "--api-url flag".dimmed());

    Ok(())
}

fn print_source_line(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.biospace/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Format a number with comma separators for readability.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Quote a CSV field when it contains a separator, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::source::StaticSource;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(608), "608");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Botany"), "Botany");
        assert_eq!(csv_field("Growth, Roots"), "\"Growth, Roots\"");
        assert_eq!(csv_field("the \"x\" gene"), "\"the \"\"x\"\" gene\"");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::from_str_opt(Some("unknown")),
            OutputFormat::Table
        );
    }

    #[test]
    fn start_session_from_static_source() {
        let mut session = start_session_from(StaticSource::new(vec![Record::default()])).unwrap();
        session.wait_settled();
        assert_eq!(session.lock().records().len(), 1);
    }
}

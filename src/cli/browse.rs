//! Interactive browse loop for `biospace browse`.
//!
//! Every input line mutates the explorer's search term or category filter
//! and the frame is re-rendered immediately. The fetch runs in the
//! background, so input is accepted while the records are still loading.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::explore::{CategoryFilter, Session};
use crate::render::{self, BarChart};

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the search term (empty clears it).
    Search(String),
    /// Replace the category filter.
    Category(CategoryFilter),
    /// Reset both search term and filter.
    Clear,
    /// Re-render without changing state.
    Show,
    /// List the dropdown options.
    Categories,
    Help,
    Quit,
    Unknown(String),
}

/// Parse an input line. A line that is not a `/command` is a search term.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Search(line.to_string());
    };

    let (name, arg) = match rest.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "search" | "s" => Command::Search(arg.to_string()),
        "category" | "c" => Command::Category(CategoryFilter::parse(arg)),
        "clear" => Command::Clear,
        "show" => Command::Show,
        "categories" => Command::Categories,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Run the loop on stdin/stdout until `/quit` or end of input.
pub fn run(session: &Session, chart: &BarChart) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_loop(session, stdin.lock(), &mut stdout, chart)
}

/// Drive the loop over arbitrary input and output.
pub fn run_loop<R: BufRead, W: Write>(
    session: &Session,
    input: R,
    out: &mut W,
    chart: &BarChart,
) -> Result<()> {
    write_help(out)?;
    draw(session, out, chart)?;

    for line in input.lines() {
        let line = line.context("failed reading input")?;
        match parse_command(&line) {
            Command::Search(term) => session.lock().set_search_term(term),
            Command::Category(filter) => session.lock().set_category_filter(filter),
            Command::Clear => {
                let mut explorer = session.lock();
                explorer.set_search_term(String::new());
                explorer.set_category_filter(CategoryFilter::All);
            }
            Command::Show => {}
            Command::Categories => {
                let options = session.lock().category_options();
                writeln!(out, "{}", options.join(" | "))?;
                continue;
            }
            Command::Help => {
                write_help(out)?;
                continue;
            }
            Command::Quit => break,
            Command::Unknown(name) => {
                writeln!(out, "{} /{name} (try /help)", "Unknown command:".red())?;
                continue;
            }
        }
        draw(session, out, chart)?;
    }

    Ok(())
}

fn draw<W: Write>(session: &Session, out: &mut W, chart: &BarChart) -> Result<()> {
    let explorer = session.lock();
    let query = explorer.query();
    let view = explorer.view();

    writeln!(
        out,
        "{} search=\"{}\" category={} ({} loaded)",
        "──".dimmed(),
        query.search_term,
        query.category_filter,
        view.total
    )?;
    write!(out, "{}", render::render_frame(&view, chart))?;
    out.flush()?;
    Ok(())
}

fn write_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", "🔍 Search by Title or Organism...".bold())?;
    writeln!(
        out,
        "  {}",
        "<text> or /search <text>   set the search term".dimmed()
    )?;
    writeln!(
        out,
        "  {}",
        "/category <name|All>       filter by category".dimmed()
    )?;
    writeln!(
        out,
        "  {}",
        "/categories  /clear  /show  /help  /quit".dimmed()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ChartConfig;
    use crate::explore::EMPTY_MESSAGE;
    use crate::record::Record;
    use crate::source::StaticSource;

    fn settled_session() -> Session {
        let mut session = Session::start(StaticSource::new(vec![
            Record {
                id: "1".to_string(),
                title: Some("Plant Growth".to_string()),
                organism: Some("Arabidopsis".to_string()),
                category: Some("Botany".to_string()),
                ..Record::default()
            },
            Record {
                id: "2".to_string(),
                title: Some("Bone Density".to_string()),
                organism: Some("Mouse".to_string()),
                category: Some("Physiology".to_string()),
                ..Record::default()
            },
        ]))
        .unwrap();
        session.wait_settled();
        session
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("bone"), Command::Search("bone".to_string()));
        assert_eq!(parse_command(""), Command::Search(String::new()));
        assert_eq!(
            parse_command("/search  plant growth"),
            Command::Search("plant growth".to_string())
        );
        assert_eq!(
            parse_command("/category Botany"),
            Command::Category(CategoryFilter::Only("Botany".to_string()))
        );
        assert_eq!(parse_command("/c All"), Command::Category(CategoryFilter::All));
        assert_eq!(parse_command("/quit"), Command::Quit);
        assert_eq!(parse_command("/frobnicate"), Command::Unknown("frobnicate".to_string()));
    }

    #[test]
    fn each_line_updates_state_and_redraws() {
        let session = settled_session();
        let chart = BarChart::from_config(&ChartConfig::default());
        let input = "bone\n/category Botany\n/quit\nnever-read\n".as_bytes();
        let mut out = Vec::new();

        run_loop(&session, input, &mut out, &chart).unwrap();

        let text = String::from_utf8(out).unwrap();
        // Initial frame plus one per state change.
        assert_eq!(text.matches("loaded)").count(), 3);
        assert!(text.contains(EMPTY_MESSAGE));

        let explorer = session.lock();
        assert_eq!(explorer.query().search_term, "bone");
        assert_eq!(
            explorer.query().category_filter,
            CategoryFilter::Only("Botany".to_string())
        );
    }

    #[test]
    fn clear_resets_query() {
        let session = settled_session();
        let chart = BarChart::from_config(&ChartConfig::default());
        let mut out = Vec::new();
        run_loop(&session, "bone\n/clear\n".as_bytes(), &mut out, &chart).unwrap();

        let explorer = session.lock();
        assert_eq!(explorer.query().search_term, "");
        assert_eq!(explorer.filtered().len(), 2);
    }
}

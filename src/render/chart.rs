//! Terminal bar chart of record counts by category.
//!
//! Horizontal bars, category names on the vertical axis and counts on the
//! horizontal axis, with a dashed grid at each tick. The exact count is
//! printed after every row in place of a hover tooltip. Width is fixed by
//! config so the layout does not depend on the terminal.

use colored::{ColoredString, Colorize};

use crate::config::schema::ChartConfig;
use crate::explore::CategoryCount;

pub const CHART_TITLE: &str = "Publication Categories Overview";

const MIN_WIDTH: usize = 10;
const MAX_LABEL_CHARS: usize = 24;
const TARGET_TICKS: usize = 4;

/// Renders category aggregates with a fixed bar color and width.
#[derive(Debug, Clone)]
pub struct BarChart {
    width: usize,
    color: (u8, u8, u8),
}

impl BarChart {
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            width: config.width.max(MIN_WIDTH),
            color: parse_hex_color(&config.bar_color).unwrap_or((0x00, 0x7b, 0xff)),
        }
    }

    pub fn render(&self, data: &[CategoryCount]) -> String {
        let mut out = format!("{}\n", CHART_TITLE.bold().cyan());

        if data.is_empty() {
            out.push_str(&format!("  {}\n", "No categorized records.".dimmed()));
            return out;
        }

        let labels: Vec<String> = data
            .iter()
            .map(|d| truncate(&d.category, MAX_LABEL_CHARS))
            .collect();
        let label_width = labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max("Category".len());

        let max_count = data.iter().map(|d| d.count).max().unwrap_or(0);
        let step = tick_step(max_count);
        let axis_max = step * TARGET_TICKS;
        let tick_columns: Vec<usize> = (1..=TARGET_TICKS)
            .map(|i| self.column_for(i * step, axis_max))
            .collect();

        out.push_str(&format!("{:>label_width$}\n", "Category".dimmed()));

        for (entry, label) in data.iter().zip(&labels) {
            let bar_len = self.bar_len(entry.count, axis_max);
            let cells: String = (0..self.width)
                .map(|c| {
                    if c < bar_len {
                        '█'
                    } else if tick_columns.contains(&c) {
                        '┊'
                    } else {
                        ' '
                    }
                })
                .collect();
            let (bar, grid) = split_at_char(&cells, bar_len);
            out.push_str(&format!(
                "{:>label_width$} │{}{} {}\n",
                label,
                self.paint(bar),
                grid.dimmed(),
                entry.count
            ));
        }

        // Count axis
        let axis: String = (0..self.width)
            .map(|c| if tick_columns.contains(&c) { '┴' } else { '─' })
            .collect();
        out.push_str(&format!("{:>label_width$} └{}\n", "", axis));

        let mut ticks = vec![(0usize, 0usize)];
        ticks.extend((1..=TARGET_TICKS).map(|i| (i * step, tick_columns[i - 1] + 1)));
        out.push_str(&format!(
            "{:>label_width$} {}\n",
            "",
            tick_label_line(&ticks, self.width + 2)
        ));
        out.push_str(&format!(
            "{:>label_width$} {:^width$}\n",
            "",
            "Count".dimmed(),
            width = self.width + 1
        ));

        out
    }

    /// Column of the last cell belonging to `value` on the scale.
    fn column_for(&self, value: usize, axis_max: usize) -> usize {
        (value * self.width / axis_max.max(1)).clamp(1, self.width) - 1
    }

    /// Number of filled cells; every non-zero count gets at least one.
    fn bar_len(&self, count: usize, axis_max: usize) -> usize {
        if count == 0 {
            return 0;
        }
        (count * self.width / axis_max.max(1)).clamp(1, self.width)
    }

    fn paint(&self, bar: &str) -> ColoredString {
        let (r, g, b) = self.color;
        bar.truecolor(r, g, b)
    }
}

/// Integer tick spacing so that `TARGET_TICKS` ticks cover `max_count`.
fn tick_step(max_count: usize) -> usize {
    max_count.div_ceil(TARGET_TICKS).max(1)
}

/// Lay out tick values at their columns, skipping labels that would collide.
fn tick_label_line(ticks: &[(usize, usize)], width: usize) -> String {
    let mut line: Vec<char> = vec![' '; width + 8];
    let mut next_free = 0;

    for &(value, column) in ticks {
        let text = value.to_string();
        if column < next_free || column + text.len() > line.len() {
            continue;
        }
        for (i, ch) in text.chars().enumerate() {
            line[column + i] = ch;
        }
        next_free = column + text.len() + 1;
    }

    line.into_iter().collect::<String>().trim_end().to_string()
}

fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    let idx = s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len());
    s.split_at(idx)
}

/// Parse `#rrggbb`.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Truncate to `max_chars` characters, appending "…" if truncated.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

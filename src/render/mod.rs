//! Presentation of explorer views: cards and the category chart.
pub mod card;
pub mod chart;

use colored::Colorize;

pub use card::Card;
pub use chart::BarChart;

use crate::explore::{Body, View};

/// Render one full terminal frame: status message or cards, then the chart
/// when the view has one.
pub fn render_frame(view: &View<'_>, chart: &BarChart) -> String {
    let mut out = String::new();

    match &view.body {
        Body::Cards(records) => {
            for record in records {
                out.push_str(&Card::from_record(record).render_text());
                out.push('\n');
            }
        }
        body => {
            if let Some(message) = body.message() {
                out.push_str(&format!("{}\n\n", message.yellow()));
            }
        }
    }

    if let Some(data) = &view.chart {
        out.push_str(&chart.render(data));
    }

    out
}

//! Interactive HTML dashboard.
//!
//! A single self-contained page embedding the SVG charts inline, one card
//! per non-empty view. Hover tooltips come from the SVG `<title>` elements,
//! so the page needs no script or external assets.

use super::svg::{
    render_bar_chart, render_hbar_chart, render_pie_chart, render_trend_chart, ChartConfig,
};
use crate::analyzer::report::ComprehensiveReport;
use crate::utils::error::ChartError;
use log::{info, warn};

/// Chart sections in display order: (anchor id, heading, renderer)
type Section<'a> = (&'a str, &'a str, Result<String, ChartError>);

/// Render the dashboard page
///
/// **Public** - main entry point for dashboard generation
///
/// # Arguments
/// * `report` - Assembled report; empty views are skipped
///
/// # Returns
/// Complete HTML document
///
/// # Errors
/// * `ChartError::EmptyView` - every view was empty, nothing to show
pub fn render_dashboard(report: &ComprehensiveReport) -> Result<String, ChartError> {
    let chart_config = ChartConfig::new().with_size(760, 420);

    let sections: Vec<Section> = vec![
        (
            "trend",
            "Monthly Sales Trend",
            render_trend_chart(
                &report.time_series,
                &chart_config.clone().with_title("Sales by month"),
            ),
        ),
        (
            "categories",
            "Revenue by Category",
            render_bar_chart(
                &report.category,
                &chart_config.clone().with_title("Revenue by category"),
            ),
        ),
        (
            "regions",
            "Regional Share",
            render_pie_chart(
                &report.region,
                &chart_config.clone().with_title("Revenue share by region"),
            ),
        ),
        (
            "reps",
            "Top Sellers",
            render_hbar_chart(
                &report.sales_rep,
                &chart_config.clone().with_title("Top 5 sales reps"),
            ),
        ),
    ];

    let rendered: Vec<(&str, &str, String)> = sections
        .into_iter()
        .filter_map(|(id, heading, result)| match result {
            Ok(svg) => Some((id, heading, svg)),
            Err(ChartError::EmptyView) => {
                warn!("Skipping dashboard section '{}': empty view", id);
                None
            }
            Err(e) => {
                warn!("Skipping dashboard section '{}': {}", id, e);
                None
            }
        })
        .collect();

    if rendered.is_empty() {
        return Err(ChartError::EmptyView);
    }

    info!("Dashboard assembled with {} charts", rendered.len());

    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Sales Dashboard</title>\n<style>\n\
         body { font-family: sans-serif; margin: 0; background: #f4f5f7; }\n\
         header { background: #1f77b4; color: white; padding: 16px 24px; }\n\
         nav a { color: white; margin-right: 16px; text-decoration: none; }\n\
         .card { background: white; border-radius: 6px; margin: 24px auto;\n\
                 padding: 16px; max-width: 820px;\n\
                 box-shadow: 0 1px 3px rgba(0,0,0,0.15); }\n\
         h2 { margin-top: 0; font-size: 18px; color: #333; }\n\
         </style>\n</head>\n<body>\n",
    );

    html.push_str("<header><h1>Sales Dashboard</h1><nav>");
    for (id, heading, _) in &rendered {
        html.push_str(&format!("<a href=\"#{}\">{}</a>", id, heading));
    }
    html.push_str("</nav></header>\n");

    for (id, heading, svg) in &rendered {
        html.push_str(&format!(
            "<div class=\"card\" id=\"{}\">\n<h2>{}</h2>\n{}\n</div>\n",
            id, heading, svg
        ));
    }

    html.push_str("</body>\n</html>\n");
    Ok(html)
}

//! Static SVG chart generation.
//!
//! Hand-rendered SVG, no chart library: a trend line for the monthly view,
//! vertical bars for categories, a pie for regions and horizontal bars for
//! the top sellers. Each generator takes a view's summary rows and returns
//! the SVG document as a string; writing to disk is the output module's job.

use crate::analyzer::engine::SummaryRow;
use crate::utils::error::ChartError;
use log::info;

/// Fixed chart palette, cycled per series
pub const PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
];

/// Shared chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: 800,
            height: 450,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

// Plot margins: left, top, right, bottom
const MARGIN: (f64, f64, f64, f64) = (70.0, 50.0, 30.0, 60.0);

/// Monthly revenue trend: line with markers over a filled area
///
/// **Public** - time-series chart
///
/// # Errors
/// * `ChartError::EmptyView` - nothing to draw
pub fn render_trend_chart(rows: &[SummaryRow], config: &ChartConfig) -> Result<String, ChartError> {
    if rows.is_empty() {
        return Err(ChartError::EmptyView);
    }
    info!("Rendering trend chart with {} months", rows.len());

    let (w, h) = (config.width as f64, config.height as f64);
    let (left, top, right, bottom) = MARGIN;
    let plot_w = w - left - right;
    let plot_h = h - top - bottom;
    let max_revenue = max_revenue(rows).max(1.0);

    let point = |i: usize, revenue: f64| -> (f64, f64) {
        let step = if rows.len() > 1 {
            plot_w / (rows.len() - 1) as f64
        } else {
            0.0
        };
        let x = left + if rows.len() > 1 { i as f64 * step } else { plot_w / 2.0 };
        let y = top + plot_h - (revenue / max_revenue) * plot_h;
        (x, y)
    };

    let mut svg = open_svg(config);

    // Filled area under the line
    let mut area = format!("M {:.1} {:.1}", left, top + plot_h);
    for (i, row) in rows.iter().enumerate() {
        let (x, y) = point(i, row.total_revenue);
        area.push_str(&format!(" L {:.1} {:.1}", x, y));
    }
    let (last_x, _) = point(rows.len() - 1, rows[rows.len() - 1].total_revenue);
    area.push_str(&format!(" L {:.1} {:.1} Z", last_x, top + plot_h));
    svg.push_str(&format!(
        r#"<path d="{}" fill="{}" opacity="0.3"/>"#,
        area, PALETTE[0]
    ));

    // Line and markers
    let line: Vec<String> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let (x, y) = point(i, row.total_revenue);
            format!("{:.1},{:.1}", x, y)
        })
        .collect();
    svg.push_str(&format!(
        r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
        line.join(" "),
        PALETTE[0]
    ));
    for (i, row) in rows.iter().enumerate() {
        let (x, y) = point(i, row.total_revenue);
        svg.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="4" fill="{}"/>"#,
            x, y, PALETTE[0]
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="middle" transform="rotate(45 {:.1} {:.1})">{}</text>"#,
            x,
            top + plot_h + 18.0,
            x,
            top + plot_h + 18.0,
            xml_escape(&row.key)
        ));
    }

    svg.push_str(&axes(left, top, plot_w, plot_h, max_revenue));
    svg.push_str("</svg>");
    Ok(svg)
}

/// Revenue by category: vertical bars with value labels
///
/// **Public** - category chart
pub fn render_bar_chart(rows: &[SummaryRow], config: &ChartConfig) -> Result<String, ChartError> {
    if rows.is_empty() {
        return Err(ChartError::EmptyView);
    }
    info!("Rendering bar chart with {} categories", rows.len());

    let (w, h) = (config.width as f64, config.height as f64);
    let (left, top, right, bottom) = MARGIN;
    let plot_w = w - left - right;
    let plot_h = h - top - bottom;
    let max_rev = max_revenue(rows).max(1.0);

    let slot = plot_w / rows.len() as f64;
    let bar_w = slot * 0.7;

    let mut svg = open_svg(config);
    for (i, row) in rows.iter().enumerate() {
        let bar_h = (row.total_revenue / max_rev) * plot_h;
        let x = left + i as f64 * slot + (slot - bar_w) / 2.0;
        let y = top + plot_h - bar_h;
        let color = PALETTE[i % PALETTE.len()];

        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>"#,
            x,
            y,
            bar_w,
            bar_h,
            color,
            xml_escape(&row.key),
            format_money(row.total_revenue)
        ));
        // Value above the bar
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="middle">{}</text>"#,
            x + bar_w / 2.0,
            y - 5.0,
            format_money(row.total_revenue)
        ));
        // Category label below
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="middle">{}</text>"#,
            x + bar_w / 2.0,
            top + plot_h + 18.0,
            xml_escape(&truncate_label(&row.key, 14))
        ));
    }

    svg.push_str(&axes(left, top, plot_w, plot_h, max_rev));
    svg.push_str("</svg>");
    Ok(svg)
}

/// Revenue share by region: pie with percentage labels
///
/// **Public** - region chart
pub fn render_pie_chart(rows: &[SummaryRow], config: &ChartConfig) -> Result<String, ChartError> {
    if rows.is_empty() {
        return Err(ChartError::EmptyView);
    }
    let total: f64 = rows.iter().map(|r| r.total_revenue).sum();
    if total <= 0.0 {
        return Err(ChartError::EmptyView);
    }
    info!("Rendering pie chart with {} slices", rows.len());

    let (w, h) = (config.width as f64, config.height as f64);
    let cx = w / 2.0;
    let cy = (h + 30.0) / 2.0;
    let radius = (h.min(w) / 2.0 - 70.0).max(40.0);

    let mut svg = open_svg(config);

    // Start at 12 o'clock, go clockwise
    let mut angle = -std::f64::consts::FRAC_PI_2;
    for (i, row) in rows.iter().enumerate() {
        let fraction = row.total_revenue / total;
        let sweep = fraction * std::f64::consts::TAU;
        let color = PALETTE[i % PALETTE.len()];

        if fraction > 0.9999 {
            // A single slice is a full circle; an arc with coincident
            // endpoints would collapse
            svg.push_str(&format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
                cx, cy, radius, color
            ));
        } else {
            let (x1, y1) = (cx + radius * angle.cos(), cy + radius * angle.sin());
            let end = angle + sweep;
            let (x2, y2) = (cx + radius * end.cos(), cy + radius * end.sin());
            let large_arc = if sweep > std::f64::consts::PI { 1 } else { 0 };
            svg.push_str(&format!(
                r#"<path d="M {:.1} {:.1} L {:.1} {:.1} A {:.1} {:.1} 0 {} 1 {:.1} {:.1} Z" fill="{}"><title>{}: {}</title></path>"#,
                cx,
                cy,
                x1,
                y1,
                radius,
                radius,
                large_arc,
                x2,
                y2,
                color,
                xml_escape(&row.key),
                format_money(row.total_revenue)
            ));
        }

        // Label at the slice midpoint
        let mid = angle + sweep / 2.0;
        let (lx, ly) = (
            cx + radius * 0.65 * mid.cos(),
            cy + radius * 0.65 * mid.sin(),
        );
        if fraction >= 0.03 {
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" font-size="12" font-weight="bold" fill="white" text-anchor="middle">{:.1}%</text>"#,
                lx,
                ly,
                fraction * 100.0
            ));
        }

        angle += sweep;
    }

    // Legend on the right edge
    for (i, row) in rows.iter().enumerate() {
        let y = 50.0 + i as f64 * 20.0;
        let color = PALETTE[i % PALETTE.len()];
        svg.push_str(&format!(
            r#"<rect x="10" y="{:.1}" width="12" height="12" fill="{}" rx="2"/>"#,
            y - 10.0,
            color
        ));
        svg.push_str(&format!(
            r#"<text x="28" y="{:.1}" font-size="12">{}</text>"#,
            y,
            xml_escape(&truncate_label(&row.key, 18))
        ));
    }

    svg.push_str("</svg>");
    Ok(svg)
}

/// Top sellers: horizontal bars, best at the top
///
/// **Public** - sales-rep chart, capped at 5 rows
pub fn render_hbar_chart(rows: &[SummaryRow], config: &ChartConfig) -> Result<String, ChartError> {
    if rows.is_empty() {
        return Err(ChartError::EmptyView);
    }
    let top_rows: Vec<&SummaryRow> = rows.iter().take(5).collect();
    info!("Rendering horizontal bar chart with {} sellers", top_rows.len());

    let (w, h) = (config.width as f64, config.height as f64);
    let (_, top, right, bottom) = MARGIN;
    let label_gutter = 130.0;
    let plot_w = w - label_gutter - right;
    let plot_h = h - top - bottom;
    let max_rev = top_rows
        .iter()
        .map(|r| r.total_revenue)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let slot = plot_h / top_rows.len() as f64;
    let bar_h = slot * 0.6;

    let mut svg = open_svg(config);
    for (i, row) in top_rows.iter().enumerate() {
        let bar_w = (row.total_revenue / max_rev) * plot_w;
        let y = top + i as f64 * slot + (slot - bar_h) / 2.0;
        let color = PALETTE[i % PALETTE.len()];

        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>"#,
            label_gutter,
            y,
            bar_w,
            bar_h,
            color,
            xml_escape(&row.key),
            format_money(row.total_revenue)
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="end">{}</text>"#,
            label_gutter - 8.0,
            y + bar_h / 2.0 + 4.0,
            xml_escape(&truncate_label(&row.key, 16))
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="11">{}</text>"#,
            label_gutter + bar_w + 6.0,
            y + bar_h / 2.0 + 4.0,
            format_money(row.total_revenue)
        ));
    }

    svg.push_str("</svg>");
    Ok(svg)
}

/// SVG header with background and centered title
///
/// **Private** - shared by all generators
fn open_svg(config: &ChartConfig) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" font-family="sans-serif">"#,
        config.width, config.height, config.width, config.height
    );
    svg.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);
    if !config.title.is_empty() {
        svg.push_str(&format!(
            r#"<text x="{}" y="25" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
            config.width / 2,
            xml_escape(&config.title)
        ));
    }
    svg
}

/// X/Y axis lines plus min/max ticks on the Y axis
///
/// **Private**
fn axes(left: f64, top: f64, plot_w: f64, plot_h: f64, max_value: f64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#333" stroke-width="1"/>"##,
        left,
        top,
        left,
        top + plot_h
    ));
    out.push_str(&format!(
        r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#333" stroke-width="1"/>"##,
        left,
        top + plot_h,
        left + plot_w,
        top + plot_h
    ));
    out.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end">{}</text>"#,
        left - 6.0,
        top + 4.0,
        format_money(max_value)
    ));
    out.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end">$0</text>"#,
        left - 6.0,
        top + plot_h + 4.0
    ));
    out
}

fn max_revenue(rows: &[SummaryRow]) -> f64 {
    rows.iter().map(|r| r.total_revenue).fold(0.0, f64::max)
}

/// Dollar amount with thousands separators, no cents
pub fn format_money(value: f64) -> String {
    let rounded = value.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let cut: String = label.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, revenue: f64) -> SummaryRow {
        SummaryRow {
            key: key.to_string(),
            total_revenue: revenue,
            transaction_count: 1,
            average_ticket: None,
            total_profit: None,
            units_sold: None,
            market_share_pct: None,
            efficiency: None,
        }
    }

    #[test]
    fn test_trend_chart_structure() {
        let rows = vec![row("2023-01", 100.0), row("2023-02", 200.0)];
        let svg = render_trend_chart(&rows, &ChartConfig::new().with_title("Trend")).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("polyline"));
        assert!(svg.contains("2023-01"));
        assert!(svg.contains("Trend"));
    }

    #[test]
    fn test_trend_chart_empty() {
        assert!(matches!(
            render_trend_chart(&[], &ChartConfig::default()),
            Err(ChartError::EmptyView)
        ));
    }

    #[test]
    fn test_bar_chart_has_bars_and_labels() {
        let rows = vec![row("Electronics", 5000.0), row("Clothing", 2500.0)];
        let svg = render_bar_chart(&rows, &ChartConfig::default()).unwrap();
        assert_eq!(svg.matches("<rect").count() - 1, 2); // minus background
        assert!(svg.contains("$5,000"));
        assert!(svg.contains("Electronics"));
    }

    #[test]
    fn test_pie_chart_slices() {
        let rows = vec![row("North", 750.0), row("South", 250.0)];
        let svg = render_pie_chart(&rows, &ChartConfig::default()).unwrap();
        assert!(svg.contains("<path"));
        assert!(svg.contains("75.0%"));
        assert!(svg.contains("25.0%"));
    }

    #[test]
    fn test_pie_chart_single_slice_is_circle() {
        let rows = vec![row("North", 100.0)];
        let svg = render_pie_chart(&rows, &ChartConfig::default()).unwrap();
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_pie_chart_zero_total() {
        let rows = vec![row("North", 0.0)];
        assert!(matches!(
            render_pie_chart(&rows, &ChartConfig::default()),
            Err(ChartError::EmptyView)
        ));
    }

    #[test]
    fn test_hbar_caps_at_five() {
        let rows: Vec<SummaryRow> = (0..8).map(|i| row(&format!("Rep{}", i), 100.0)).collect();
        let svg = render_hbar_chart(&rows, &ChartConfig::default()).unwrap();
        assert_eq!(svg.matches("<rect").count() - 1, 5);
    }

    #[test]
    fn test_xml_escape_in_labels() {
        let rows = vec![row("Food & Drink", 10.0)];
        let svg = render_bar_chart(&rows, &ChartConfig::default()).unwrap();
        assert!(svg.contains("Food &amp; Drink"));
        assert!(!svg.contains("Food & Drink"));
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234567.0), "$1,234,567");
        assert_eq!(format_money(999.4), "$999");
        assert_eq!(format_money(-1500.0), "-$1,500");
    }
}

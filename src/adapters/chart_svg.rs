//! Inline SVG chart rendering for the dashboard.
//!
//! Line, bar, pie, and banded forecast charts as self-contained SVG strings,
//! embedded directly into the rendered page. Empty input renders an empty
//! string; the surrounding section still appears.

use chrono::NaiveDate;

use crate::domain::forecast::ForecastRecord;
use crate::domain::segmentation::SegmentSlice;

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 300.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 40.0;

const BAR_ROW_HEIGHT: f64 = 28.0;
const BAR_LABEL_WIDTH: f64 = 230.0;

const PIE_COLORS: [&str; 8] = [
    "#2563eb", "#dc2626", "#16a34a", "#d97706", "#7c3aed", "#0891b2", "#db2777", "#65a30d",
];

fn fmt_currency(value: f64) -> String {
    if value >= 0.0 {
        format!("${:.2}", value)
    } else {
        format!("-${:.2}", value.abs())
    }
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn svg_open(width: f64, height: f64) -> String {
    format!(
        r##"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"##,
        width, height, width, height
    )
}

fn chart_title(svg: &mut String, title: &str, width: f64) {
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"20\" text-anchor=\"middle\" font-size=\"14\" fill=\"#111\">{}</text>\n",
        width / 2.0,
        xml_escape(title)
    ));
}

fn axes(svg: &mut String) {
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT,
        MARGIN_TOP,
        MARGIN_LEFT,
        CHART_HEIGHT - MARGIN_BOTTOM
    ));
    svg.push_str(&format!(
        "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#ccc\" stroke-width=\"1\"/>\n",
        MARGIN_LEFT,
        CHART_HEIGHT - MARGIN_BOTTOM,
        CHART_WIDTH - MARGIN_RIGHT,
        CHART_HEIGHT - MARGIN_BOTTOM
    ));
}

fn y_axis_labels(svg: &mut String, min: f64, max: f64, plot_height: f64) {
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">{}</text>\n",
        MARGIN_LEFT - 5.0,
        MARGIN_TOP + 5.0,
        fmt_currency(max)
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">{}</text>\n",
        MARGIN_LEFT - 5.0,
        MARGIN_TOP + plot_height / 2.0,
        fmt_currency((max + min) / 2.0)
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"10\" fill=\"#666\">{}</text>\n",
        MARGIN_LEFT - 5.0,
        CHART_HEIGHT - MARGIN_BOTTOM - 5.0,
        fmt_currency(min)
    ));
}

fn x_axis_dates(svg: &mut String, first: NaiveDate, mid: NaiveDate, last: NaiveDate, plot_width: f64) {
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#666\">{}</text>\n",
        MARGIN_LEFT,
        CHART_HEIGHT - 8.0,
        first
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#666\">{}</text>\n",
        MARGIN_LEFT + plot_width / 2.0,
        CHART_HEIGHT - 8.0,
        mid
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#666\">{}</text>\n",
        CHART_WIDTH - MARGIN_RIGHT,
        CHART_HEIGHT - 8.0,
        last
    ));
}

/// Line chart of revenue per calendar date, titled "Daily Revenue Trend".
pub fn daily_revenue_svg(series: &[(NaiveDate, f64)]) -> String {
    if series.is_empty() {
        return String::new();
    }

    let min_total = series.iter().map(|(_, t)| *t).fold(f64::INFINITY, f64::min);
    let max_total = series
        .iter()
        .map(|(_, t)| *t)
        .fold(f64::NEG_INFINITY, f64::max);
    let range = (max_total - min_total).max(1.0);

    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let x_scale =
        |i: usize| -> f64 { MARGIN_LEFT + (i as f64 / (series.len() - 1).max(1) as f64) * plot_width };
    let y_scale =
        |v: f64| -> f64 { MARGIN_TOP + plot_height - ((v - min_total) / range) * plot_height };

    let mut path_data = String::new();
    for (i, (_, total)) in series.iter().enumerate() {
        let x = x_scale(i);
        let y = y_scale(*total);
        if i == 0 {
            path_data.push_str(&format!("M {:.1} {:.1}", x, y));
        } else {
            path_data.push_str(&format!(" L {:.1} {:.1}", x, y));
        }
    }

    let first = series.first().map(|(d, _)| *d).unwrap_or_default();
    let last = series.last().map(|(d, _)| *d).unwrap_or_default();
    let mid = series[series.len() / 2].0;

    let mut svg = svg_open(CHART_WIDTH, CHART_HEIGHT);
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    chart_title(&mut svg, "Daily Revenue Trend", CHART_WIDTH);
    axes(&mut svg);
    y_axis_labels(&mut svg, min_total, max_total, plot_height);
    x_axis_dates(&mut svg, first, mid, last, plot_width);
    svg.push_str(&format!(
        "  <path d=\"{}\" fill=\"none\" stroke=\"#2563eb\" stroke-width=\"2\"/>\n",
        path_data
    ));
    svg.push_str("</svg>");
    svg
}

/// Horizontal bar chart of the top-selling products, descending by revenue.
pub fn top_products_svg(products: &[(String, f64)]) -> String {
    if products.is_empty() {
        return String::new();
    }

    let height = MARGIN_TOP + products.len() as f64 * BAR_ROW_HEIGHT + 16.0;
    let plot_width = CHART_WIDTH - BAR_LABEL_WIDTH - MARGIN_RIGHT - 70.0;
    let max_total = products
        .iter()
        .map(|(_, t)| *t)
        .fold(f64::NEG_INFINITY, f64::max)
        .max(1e-9);

    let mut svg = svg_open(CHART_WIDTH, height);
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    chart_title(&mut svg, "Top 10 Selling Products", CHART_WIDTH);

    for (i, (name, total)) in products.iter().enumerate() {
        let y = MARGIN_TOP + i as f64 * BAR_ROW_HEIGHT;
        let bar_len = (total / max_total).max(0.0) * plot_width;

        let mut label = name.clone();
        if label.chars().count() > 30 {
            label = label.chars().take(29).collect::<String>() + "…";
        }

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\" fill=\"#333\">{}</text>\n",
            BAR_LABEL_WIDTH - 8.0,
            y + BAR_ROW_HEIGHT / 2.0 + 4.0,
            xml_escape(&label)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"#2563eb\"/>\n",
            BAR_LABEL_WIDTH,
            y + 4.0,
            bar_len,
            BAR_ROW_HEIGHT - 8.0
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" fill=\"#666\">{}</text>\n",
            BAR_LABEL_WIDTH + bar_len + 6.0,
            y + BAR_ROW_HEIGHT / 2.0 + 4.0,
            fmt_currency(*total)
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Pie chart of the segment distribution with percentage labels.
///
/// Wedges start at 90 degrees and advance counter-clockwise, matching the
/// upstream dashboard's rendering.
pub fn segment_pie_svg(distribution: &[SegmentSlice]) -> String {
    if distribution.is_empty() {
        return String::new();
    }

    let size = 340.0;
    let cx = size / 2.0;
    let cy = size / 2.0 + 10.0;
    let radius = 105.0;
    let height = size + 20.0;

    let point = |deg: f64, r: f64| -> (f64, f64) {
        let rad = deg.to_radians();
        (cx + r * rad.cos(), cy - r * rad.sin())
    };

    let mut svg = svg_open(size, height);
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    chart_title(&mut svg, "Customer Segment Distribution", size);

    let mut start_deg = 90.0;
    for (i, slice) in distribution.iter().enumerate() {
        let color = PIE_COLORS[i % PIE_COLORS.len()];
        let sweep_deg = slice.share / 100.0 * 360.0;
        let end_deg = start_deg + sweep_deg;
        let mid_deg = start_deg + sweep_deg / 2.0;

        if sweep_deg >= 360.0 - 1e-9 {
            svg.push_str(&format!(
                "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>\n",
                cx, cy, radius, color
            ));
        } else if sweep_deg > 0.0 {
            let (sx, sy) = point(start_deg, radius);
            let (ex, ey) = point(end_deg, radius);
            let large_arc = if sweep_deg > 180.0 { 1 } else { 0 };
            // Sweep flag 0 traces the counter-clockwise direction in SVG's
            // y-down coordinate system.
            svg.push_str(&format!(
                "  <path d=\"M {:.1} {:.1} L {:.1} {:.1} A {:.1} {:.1} 0 {} 0 {:.1} {:.1} Z\" fill=\"{}\" stroke=\"white\" stroke-width=\"1\"/>\n",
                cx, cy, sx, sy, radius, radius, large_arc, ex, ey, color
            ));
        }

        if sweep_deg > 0.0 {
            let (px, py) = point(mid_deg, radius * 0.6);
            svg.push_str(&format!(
                "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\" fill=\"white\">{:.1}%</text>\n",
                px, py, slice.share
            ));

            let (lx, ly) = point(mid_deg, radius * 1.18);
            let anchor = if mid_deg.to_radians().cos() > 0.05 {
                "start"
            } else if mid_deg.to_radians().cos() < -0.05 {
                "end"
            } else {
                "middle"
            };
            svg.push_str(&format!(
                "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"{}\" font-size=\"11\" fill=\"#333\">{}</text>\n",
                lx,
                ly,
                anchor,
                xml_escape(&slice.label)
            ));
        }

        start_deg = end_deg;
    }

    svg.push_str("</svg>");
    svg
}

/// Forecast line with a shaded confidence band, titled
/// "Predicted Sales for Next 90 Days". All supplied rows are plotted.
pub fn forecast_svg(points: &[ForecastRecord]) -> String {
    if points.is_empty() {
        return String::new();
    }

    let min_value = points
        .iter()
        .map(|p| p.lower_bound.min(p.predicted_value))
        .fold(f64::INFINITY, f64::min);
    let max_value = points
        .iter()
        .map(|p| p.upper_bound.max(p.predicted_value))
        .fold(f64::NEG_INFINITY, f64::max);
    let range = (max_value - min_value).max(1.0);

    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let x_scale =
        |i: usize| -> f64 { MARGIN_LEFT + (i as f64 / (points.len() - 1).max(1) as f64) * plot_width };
    let y_scale =
        |v: f64| -> f64 { MARGIN_TOP + plot_height - ((v - min_value) / range) * plot_height };

    // Band: upper bounds forward, lower bounds in reverse, closed.
    let mut band_data = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        band_data.push_str(&format!(
            "{} {:.1} {:.1}",
            cmd,
            x_scale(i),
            y_scale(p.upper_bound)
        ));
    }
    for (i, p) in points.iter().enumerate().rev() {
        band_data.push_str(&format!(
            " L {:.1} {:.1}",
            x_scale(i),
            y_scale(p.lower_bound)
        ));
    }
    band_data.push_str(" Z");

    let mut line_data = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        line_data.push_str(&format!(
            "{} {:.1} {:.1}",
            cmd,
            x_scale(i),
            y_scale(p.predicted_value)
        ));
    }

    let first = points.first().map(|p| p.date.date()).unwrap_or_default();
    let last = points.last().map(|p| p.date.date()).unwrap_or_default();
    let mid = points[points.len() / 2].date.date();

    let mut svg = svg_open(CHART_WIDTH, CHART_HEIGHT);
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    chart_title(&mut svg, "Predicted Sales for Next 90 Days", CHART_WIDTH);
    axes(&mut svg);
    y_axis_labels(&mut svg, min_value, max_value, plot_height);
    x_axis_dates(&mut svg, first, mid, last, plot_width);
    svg.push_str(&format!(
        "  <path d=\"{}\" fill=\"rgba(37,99,235,0.25)\" stroke=\"none\"/>\n",
        band_data
    ));
    svg.push_str(&format!(
        "  <path d=\"{}\" fill=\"none\" stroke=\"#2563eb\" stroke-width=\"2\"/>\n",
        line_data
    ));
    svg.push_str("</svg>");
    svg
}

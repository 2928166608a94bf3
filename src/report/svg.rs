//! Standalone SVG rendering of dashboard charts.
//!
//! Uses the same layout as the PDF dashboard, flipped into SVG's y-down
//! coordinates.

use super::charts::Chart;
use super::layout::{layout_chart, Anchor, Frame, Shape};
use log::debug;

/// SVG chart width in px
pub const CHART_WIDTH: f64 = 480.0;
/// SVG chart height in px
pub const CHART_HEIGHT: f64 = 360.0;

// Layout is in points; scale up for a readable standalone image
const LAYOUT_WIDTH: f64 = 270.0;
const LAYOUT_HEIGHT: f64 = 202.5;

/// Render one chart as an SVG document
///
/// **Public** - used for the optional charts directory export
pub fn render_chart_svg(chart: &Chart) -> String {
    let shapes = layout_chart(
        chart,
        Frame::new(0.0, 0.0, LAYOUT_WIDTH, LAYOUT_HEIGHT).inset(4.0, 4.0, 4.0, 4.0),
    );
    let scale = CHART_WIDTH / LAYOUT_WIDTH;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {lw} {lh}">"#,
        w = CHART_WIDTH,
        h = CHART_HEIGHT,
        lw = LAYOUT_WIDTH,
        lh = LAYOUT_HEIGHT,
    ));
    svg.push_str(r#"<style>text { font-family: Helvetica, Arial, sans-serif; }</style>"#);
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        LAYOUT_WIDTH, LAYOUT_HEIGHT
    ));

    for shape in &shapes {
        push_shape(&mut svg, shape);
    }

    svg.push_str("</svg>");

    debug!(
        "Rendered chart '{}' ({} shapes, scale {:.2}, {} bytes)",
        chart.slug(),
        shapes.len(),
        scale,
        svg.len()
    );
    svg
}

fn push_shape(out: &mut String, shape: &Shape) {
    match shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => {
            out.push_str(&format!(
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                x,
                flip(y + height),
                width,
                height,
                fill.hex()
            ));
        }
        Shape::Polygon { points, fill } => {
            out.push_str(&format!(
                r#"<polygon points="{}" fill="{}" stroke="white" stroke-width="0.5"/>"#,
                point_list(points),
                fill.hex()
            ));
        }
        Shape::Polyline {
            points,
            stroke,
            width,
        } => {
            out.push_str(&format!(
                r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{:.2}"/>"#,
                point_list(points),
                stroke.hex(),
                width
            ));
        }
        Shape::Text {
            x,
            y,
            size,
            bold,
            anchor,
            color,
            text,
        } => {
            let anchor = match anchor {
                Anchor::Start => "start",
                Anchor::Middle => "middle",
                Anchor::End => "end",
            };
            let weight = if *bold { r#" font-weight="bold""# } else { "" };
            out.push_str(&format!(
                r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" text-anchor="{}" fill="{}"{}>{}</text>"#,
                x,
                flip(*y),
                size,
                anchor,
                color.hex(),
                weight,
                escape_xml(text)
            ));
        }
    }
}

fn flip(y: f64) -> f64 {
    LAYOUT_HEIGHT - y
}

fn point_list(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", x, flip(*y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text content for XML
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::results::DailyAverages;
    use crate::report::charts::daily_metrics_chart;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_render_bar_chart_svg() {
        let chart = daily_metrics_chart(&DailyAverages {
            steps: 7638.0,
            very_active_minutes: 21.2,
            fairly_active_minutes: 13.6,
            lightly_active_minutes: 192.8,
            sedentary_minutes: 991.2,
        });

        let svg = render_chart_svg(&chart);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Average Daily Metrics"));
        assert!(svg.contains("7,638"));
        assert!(svg.contains("#3498DB"));
        // One bar per metric plus the background
        assert_eq!(svg.matches("<rect").count(), 6);
    }
}

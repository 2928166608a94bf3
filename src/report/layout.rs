//! Backend-neutral page and chart layout.
//!
//! Pages and charts are flattened into [`Shape`]s in PDF user space (points,
//! origin bottom-left, y up). The PDF backend emits them as content
//! operators; the SVG backend flips y.

use super::charts::{Chart, ChartKind, Rgb, AXIS_COLOR, TEXT_COLOR};
use super::pages::{format_thousands, Block, ReportPage};
use std::f64::consts::PI;

/// US Letter, portrait
pub const PAGE_WIDTH: f64 = 612.0;
pub const PAGE_HEIGHT: f64 = 792.0;
const PAGE_MARGIN: f64 = 54.0;

const TITLE_SIZE: f64 = 18.0;
const HEADING_SIZE: f64 = 11.0;
const BODY_SIZE: f64 = 10.0;
const LINE_SPACING: f64 = 1.35;
const BULLET_INDENT: f64 = 14.0;

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// A drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Rgb,
    },
    /// Closed filled polygon
    Polygon { points: Vec<(f64, f64)>, fill: Rgb },
    /// Open stroked path
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: Rgb,
        width: f64,
    },
    /// Single line of text; `y` is the baseline
    Text {
        x: f64,
        y: f64,
        size: f64,
        bold: bool,
        anchor: Anchor,
        color: Rgb,
        text: String,
    },
}

impl Shape {
    fn text(x: f64, y: f64, size: f64, anchor: Anchor, text: impl Into<String>) -> Self {
        Shape::Text {
            x,
            y,
            size,
            bold: false,
            anchor,
            color: TEXT_COLOR,
            text: text.into(),
        }
    }

    fn bold_text(x: f64, y: f64, size: f64, anchor: Anchor, text: impl Into<String>) -> Self {
        Shape::Text {
            x,
            y,
            size,
            bold: true,
            anchor,
            color: TEXT_COLOR,
            text: text.into(),
        }
    }

    fn line(from: (f64, f64), to: (f64, f64)) -> Self {
        Shape::Polyline {
            points: vec![from, to],
            stroke: AXIS_COLOR,
            width: 0.75,
        }
    }
}

/// Rectangle with its origin at the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Shrink by the given insets
    pub fn inset(&self, left: f64, right: f64, top: f64, bottom: f64) -> Frame {
        Frame::new(
            self.x + left,
            self.y + bottom,
            (self.width - left - right).max(0.0),
            (self.height - top - bottom).max(0.0),
        )
    }
}

/// Approximate Helvetica advance width of `text` at `size`
///
/// Used for wrapping and for anchoring text in the PDF backend, which has no
/// text-anchor operator.
pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars()
        .map(|c| match c {
            ' ' | 'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 0.28,
            'f' | 't' | 'r' | '(' | ')' | '-' | '"' => 0.36,
            'm' | 'w' | 'M' | 'W' | '%' => 0.85,
            c if c.is_ascii_uppercase() || c.is_ascii_digit() => 0.64,
            _ => 0.54,
        })
        .sum::<f64>()
        * size
}

/// Greedy word wrap to `max_width`
pub fn wrap_text(text: &str, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width(&candidate, size) > max_width && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lay out one report page on a Letter sheet
///
/// Text blocks flow top to bottom; a chart block takes the remaining height
/// as a two-column grid.
pub fn layout_page(page: &ReportPage) -> Vec<Shape> {
    let content = Frame::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT).inset(
        PAGE_MARGIN,
        PAGE_MARGIN,
        PAGE_MARGIN,
        PAGE_MARGIN,
    );
    let mut shapes = Vec::new();
    let mut cursor = content.top();

    for block in &page.blocks {
        match block {
            Block::Title(text) => {
                cursor -= TITLE_SIZE;
                for line in wrap_text(text, TITLE_SIZE, content.width) {
                    shapes.push(Shape::bold_text(
                        content.center_x(),
                        cursor,
                        TITLE_SIZE,
                        Anchor::Middle,
                        line,
                    ));
                    cursor -= TITLE_SIZE * LINE_SPACING;
                }
                cursor -= TITLE_SIZE * 0.5;
            }
            Block::Heading(text) => {
                cursor -= HEADING_SIZE * 0.6;
                cursor -= HEADING_SIZE;
                shapes.push(Shape::bold_text(
                    content.x,
                    cursor,
                    HEADING_SIZE,
                    Anchor::Start,
                    text.clone(),
                ));
                cursor -= HEADING_SIZE * (LINE_SPACING - 1.0) + 2.0;
            }
            Block::Paragraph(text) => {
                for line in wrap_text(text, BODY_SIZE, content.width) {
                    cursor -= BODY_SIZE;
                    shapes.push(Shape::text(content.x, cursor, BODY_SIZE, Anchor::Start, line));
                    cursor -= BODY_SIZE * (LINE_SPACING - 1.0);
                }
            }
            Block::Bullets(items) => {
                let text_x = content.x + BULLET_INDENT;
                for item in items {
                    let lines = wrap_text(item, BODY_SIZE, content.width - BULLET_INDENT);
                    for (i, line) in lines.into_iter().enumerate() {
                        cursor -= BODY_SIZE;
                        if i == 0 {
                            shapes.push(Shape::text(
                                content.x + 4.0,
                                cursor,
                                BODY_SIZE,
                                Anchor::Start,
                                "\u{2022}",
                            ));
                        }
                        shapes.push(Shape::text(text_x, cursor, BODY_SIZE, Anchor::Start, line));
                        cursor -= BODY_SIZE * (LINE_SPACING - 1.0);
                    }
                }
            }
            Block::Charts(charts) => {
                let area = Frame::new(content.x, content.y, content.width, cursor - content.y);
                shapes.extend(layout_chart_grid(charts, area));
                cursor = content.y;
            }
        }
    }

    shapes
}

/// Two charts per row, rows sharing the frame height evenly
pub fn layout_chart_grid(charts: &[Chart], area: Frame) -> Vec<Shape> {
    if charts.is_empty() {
        return Vec::new();
    }

    let rows = charts.len().div_ceil(2);
    let cell_width = area.width / 2.0;
    let cell_height = area.height / rows as f64;

    charts
        .iter()
        .enumerate()
        .flat_map(|(i, chart)| {
            let (row, col) = (i / 2, i % 2);
            let cell = Frame::new(
                area.x + col as f64 * cell_width,
                area.top() - (row + 1) as f64 * cell_height,
                cell_width,
                cell_height,
            );
            layout_chart(chart, cell.inset(6.0, 6.0, 6.0, 6.0))
        })
        .collect()
}

/// Lay out one chart inside `frame`
pub fn layout_chart(chart: &Chart, frame: Frame) -> Vec<Shape> {
    let mut shapes = Vec::new();

    // Title, one shape per line
    let mut title_y = frame.top() - 10.0;
    for line in chart.title.lines() {
        shapes.push(Shape::bold_text(
            frame.center_x(),
            title_y,
            9.5,
            Anchor::Middle,
            line,
        ));
        title_y -= 11.5;
    }
    let body = Frame::new(frame.x, frame.y, frame.width, title_y - frame.y - 2.0);

    match chart.kind {
        ChartKind::Pie => layout_pie(chart, body, &mut shapes),
        ChartKind::VerticalBar => layout_vertical_bars(chart, body, &mut shapes),
        ChartKind::Line => layout_line(chart, body, &mut shapes),
        ChartKind::HorizontalBar => layout_horizontal_bars(chart, body, &mut shapes),
    }

    shapes
}

fn layout_pie(chart: &Chart, body: Frame, shapes: &mut Vec<Shape>) {
    let values: Vec<f64> = chart
        .points
        .iter()
        .map(|p| p.value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(0.0))
        .collect();
    let total: f64 = values.iter().sum();

    if total <= 0.0 {
        shapes.push(Shape::text(
            body.center_x(),
            body.y + body.height / 2.0,
            9.0,
            Anchor::Middle,
            "No data",
        ));
        return;
    }

    let radius = (body.height.min(body.width * 0.55) / 2.0 - 4.0).max(1.0);
    let center = (body.x + radius + 6.0, body.y + body.height / 2.0);

    // Counter-clockwise from twelve o'clock
    let mut start = PI / 2.0;
    for (point, &value) in chart.points.iter().zip(&values) {
        if value <= 0.0 {
            continue;
        }
        let sweep = value / total * 2.0 * PI;
        shapes.push(Shape::Polygon {
            points: wedge(center, radius, start, start + sweep),
            fill: point.color,
        });

        let share = value / total * 100.0;
        if share >= 4.0 {
            let mid = start + sweep / 2.0;
            shapes.push(Shape::text(
                center.0 + radius * 0.62 * mid.cos(),
                center.1 + radius * 0.62 * mid.sin() - 3.0,
                7.5,
                Anchor::Middle,
                format!("{:.1}%", share),
            ));
        }
        start += sweep;
    }

    // Legend
    let legend_x = center.0 + radius + 14.0;
    let mut legend_y = center.1 + chart.points.len() as f64 * 7.0;
    for point in &chart.points {
        shapes.push(Shape::Rect {
            x: legend_x,
            y: legend_y - 1.0,
            width: 8.0,
            height: 8.0,
            fill: point.color,
        });
        shapes.push(Shape::text(
            legend_x + 12.0,
            legend_y,
            7.5,
            Anchor::Start,
            point.label.clone(),
        ));
        legend_y -= 14.0;
    }
}

/// Polygon approximating a circular sector
fn wedge(center: (f64, f64), radius: f64, from: f64, to: f64) -> Vec<(f64, f64)> {
    let steps = (((to - from) / (PI / 36.0)).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let angle = from + (to - from) * i as f64 / steps as f64;
        points.push((
            center.0 + radius * angle.cos(),
            center.1 + radius * angle.sin(),
        ));
    }
    points
}

/// Upper end of the value axis with headroom for labels
fn axis_max(chart: &Chart) -> f64 {
    let max = chart.max_value();
    if max > 0.0 {
        max * 1.15
    } else {
        1.0
    }
}

fn draw_axes(plot: Frame, shapes: &mut Vec<Shape>) {
    shapes.push(Shape::line((plot.x, plot.y), (plot.right(), plot.y)));
    shapes.push(Shape::line((plot.x, plot.y), (plot.x, plot.top())));
}

fn draw_value_ticks(plot: Frame, scale: f64, shapes: &mut Vec<Shape>) {
    for i in 0..=4 {
        let value = scale * i as f64 / 4.0;
        let y = plot.y + plot.height * i as f64 / 4.0;
        shapes.push(Shape::text(
            plot.x - 3.0,
            y - 2.0,
            6.0,
            Anchor::End,
            format_thousands(value),
        ));
    }
}

fn draw_axis_titles(chart: &Chart, plot: Frame, shapes: &mut Vec<Shape>) {
    if let Some(name) = &chart.value_axis {
        shapes.push(Shape::text(plot.x, plot.top() + 4.0, 7.0, Anchor::Start, name.clone()));
    }
    if let Some(name) = &chart.category_axis {
        shapes.push(Shape::text(
            plot.center_x(),
            plot.y - 26.0,
            7.0,
            Anchor::Middle,
            name.clone(),
        ));
    }
}

fn layout_vertical_bars(chart: &Chart, body: Frame, shapes: &mut Vec<Shape>) {
    let plot = body.inset(34.0, 8.0, 14.0, 30.0);
    let scale = axis_max(chart);
    let slot = plot.width / chart.points.len().max(1) as f64;

    draw_axes(plot, shapes);
    draw_value_ticks(plot, scale, shapes);
    draw_axis_titles(chart, plot, shapes);

    for (i, point) in chart.points.iter().enumerate() {
        let center = plot.x + slot * (i as f64 + 0.5);

        if let Some(value) = point.value.filter(|v| v.is_finite()) {
            let height = (value.max(0.0) / scale) * plot.height;
            shapes.push(Shape::Rect {
                x: center - slot * 0.3,
                y: plot.y,
                width: slot * 0.6,
                height,
                fill: point.color,
            });
            shapes.push(Shape::text(
                center,
                plot.y + height + 3.0,
                6.5,
                Anchor::Middle,
                format_thousands(value),
            ));
        }

        for (line_no, line) in point.label.lines().enumerate() {
            shapes.push(Shape::text(
                center,
                plot.y - 9.0 - line_no as f64 * 8.0,
                6.0,
                Anchor::Middle,
                line,
            ));
        }
    }
}

fn layout_line(chart: &Chart, body: Frame, shapes: &mut Vec<Shape>) {
    let plot = body.inset(34.0, 8.0, 14.0, 32.0);
    let scale = axis_max(chart);
    let slot = plot.width / chart.points.len().max(1) as f64;

    draw_axes(plot, shapes);
    draw_value_ticks(plot, scale, shapes);
    draw_axis_titles(chart, plot, shapes);

    let mut segment: Vec<(f64, f64)> = Vec::new();
    let mut markers = Vec::new();

    for (i, point) in chart.points.iter().enumerate() {
        let x = plot.x + slot * (i as f64 + 0.5);
        let label: String = point.label.chars().take(3).collect();
        shapes.push(Shape::text(x, plot.y - 9.0, 6.5, Anchor::Middle, label));

        match point.value.filter(|v| v.is_finite()) {
            Some(value) => {
                let y = plot.y + (value.max(0.0) / scale) * plot.height;
                segment.push((x, y));
                markers.push(Shape::Rect {
                    x: x - 2.0,
                    y: y - 2.0,
                    width: 4.0,
                    height: 4.0,
                    fill: point.color,
                });
            }
            // Missing day: break the line
            None => flush_segment(&mut segment, point.color, shapes),
        }
    }

    let color = chart.points.first().map(|p| p.color).unwrap_or(TEXT_COLOR);
    flush_segment(&mut segment, color, shapes);
    shapes.extend(markers);
}

fn flush_segment(segment: &mut Vec<(f64, f64)>, stroke: Rgb, shapes: &mut Vec<Shape>) {
    if segment.len() >= 2 {
        shapes.push(Shape::Polyline {
            points: std::mem::take(segment),
            stroke,
            width: 1.5,
        });
    } else {
        segment.clear();
    }
}

fn layout_horizontal_bars(chart: &Chart, body: Frame, shapes: &mut Vec<Shape>) {
    let plot = body.inset(62.0, 30.0, 6.0, 32.0);
    let max = chart.max_value();
    let scale = if max > 0.0 { max * 1.2 } else { 1.0 };
    let slot = plot.height / chart.points.len().max(1) as f64;

    draw_axes(plot, shapes);
    // Values run along x here
    if let Some(name) = &chart.value_axis {
        shapes.push(Shape::text(
            plot.center_x(),
            plot.y - 14.0,
            7.0,
            Anchor::Middle,
            name.clone(),
        ));
    }

    // First category at the bottom
    for (i, point) in chart.points.iter().enumerate() {
        let center = plot.y + slot * (i as f64 + 0.5);
        shapes.push(Shape::text(
            plot.x - 4.0,
            center - 2.5,
            6.5,
            Anchor::End,
            point.label.clone(),
        ));

        if let Some(value) = point.value.filter(|v| v.is_finite()) {
            let width = (value.max(0.0) / scale) * plot.width;
            shapes.push(Shape::Rect {
                x: plot.x,
                y: center - slot * 0.3,
                width,
                height: slot * 0.6,
                fill: point.color,
            });
            shapes.push(Shape::text(
                plot.x + width + 3.0,
                center - 2.5,
                6.5,
                Anchor::Start,
                format!("{:.1}%", value),
            ));
        }
    }
}

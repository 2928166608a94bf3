//! PDF backend.
//!
//! Builds an in-memory `lopdf::Document` from laid-out pages using the two
//! standard Helvetica faces, so no font files are embedded.

use super::charts::Rgb;
use super::layout::{layout_page, text_width, Anchor, Shape, PAGE_HEIGHT, PAGE_WIDTH};
use super::pages::{ReportConfig, ReportPage};
use crate::utils::error::RenderError;
use log::{debug, info};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Build the report document
///
/// **Public** - main entry point for PDF rendering
///
/// # Arguments
/// * `pages` - Pages from `render_pages`, in order
/// * `config` - Supplies the document title
///
/// # Returns
/// A document with one PDF page per report page; save it with `output::write_pdf`
///
/// # Errors
/// * `RenderError::Pdf` - A content stream could not be encoded
pub fn build_pdf(pages: &[ReportPage], config: &ReportConfig) -> Result<Document, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for (index, page) in pages.iter().enumerate() {
        let shapes = layout_page(page);
        let content = Content {
            operations: shapes_to_operations(&shapes),
        };
        let encoded = content.encode()?;
        debug!(
            "Page {}: {} shapes, {} content bytes",
            index + 1,
            shapes.len(),
            encoded.len()
        );

        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(PAGE_WIDTH as f32),
                Object::Real(PAGE_HEIGHT as f32),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(&config.title)),
        "Producer" => Object::string_literal(format!("activity-insights {}", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    info!("PDF document built ({} pages)", page_count);
    Ok(doc)
}

/// Translate shapes into content stream operators
fn shapes_to_operations(shapes: &[Shape]) -> Vec<Operation> {
    let mut ops = Vec::new();

    for shape in shapes {
        match shape {
            Shape::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                ops.push(fill_color(*fill));
                ops.push(Operation::new(
                    "re",
                    vec![real(*x), real(*y), real(*width), real(*height)],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            Shape::Polygon { points, fill } => {
                if points.len() < 3 {
                    continue;
                }
                ops.push(fill_color(*fill));
                push_path(&mut ops, points);
                ops.push(Operation::new("h", vec![]));
                ops.push(Operation::new("f", vec![]));
            }
            Shape::Polyline {
                points,
                stroke,
                width,
            } => {
                if points.len() < 2 {
                    continue;
                }
                let (r, g, b) = stroke.unit();
                ops.push(Operation::new(
                    "RG",
                    vec![Object::Real(r), Object::Real(g), Object::Real(b)],
                ));
                ops.push(Operation::new("w", vec![real(*width)]));
                push_path(&mut ops, points);
                ops.push(Operation::new("S", vec![]));
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
                let offset = match anchor {
                    Anchor::Start => 0.0,
                    Anchor::Middle => text_width(text, *size) / 2.0,
                    Anchor::End => text_width(text, *size),
                };
                let font = if *bold { BOLD_FONT } else { REGULAR_FONT };

                ops.push(Operation::new("BT", vec![]));
                ops.push(fill_color(*color));
                ops.push(Operation::new(
                    "Tf",
                    vec![Object::Name(font.as_bytes().to_vec()), real(*size)],
                ));
                ops.push(Operation::new("Td", vec![real(x - offset), real(*y)]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_win_ansi(text))],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
        }
    }

    ops
}

fn push_path(ops: &mut Vec<Operation>, points: &[(f64, f64)]) {
    for (i, &(x, y)) in points.iter().enumerate() {
        let op = if i == 0 { "m" } else { "l" };
        ops.push(Operation::new(op, vec![real(x), real(y)]));
    }
}

fn fill_color(color: Rgb) -> Operation {
    let (r, g, b) = color.unit();
    Operation::new("rg", vec![Object::Real(r), Object::Real(g), Object::Real(b)])
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

/// Encode text for the standard fonts' WinAnsi encoding
///
/// Characters outside the encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

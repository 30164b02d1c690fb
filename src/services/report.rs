//! Printable representative reports.
//!
//! Layout is A4 portrait: a filled header band, a section title, then one
//! block of labelled fields per representative. A block that does not fit
//! the rest of a page starts a new one; a block taller than a whole page
//! continues line by line onto the following pages.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect, Rgb,
};
use std::io::BufWriter;

use crate::error::{AppError, AppResult};
use crate::models::representative::Representative;

pub const MISSING_FIELD: &str = "N/A";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const HEADER_BAND: f32 = 28.0;
const CONTENT_TOP: f32 = PAGE_HEIGHT - HEADER_BAND - 10.0;
const LINE_HEIGHT: f32 = 5.0;
const BLOCK_GAP: f32 = 6.0;
const VALUE_INDENT: f32 = 35.0;
// Fits the value column at 10pt Helvetica.
const WRAP_CHARS: usize = 70;

fn or_missing(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MISSING_FIELD.to_string(),
    }
}

fn join_or_missing(items: &[String]) -> String {
    let joined = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        MISSING_FIELD.to_string()
    } else {
        joined
    }
}

/// The labelled fields printed for one representative, in print order.
pub fn field_lines(rep: &Representative) -> Vec<(&'static str, String)> {
    vec![
        ("Name", or_missing(rep.rep_name.as_deref())),
        ("Facility / Drug", or_missing(rep.facility_and_drug.as_deref())),
        ("Phone", or_missing(rep.phone_number.as_deref())),
        ("Fax", or_missing(rep.fax_number.as_deref())),
        ("Location", or_missing(rep.location.as_deref())),
        ("Tags", join_or_missing(&rep.tags)),
        ("Links", join_or_missing(&rep.pdf_links)),
    ]
}

/// Word-wraps `text` to lines of at most `max_chars` characters. Words longer
/// than a line (URLs, mostly) are cut into line-sized pieces.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        for piece in chars.chunks(max_chars) {
            if current_len > 0 && current_len + 1 + piece.len() > max_chars {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(piece);
            current_len += piece.len();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// One printed value line. `label` is set on the first line of each field.
#[derive(Debug, Clone, PartialEq)]
struct PlacedLine {
    page: usize,
    y: f32,
    label: Option<&'static str>,
    text: String,
}

/// Assigns every field line of `reps` a page and baseline, starting at
/// `first_y` on page 0. No baseline ever falls below the bottom margin.
fn layout_blocks(reps: &[Representative], first_y: f32) -> Vec<PlacedLine> {
    let mut placed = Vec::new();
    let mut page = 0;
    let mut y = first_y;

    for rep in reps {
        let block: Vec<(&'static str, Vec<String>)> = field_lines(rep)
            .into_iter()
            .map(|(label, value)| (label, wrap_text(&value, WRAP_CHARS)))
            .collect();
        let block_height: f32 = block
            .iter()
            .map(|(_, lines)| lines.len() as f32 * LINE_HEIGHT)
            .sum::<f32>()
            + BLOCK_GAP;

        if y - block_height < MARGIN && block_height <= CONTENT_TOP - MARGIN {
            page += 1;
            y = CONTENT_TOP;
        }

        for (label, lines) in block {
            for (idx, text) in lines.into_iter().enumerate() {
                if y < MARGIN {
                    page += 1;
                    y = CONTENT_TOP;
                }
                placed.push(PlacedLine {
                    page,
                    y,
                    label: (idx == 0).then_some(label),
                    text,
                });
                y -= LINE_HEIGHT;
            }
        }
        y -= BLOCK_GAP;
    }

    placed
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn pdf_error(context: &str, err: impl std::fmt::Display) -> AppError {
    AppError::Internal(format!("PDF {} error: {}", context, err))
}

fn draw_header(layer: &PdfLayerReference, fonts: &Fonts, title: &str, generated: &str) {
    let band_bottom = PAGE_HEIGHT - HEADER_BAND;

    layer.set_fill_color(Color::Rgb(Rgb::new(0.16, 0.38, 0.55, None)));
    layer.add_rect(Rect::new(Mm(0.0), Mm(band_bottom), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT)));

    layer.set_fill_color(Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None)));
    layer.use_text(title, 16.0, Mm(MARGIN), Mm(band_bottom + 12.0), &fonts.bold);
    layer.use_text(
        format!("Generated {}", generated),
        9.0,
        Mm(MARGIN),
        Mm(band_bottom + 5.0),
        &fonts.regular,
    );

    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
}

fn new_page(
    doc: &PdfDocumentReference,
    fonts: &Fonts,
    title: &str,
    generated: &str,
) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);
    draw_header(&layer, fonts, title, generated);
    layer
}

/// Renders `reps` under `section_title` and returns the PDF bytes.
pub fn render_representatives(section_title: &str, reps: &[Representative]) -> AppResult<Vec<u8>> {
    let title = "Clinic Representatives";
    let generated = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();

    let (doc, page1, layer1) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| pdf_error("font", e))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| pdf_error("font", e))?,
    };

    let first = doc.get_page(page1).get_layer(layer1);
    draw_header(&first, &fonts, title, &generated);
    first.use_text(section_title, 13.0, Mm(MARGIN), Mm(CONTENT_TOP), &fonts.bold);
    let first_y = CONTENT_TOP - LINE_HEIGHT - BLOCK_GAP;

    if reps.is_empty() {
        first.use_text(
            "No representatives found.",
            10.0,
            Mm(MARGIN),
            Mm(first_y),
            &fonts.regular,
        );
    }

    let mut layers = vec![first];
    for line in layout_blocks(reps, first_y) {
        while layers.len() <= line.page {
            layers.push(new_page(&doc, &fonts, title, &generated));
        }
        let layer = &layers[line.page];
        if let Some(label) = line.label {
            layer.use_text(format!("{}:", label), 10.0, Mm(MARGIN), Mm(line.y), &fonts.bold);
        }
        layer.use_text(
            line.text,
            10.0,
            Mm(MARGIN + VALUE_INDENT),
            Mm(line.y),
            &fonts.regular,
        );
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf).map_err(|e| pdf_error("save", e))?;
    buf.into_inner().map_err(|e| pdf_error("buffer", e))
}

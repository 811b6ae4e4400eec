// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: lay out a backup page using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.
//
// Page one carries the header, the key text, the notes and the QR code. Key
// text that does not fit above the notes continues on further pages.

use std::path::Path;

use paperkey_core::PaperSize;
use paperkey_core::config::BackupConfig;
use paperkey_core::error::Result;
use printpdf::{
    BuiltinFont, Color, Greyscale, Line, LinePoint, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions,
    PdfWarnMsg, Point, Pt, RawImage, RawImageData, RawImageFormat, TextItem, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::assemble::DocumentPayload;

/// One inch in PDF points.
const INCH: f32 = 72.0;

const KEY_FONT_SIZE: f32 = 7.0;
const KEY_LINE_HEIGHT: f32 = 8.0;
const NOTE_FONT_SIZE: f32 = 9.0;
const NOTE_LINE_HEIGHT: f32 = 11.0;
/// Rows always kept free for notes, even when there are fewer.
const MIN_NOTE_ROWS: usize = 5;
/// Wrapped note rows beyond this are dropped so the key text keeps room.
const MAX_NOTE_ROWS: usize = 20;
/// Gap between the last note row and the top of the QR code.
const NOTE_QR_GAP: f32 = 0.2 * INCH;

/// Rough Courier advance width as a fraction of the font size.
const COURIER_ADVANCE: f32 = 0.6;
/// Rough average Helvetica glyph width as a fraction of the font size.
const HELVETICA_ADVANCE: f32 = 0.5;

/// Largest printed QR code edge.
const MAX_QR_EDGE: f32 = 3.8 * INCH;
/// Render density for the embedded QR raster.
const QR_DPI: f32 = 300.0;

/// Lays out [`DocumentPayload`]s as printable PDF.
pub struct PdfWriter {
    paper_size: PaperSize,
    /// Pixels per QR module in the embedded raster.
    module_pixels: u32,
}

impl PdfWriter {
    pub fn new(paper_size: PaperSize, module_pixels: u32) -> Self {
        Self {
            paper_size,
            module_pixels: module_pixels.max(1),
        }
    }

    /// A4 with 10-pixel modules.
    pub fn a4() -> Self {
        Self::new(PaperSize::A4, 10)
    }

    pub fn from_config(config: &BackupConfig) -> Self {
        Self::new(config.paper_size, config.module_pixels)
    }

    /// Page size in points.
    fn page_points(&self) -> (f32, f32) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (
            Mm(w_mm as f32).into_pt().0,
            Mm(h_mm as f32).into_pt().0,
        )
    }

    /// Lay out `payload` and return the serialised PDF.
    #[instrument(skip_all, fields(filename = payload.filename(), fingerprint = %payload.fingerprint()))]
    pub fn render_backup(&self, payload: &DocumentPayload) -> Result<Vec<u8>> {
        let (page_w, page_h) = self.page_points();
        let (page_w_mm, page_h_mm) = self.paper_size.dimensions_mm();
        let margin = INCH;
        let usable_w = page_w - 2.0 * margin;

        let mut doc = PdfDocument::new(payload.title());

        // -- QR code, bottom centre -----------------------------------------
        let raster = payload.barcode().to_gray_image(self.module_pixels);
        let (px_w, px_h) = raster.dimensions();
        let rgb: Vec<u8> = raster.into_raw().into_iter().flat_map(|v| [v, v, v]).collect();
        let image = RawImage {
            pixels: RawImageData::U8(rgb),
            width: px_w as usize,
            height: px_h as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let image_id = doc.add_image(&image);

        let qr_edge = MAX_QR_EDGE.min(usable_w);
        let native_edge = px_w as f32 / QR_DPI * INCH;
        let qr_scale = qr_edge / native_edge;
        let caption_y = 1.0 * INCH;
        let qr_y = caption_y + 0.2 * INCH;
        let qr_x = (page_w - qr_edge) / 2.0;

        // -- Notes block, above the QR code ---------------------------------
        let max_note_chars = max_chars(usable_w, NOTE_FONT_SIZE, HELVETICA_ADVANCE);
        let note_lines = note_rows(payload.notes(), max_note_chars);
        let notes_heading_y = notes_heading_baseline(qr_y + qr_edge, note_lines.len());

        // -- Header and key text --------------------------------------------
        let mut ops: Vec<Op> = Vec::new();
        write_line(&mut ops, margin, page_h - 0.8 * INCH, 18.0, BuiltinFont::HelveticaBold, payload.title());
        write_line(&mut ops, margin, page_h - 1.1 * INCH, 9.0, BuiltinFont::HelveticaBold, &payload.filename_label());
        write_line(&mut ops, margin, page_h - 1.25 * INCH, 9.0, BuiltinFont::HelveticaBold, &payload.generated_label());
        write_line(&mut ops, margin, page_h - 1.4 * INCH, 8.0, BuiltinFont::CourierBold, &payload.fingerprint_label());
        draw_rule(&mut ops, margin, page_w - margin, page_h - 1.5 * INCH);

        let max_key_chars = max_chars(usable_w, KEY_FONT_SIZE, COURIER_ADVANCE);
        let key_lines: Vec<String> = payload
            .key_lines()
            .flat_map(|line| hard_wrap(line, max_key_chars))
            .collect();

        let key_top = page_h - 1.8 * INCH;
        let key_floor = notes_heading_y + 2.0 * NOTE_LINE_HEIGHT;
        let first_page_capacity = (((key_top - key_floor) / KEY_LINE_HEIGHT).floor() as usize).max(1);
        let (first, rest) = key_lines.split_at(first_page_capacity.min(key_lines.len()));

        for (i, line) in first.iter().enumerate() {
            let y = key_top - i as f32 * KEY_LINE_HEIGHT;
            write_line(&mut ops, margin, y, KEY_FONT_SIZE, BuiltinFont::Courier, line);
        }
        if !rest.is_empty() {
            let y = key_top - first.len() as f32 * KEY_LINE_HEIGHT;
            write_line(&mut ops, margin, y, KEY_FONT_SIZE, BuiltinFont::HelveticaOblique, "(key text continues on the next page)");
        }

        write_line(&mut ops, margin, notes_heading_y, 10.0, BuiltinFont::HelveticaOblique, "User Annotations:");
        for (i, line) in note_lines.iter().enumerate() {
            let y = notes_heading_y - (i as f32 + 1.0) * NOTE_LINE_HEIGHT;
            write_line(&mut ops, margin, y, NOTE_FONT_SIZE, BuiltinFont::Helvetica, line);
        }

        ops.push(Op::UseXobject {
            id: image_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(qr_x)),
                translate_y: Some(Pt(qr_y)),
                scale_x: Some(qr_scale),
                scale_y: Some(qr_scale),
                dpi: Some(QR_DPI),
                rotate: None,
            },
        });

        let caption = payload.caption();
        let caption_w = caption.len() as f32 * 10.0 * 0.6;
        write_line(&mut ops, (page_w - caption_w) / 2.0, caption_y, 10.0, BuiltinFont::HelveticaBold, caption);

        let mut pages = vec![PdfPage::new(Mm(page_w_mm as f32), Mm(page_h_mm as f32), ops)];

        // -- Continuation pages ---------------------------------------------
        if !rest.is_empty() {
            warn!(
                overflow_lines = rest.len(),
                "key text longer than the first page, continuing"
            );
            let per_page = (((page_h - 2.0 * margin) / KEY_LINE_HEIGHT).floor() as usize).max(1);
            for chunk in rest.chunks(per_page) {
                let mut ops = Vec::new();
                for (i, line) in chunk.iter().enumerate() {
                    let y = page_h - margin - i as f32 * KEY_LINE_HEIGHT;
                    write_line(&mut ops, margin, y, KEY_FONT_SIZE, BuiltinFont::Courier, line);
                }
                pages.push(PdfPage::new(Mm(page_w_mm as f32), Mm(page_h_mm as f32), ops));
            }
        }

        let page_count = pages.len();
        doc.with_pages(pages);

        debug!(
            key_lines = key_lines.len(),
            note_lines = note_lines.len(),
            pages = page_count,
            qr_edge_pt = qr_edge,
            "backup layout complete"
        );

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "printpdf reported warnings");
        }

        info!(bytes = output.len(), "backup PDF rendered");
        Ok(output)
    }

    /// Render and write to `path`.
    pub fn write_backup(&self, payload: &DocumentPayload, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.render_backup(payload)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote backup PDF to {}", path.as_ref().display());
        Ok(())
    }
}

/// Emit one line of text at (`x`, `y`) in points.
fn write_line(ops: &mut Vec<Op>, x: f32, y: f32, size: f32, font: BuiltinFont, text: &str) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point { x: Pt(x), y: Pt(y) },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(size),
        font,
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_owned())],
        font,
    });
    ops.push(Op::EndTextSection);
}

/// Thin horizontal rule from `x1` to `x2` at height `y`.
fn draw_rule(ops: &mut Vec<Op>, x1: f32, x2: f32, y: f32) {
    ops.push(Op::SaveGraphicsState);
    ops.push(Op::SetOutlineColor {
        col: Color::Greyscale(Greyscale::new(0.0, None)),
    });
    ops.push(Op::SetOutlineThickness { pt: Pt(0.75) });
    let point = |x: f32| LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    };
    ops.push(Op::DrawLine {
        line: Line {
            points: vec![point(x1), point(x2)],
            is_closed: false,
        },
    });
    ops.push(Op::RestoreGraphicsState);
}

/// Word-wrap the notes and cap the result at [`MAX_NOTE_ROWS`].
fn note_rows(notes: &[String], max_chars: usize) -> Vec<String> {
    let mut rows: Vec<String> = notes
        .iter()
        .flat_map(|line| wrap_text(line, max_chars))
        .collect();
    if rows.len() > MAX_NOTE_ROWS {
        warn!(
            wrapped = rows.len(),
            kept = MAX_NOTE_ROWS,
            "notes too long for the page, truncating"
        );
        rows.truncate(MAX_NOTE_ROWS);
    }
    rows
}

/// Baseline of the notes heading so that `rows` note lines end above
/// `qr_top`.
fn notes_heading_baseline(qr_top: f32, rows: usize) -> f32 {
    qr_top + NOTE_QR_GAP + NOTE_LINE_HEIGHT * rows.max(MIN_NOTE_ROWS) as f32
}

fn max_chars(width_pt: f32, font_size: f32, advance: f32) -> usize {
    ((width_pt / (font_size * advance)) as usize).max(1)
}

/// Break a line into `max_width`-character pieces without touching content.
/// Key text must survive verbatim, so no word logic here.
fn hard_wrap(line: &str, max_width: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(max_width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Word-wrap one paragraph so that no line exceeds `max_width` characters.
/// Words longer than `max_width` are force-broken.
fn wrap_text(paragraph: &str, max_width: usize) -> Vec<String> {
    let words: Vec<&str> = paragraph.split_whitespace().collect();
    if words.is_empty() {
        return vec![String::new()];
    }

    let mut result = Vec::new();
    let mut current_line = String::with_capacity(max_width);

    for word in words {
        if word.chars().count() > max_width {
            if !current_line.is_empty() {
                result.push(std::mem::take(&mut current_line));
            }
            let mut pieces = hard_wrap(word, max_width);
            if let Some(last) = pieces.pop() {
                result.extend(pieces);
                current_line = last;
            }
        } else if current_line.is_empty() {
            current_line.push_str(word);
        } else if current_line.chars().count() + 1 + word.chars().count() <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            result.push(std::mem::take(&mut current_line));
            current_line.push_str(word);
        }
    }

    if !current_line.is_empty() {
        result.push(current_line);
    }

    result
}

//! PDF serialisation of a recorded `Canvas` using `printpdf` 0.8.
//!
//! printpdf places text with a bottom-left origin in points, so every run is
//! flipped against the page height and converted from millimetres. Runs with
//! inter-word spacing are written word by word at their computed offsets.
//!
//! The built-in Type1 faces declare `/WinAnsiEncoding`, but printpdf hands
//! their text through as UTF-8. Strings are therefore encoded here and shown
//! with a raw `Tj`, which requires saving with `secure: false`.

use printpdf::{
    BuiltinFont, DictItem, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt,
};
use tracing::{debug, instrument};

use crate::layout::{FontFace, FontMetrics, Spacing, TextMeasurer};
use crate::render::canvas::{Canvas, Page};

/// Serialises every page of `canvas` into a PDF byte stream.
#[instrument(skip(canvas), fields(pages = canvas.pages().len()))]
pub fn render_pdf(canvas: &Canvas, title: &str) -> Vec<u8> {
    let size = canvas.size();
    let (page_w, page_h) = (Mm(size.width_mm), Mm(size.height_mm));

    let pages: Vec<PdfPage> = canvas
        .pages()
        .iter()
        .map(|page| PdfPage::new(page_w, page_h, page_ops(page, size.height_mm)))
        .collect();

    let mut doc = PdfDocument::new(title);
    doc.with_pages(pages);

    let options = PdfSaveOptions {
        secure: false,
        ..PdfSaveOptions::default()
    };
    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let output = doc.save(&options, &mut warnings);

    debug!(
        bytes = output.len(),
        warnings = warnings.len(),
        "PDF serialised"
    );
    output
}

fn page_ops(page: &Page, page_height_mm: f32) -> Vec<Op> {
    let mut ops = Vec::new();
    for item in &page.items {
        let run = &item.run;
        match run.spacing {
            Spacing::Natural => {
                push_text(&mut ops, &run.text, run.x, run.y, item.font, page_height_mm)
            }
            Spacing::InterWord { gap } => {
                let mut x = run.x;
                for word in run.text.split_whitespace() {
                    push_text(&mut ops, word, x, run.y, item.font, page_height_mm);
                    x += item.font.measure(word) + gap;
                }
            }
        }
    }
    ops
}

fn push_text(
    ops: &mut Vec<Op>,
    text: &str,
    x_mm: f32,
    y_mm: f32,
    font: FontMetrics,
    page_height_mm: f32,
) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Mm(x_mm).into_pt(),
            y: Mm(page_height_mm - y_mm).into_pt(),
        },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(font.size_pt),
        font: builtin_font(font.face),
    });
    // Registers the face in the page resources; writes nothing.
    ops.push(Op::WriteTextBuiltinFont {
        items: Vec::new(),
        font: builtin_font(font.face),
    });
    ops.push(Op::Unknown {
        key: "Tj".to_string(),
        value: vec![DictItem::Bytes(win_ansi(text))],
    });
    ops.push(Op::EndTextSection);
}

/// Encodes `text` as WinAnsi (cp1252). Unmappable characters become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => win_ansi_extra(c).unwrap_or(b'?'),
        })
        .collect()
}

/// The 0x80..=0x9F block, where cp1252 departs from Latin-1.
fn win_ansi_extra(c: char) -> Option<u8> {
    let byte = match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

fn builtin_font(face: FontFace) -> BuiltinFont {
    match face {
        FontFace::TimesRoman => BuiltinFont::TimesRoman,
        FontFace::TimesBold => BuiltinFont::TimesBold,
        FontFace::Helvetica => BuiltinFont::Helvetica,
        FontFace::HelveticaBold => BuiltinFont::HelveticaBold,
    }
}

//! Static font-metric tables for the PDF standard fonts used by registry documents.
//!
//! Widths are the Adobe AFM advance widths in 1/1000 em for ASCII 0x20..=0x7E
//! (95 printable characters). Index = (char as usize) - 32.
//!
//! Accented Latin letters used in Spanish text share their base letter's advance
//! in all four faces, so they are folded before lookup. Any other codepoint falls
//! back to the table's average width.

use serde::{Deserialize, Serialize};

/// Millimetres per PostScript point.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Advance of U+00B0 (degree sign) in every standard face.
const DEGREE_WIDTH: u16 = 400;

// ────────────────────────────────────────────────────────────────────────────
// Measurement capability
// ────────────────────────────────────────────────────────────────────────────

/// Measures the rendered width of a string in page units (millimetres).
///
/// Implementations must be pure: the same input always yields the same width.
pub trait TextMeasurer {
    fn measure(&self, s: &str) -> f32;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, s: &str) -> f32 {
        (**self).measure(s)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font faces
// ────────────────────────────────────────────────────────────────────────────

/// The standard-14 faces the certificate and visitor report are set in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    /// Certificate body and signature block.
    TimesRoman,
    /// Certificate issue line.
    TimesBold,
    /// Letterhead and visitor report cells.
    Helvetica,
    /// Visitor report header row.
    HelveticaBold,
}

/// A face at a concrete point size. This is the explicit font state handed to
/// the justifier and line breaker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontMetrics {
    pub face: FontFace,
    pub size_pt: f32,
}

impl FontMetrics {
    pub fn new(face: FontFace, size_pt: f32) -> Self {
        Self { face, size_pt }
    }

    /// Sum of glyph advances in 1/1000 em.
    pub fn units(&self, s: &str) -> u32 {
        let table = get_table(self.face);
        s.chars().map(|c| u32::from(table.advance(c))).sum()
    }
}

impl TextMeasurer for FontMetrics {
    fn measure(&self, s: &str) -> f32 {
        self.units(s) as f32 / 1000.0 * self.size_pt * PT_TO_MM
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Width tables
// ────────────────────────────────────────────────────────────────────────────

struct FontMetricTable {
    widths: [u16; 95],
    /// Fallback advance for characters outside ASCII and the folded Latin-1 set.
    average_char_width: u16,
}

impl FontMetricTable {
    fn advance(&self, c: char) -> u16 {
        if c == '°' {
            return DEGREE_WIDTH;
        }
        let code = fold_latin1(c) as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }
}

/// Maps accented Spanish letters and inverted punctuation onto their ASCII base.
fn fold_latin1(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'Á' | 'À' | 'Â' | 'Ä' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ñ' => 'N',
        'Ç' => 'C',
        '¿' => '?',
        '¡' => '!',
        '\u{a0}' => ' ',
        other => other,
    }
}

/// Times-Roman.
static TIMES_ROMAN: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        // 0    1    2    3    4    5    6    7    8    9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        278, 278, 564, 564, 564, 444, 921,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 469, 500, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        // {    |    }    ~
        480, 200, 480, 541,
    ],
    average_char_width: 500,
};

/// Times-Bold.
static TIMES_BOLD: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %     &    '    (    )    *    +    ,    -    .    /
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        // 0    1    2    3    4    5    6    7    8    9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        333, 333, 570, 570, 570, 500, 930,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
        // N    O    P    Q    R    S    T    U    V    W     X    Y    Z
        722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
        // [    \    ]    ^    _    `
        333, 278, 333, 581, 500, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
        // {    |    }    ~
        394, 220, 394, 520,
    ],
    average_char_width: 500,
};

/// Helvetica.
static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 556,
};

/// Helvetica-Bold.
static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    average_char_width: 611,
};

fn get_table(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::TimesRoman => &TIMES_ROMAN,
        FontFace::TimesBold => &TIMES_BOLD,
        FontFace::Helvetica => &HELVETICA,
        FontFace::HelveticaBold => &HELVETICA_BOLD,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

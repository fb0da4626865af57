//! Font metrics for text measurement and line wrapping.
//!
//! Standard PDF fonts (Helvetica, Times, Courier) are measured from static AFM
//! width tables in 1/1000 em. Embedded TrueType fonts carry their own advance
//! widths read by `ttf-parser` (see `fonts.rs`). Both sit behind `FontFace` so
//! the paginator measures every run the same way.
//!
//! Tables cover the printable WinAnsi range: ASCII 0x20..=0x7E (index = code - 32)
//! plus 0x80..=0xFF, looked up through `unicode_to_winansi`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::layout::fonts::EmbeddedFont;

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

/// The font families a résumé can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Humanist sans-serif, embedded from the configured TrueType files.
    OpenSans,
    /// PDF base font, always available.
    Helvetica,
    /// PDF base font, always available.
    Times,
    /// PDF base font, always available.
    Courier,
}

impl FontFamily {
    pub const ALL: [FontFamily; 4] = [
        FontFamily::OpenSans,
        FontFamily::Helvetica,
        FontFamily::Times,
        FontFamily::Courier,
    ];

    /// Fallback when the requested family is unknown or cannot be loaded.
    pub const FALLBACK: FontFamily = FontFamily::Helvetica;

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenSans => "OpenSans",
            Self::Helvetica => "Helvetica",
            Self::Times => "Times",
            Self::Courier => "Courier",
        }
    }

    /// Case- and whitespace-insensitive lookup ("Open Sans", "opensans", "Times New Roman").
    pub fn parse(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "opensans" => Some(Self::OpenSans),
            "helvetica" | "arial" => Some(Self::Helvetica),
            "times" | "timesroman" | "timesnewroman" => Some(Self::Times),
            "courier" | "couriernew" => Some(Self::Courier),
            _ => None,
        }
    }

    /// The (regular, bold) base fonts for built-in families. `None` for embedded families.
    pub fn standard_pair(&self) -> Option<(StandardFont, StandardFont)> {
        match self {
            Self::OpenSans => None,
            Self::Helvetica => Some((StandardFont::Helvetica, StandardFont::HelveticaBold)),
            Self::Times => Some((StandardFont::TimesRoman, StandardFont::TimesBold)),
            Self::Courier => Some((StandardFont::Courier, StandardFont::CourierBold)),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Standard fonts
// ────────────────────────────────────────────────────────────────────────────

/// The subset of the 14 PDF base fonts used for résumé text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
    Courier,
    CourierBold,
}

impl StandardFont {
    /// The PDF `/BaseFont` name.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::TimesRoman => "Times-Roman",
            Self::TimesBold => "Times-Bold",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
        }
    }

    pub fn metrics(&self) -> &'static FontMetricTable {
        match self {
            Self::Helvetica => &HELVETICA_TABLE,
            Self::HelveticaBold => &HELVETICA_BOLD_TABLE,
            Self::TimesRoman => &TIMES_ROMAN_TABLE,
            Self::TimesBold => &TIMES_BOLD_TABLE,
            Self::Courier | Self::CourierBold => &COURIER_TABLE,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a standard font, in 1/1000 em.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
///
/// `upper_widths` covers WinAnsi codes 0x80..=0xFF (dashes, curly quotes,
/// bullet, accented Latin-1). Codes WinAnsi leaves undefined hold 0.
pub struct FontMetricTable {
    widths: [u16; 95],
    upper_widths: [u16; 128],
    pub ascender: i16,
    pub descender: i16,
}

impl FontMetricTable {
    /// Width of one character in 1/1000 em.
    ///
    /// Characters with no WinAnsi code are drawn as `?` and measured as such.
    pub fn char_width(&self, ch: char) -> u16 {
        match unicode_to_winansi(ch) {
            Some(code) if code < 0x80 => self.widths[(code - 32) as usize],
            Some(code) => self.upper_widths[(code - 0x80) as usize],
            None => self.widths[(b'?' - 32) as usize],
        }
    }

    /// Width of a string in 1/1000 em.
    pub fn measure_str(&self, s: &str) -> u32 {
        s.chars().map(|c| self.char_width(c) as u32).sum()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (Adobe AFM values, WinAnsi order)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
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
    #[rustfmt::skip]
    upper_widths: [
        // 80-8F
        556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
        // 90-9F
        0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
        // A0-AF
        278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        // B0-BF
        400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        // C0-CF
        667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        // D0-DF
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        // E0-EF
        556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
        // F0-FF
        556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
    ],
    ascender: 718,
    descender: -207,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
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
    #[rustfmt::skip]
    upper_widths: [
        // 80-8F
        556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
        // 90-9F
        0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
        // A0-AF
        278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        // B0-BF
        400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        // C0-CF
        722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        // D0-DF
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        // E0-EF
        556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
        // F0-FF
        611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
    ],
    ascender: 718,
    descender: -207,
};

static TIMES_ROMAN_TABLE: FontMetricTable = FontMetricTable {
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
    #[rustfmt::skip]
    upper_widths: [
        // 80-8F
        500, 0, 333, 500, 444, 1000, 500, 500, 333, 1000, 556, 333, 889, 0, 611, 0,
        // 90-9F
        0, 333, 333, 444, 444, 350, 500, 1000, 333, 980, 389, 333, 722, 0, 444, 722,
        // A0-AF
        250, 333, 500, 500, 500, 500, 200, 500, 333, 760, 276, 500, 564, 333, 760, 333,
        // B0-BF
        400, 564, 300, 300, 333, 500, 453, 250, 333, 300, 310, 500, 750, 750, 750, 444,
        // C0-CF
        722, 722, 722, 722, 722, 722, 889, 667, 611, 611, 611, 611, 333, 333, 333, 333,
        // D0-DF
        722, 722, 722, 722, 722, 722, 722, 564, 722, 722, 722, 722, 722, 722, 556, 500,
        // E0-EF
        444, 444, 444, 444, 444, 444, 667, 444, 444, 444, 444, 444, 278, 278, 278, 278,
        // F0-FF
        500, 500, 500, 500, 500, 500, 500, 564, 500, 500, 500, 500, 500, 500, 500, 500,
    ],
    ascender: 683,
    descender: -217,
};

static TIMES_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        // 0    1    2    3    4    5    6    7    8    9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        333, 333, 570, 570, 570, 500, 930,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
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
    #[rustfmt::skip]
    upper_widths: [
        // 80-8F
        500, 0, 333, 500, 500, 1000, 500, 500, 333, 1000, 556, 333, 1000, 0, 667, 0,
        // 90-9F
        0, 333, 333, 500, 500, 350, 500, 1000, 333, 1000, 389, 333, 722, 0, 444, 722,
        // A0-AF
        250, 333, 500, 500, 500, 500, 220, 500, 333, 747, 300, 500, 570, 333, 747, 333,
        // B0-BF
        400, 570, 300, 300, 333, 556, 540, 250, 333, 300, 330, 500, 750, 750, 750, 500,
        // C0-CF
        722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 389, 389, 389, 389,
        // D0-DF
        722, 722, 778, 778, 778, 778, 778, 570, 778, 722, 722, 722, 722, 722, 611, 556,
        // E0-EF
        500, 500, 500, 500, 500, 500, 722, 444, 444, 444, 444, 444, 278, 278, 278, 278,
        // F0-FF
        500, 556, 500, 500, 500, 500, 500, 570, 500, 556, 556, 556, 556, 500, 556, 500,
    ],
    ascender: 683,
    descender: -217,
};

/// Courier is monospaced; regular and bold share one table.
static COURIER_TABLE: FontMetricTable = FontMetricTable {
    widths: [600; 95],
    upper_widths: [600; 128],
    ascender: 629,
    descender: -157,
};

// ────────────────────────────────────────────────────────────────────────────
// FontFace: one concrete, measurable font
// ────────────────────────────────────────────────────────────────────────────

/// A concrete font used to draw a run of text.
#[derive(Debug, Clone)]
pub enum FontFace {
    Standard(StandardFont),
    Embedded(Arc<EmbeddedFont>),
}

impl PartialEq for FontFace {
    fn eq(&self, other: &Self) -> bool {
        self.resource_key() == other.resource_key()
    }
}

impl Eq for FontFace {}

impl FontFace {
    /// Stable identifier used to deduplicate fonts in the PDF resource dictionary.
    pub fn resource_key(&self) -> &str {
        match self {
            Self::Standard(font) => font.pdf_name(),
            Self::Embedded(font) => font.postscript_name(),
        }
    }

    /// Width of one character in points at `size_pt`.
    pub fn char_width(&self, ch: char, size_pt: f32) -> f32 {
        match self {
            Self::Standard(font) => font.metrics().char_width(ch) as f32 / 1000.0 * size_pt,
            Self::Embedded(font) => font.advance_em(ch) * size_pt,
        }
    }

    /// Width of a string in points at `size_pt`.
    pub fn measure_str(&self, s: &str, size_pt: f32) -> f32 {
        match self {
            Self::Standard(font) => font.metrics().measure_str(s) as f32 / 1000.0 * size_pt,
            Self::Embedded(font) => s.chars().map(|c| font.advance_em(c)).sum::<f32>() * size_pt,
        }
    }

    /// (ascender, descender) in em units; descender is negative.
    pub fn vertical_metrics(&self) -> (f32, f32) {
        match self {
            Self::Standard(font) => {
                let table = font.metrics();
                (
                    table.ascender as f32 / 1000.0,
                    table.descender as f32 / 1000.0,
                )
            }
            Self::Embedded(font) => font.vertical_metrics_em(),
        }
    }

    /// Baseline offset from the top of a line box of height `leading`, with the
    /// glyph box centred vertically in the line.
    pub fn baseline_offset(&self, size_pt: f32, leading: f32) -> f32 {
        let (ascender, descender) = self.vertical_metrics();
        leading / 2.0 + (ascender + descender) * size_pt / 2.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Line wrapping
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word-wrap of `text` into lines that fit the given widths (points).
///
/// `first_width` applies to the first line and `rest_width` to every following
/// line, so callers can reserve room for a leading label. Words wider than a
/// whole line are broken between characters. Empty or blank text yields no lines.
pub fn wrap_lines(
    text: &str,
    face: &FontFace,
    size_pt: f32,
    first_width: f32,
    rest_width: f32,
) -> Vec<String> {
    let space_w = face.char_width(' ', size_pt);
    let limit_for = |line_index: usize| {
        if line_index == 0 {
            first_width
        } else {
            rest_width
        }
    };

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_w = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = face.measure_str(word, size_pt);

        if !current.is_empty() {
            if current_w + space_w + word_w <= limit_for(lines.len()) {
                current.push(' ');
                current.push_str(word);
                current_w += space_w + word_w;
                continue;
            }
            // Line full; the word opens the next one.
            lines.push(std::mem::take(&mut current));
            current_w = 0.0;
        }

        if word_w <= limit_for(lines.len()) {
            current.push_str(word);
            current_w = word_w;
            continue;
        }

        // Oversized word: break between characters in one pass. Each piece
        // holds at least one character so oversized glyphs still make progress.
        let mut piece_start = 0;
        let mut piece_w = 0.0_f32;
        for (idx, ch) in word.char_indices() {
            let w = face.char_width(ch, size_pt);
            if idx > piece_start && piece_w + w > limit_for(lines.len()) {
                lines.push(word[piece_start..idx].to_string());
                piece_start = idx;
                piece_w = 0.0;
            }
            piece_w += w;
        }
        current.push_str(&word[piece_start..]);
        current_w = piece_w;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// Map a Unicode character to its WinAnsiEncoding (Windows-1252) byte.
///
/// 0x20..=0x7E and 0xA0..=0xFF map directly; 0x80..=0x9F hold the typographic
/// extras (bullet, dashes, curly quotes, euro).
pub fn unicode_to_winansi(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80), // euro
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85), // ellipsis
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95), // bullet
        0x2013 => Some(0x96), // en dash
        0x2014 => Some(0x97), // em dash
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

//! Text metrics, wrapping and encoding for the standard Helvetica fonts
//!
//! Widths come from the Helvetica AFM metrics (units of 1/1000 em). Bold text
//! is estimated by scaling the regular widths, which is close enough for
//! alignment and wrapping decisions.

/// Millimetres per PDF point
pub const MM_PER_PT: f32 = 25.4 / 72.0;

const BOLD_WIDTH_SCALE: f32 = 1.06;
const FALLBACK_WIDTH: u16 = 556;

/// Helvetica glyph widths for ASCII 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Font {
    #[default]
    Regular,
    Bold,
}

impl Font {
    /// Name of the font in the page resource dictionary
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    /// PDF standard 14 font name
    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }
}

fn glyph_width(c: char) -> u16 {
    let code = c as u32;
    if (32..=126).contains(&code) {
        HELVETICA_WIDTHS[(code - 32) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// Estimated rendered width of `text` in millimetres
pub fn text_width(text: &str, font_size: f32, font: Font) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c) as u32).sum();
    let width = units as f32 / 1000.0 * font_size * MM_PER_PT;
    match font {
        Font::Regular => width,
        Font::Bold => width * BOLD_WIDTH_SCALE,
    }
}

/// Height of one line of text in millimetres
pub fn line_height(font_size: f32, factor: f32) -> f32 {
    font_size * MM_PER_PT * factor
}

/// Greedy word wrap to `max_width` millimetres.
///
/// Always returns at least one line. Words wider than the line are broken
/// between characters.
pub fn wrap(text: &str, max_width: f32, font_size: f32, font: Font) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width(&candidate, font_size, font) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if text_width(word, font_size, font) <= max_width {
            current = word.to_string();
        } else {
            for c in word.chars() {
                current.push(c);
                if current.chars().count() > 1 && text_width(&current, font_size, font) > max_width
                {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Shorten `text` with a trailing "..." so it fits in `max_width` millimetres
pub fn ellipsize(text: &str, max_width: f32, font_size: f32, font: Font) -> String {
    if text_width(text, font_size, font) <= max_width {
        return text.to_string();
    }
    let mut shortened: String = text.to_string();
    while !shortened.is_empty() {
        shortened.pop();
        let candidate = format!("{}...", shortened.trim_end());
        if text_width(&candidate, font_size, font) <= max_width {
            return candidate;
        }
    }
    "...".to_string()
}

/// Encode text for a WinAnsi-encoded standard font.
///
/// Latin-1 characters map directly, a few common typographic characters are
/// folded to ASCII, everything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => b'\'',
            '\u{201C}' | '\u{201D}' => b'"',
            '\u{2013}' | '\u{2014}' => b'-',
            '\u{2022}' => 0x95,
            '\u{20AC}' => 0x80,
            c if (c as u32) < 0x80 => c as u8,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_width_scales_with_size() {
        let small = text_width("Compliance", 8.0, Font::Regular);
        let large = text_width("Compliance", 16.0, Font::Regular);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn test_text_width_known_value() {
        // "0" is 556 units; ten of them at 10pt = 5.56pt * 10 = 55.6pt
        let width = text_width("0000000000", 10.0, Font::Regular);
        assert!((width - 55.6 * MM_PER_PT).abs() < 1e-3);
    }

    #[test]
    fn test_bold_is_wider() {
        assert!(text_width("Page 1 of 2", 8.0, Font::Bold) > text_width("Page 1 of 2", 8.0, Font::Regular));
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = wrap("Within limits", 100.0, 8.0, Font::Regular);
        assert_eq!(lines, vec!["Within limits".to_string()]);
    }

    #[test]
    fn test_wrap_empty_text_yields_one_line() {
        assert_eq!(wrap("", 50.0, 8.0, Font::Regular), vec![String::new()]);
        assert_eq!(wrap("   ", 50.0, 8.0, Font::Regular), vec![String::new()]);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Review and address all non-compliant items before proceeding with construction";
        let lines = wrap(text, 40.0, 10.0, Font::Regular);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0, Font::Regular) <= 40.0, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        let word = "x".repeat(200);
        let lines = wrap(&word, 20.0, 8.0, Font::Regular);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width(line, 8.0, Font::Regular) <= 20.0);
        }
    }

    #[test]
    fn test_ellipsize_keeps_short_text() {
        assert_eq!(ellipsize("plan.pdf", 100.0, 12.0, Font::Bold), "plan.pdf");
    }

    #[test]
    fn test_ellipsize_truncates_long_text() {
        let name = format!("{}.pdf", "very-long-file-name-".repeat(20));
        let short = ellipsize(&name, 60.0, 12.0, Font::Bold);
        assert!(short.ends_with("..."));
        assert!(short.len() < name.len());
        assert!(text_width(&short, 12.0, Font::Bold) <= 60.0);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Page 1"), b"Page 1".to_vec());
        assert_eq!(encode_win_ansi("35\u{b0}"), vec![b'3', b'5', 0xB0]);
        assert_eq!(encode_win_ansi("\u{2713} PASSED"), b"? PASSED".to_vec());
        assert_eq!(encode_win_ansi("a\u{2014}b"), b"a-b".to_vec());
    }
}

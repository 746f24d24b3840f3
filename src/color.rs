use image::Rgb;
use std::fmt;

use crate::error::Error;

/// Named colors understood by every tool, with their web RGB values.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("brown", [165, 42, 42]),
    ("pink", [255, 192, 203]),
    ("gray", [128, 128, 128]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0]);
    pub const WHITE: Color = Color([255, 255, 255]);

    /// Parse a color name (case-insensitive) or a `#rgb` / `#rrggbb` hex value.
    pub fn parse(s: &str) -> Option<Color> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, rgb)| Color(*rgb))
    }

    /// Like [`Color::parse`], but failures name the role of the color in the message.
    pub fn parse_for(role: &'static str, s: &str) -> Result<Color, Error> {
        Color::parse(s).ok_or_else(|| Error::InvalidColor {
            role,
            value: s.to_string(),
        })
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb(self.0)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                let v = c.to_digit(16)? as u8;
                *slot = v * 17;
            }
            Some(Color(rgb))
        }
        6 => {
            let mut rgb = [0u8; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
            }
            Some(Color(rgb))
        }
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_are_case_insensitive() {
        assert_eq!(Color::parse("Black"), Some(Color::BLACK));
        assert_eq!(Color::parse("WHITE"), Some(Color::WHITE));
        assert_eq!(Color::parse("green"), Some(Color([0, 128, 0])));
        assert_eq!(Color::parse("orange"), Some(Color([255, 165, 0])));
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(Color::parse("#ff0000"), Some(Color([255, 0, 0])));
        assert_eq!(Color::parse("#0F0"), Some(Color([0, 255, 0])));
        assert_eq!(Color::parse("#123456").unwrap().to_hex(), "#123456");
    }

    #[test]
    fn test_rejects_unknown_and_malformed() {
        assert_eq!(Color::parse("chartreuse"), None);
        assert_eq!(Color::parse("#12"), None);
        assert_eq!(Color::parse("#gggggg"), None);
        assert_eq!(Color::parse("#"), None);
        assert_eq!(Color::parse(""), None);
    }

    #[test]
    fn test_error_names_role() {
        let err = Color::parse_for("fill", "nope").unwrap_err();
        assert_eq!(err.to_string(), "Invalid fill color: nope");
        let err = Color::parse_for("background", "#xyz").unwrap_err();
        assert_eq!(err.to_string(), "Invalid background color: #xyz");
    }
}

//! Hex color parsing and formatting

/// Parse `#rgb`, `#rrggbb`, or `#rrggbbaa` into RGBA8
pub fn parse_hex_color(value: &str) -> Option<[u8; 4]> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        3 => {
            let mut rgba = [255; 4];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                rgba[i] = v * 17;
            }
            Some(rgba)
        }
        6 | 8 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            let a = if hex.len() == 8 { channel(&hex[6..8])? } else { 255 };
            Some([r, g, b, a])
        }
        _ => None,
    }
}

/// Format an RGB triple as lowercase `#rrggbb`
pub fn format_hex_color(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Build a tiny-skia paint color from a hex string and an opacity multiplier
pub fn paint_color(value: &str, opacity: f32) -> Option<tiny_skia::Color> {
    let [r, g, b, a] = parse_hex_color(value)?;
    let alpha = (a as f32 / 255.0) * opacity.clamp(0.0, 1.0);
    tiny_skia::Color::from_rgba(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        alpha,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_forms() {
        assert_eq!(parse_hex_color("#112233"), Some([0x11, 0x22, 0x33, 255]));
        assert_eq!(parse_hex_color("#f0a"), Some([255, 0, 170, 255]));
        assert_eq!(parse_hex_color("#11223380"), Some([0x11, 0x22, 0x33, 0x80]));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_hex_color("red"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_format_is_lowercase() {
        assert_eq!(format_hex_color(0xAB, 0xCD, 0xEF), "#abcdef");
    }
}

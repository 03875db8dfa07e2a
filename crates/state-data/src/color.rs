//! Validation of per-state override colors read from a color column.

/// Named colors accepted in a color column (compared case-insensitively).
pub const NAMED_COLORS: [&str; 19] = [
    "red", "green", "blue", "yellow", "orange", "purple", "pink", "brown", "black", "white",
    "gray", "cyan", "magenta", "lime", "olive", "navy", "teal", "aqua", "silver",
];

/// Normalize a color cell, returning `None` when it is not a usable color.
///
/// Excel tends to drop the leading `#`, so a bare six-digit hex value gets
/// one. Accepted forms are `#` plus 3, 4, 6 or 8 hex digits, `rgb(...)` /
/// `rgba(...)`, and [`NAMED_COLORS`] (returned lowercase).
pub fn normalize_color(raw: &str) -> Option<String> {
    let color = raw.trim();
    if color.is_empty() {
        return None;
    }

    if is_hex_digits(color) && color.len() == 6 {
        return Some(format!("#{}", color));
    }

    if let Some(digits) = color.strip_prefix('#') {
        return match digits.len() {
            3 | 4 | 6 | 8 if is_hex_digits(digits) => Some(color.to_string()),
            _ => None,
        };
    }

    let lower = color.to_ascii_lowercase();
    if (lower.starts_with("rgb(") || lower.starts_with("rgba(")) && lower.ends_with(')') {
        return Some(color.to_string());
    }

    if NAMED_COLORS.contains(&lower.as_str()) {
        return Some(lower);
    }

    None
}

fn is_hex_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_hex_gets_marker() {
        assert_eq!(normalize_color("ff0000"), Some("#ff0000".to_string()));
        assert_eq!(normalize_color(" 00AA11 "), Some("#00AA11".to_string()));
    }

    #[test]
    fn test_marked_hex() {
        assert_eq!(normalize_color("#abc"), Some("#abc".to_string()));
        assert_eq!(normalize_color("#12345678"), Some("#12345678".to_string()));
        assert_eq!(normalize_color("#12345"), None);
        assert_eq!(normalize_color("#ggg"), None);
    }

    #[test]
    fn test_rgb_forms() {
        assert_eq!(
            normalize_color("rgb(255, 0, 0)"),
            Some("rgb(255, 0, 0)".to_string())
        );
        assert_eq!(
            normalize_color("RGBA(0,0,0,0.5)"),
            Some("RGBA(0,0,0,0.5)".to_string())
        );
        assert_eq!(normalize_color("rgb(1,2,3"), None);
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(normalize_color("Red"), Some("red".to_string()));
        assert_eq!(normalize_color("NAVY"), Some("navy".to_string()));
        assert_eq!(normalize_color("chartreuse"), None);
    }

    #[test]
    fn test_rejects_junk() {
        assert_eq!(normalize_color(""), None);
        assert_eq!(normalize_color("   "), None);
        assert_eq!(normalize_color("12345"), None);
        assert_eq!(normalize_color("not a color"), None);
    }
}

//! Tile-grid layout of the US used for rendering.
//!
//! Each state is a square cell at a fixed (row, column) so the map needs no
//! geographic projection.

/// Grid position of a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub code: &'static str,
    pub row: u32,
    pub col: u32,
}

const fn tile(code: &'static str, row: u32, col: u32) -> Tile {
    Tile { code, row, col }
}

pub const GRID_ROWS: u32 = 8;
pub const GRID_COLS: u32 = 12;

pub const TILES: [Tile; 51] = [
    tile("AK", 0, 0),
    tile("ME", 0, 11),
    tile("VT", 1, 10),
    tile("NH", 1, 11),
    tile("WA", 2, 1),
    tile("ID", 2, 2),
    tile("MT", 2, 3),
    tile("ND", 2, 4),
    tile("MN", 2, 5),
    tile("IL", 2, 6),
    tile("WI", 2, 7),
    tile("MI", 2, 8),
    tile("NY", 2, 9),
    tile("RI", 2, 10),
    tile("MA", 2, 11),
    tile("OR", 3, 1),
    tile("NV", 3, 2),
    tile("WY", 3, 3),
    tile("SD", 3, 4),
    tile("IA", 3, 5),
    tile("IN", 3, 6),
    tile("OH", 3, 7),
    tile("PA", 3, 8),
    tile("NJ", 3, 9),
    tile("CT", 3, 10),
    tile("CA", 4, 1),
    tile("UT", 4, 2),
    tile("CO", 4, 3),
    tile("NE", 4, 4),
    tile("MO", 4, 5),
    tile("KY", 4, 6),
    tile("WV", 4, 7),
    tile("VA", 4, 8),
    tile("MD", 4, 9),
    tile("DE", 4, 10),
    tile("AZ", 5, 2),
    tile("NM", 5, 3),
    tile("KS", 5, 4),
    tile("AR", 5, 5),
    tile("TN", 5, 6),
    tile("NC", 5, 7),
    tile("SC", 5, 8),
    tile("DC", 5, 9),
    tile("OK", 6, 4),
    tile("LA", 6, 5),
    tile("MS", 6, 6),
    tile("AL", 6, 7),
    tile("GA", 6, 8),
    tile("HI", 7, 0),
    tile("TX", 7, 4),
    tile("FL", 7, 9),
];

/// Text color readable on top of a `#rrggbb` / `#rgb` fill.
pub fn label_color(fill: &str) -> &'static str {
    let Some(hex) = fill.strip_prefix('#') else {
        return "#333";
    };
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return "#333",
    };
    let Ok(rgb) = u32::from_str_radix(&expanded, 16) else {
        return "#333";
    };

    let r = ((rgb >> 16) & 0xff) as f64;
    let g = ((rgb >> 8) & 0xff) as f64;
    let b = (rgb & 0xff) as f64;
    let luminance = (0.299 * r + 0.587 * g + 0.114 * b) / 255.0;
    if luminance < 0.5 {
        "#fff"
    } else {
        "#333"
    }
}

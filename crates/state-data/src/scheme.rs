//! Color schemes and per-state fill resolution for rendering.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::{find_record, StateRecord};

/// Fill for a state that has a record but no value.
pub const MISSING_VALUE_FILL: &str = "#ccc";
/// Fill for a state with no record at all.
pub const NO_DATA_FILL: &str = "#eee";

const BLUES: &[u32] = &[
    0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c, 0x08306b,
];
const GREENS: &[u32] = &[
    0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476, 0x41ab5d, 0x238b45, 0x006d2c, 0x00441b,
];
const REDS: &[u32] = &[
    0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c, 0xcb181d, 0xa50f15, 0x67000d,
];
const PURPLES: &[u32] = &[
    0xfcfbfd, 0xefedf5, 0xdadaeb, 0xbcbddc, 0x9e9ac8, 0x807dba, 0x6a51a3, 0x54278f, 0x3f007d,
];
const ORANGES: &[u32] = &[
    0xfff5eb, 0xfee6ce, 0xfdd0a2, 0xfdae6b, 0xfd8d3c, 0xf16913, 0xd94801, 0xa63603, 0x7f2704,
];
const VIRIDIS: &[u32] = &[
    0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58, 0xb5de2b,
    0xfde725,
];
/// Green, yellow, orange, red.
const TRAFFIC: &[u32] = &[0x388e3c, 0xfbc02d, 0xf57c00, 0xd32f2f];

/// Upper bounds of the first three `multi` buckets.
const MULTI_THRESHOLDS: [f64; 3] = [25.0, 50.0, 75.0];

/// Named palette used to color states by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    Blues,
    Greens,
    Reds,
    Purples,
    Oranges,
    Viridis,
    #[default]
    GreenToRed,
    /// Fixed 25/50/75 thresholds; honors per-state custom colors.
    Multi,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 8] = [
        ColorScheme::Blues,
        ColorScheme::Greens,
        ColorScheme::Reds,
        ColorScheme::Purples,
        ColorScheme::Oranges,
        ColorScheme::Viridis,
        ColorScheme::GreenToRed,
        ColorScheme::Multi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Blues => "blues",
            ColorScheme::Greens => "greens",
            ColorScheme::Reds => "reds",
            ColorScheme::Purples => "purples",
            ColorScheme::Oranges => "oranges",
            ColorScheme::Viridis => "viridis",
            ColorScheme::GreenToRed => "green-to-red",
            ColorScheme::Multi => "multi",
        }
    }

    fn stops(self) -> &'static [u32] {
        match self {
            ColorScheme::Blues => BLUES,
            ColorScheme::Greens => GREENS,
            ColorScheme::Reds => REDS,
            ColorScheme::Purples => PURPLES,
            ColorScheme::Oranges => ORANGES,
            ColorScheme::Viridis => VIRIDIS,
            ColorScheme::GreenToRed | ColorScheme::Multi => TRAFFIC,
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        ColorScheme::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == s)
            .ok_or_else(|| format!("unknown color scheme: {}", s))
    }
}

/// A scheme bound to a value domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    scheme: ColorScheme,
    min: f64,
    max: f64,
}

impl ColorScale {
    pub fn new(scheme: ColorScheme, min: f64, max: f64) -> Self {
        Self { scheme, min, max }
    }

    /// Domain spans the present values; `[0, 100]` when there are none.
    pub fn for_records(scheme: ColorScheme, records: &[StateRecord]) -> Self {
        let mut values = records.iter().filter_map(|r| r.value);
        let Some(first) = values.next() else {
            return Self::new(scheme, 0.0, 100.0);
        };
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Self::new(scheme, min, max)
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Color for a value as `#rrggbb`.
    pub fn color(&self, value: f64) -> String {
        let stops = self.scheme.stops();
        if self.scheme == ColorScheme::Multi {
            let bucket = MULTI_THRESHOLDS.iter().filter(|t| value >= **t).count();
            return hex(stops[bucket]);
        }

        let t = if self.max == self.min {
            0.5
        } else {
            ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        };
        hex(interpolate(stops, t))
    }

    /// `n + 1` evenly spaced gradient stops as (percent offset, color).
    pub fn legend_stops(&self, n: usize) -> Vec<(f64, String)> {
        let n = n.max(1);
        (0..=n)
            .map(|i| {
                let frac = i as f64 / n as f64;
                let value = self.min + frac * (self.max - self.min);
                (frac * 100.0, self.color(value))
            })
            .collect()
    }
}

/// Fill color for one state.
///
/// With the `multi` scheme a custom color wins. Otherwise the first record for
/// the state decides: its value through the scale, or the missing-value gray.
pub fn fill_for(
    code: &str,
    records: &[StateRecord],
    custom_colors: &BTreeMap<String, String>,
    scale: &ColorScale,
) -> String {
    if scale.scheme == ColorScheme::Multi {
        if let Some(color) = custom_colors.get(code) {
            return color.clone();
        }
    }

    match find_record(records, code) {
        Some(record) => match record.value {
            Some(value) => scale.color(value),
            None => MISSING_VALUE_FILL.to_string(),
        },
        None => NO_DATA_FILL.to_string(),
    }
}

fn interpolate(stops: &[u32], t: f64) -> u32 {
    if stops.len() == 1 {
        return stops[0];
    }
    let scaled = t * (stops.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(stops.len() - 2);
    let local = scaled - i as f64;
    mix(stops[i], stops[i + 1], local)
}

fn mix(a: u32, b: u32, t: f64) -> u32 {
    let channel = |shift: u32| {
        let ca = ((a >> shift) & 0xff) as f64;
        let cb = ((b >> shift) & 0xff) as f64;
        ((ca + (cb - ca) * t).round() as u32) << shift
    };
    channel(16) | channel(8) | channel(0)
}

fn hex(rgb: u32) -> String {
    format!("#{:06x}", rgb)
}

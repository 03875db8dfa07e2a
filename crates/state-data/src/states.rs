//! US state tables and identifier normalization.

/// A recognized state (or the District of Columbia).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateInfo {
    /// Two-letter postal code.
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
}

const fn state(code: &'static str, name: &'static str) -> StateInfo {
    StateInfo { code, name }
}

/// The 50 states plus DC, in the order used for name matching.
pub const STATES: [StateInfo; 51] = [
    state("AL", "Alabama"),
    state("AK", "Alaska"),
    state("AZ", "Arizona"),
    state("AR", "Arkansas"),
    state("CA", "California"),
    state("CO", "Colorado"),
    state("CT", "Connecticut"),
    state("DE", "Delaware"),
    state("FL", "Florida"),
    state("GA", "Georgia"),
    state("HI", "Hawaii"),
    state("ID", "Idaho"),
    state("IL", "Illinois"),
    state("IN", "Indiana"),
    state("IA", "Iowa"),
    state("KS", "Kansas"),
    state("KY", "Kentucky"),
    state("LA", "Louisiana"),
    state("ME", "Maine"),
    state("MD", "Maryland"),
    state("MA", "Massachusetts"),
    state("MI", "Michigan"),
    state("MN", "Minnesota"),
    state("MS", "Mississippi"),
    state("MO", "Missouri"),
    state("MT", "Montana"),
    state("NE", "Nebraska"),
    state("NV", "Nevada"),
    state("NH", "New Hampshire"),
    state("NJ", "New Jersey"),
    state("NM", "New Mexico"),
    state("NY", "New York"),
    state("NC", "North Carolina"),
    state("ND", "North Dakota"),
    state("OH", "Ohio"),
    state("OK", "Oklahoma"),
    state("OR", "Oregon"),
    state("PA", "Pennsylvania"),
    state("RI", "Rhode Island"),
    state("SC", "South Carolina"),
    state("SD", "South Dakota"),
    state("TN", "Tennessee"),
    state("TX", "Texas"),
    state("UT", "Utah"),
    state("VT", "Vermont"),
    state("VA", "Virginia"),
    state("WA", "Washington"),
    state("WV", "West Virginia"),
    state("WI", "Wisconsin"),
    state("WY", "Wyoming"),
    state("DC", "District of Columbia"),
];

/// Spellings accepted in addition to the canonical names. Matched after them.
const ALIASES: [(&str, &str); 11] = [
    ("WASHINGTON DC", "DC"),
    ("WASHINGTON D.C.", "DC"),
    ("DIST. OF COLUMBIA", "DC"),
    ("N. CAROLINA", "NC"),
    ("N CAROLINA", "NC"),
    ("S. CAROLINA", "SC"),
    ("S CAROLINA", "SC"),
    ("N. DAKOTA", "ND"),
    ("N DAKOTA", "ND"),
    ("S. DAKOTA", "SD"),
    ("S DAKOTA", "SD"),
];

/// Look up a state by its postal code (case-insensitive).
pub fn by_code(code: &str) -> Option<&'static StateInfo> {
    let code = code.trim();
    STATES.iter().find(|s| s.code.eq_ignore_ascii_case(code))
}

/// Whether `code` is one of the 51 recognized postal codes.
pub fn is_state_code(code: &str) -> bool {
    code.len() == 2 && STATES.iter().any(|s| s.code == code)
}

/// Display name for a postal code.
pub fn state_name(code: &str) -> Option<&'static str> {
    by_code(code).map(|s| s.name)
}

/// Uppercased name table: canonical names in table order, then aliases.
fn name_table() -> impl Iterator<Item = (String, &'static str)> {
    STATES
        .iter()
        .map(|s| (s.name.to_ascii_uppercase(), s.code))
        .chain(ALIASES.iter().map(|(name, code)| (name.to_string(), *code)))
}

/// Resolve a raw spreadsheet cell to a state.
///
/// The cell is trimmed and uppercased. Longer text is looked up by full name,
/// then by the first name that contains it or is contained in it. Whatever
/// comes out must be a recognized postal code, so numeric ids never match.
pub fn normalize_state(raw: &str) -> Option<&'static StateInfo> {
    let cleaned = raw.trim().to_uppercase();
    if cleaned.is_empty() {
        return None;
    }

    let code = if cleaned.len() > 2 {
        resolve_name(&cleaned)?
    } else {
        cleaned
    };

    if code.len() != 2 {
        return None;
    }
    STATES.iter().find(|s| s.code == code)
}

fn resolve_name(cleaned: &str) -> Option<String> {
    if let Some((_, code)) = name_table().find(|(name, _)| name == cleaned) {
        return Some(code.to_string());
    }

    name_table()
        .find(|(name, _)| name.contains(cleaned) || cleaned.contains(name.as_str()))
        .map(|(_, code)| code.to_string())
}

//! Manufacturer codes

use phf::phf_map;

/// Lowercase manufacturer codes as they appear at the end of part strings
/// (`part_mag_01_tor`, `part_grip_02_jak`).
pub static MANUFACTURER_SUFFIXES: phf::Map<&'static str, &'static str> = phf_map! {
    "bor" => "Ripper",
    "dad" => "Daedalus",
    "jak" => "Jakobs",
    "mal" => "Maliwan",
    "ord" => "Order",
    "ted" => "Tediore",
    "tor" => "Torgue",
    "vla" => "Vladof",
};

/// Manufacturer name for a three-letter code, any case
pub fn manufacturer_by_code(code: &str) -> Option<&'static str> {
    MANUFACTURER_SUFFIXES
        .get(code.to_ascii_lowercase().as_str())
        .copied()
}

//! Human-readable part labels
//!
//! Part strings such as `JAK_PS.part_barrel_01_a` are turned into labels
//! like `Barrel 1 Accessory A` for display. Labels never feed the encoder.
//!
//! Rules are tried in table order and the first match wins. Several
//! patterns can match the same string, so the order is part of the
//! contract. Anything left over falls back to title-casing the
//! underscore-separated segments.

use crate::reference::{weapon_type_by_code, MANUFACTURER_SUFFIXES};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

type Formatter = fn(&Captures<'_>, Option<&str>) -> String;

/// One pattern → label rule
pub struct NameRule {
    pub name: &'static str,
    pattern: Regex,
    format: Formatter,
}

impl NameRule {
    fn new(name: &'static str, pattern: &str, format: Formatter) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("name rule pattern is valid"),
            format,
        }
    }

    /// Apply this rule to the last segment of a part string
    pub fn apply(&self, segment: &str, stats: Option<&str>) -> Option<String> {
        self.pattern
            .captures(segment)
            .map(|caps| (self.format)(&caps, stats))
    }
}

static RULES: Lazy<Vec<NameRule>> = Lazy::new(|| {
    vec![
        NameRule::new("body", r"^part_body$", |_, _| "Body".to_string()),
        NameRule::new("body_accessory", r"^part_body_([a-z])$", |c, _| {
            format!("Body Accessory {}", upper(&c[1]))
        }),
        NameRule::new("barrel", r"^part_barrel_(\d+)$", |c, _| {
            format!("Barrel {}", number(&c[1]))
        }),
        NameRule::new("barrel_accessory", r"^part_barrel_(\d+)_([a-z])$", |c, _| {
            format!("Barrel {} Accessory {}", number(&c[1]), upper(&c[2]))
        }),
        NameRule::new("magazine", r"^part_mag_(\d+)_([a-z]{3})$", |c, _| {
            format!("Magazine {} ({})", number(&c[1]), manufacturer(&c[2]))
        }),
        NameRule::new("grip", r"^part_grip_(\d+)_([a-z]{3})$", |c, _| {
            format!("Grip {} ({})", number(&c[1]), manufacturer(&c[2]))
        }),
        NameRule::new("scope_lens", r"^part_scope_(\d+)_lens_(\d+)$", |c, _| {
            format!("Scope {} Lens {}", number(&c[1]), number(&c[2]))
        }),
        NameRule::new(
            "scope_accessory",
            r"^part_scope_acc_s(\d+)_l(\d+)_([a-z])$",
            |c, _| {
                format!(
                    "Scope Accessory {} (Scope {}, Lens {})",
                    upper(&c[3]),
                    number(&c[1]),
                    number(&c[2])
                )
            },
        ),
        NameRule::new(
            "underbarrel",
            r"^part_underbarrel_(\d+)(?:_[a-z0-9_]+)?$",
            |c, stats| match stats {
                Some(stats) => format!("Underbarrel {}: {}", number(&c[1]), stats.trim()),
                None => format!("Underbarrel {}", number(&c[1])),
            },
        ),
        NameRule::new(
            "licensed",
            r"^part_licensed_([a-z]{3})(?:_([a-z0-9_]+))?$",
            |c, _| match c.get(2) {
                Some(rest) => format!("Licensed {} {}", manufacturer(&c[1]), title_case(rest.as_str())),
                None => format!("Licensed {}", manufacturer(&c[1])),
            },
        ),
        NameRule::new("shield", r"^part_shield_([a-z0-9_]+)$", |c, _| {
            format!("Shield: {}", title_case(&c[1]))
        }),
        NameRule::new("torgue_magazine", r"^part_mag_torgue_([a-z0-9_]+)$", |c, _| {
            format!("Torgue {} Rounds", title_case(&c[1]))
        }),
        NameRule::new("ammo_type", r"^part_secondary_ammo_([a-z]{2})$", |c, _| {
            match weapon_type_by_code(&c[1]) {
                Some(wt) => format!("{} Ammo", wt.ammo),
                None => format!("{} Ammo", upper(&c[1])),
            }
        }),
        NameRule::new("tediore_thrown", r"^part_mag_ted_([a-z0-9_]+)$", |c, _| {
            format!("Tediore Reload: {}", title_case(&c[1]))
        }),
        NameRule::new(
            "color_variant",
            r"(?:^|_)(rainbow|colou?r)(?:_([a-z0-9_]+))?$",
            |c, _| match (&c[1], c.get(2)) {
                ("rainbow", _) => "Rainbow Variant".to_string(),
                (_, Some(color)) => format!("Color Variant: {}", title_case(color.as_str())),
                (_, None) => "Color Variant".to_string(),
            },
        ),
    ]
});

/// The ordered rule table
pub fn rules() -> &'static [NameRule] {
    &RULES
}

/// Last `.`-separated segment of a part string
///
/// `"DAD_PS.part_barrel_01"` → `"part_barrel_01"`, `"part_body"` → `"part_body"`
pub fn short_name(raw_id: &str) -> &str {
    raw_id.split('.').next_back().unwrap_or(raw_id)
}

/// Name of the first rule matching a part string, if any
pub fn matching_rule(raw_id: &str) -> Option<&'static str> {
    let segment = short_name(raw_id);
    rules()
        .iter()
        .find(|rule| rule.pattern.is_match(segment))
        .map(|rule| rule.name)
}

/// Turn a part string into a display label.
///
/// `stats` is the catalog's free-text stats column; only rules that
/// describe the part by its effect use it.
pub fn normalize(raw_id: &str, stats: Option<&str>) -> String {
    let segment = short_name(raw_id);
    let stats = stats.filter(|s| !s.trim().is_empty());

    rules()
        .iter()
        .find_map(|rule| rule.apply(segment, stats))
        .unwrap_or_else(|| fallback(segment))
}

fn fallback(segment: &str) -> String {
    title_case(segment.strip_prefix("part_").unwrap_or(segment))
}

fn title_case(s: &str) -> String {
    s.split('_')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn upper(s: &str) -> String {
    s.to_ascii_uppercase()
}

/// `"01"` → `"1"`; digit runs too long for `u64` are kept as written
fn number(digits: &str) -> String {
    digits
        .parse::<u64>()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| digits.to_string())
}

fn manufacturer(code: &str) -> String {
    MANUFACTURER_SUFFIXES
        .get(code)
        .map(|name| name.to_string())
        .unwrap_or_else(|| upper(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_order_is_fixed() {
        let names: Vec<_> = rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "body",
                "body_accessory",
                "barrel",
                "barrel_accessory",
                "magazine",
                "grip",
                "scope_lens",
                "scope_accessory",
                "underbarrel",
                "licensed",
                "shield",
                "torgue_magazine",
                "ammo_type",
                "tediore_thrown",
                "color_variant",
            ]
        );
    }

    #[test]
    fn test_body_and_barrels() {
        assert_eq!(normalize("JAK_PS.part_body", None), "Body");
        assert_eq!(normalize("JAK_PS.part_body_b", None), "Body Accessory B");
        assert_eq!(normalize("JAK_PS.part_barrel_02", None), "Barrel 2");
        assert_eq!(
            normalize("JAK_PS.part_barrel_01_a", None),
            "Barrel 1 Accessory A"
        );
    }

    #[test]
    fn test_manufacturer_suffixes() {
        assert_eq!(normalize("JAK_PS.part_mag_02_tor", None), "Magazine 2 (Torgue)");
        assert_eq!(normalize("MAL_SM.part_grip_01_mal", None), "Grip 1 (Maliwan)");
        assert_eq!(normalize("part_grip_03_xyz", None), "Grip 3 (XYZ)");
    }

    #[test]
    fn test_scope_coordinates() {
        assert_eq!(normalize("JAK_PS.part_scope_02_lens_01", None), "Scope 2 Lens 1");
        assert_eq!(
            normalize("JAK_PS.part_scope_acc_s01_l02_c", None),
            "Scope Accessory C (Scope 1, Lens 2)"
        );
    }

    #[test]
    fn test_underbarrel_uses_stats() {
        assert_eq!(
            normalize("JAK_PS.part_underbarrel_01", Some("Knife Launcher")),
            "Underbarrel 1: Knife Launcher"
        );
        assert_eq!(normalize("JAK_PS.part_underbarrel_02", Some("  ")), "Underbarrel 2");
        assert_eq!(normalize("JAK_PS.part_underbarrel_02", None), "Underbarrel 2");
    }

    #[test]
    fn test_stats_ignored_elsewhere() {
        assert_eq!(normalize("JAK_PS.part_body_a", Some("+10% Reload")), "Body Accessory A");
    }

    #[test]
    fn test_special_cases() {
        assert_eq!(
            normalize("JAK_PS.part_licensed_ted_shooting", None),
            "Licensed Tediore Shooting"
        );
        assert_eq!(normalize("part_licensed_tor", None), "Licensed Torgue");
        assert_eq!(normalize("MAL_SM.part_shield_amp", None), "Shield: Amp");
        assert_eq!(
            normalize("TOR_AR.part_mag_torgue_sticky", None),
            "Torgue Sticky Rounds"
        );
        assert_eq!(normalize("JAK_PS.part_secondary_ammo_ps", None), "Pistol Ammo");
        assert_eq!(normalize("part_secondary_ammo_sr", None), "Sniper Ammo");
        assert_eq!(
            normalize("JAK_PS.part_mag_ted_thrown_mirv", None),
            "Tediore Reload: Thrown Mirv"
        );
        assert_eq!(normalize("JAK_PS.part_body_rainbow", None), "Rainbow Variant");
        assert_eq!(
            normalize("part_color_gold_chrome", None),
            "Color Variant: Gold Chrome"
        );
    }

    #[test]
    fn test_first_match_wins() {
        // A Torgue magazine is also a plain magazine string; the specific
        // rule must claim it before the fallback does.
        assert_eq!(matching_rule("TOR_AR.part_mag_torgue_impact"), Some("torgue_magazine"));
        assert_eq!(matching_rule("JAK_PS.part_mag_01_jak"), Some("magazine"));
        assert_eq!(matching_rule("JAK_PS.part_barrel_02_seventhsense"), None);
    }

    #[test]
    fn test_fallback_title_cases_segments() {
        assert_eq!(
            normalize("JAK_PS.part_barrel_02_seventhsense", None),
            "Barrel 02 Seventhsense"
        );
        assert_eq!(normalize("comp_05_legendary_rowan", None), "Comp 05 Legendary Rowan");
        assert_eq!(normalize("weird__double", None), "Weird Double");
        assert_eq!(normalize("", None), "");
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("DAD_PS.part_barrel_01"), "part_barrel_01");
        assert_eq!(short_name("part_body"), "part_body");
    }
}

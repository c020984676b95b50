//! Base element definitions

/// Base element information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseElement {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// The five elements a weapon's first affix can be chosen from.
///
/// Names match the keys used in `elements.json` and in combination keys
/// (`"Fire - Cryo"`).
pub const BASE_ELEMENTS: &[BaseElement] = &[
    BaseElement {
        code: "corrosive",
        name: "Corrosive",
        description: "Acid damage, effective vs armor",
    },
    BaseElement {
        code: "cryo",
        name: "Cryo",
        description: "Freezing damage, slows and can freeze enemies",
    },
    BaseElement {
        code: "fire",
        name: "Fire",
        description: "Incendiary damage, effective vs flesh",
    },
    BaseElement {
        code: "radiation",
        name: "Radiation",
        description: "Radiation damage, spreads to nearby enemies",
    },
    BaseElement {
        code: "shock",
        name: "Shock",
        description: "Shock damage, effective vs shields",
    },
];

/// Get a base element by display name or code (case-insensitive)
pub fn base_element_by_name(name: &str) -> Option<&'static BaseElement> {
    BASE_ELEMENTS
        .iter()
        .find(|e| e.name.eq_ignore_ascii_case(name) || e.code.eq_ignore_ascii_case(name))
}

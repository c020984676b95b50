//! Weapon type definitions

/// Weapon type information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponType {
    pub code: &'static str,
    pub name: &'static str,
    /// Ammo family fed by this weapon class
    pub ammo: &'static str,
}

const WEAPON_TYPES: &[WeaponType] = &[
    WeaponType {
        code: "AR",
        name: "Assault Rifle",
        ammo: "Assault Rifle",
    },
    WeaponType {
        code: "HW",
        name: "Heavy Weapon",
        ammo: "Heavy",
    },
    WeaponType {
        code: "PS",
        name: "Pistol",
        ammo: "Pistol",
    },
    WeaponType {
        code: "SG",
        name: "Shotgun",
        ammo: "Shotgun",
    },
    WeaponType {
        code: "SM",
        name: "SMG",
        ammo: "SMG",
    },
    WeaponType {
        code: "SR",
        name: "Sniper",
        ammo: "Sniper",
    },
];

/// Get weapon type by code
pub fn weapon_type_by_code(code: &str) -> Option<&'static WeaponType> {
    WEAPON_TYPES.iter().find(|w| w.code.eq_ignore_ascii_case(code))
}

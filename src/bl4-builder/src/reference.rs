//! Reference data for Borderlands 4 weapons
//!
//! Hardcoded manufacturer codes, weapon types and base elements. Catalog
//! files name things by display name; these tables map the short codes used
//! in part strings (`JAK_PS.part_mag_01_tor`) and on the command line back
//! to those names.

mod element;
mod manufacturer;
mod weapon;

pub use element::{base_element_by_name, BaseElement, BASE_ELEMENTS};
pub use manufacturer::{manufacturer_by_code, MANUFACTURER_SUFFIXES};
pub use weapon::{weapon_type_by_code, WeaponType};

//! # bl4-builder
//!
//! Borderlands 4 weapon builder library - catalogs, selection state, and
//! deserialized string encoding.
//!
//! This library provides functionality to:
//! - Load weapon part, rarity and element catalogs
//! - Track a weapon selection (parts, slots, rarity, elements)
//! - Encode the selection into the deserialized string format
//! - Send deserialized strings to the reserialize service
//! - Render collected serials as backpack slot entries
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use bl4_builder::{Catalog, OutputMode, RarityPick, WeaponBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(Catalog::embedded()?);
//! let mut builder = WeaponBuilder::new(catalog);
//!
//! builder.set_manufacturer(Some("Jakobs"));
//! builder.set_weapon_type(Some("Pistol"));
//! builder.set_rarity_category(Some(RarityPick::Legendary));
//! builder.set_element1(Some("Fire"));
//! builder.set_output_mode(OutputMode::Ids);
//!
//! println!("{}", builder.encode());
//! # Ok(())
//! # }
//! ```

pub mod backpack;
pub mod builder;
pub mod catalog;
pub mod encode;
pub mod names;
pub mod reference;
pub mod reserialize;
pub mod selection;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used items
#[doc(inline)]
pub use backpack::{render_backpack, Backpack, BackpackError};
#[doc(inline)]
pub use builder::{RarityPick, SelectedPart, WeaponBuilder};
#[doc(inline)]
pub use catalog::{
    Catalog, CatalogError, ElementEntry, ElementTable, Part, PartGroup, RarityEntry, RarityTable,
};
#[doc(inline)]
pub use encode::{encode, tokens, with_delimiter, OutputMode, Token};
#[doc(inline)]
pub use names::normalize as normalize_part_name;
#[doc(inline)]
pub use reserialize::{
    normalize_deserialized, reserialize_encoded, Debouncer, GatewayError, ReserializeOutcome,
    Reserializer, DEFAULT_DEBOUNCE, DEFAULT_ENDPOINT,
};
#[cfg(feature = "http")]
#[doc(inline)]
pub use reserialize::HttpReserializer;
#[doc(inline)]
pub use selection::{BaseBlock, PartSelection, RaritySelection, SelectionState};

// Reference data (manufacturers, weapon types, base elements)
#[doc(inline)]
pub use reference::{
    base_element_by_name, manufacturer_by_code, weapon_type_by_code, BaseElement, WeaponType,
    BASE_ELEMENTS,
};

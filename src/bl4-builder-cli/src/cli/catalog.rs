//! Catalog command CLI definitions

use clap::Subcommand;

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List manufacturers
    Manufacturers,

    /// List weapon types of a manufacturer
    Types {
        /// Manufacturer name or code (e.g. "Jakobs", "JAK")
        manufacturer: String,
    },

    /// List parts of a weapon, grouped by part type
    Parts {
        /// Manufacturer name or code
        manufacturer: String,

        /// Weapon type name or code (e.g. "Pistol", "PS")
        weapon_type: String,
    },

    /// List rarities of a weapon
    Rarities {
        /// Manufacturer name or code
        manufacturer: String,

        /// Weapon type name or code
        weapon_type: String,
    },

    /// List elements and combinations
    Elements {
        /// Show the table used by this manufacturer
        manufacturer: Option<String>,
    },
}

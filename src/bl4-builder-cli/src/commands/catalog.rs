//! Catalog browsing command handlers

use crate::cli::CatalogCommand;
use crate::commands::{load_catalog, resolve_manufacturer, resolve_weapon_type};
use anyhow::Result;
use bl4_builder::{names, Catalog, BASE_ELEMENTS};
use std::fmt::Write as _;
use std::path::Path;

/// Handle catalog subcommands
pub fn handle(command: CatalogCommand, catalog_dir: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(catalog_dir)?;
    print!("{}", render(&catalog, &command)?);
    Ok(())
}

/// Render a catalog listing as text
pub fn render(catalog: &Catalog, command: &CatalogCommand) -> Result<String> {
    let mut out = String::new();

    match command {
        CatalogCommand::Manufacturers => {
            for manufacturer in catalog.manufacturers() {
                let types = catalog.weapon_types(manufacturer);
                writeln!(out, "{:<12} {}", manufacturer, types.join(", "))?;
            }
        }

        CatalogCommand::Types { manufacturer } => {
            let manufacturer = resolve_manufacturer(catalog, manufacturer)?;
            for weapon_type in catalog.weapon_types(&manufacturer) {
                match catalog.type_id(&manufacturer, weapon_type) {
                    Some(id) => writeln!(out, "{:<16} type {}", weapon_type, id)?,
                    None => writeln!(out, "{}", weapon_type)?,
                }
            }
        }

        CatalogCommand::Parts {
            manufacturer,
            weapon_type,
        } => {
            let manufacturer = resolve_manufacturer(catalog, manufacturer)?;
            let weapon_type = resolve_weapon_type(catalog, &manufacturer, weapon_type)?;

            for group in catalog.parts_for(&manufacturer, &weapon_type) {
                match catalog.slot_capacity(&manufacturer, &weapon_type, &group.part_type) {
                    Some(slots) => writeln!(out, "{} ({} slots)", group.part_type, slots)?,
                    None => writeln!(out, "{}", group.part_type)?,
                }
                for part in &group.parts {
                    writeln!(
                        out,
                        "  {:>4}  {:<36} {}",
                        part.id,
                        names::normalize(&part.string, part.stats()),
                        part.string
                    )?;
                }
            }
        }

        CatalogCommand::Rarities {
            manufacturer,
            weapon_type,
        } => {
            let manufacturer = resolve_manufacturer(catalog, manufacturer)?;
            let weapon_type = resolve_weapon_type(catalog, &manufacturer, weapon_type)?;
            let table = catalog.rarity_for(&manufacturer, &weapon_type);

            for rarity in &table.regular {
                writeln!(out, "  {:>4}  {}", rarity.id, rarity.label())?;
            }
            if !table.legendary.is_empty() {
                writeln!(out, "Legendary:")?;
                for rarity in &table.legendary {
                    writeln!(out, "  {:>4}  {}", rarity.id, rarity.label())?;
                }
            }
        }

        CatalogCommand::Elements { manufacturer } => {
            let special = match manufacturer {
                Some(m) => {
                    let name = resolve_manufacturer(catalog, m)?;
                    catalog.is_special_manufacturer(&name)
                }
                None => false,
            };

            let base: Vec<_> = BASE_ELEMENTS.iter().map(|e| e.name).collect();
            writeln!(out, "Base elements: {}", base.join(", "))?;

            let table = catalog.element_table(special);
            writeln!(
                out,
                "{} table:",
                if special { "Special" } else { "Default" }
            )?;
            for (key, entry) in table.iter() {
                writeln!(out, "  {:>4}  {:<20} {}", entry.id, key, entry.string)?;
            }
        }
    }

    Ok(out)
}

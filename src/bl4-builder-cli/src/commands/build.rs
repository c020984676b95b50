//! Build command handler
//!
//! One-shot weapon build: apply every flag to a fresh builder, print the
//! deserialized string and optionally write or reserialize it.

use crate::cli::BuildArgs;
use crate::commands::{load_catalog, resolve_manufacturer, resolve_weapon_type};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use bl4_builder::{
    reserialize_encoded, HttpReserializer, OutputMode, RarityPick, WeaponBuilder,
};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

/// Handle the build command
pub fn handle(args: BuildArgs, catalog_dir: Option<&Path>, config: &Config) -> Result<()> {
    let catalog = load_catalog(catalog_dir)?;
    let mut builder = WeaponBuilder::new(catalog);
    builder.set_output_mode(args.mode.unwrap_or_else(|| config.output_mode()));

    for notice in apply(&mut builder, &args)? {
        eprintln!("Warning: {}", notice);
    }

    let encoded = builder.encode();
    println!("{}", encoded);

    if let Some(output) = &args.output {
        let path = output_path(output, builder.output_mode());
        fs::write(&path, &encoded)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Wrote {}", path.display());
    }

    if args.reserialize {
        let endpoint = args.endpoint.as_deref().unwrap_or(config.endpoint());
        let gateway = HttpReserializer::new(endpoint);
        let serial = reserialize_encoded(&gateway, &encoded).map_err(|e| anyhow!(e))?;
        println!("{}", serial);
    }

    Ok(())
}

/// Apply build flags in selection order. Returns a notice for every flag
/// the builder ignored.
pub fn apply<R: Rng>(builder: &mut WeaponBuilder<R>, args: &BuildArgs) -> Result<Vec<String>> {
    let mut notices = Vec::new();

    let manufacturer = resolve_manufacturer(builder.catalog(), &args.manufacturer)?;
    let weapon_type = resolve_weapon_type(builder.catalog(), &manufacturer, &args.weapon_type)?;
    builder.set_manufacturer(Some(&manufacturer));
    builder.set_weapon_type(Some(&weapon_type));

    for part in &args.parts {
        if builder.add_part(&part.part_type, &part.id) {
            continue;
        }
        let known = builder
            .catalog()
            .part(&manufacturer, &weapon_type, &part.part_type, &part.id)
            .is_some();
        if known {
            notices.push(format!("no free {} slot for ID {}", part.part_type, part.id));
        } else {
            notices.push(format!(
                "{} has no {} part with ID {}",
                weapon_type, part.part_type, part.id
            ));
        }
    }

    for slot in &args.slots {
        if !builder.set_slot_part(&slot.part_type, slot.index, slot.id.as_deref()) {
            notices.push(format!(
                "ignored slot {} of {} (ID {})",
                slot.index,
                slot.part_type,
                slot.id.as_deref().unwrap_or("-")
            ));
        }
    }

    let legendary_category = args.legendary.is_some()
        || args
            .rarity
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("legendary"));

    if legendary_category {
        builder.set_rarity_category(Some(RarityPick::Legendary));
        if let Some(id) = args
            .rarity
            .as_deref()
            .filter(|r| !r.eq_ignore_ascii_case("legendary"))
        {
            notices.push(format!(
                "rarity {} ignored, --legendary selects the legendary category",
                id
            ));
        }
    } else if let Some(id) = &args.rarity {
        if !builder.set_rarity_category(Some(RarityPick::Regular(id))) {
            notices.push(format!("unknown rarity ID {}", id));
        }
    }

    if let Some(id) = &args.legendary {
        if !builder.set_legendary_subchoice(Some(id)) {
            notices.push(format!("unknown legendary ID {}", id));
        }
    }

    if let Some(element) = &args.element1 {
        if !builder.set_element1(Some(element)) {
            notices.push(format!("unknown element {}", element));
        }
    }

    if let Some(element) = &args.element2 {
        if !builder.set_element2(Some(element)) {
            notices.push(format!(
                "no {} combination for {}",
                element,
                args.element1.as_deref().unwrap_or("(no first element)")
            ));
        }
    }

    Ok(notices)
}

/// A directory gets the mode's default file name
fn output_path(output: &Path, mode: OutputMode) -> PathBuf {
    if output.is_dir() {
        output.join(mode.file_name())
    } else {
        output.to_path_buf()
    }
}

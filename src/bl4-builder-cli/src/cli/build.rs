//! Build command CLI definitions

use bl4_builder::OutputMode;
use clap::Args;
use std::path::PathBuf;
use std::str::FromStr;

/// `TYPE=ID`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartArg {
    pub part_type: String,
    pub id: String,
}

impl FromStr for PartArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (part_type, id) = s
            .split_once('=')
            .ok_or_else(|| format!("expected TYPE=ID, got '{}'", s))?;
        let (part_type, id) = (part_type.trim(), id.trim());
        if part_type.is_empty() || id.is_empty() {
            return Err(format!("expected TYPE=ID, got '{}'", s));
        }
        Ok(PartArg {
            part_type: part_type.to_string(),
            id: id.to_string(),
        })
    }
}

/// `TYPE:INDEX=ID`, or `TYPE:INDEX=-` to clear the slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotArg {
    pub part_type: String,
    pub index: usize,
    pub id: Option<String>,
}

impl FromStr for SlotArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let usage = || format!("expected TYPE:INDEX=ID, got '{}'", s);
        let (slot, id) = s.split_once('=').ok_or_else(usage)?;
        let (part_type, index) = slot.rsplit_once(':').ok_or_else(usage)?;
        let index = index
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid slot index in '{}'", s))?;
        let part_type = part_type.trim();
        if part_type.is_empty() {
            return Err(usage());
        }
        let id = match id.trim() {
            "" | "-" => None,
            id => Some(id.to_string()),
        };
        Ok(SlotArg {
            part_type: part_type.to_string(),
            index,
            id,
        })
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Manufacturer name or code (e.g. "Jakobs", "JAK")
    #[arg(short, long)]
    pub manufacturer: String,

    /// Weapon type name or code (e.g. "Pistol", "PS")
    #[arg(short, long)]
    pub weapon_type: String,

    /// Part by type and ID; slotted types fill the next free slot (repeatable)
    #[arg(short, long = "part", value_name = "TYPE=ID")]
    pub parts: Vec<PartArg>,

    /// Part in a specific slot of a slotted type (repeatable)
    #[arg(long = "slot", value_name = "TYPE:INDEX=ID")]
    pub slots: Vec<SlotArg>,

    /// Regular rarity ID, or "legendary"
    #[arg(short, long)]
    pub rarity: Option<String>,

    /// Legendary ID (implies --rarity legendary)
    #[arg(short, long)]
    pub legendary: Option<String>,

    /// First element (Corrosive, Cryo, Fire, Radiation, Shock)
    #[arg(long = "element1", visible_alias = "e1")]
    pub element1: Option<String>,

    /// Second element, combined with the first
    #[arg(long = "element2", visible_alias = "e2")]
    pub element2: Option<String>,

    /// Output mode (strings or ids)
    #[arg(long)]
    pub mode: Option<OutputMode>,

    /// Write the string to a file (a directory gets weapon-strings.txt / weapon-ids.txt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also send the string to the reserialize service
    #[arg(long)]
    pub reserialize: bool,

    /// Reserialize endpoint
    #[arg(long, env = "BL4_BUILDER_ENDPOINT")]
    pub endpoint: Option<String>,
}

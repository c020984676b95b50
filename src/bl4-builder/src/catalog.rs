//! Static weapon catalogs
//!
//! Three independent lookup tables feed the builder:
//!
//! - `weapons.json`: manufacturer → weapon type → list of parts
//! - `rarities.json`: manufacturer → weapon type → type ID and rarity list
//! - `elements.json`: base elements and the two combination tables
//!
//! All three are loaded once and treated as immutable. Entries that cannot
//! be interpreted are skipped with a warning instead of failing the load.

use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Part types that hold up to [`MULTI_SLOT_CAPACITY`] parts in fixed slots.
pub const MULTI_SLOT_TYPES: &[&str] = &[
    "Body Accessory",
    "Barrel Accessory",
    "Scope Accessory",
    "Manufacturer Part",
];

/// Slot count for the multi-slot part types.
pub const MULTI_SLOT_CAPACITY: usize = 4;

/// Body becomes multi-slot when a weapon offers more than one body.
pub const BODY_PART_TYPE: &str = "Body";

/// Slot count for a multi-slot Body group.
pub const BODY_SLOT_CAPACITY: usize = 2;

pub const WEAPONS_FILE: &str = "weapons.json";
pub const RARITIES_FILE: &str = "rarities.json";
pub const ELEMENTS_FILE: &str = "elements.json";

const EMBEDDED_WEAPONS: &str = include_str!("../../../share/catalog/weapons.json");
const EMBEDDED_RARITIES: &str = include_str!("../../../share/catalog/rarities.json");
const EMBEDDED_ELEMENTS: &str = include_str!("../../../share/catalog/elements.json");

/// Errors that can occur while loading catalog files
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid {what} catalog: {source}")]
    Json {
        what: &'static str,
        source: serde_json::Error,
    },
}

/// A single weapon part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(rename = "ID", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "Part Type")]
    pub part_type: String,
    #[serde(rename = "String")]
    pub string: String,
    #[serde(rename = "Stats", default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<String>,
}

impl Part {
    /// Stats text, treating an empty column as absent
    pub fn stats(&self) -> Option<&str> {
        self.stats.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Parts of one part type, in catalog sort order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartGroup {
    pub part_type: String,
    pub parts: Vec<Part>,
}

/// A rarity choice for a weapon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub string: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub legendary: bool,
}

impl RarityEntry {
    /// Display label: explicit name, else the last segment of the string
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| self.string.rsplit('.').next().unwrap_or(&self.string))
    }
}

/// Rarity data for one manufacturer + weapon type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RarityTable {
    /// Leading numeric token of the deserialized string
    pub type_id: Option<u32>,
    pub regular: Vec<RarityEntry>,
    pub legendary: Vec<RarityEntry>,
}

impl RarityTable {
    pub fn regular_by_id(&self, id: &str) -> Option<&RarityEntry> {
        self.regular.iter().find(|r| r.id == id)
    }

    pub fn legendary_by_id(&self, id: &str) -> Option<&RarityEntry> {
        self.legendary.iter().find(|r| r.id == id)
    }
}

/// One resolved element or element combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub string: String,
}

/// Element lookup keyed by base element name or combination key
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ElementTable {
    entries: BTreeMap<String, ElementEntry>,
}

impl ElementTable {
    pub fn get(&self, key: &str) -> Option<&ElementEntry> {
        self.entries.get(key)
    }

    /// Look up the combination of two base elements
    pub fn combination(&self, first: &str, second: &str) -> Option<&ElementEntry> {
        self.get(&combination_key(first, second))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ElementEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Combination key as used in `elements.json`: `"Fire - Cryo"`
pub fn combination_key(first: &str, second: &str) -> String {
    format!("{} - {}", first, second)
}

#[derive(Debug, Default, Deserialize)]
struct ElementCatalog {
    #[serde(default)]
    special_manufacturer: Option<String>,
    #[serde(default)]
    default: ElementTable,
    #[serde(default)]
    special: ElementTable,
}

#[derive(Debug, Deserialize)]
struct RawRarityTable {
    #[serde(default)]
    type_id: Option<serde_json::Value>,
    #[serde(default)]
    rarities: Vec<RarityEntry>,
}

type WeaponMap = BTreeMap<String, BTreeMap<String, Vec<Part>>>;
type RarityMap = BTreeMap<String, BTreeMap<String, RarityTable>>;

/// All catalog data needed by the builder
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    weapons: WeaponMap,
    rarities: RarityMap,
    special_manufacturer: Option<String>,
    default_elements: ElementTable,
    special_elements: ElementTable,
}

impl Catalog {
    /// Parse the three catalog documents
    pub fn from_json(weapons: &str, rarities: &str, elements: &str) -> Result<Self, CatalogError> {
        let weapons: WeaponMap = serde_json::from_str(weapons).map_err(|source| {
            CatalogError::Json {
                what: "weapon",
                source,
            }
        })?;

        let raw_rarities: BTreeMap<String, BTreeMap<String, RawRarityTable>> =
            serde_json::from_str(rarities).map_err(|source| CatalogError::Json {
                what: "rarity",
                source,
            })?;

        let elements: ElementCatalog =
            serde_json::from_str(elements).map_err(|source| CatalogError::Json {
                what: "element",
                source,
            })?;

        let rarities = raw_rarities
            .into_iter()
            .map(|(manufacturer, types)| {
                let types = types
                    .into_iter()
                    .map(|(weapon_type, raw)| {
                        let table = rarity_table(&manufacturer, &weapon_type, raw);
                        (weapon_type, table)
                    })
                    .collect();
                (manufacturer, types)
            })
            .collect();

        Ok(Self {
            weapons,
            rarities,
            special_manufacturer: elements.special_manufacturer,
            default_elements: elements.default,
            special_elements: elements.special,
        })
    }

    /// Load `weapons.json`, `rarities.json` and `elements.json` from a
    /// directory. Only the weapons file is required.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let weapons = read_required(&dir.join(WEAPONS_FILE))?;
        let rarities = read_optional(&dir.join(RARITIES_FILE))?;
        let elements = read_optional(&dir.join(ELEMENTS_FILE))?;
        let catalog = Self::from_json(&weapons, &rarities, &elements)?;

        tracing::debug!(
            dir = %dir.display(),
            manufacturers = catalog.weapons.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// The catalog bundled with the library (`share/catalog/`)
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_WEAPONS, EMBEDDED_RARITIES, EMBEDDED_ELEMENTS)
    }

    /// All manufacturer names, sorted
    pub fn manufacturers(&self) -> impl Iterator<Item = &str> {
        self.weapons.keys().map(|m| m.as_str())
    }

    /// Weapon types offered by a manufacturer, sorted
    pub fn weapon_types(&self, manufacturer: &str) -> Vec<&str> {
        self.weapons
            .get(manufacturer)
            .map(|types| types.keys().map(|t| t.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn has_weapon(&self, manufacturer: &str, weapon_type: &str) -> bool {
        self.weapons
            .get(manufacturer)
            .is_some_and(|types| types.contains_key(weapon_type))
    }

    fn raw_parts(&self, manufacturer: &str, weapon_type: &str) -> &[Part] {
        self.weapons
            .get(manufacturer)
            .and_then(|types| types.get(weapon_type))
            .map(|parts| parts.as_slice())
            .unwrap_or(&[])
    }

    /// Parts for a weapon, grouped by part type.
    ///
    /// Groups appear in the order their part type first shows up in the
    /// catalog; parts inside a group are sorted with [`numeric_aware_cmp`]
    /// on their IDs.
    pub fn parts_for(&self, manufacturer: &str, weapon_type: &str) -> Vec<PartGroup> {
        let mut groups: Vec<PartGroup> = Vec::new();

        for part in self.raw_parts(manufacturer, weapon_type) {
            match groups.iter_mut().find(|g| g.part_type == part.part_type) {
                Some(group) => group.parts.push(part.clone()),
                None => groups.push(PartGroup {
                    part_type: part.part_type.clone(),
                    parts: vec![part.clone()],
                }),
            }
        }

        for group in &mut groups {
            group.parts.sort_by(|a, b| numeric_aware_cmp(&a.id, &b.id));
        }

        groups
    }

    /// Find a part by ID within one part type of a weapon
    pub fn part(
        &self,
        manufacturer: &str,
        weapon_type: &str,
        part_type: &str,
        id: &str,
    ) -> Option<&Part> {
        self.raw_parts(manufacturer, weapon_type)
            .iter()
            .find(|p| p.part_type == part_type && p.id == id)
    }

    /// Number of slots for a part type, or `None` for single-select types
    pub fn slot_capacity(
        &self,
        manufacturer: &str,
        weapon_type: &str,
        part_type: &str,
    ) -> Option<usize> {
        if MULTI_SLOT_TYPES.contains(&part_type) {
            return Some(MULTI_SLOT_CAPACITY);
        }

        if part_type == BODY_PART_TYPE {
            let bodies = self
                .raw_parts(manufacturer, weapon_type)
                .iter()
                .filter(|p| p.part_type == BODY_PART_TYPE)
                .count();
            if bodies > 1 {
                return Some(BODY_SLOT_CAPACITY);
            }
        }

        None
    }

    /// Rarity table for a weapon (empty when the catalog has none)
    pub fn rarity_for(&self, manufacturer: &str, weapon_type: &str) -> RarityTable {
        self.rarities
            .get(manufacturer)
            .and_then(|types| types.get(weapon_type))
            .cloned()
            .unwrap_or_default()
    }

    /// Type ID for a weapon, if the rarity catalog has one
    pub fn type_id(&self, manufacturer: &str, weapon_type: &str) -> Option<u32> {
        self.rarities
            .get(manufacturer)
            .and_then(|types| types.get(weapon_type))
            .and_then(|table| table.type_id)
    }

    /// Whether a manufacturer uses the special element combination table
    pub fn is_special_manufacturer(&self, manufacturer: &str) -> bool {
        self.special_manufacturer
            .as_deref()
            .is_some_and(|special| special == manufacturer)
    }

    pub fn special_manufacturer(&self) -> Option<&str> {
        self.special_manufacturer.as_deref()
    }

    /// Element table for the default or the special manufacturer
    pub fn element_table(&self, is_special: bool) -> &ElementTable {
        if is_special {
            &self.special_elements
        } else {
            &self.default_elements
        }
    }
}

fn rarity_table(manufacturer: &str, weapon_type: &str, raw: RawRarityTable) -> RarityTable {
    let type_id = raw.type_id.and_then(|value| {
        let parsed = match &value {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            serde_json::Value::String(s) => s.trim().parse::<u32>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            tracing::warn!(
                manufacturer,
                weapon_type,
                %value,
                "ignoring malformed type_id"
            );
        }
        parsed
    });

    let (legendary, regular): (Vec<_>, Vec<_>) =
        raw.rarities.into_iter().partition(|r| r.legendary);

    RarityTable {
        type_id,
        regular,
        legendary,
    }
}

fn read_required(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional(path: &Path) -> Result<String, CatalogError> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "catalog file missing, using empty table");
        return Ok("{}".to_string());
    }
    read_required(path)
}

/// Accept IDs written either as JSON strings or numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// Last `.`/`_`-separated token of an identifier
fn trailing_token(id: &str) -> &str {
    id.rsplit(['.', '_']).next().unwrap_or(id)
}

fn leading_number(token: &str) -> Option<u64> {
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    token[..end].parse().ok()
}

/// Numeric-aware ordering on the trailing identifier token.
///
/// When both tokens start with a digit run and the numbers differ, they
/// compare numerically (`"2" < "10"`). Otherwise, including ties on the
/// number, the tokens compare lexicographically.
pub fn numeric_aware_cmp(a: &str, b: &str) -> Ordering {
    let (ta, tb) = (trailing_token(a), trailing_token(b));
    match (leading_number(ta), leading_number(tb)) {
        (Some(x), Some(y)) if x != y => x.cmp(&y),
        _ => ta.cmp(tb).then_with(|| a.cmp(b)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const WEAPONS: &str = r#"{
        "Jakobs": {
            "Pistol": [
                {"ID": "10", "Part Type": "Barrel", "String": "JAK_PS.part_barrel_02", "Stats": ""},
                {"ID": "5", "Part Type": "Body", "String": "JAK_PS.part_body", "Stats": ""},
                {"ID": "2", "Part Type": "Barrel", "String": "JAK_PS.part_barrel_01", "Stats": ""},
                {"ID": "21", "Part Type": "Barrel Accessory", "String": "JAK_PS.part_barrel_01_a"},
                {"ID": "22", "Part Type": "Barrel Accessory", "String": "JAK_PS.part_barrel_01_b"},
                {"ID": "23", "Part Type": "Barrel Accessory", "String": "JAK_PS.part_barrel_01_c"},
                {"ID": 30, "Part Type": "Magazine", "String": "JAK_PS.part_mag_01_tor"},
                {"ID": "40", "Part Type": "Underbarrel", "String": "JAK_PS.part_underbarrel_01", "Stats": "Knife Launcher"}
            ],
            "Sniper": [
                {"ID": "1", "Part Type": "Body", "String": "JAK_SR.part_body"},
                {"ID": "3", "Part Type": "Body", "String": "JAK_SR.part_body_alt"}
            ]
        },
        "Maliwan": {
            "SMG": [
                {"ID": "5", "Part Type": "Body", "String": "MAL_SM.part_body"}
            ]
        }
    }"#;

    pub(crate) const RARITIES: &str = r#"{
        "Jakobs": {
            "Pistol": {
                "type_id": 7,
                "rarities": [
                    {"id": "12", "string": "JAK_PS.comp_01_common", "name": "Common"},
                    {"id": "13", "string": "JAK_PS.comp_04_epic", "name": "Epic"},
                    {"id": "80", "string": "JAK_PS.comp_05_legendary_kingsgambit", "name": "King's Gambit", "legendary": true},
                    {"id": "81", "string": "JAK_PS.comp_05_legendary_seventhsense", "legendary": true}
                ]
            },
            "Sniper": {
                "type_id": "not-a-number",
                "rarities": []
            }
        },
        "Maliwan": {
            "SMG": {"type_id": "23", "rarities": [{"id": "1", "string": "MAL_SM.comp_01_common"}]}
        }
    }"#;

    pub(crate) const ELEMENTS: &str = r#"{
        "special_manufacturer": "Maliwan",
        "default": {
            "Fire": {"id": "14", "string": "elem_fire"},
            "Cryo": {"id": "13", "string": "elem_cryo"},
            "Shock": {"id": "8", "string": "elem_shock"},
            "Corrosive": {"id": "5", "string": "elem_corrosive"},
            "Radiation": {"id": "9", "string": "elem_radiation"},
            "Fire - Cryo": {"id": "99", "string": "elem_fire_cryo"},
            "Fire - Shock": {"id": "98", "string": "elem_fire_shock"}
        },
        "special": {
            "Fire": {"id": "114", "string": "mal_elem_fire"},
            "Fire - Shock": {"id": "198", "string": "mal_elem_fire_shock"}
        }
    }"#;

    pub(crate) fn sample() -> Catalog {
        Catalog::from_json(WEAPONS, RARITIES, ELEMENTS).unwrap()
    }

    #[test]
    fn test_manufacturers_and_types() {
        let catalog = sample();
        let manufacturers: Vec<_> = catalog.manufacturers().collect();
        assert_eq!(manufacturers, vec!["Jakobs", "Maliwan"]);
        assert_eq!(catalog.weapon_types("Jakobs"), vec!["Pistol", "Sniper"]);
        assert!(catalog.weapon_types("Nobody").is_empty());
        assert!(catalog.has_weapon("Maliwan", "SMG"));
        assert!(!catalog.has_weapon("Maliwan", "Pistol"));
    }

    #[test]
    fn test_parts_grouped_in_first_appearance_order() {
        let groups = sample().parts_for("Jakobs", "Pistol");
        let types: Vec<_> = groups.iter().map(|g| g.part_type.as_str()).collect();
        assert_eq!(
            types,
            vec!["Barrel", "Body", "Barrel Accessory", "Magazine", "Underbarrel"]
        );
    }

    #[test]
    fn test_parts_sorted_numerically_within_group() {
        let groups = sample().parts_for("Jakobs", "Pistol");
        let barrel_ids: Vec<_> = groups[0].parts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(barrel_ids, vec!["2", "10"]);
    }

    #[test]
    fn test_numeric_id_accepted() {
        let catalog = sample();
        let mag = catalog.part("Jakobs", "Pistol", "Magazine", "30").unwrap();
        assert_eq!(mag.string, "JAK_PS.part_mag_01_tor");
    }

    #[test]
    fn test_numeric_aware_cmp() {
        assert_eq!(numeric_aware_cmp("2", "10"), Ordering::Less);
        assert_eq!(numeric_aware_cmp("10", "9"), Ordering::Greater);
        assert_eq!(numeric_aware_cmp("part_2", "part_10"), Ordering::Less);
        // Numeric tie falls back to lexicographic compare
        assert_eq!(numeric_aware_cmp("01a", "01b"), Ordering::Less);
        // No digit run on one side: lexicographic
        assert_eq!(numeric_aware_cmp("b", "10"), Ordering::Greater);
        assert_eq!(numeric_aware_cmp("7", "7"), Ordering::Equal);
    }

    #[test]
    fn test_slot_capacity() {
        let catalog = sample();
        assert_eq!(
            catalog.slot_capacity("Jakobs", "Pistol", "Barrel Accessory"),
            Some(MULTI_SLOT_CAPACITY)
        );
        assert_eq!(catalog.slot_capacity("Jakobs", "Pistol", "Body"), None);
        assert_eq!(
            catalog.slot_capacity("Jakobs", "Sniper", "Body"),
            Some(BODY_SLOT_CAPACITY)
        );
        assert_eq!(catalog.slot_capacity("Jakobs", "Pistol", "Barrel"), None);
    }

    #[test]
    fn test_rarity_split() {
        let table = sample().rarity_for("Jakobs", "Pistol");
        assert_eq!(table.type_id, Some(7));
        assert_eq!(table.regular.len(), 2);
        assert_eq!(table.legendary.len(), 2);
        assert_eq!(table.legendary_by_id("80").map(|r| r.label()), Some("King's Gambit"));
        assert_eq!(
            table.legendary_by_id("81").map(|r| r.label()),
            Some("comp_05_legendary_seventhsense")
        );
    }

    #[test]
    fn test_malformed_type_id_degrades() {
        let catalog = sample();
        assert_eq!(catalog.type_id("Jakobs", "Sniper"), None);
        assert_eq!(catalog.type_id("Maliwan", "SMG"), Some(23));
        assert_eq!(catalog.type_id("Nobody", "SMG"), None);
        assert_eq!(catalog.rarity_for("Nobody", "SMG"), RarityTable::default());
    }

    #[test]
    fn test_element_tables() {
        let catalog = sample();
        assert!(catalog.is_special_manufacturer("Maliwan"));
        assert!(!catalog.is_special_manufacturer("Jakobs"));

        let default = catalog.element_table(false);
        assert_eq!(default.combination("Fire", "Cryo").map(|e| e.id.as_str()), Some("99"));
        assert!(default.combination("Cryo", "Fire").is_none());

        let special = catalog.element_table(true);
        assert_eq!(special.combination("Fire", "Shock").map(|e| e.id.as_str()), Some("198"));
        assert!(special.combination("Fire", "Cryo").is_none());
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = Catalog::from_json("not json", "{}", "{}").unwrap_err();
        assert!(matches!(err, CatalogError::Json { what: "weapon", .. }));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(WEAPONS_FILE), WEAPONS).unwrap();
        fs::write(dir.path().join(RARITIES_FILE), RARITIES).unwrap();

        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.type_id("Jakobs", "Pistol"), Some(7));
        // elements.json is optional
        assert!(catalog.element_table(false).is_empty());
    }

    #[test]
    fn test_load_requires_weapons_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_embedded_catalog_parses() {
        let catalog = Catalog::embedded().unwrap();
        assert!(catalog.manufacturers().next().is_some());
    }
}

//! WebAssembly bindings for bl4-builder
//!
//! This module provides JavaScript-friendly bindings for the weapon builder
//! so a browser page can drive the same selection model as the CLI.

use crate::backpack::render_backpack;
use crate::builder::{RarityPick, WeaponBuilder};
use crate::catalog::Catalog;
use crate::encode::OutputMode;
use crate::names;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

/// Turn a part string into a display label
#[wasm_bindgen(js_name = normalizePartName)]
pub fn normalize_part_name(raw_id: &str, stats: Option<String>) -> String {
    names::normalize(raw_id, stats.as_deref())
}

/// Render serials (one per array entry) as backpack slot entries
#[wasm_bindgen(js_name = renderBackpack)]
pub fn render_backpack_js(serials: Vec<String>) -> String {
    render_backpack(&serials)
}

/// JavaScript-friendly WeaponBuilder wrapper
#[wasm_bindgen(js_name = WeaponBuilder)]
pub struct WasmBuilder {
    inner: WeaponBuilder,
}

#[wasm_bindgen(js_class = WeaponBuilder)]
impl WasmBuilder {
    /// Create a builder from the three catalog documents
    ///
    /// # Arguments
    /// * `weapons` - contents of `weapons.json`
    /// * `rarities` - contents of `rarities.json`
    /// * `elements` - contents of `elements.json`
    #[wasm_bindgen(constructor)]
    pub fn new(weapons: &str, rarities: &str, elements: &str) -> Result<WasmBuilder, JsValue> {
        let catalog = Catalog::from_json(weapons, rarities, elements)
            .map_err(|e| JsValue::from_str(&format!("Catalog load failed: {}", e)))?;
        Ok(WasmBuilder {
            inner: WeaponBuilder::new(Arc::new(catalog)),
        })
    }

    /// Builder over the catalog bundled with the library
    #[wasm_bindgen(js_name = withEmbeddedCatalog)]
    pub fn with_embedded_catalog() -> Result<WasmBuilder, JsValue> {
        let catalog = Catalog::embedded()
            .map_err(|e| JsValue::from_str(&format!("Catalog load failed: {}", e)))?;
        Ok(WasmBuilder {
            inner: WeaponBuilder::new(Arc::new(catalog)),
        })
    }

    pub fn manufacturers(&self) -> Vec<String> {
        self.inner
            .catalog()
            .manufacturers()
            .map(String::from)
            .collect()
    }

    #[wasm_bindgen(js_name = weaponTypes)]
    pub fn weapon_types(&self) -> Vec<String> {
        match self.inner.state().manufacturer() {
            Some(m) => self
                .inner
                .catalog()
                .weapon_types(m)
                .into_iter()
                .map(String::from)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Part groups as JSON: `[{"part_type", "slots", "parts": [{"id", "string", "label"}]}]`
    #[wasm_bindgen(js_name = partGroups)]
    pub fn part_groups(&self) -> String {
        let groups: Vec<_> = self
            .inner
            .part_groups()
            .into_iter()
            .map(|group| {
                let parts: Vec<_> = group
                    .parts
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "id": p.id,
                            "string": p.string,
                            "label": names::normalize(&p.string, p.stats()),
                        })
                    })
                    .collect();
                serde_json::json!({
                    "part_type": group.part_type,
                    "slots": self.inner.slot_capacity(&group.part_type),
                    "parts": parts,
                })
            })
            .collect();
        serde_json::Value::Array(groups).to_string()
    }

    /// Rarity choices as JSON: `{"regular": [...], "legendary": [...]}`
    #[wasm_bindgen(js_name = rarityChoices)]
    pub fn rarity_choices(&self) -> String {
        let table = self.inner.rarity_choices();
        serde_json::json!({
            "regular": table.regular,
            "legendary": table.legendary,
        })
        .to_string()
    }

    #[wasm_bindgen(js_name = element2Candidates)]
    pub fn element2_candidates(&self) -> Vec<String> {
        self.inner
            .element2_candidates()
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[wasm_bindgen(js_name = setManufacturer)]
    pub fn set_manufacturer(&mut self, name: Option<String>) -> bool {
        self.inner.set_manufacturer(name.as_deref())
    }

    #[wasm_bindgen(js_name = setWeaponType)]
    pub fn set_weapon_type(&mut self, name: Option<String>) -> bool {
        self.inner.set_weapon_type(name.as_deref())
    }

    #[wasm_bindgen(js_name = setSinglePart)]
    pub fn set_single_part(&mut self, part_type: &str, id: Option<String>) -> bool {
        self.inner.set_single_part(part_type, id.as_deref())
    }

    #[wasm_bindgen(js_name = setSlotPart)]
    pub fn set_slot_part(&mut self, part_type: &str, index: usize, id: Option<String>) -> bool {
        self.inner.set_slot_part(part_type, index, id.as_deref())
    }

    /// Pick a regular rarity by ID, `"legendary"` for the legendary
    /// category, or nothing to clear
    #[wasm_bindgen(js_name = setRarityCategory)]
    pub fn set_rarity_category(&mut self, choice: Option<String>) -> bool {
        let pick = match choice.as_deref() {
            None | Some("") => None,
            Some("legendary") => Some(RarityPick::Legendary),
            Some(id) => Some(RarityPick::Regular(id)),
        };
        self.inner.set_rarity_category(pick)
    }

    #[wasm_bindgen(js_name = setLegendary)]
    pub fn set_legendary(&mut self, id: Option<String>) -> bool {
        self.inner.set_legendary_subchoice(id.as_deref())
    }

    #[wasm_bindgen(js_name = setElement1)]
    pub fn set_element1(&mut self, name: Option<String>) -> bool {
        self.inner.set_element1(name.as_deref())
    }

    #[wasm_bindgen(js_name = setElement2)]
    pub fn set_element2(&mut self, name: Option<String>) -> bool {
        self.inner.set_element2(name.as_deref())
    }

    /// Switch output between `"strings"` and `"ids"`
    #[wasm_bindgen(js_name = setOutputMode)]
    pub fn set_output_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: OutputMode = mode
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{}", e)))?;
        self.inner.set_output_mode(mode);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Encoded string in the current output mode
    pub fn output(&self) -> String {
        self.inner.encode()
    }
}

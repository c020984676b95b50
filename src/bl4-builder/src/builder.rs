//! Weapon builder controller
//!
//! [`WeaponBuilder`] owns the catalog handle, the selection state, the
//! output mode and the RNG used for base blocks. Every setter takes names
//! and IDs as the user typed them, resolves them against the catalog and
//! applies the change. Input that does not resolve is ignored and the
//! setter returns `false`; nothing here is an error.

use crate::catalog::{combination_key, Catalog, Part, PartGroup, RarityTable};
use crate::encode::{self, OutputMode, Token};
use crate::names;
use crate::reference::{base_element_by_name, BASE_ELEMENTS};
use crate::selection::{PartSelection, RarityChoice, ResolvedElement, SelectionState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Rarity category as picked by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RarityPick<'a> {
    /// A regular rarity by catalog ID
    Regular(&'a str),
    Legendary,
}

/// A selected part with its slot and display label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPart {
    pub part_type: String,
    /// Slot index for multi-slot groups
    pub slot: Option<usize>,
    pub part: Part,
    pub label: String,
}

pub struct WeaponBuilder<R = StdRng> {
    catalog: Arc<Catalog>,
    state: SelectionState,
    mode: OutputMode,
    rng: R,
}

impl WeaponBuilder<StdRng> {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }
}

impl<R: Rng> WeaponBuilder<R> {
    /// Builder with a caller-supplied RNG (seeded in tests)
    pub fn with_rng(catalog: Arc<Catalog>, rng: R) -> Self {
        Self {
            catalog,
            state: SelectionState::new(),
            mode: OutputMode::default(),
            rng,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn output_mode(&self) -> OutputMode {
        self.mode
    }

    /// Switch between strings and IDs; the selection is left untouched
    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    /// Select a manufacturer (or clear with `None`); resets everything else
    pub fn set_manufacturer(&mut self, manufacturer: Option<&str>) -> bool {
        match manufacturer {
            Some(name) if self.catalog.weapon_types(name).is_empty() => {
                tracing::debug!(manufacturer = name, "unknown manufacturer ignored");
                false
            }
            _ => {
                self.state.set_manufacturer(manufacturer.map(str::to_string));
                true
            }
        }
    }

    /// Select a weapon type of the current manufacturer
    pub fn set_weapon_type(&mut self, weapon_type: Option<&str>) -> bool {
        let Some(manufacturer) = self.state.manufacturer() else {
            return false;
        };
        if let Some(name) = weapon_type {
            if !self.catalog.has_weapon(manufacturer, name) {
                tracing::debug!(manufacturer, weapon_type = name, "unknown weapon type ignored");
                return false;
            }
        }
        self.state
            .set_weapon_type(weapon_type.map(str::to_string), &mut self.rng);
        true
    }

    fn weapon(&self) -> Option<(&str, &str)> {
        Some((self.state.manufacturer()?, self.state.weapon_type()?))
    }

    fn lookup_part(&self, part_type: &str, id: &str) -> Option<Part> {
        let (manufacturer, weapon_type) = self.weapon()?;
        self.catalog
            .part(manufacturer, weapon_type, part_type, id)
            .cloned()
    }

    /// Slot count for a part type of the current weapon
    pub fn slot_capacity(&self, part_type: &str) -> Option<usize> {
        let (manufacturer, weapon_type) = self.weapon()?;
        self.catalog
            .slot_capacity(manufacturer, weapon_type, part_type)
    }

    /// Set or clear a single-select part type
    pub fn set_single_part(&mut self, part_type: &str, id: Option<&str>) -> bool {
        if self.weapon().is_none() || self.slot_capacity(part_type).is_some() {
            return false;
        }
        let part = match id {
            Some(id) => match self.lookup_part(part_type, id) {
                Some(part) => Some(part),
                None => {
                    tracing::debug!(part_type, id, "unknown part ignored");
                    return false;
                }
            },
            None => None,
        };
        self.state.set_single_part(part_type, part);
        true
    }

    /// Set or clear one slot of a multi-slot part type
    pub fn set_slot_part(&mut self, part_type: &str, index: usize, id: Option<&str>) -> bool {
        let Some(capacity) = self.slot_capacity(part_type) else {
            return false;
        };
        let part = match id {
            Some(id) => match self.lookup_part(part_type, id) {
                Some(part) => Some(part),
                None => {
                    tracing::debug!(part_type, id, "unknown part ignored");
                    return false;
                }
            },
            None => None,
        };
        self.state.set_slot_part(part_type, index, part, capacity)
    }

    /// Set a part without caring whether its type is slotted.
    ///
    /// Slotted types go to the first free slot; when every slot is filled
    /// the part is ignored.
    pub fn add_part(&mut self, part_type: &str, id: &str) -> bool {
        match self.slot_capacity(part_type) {
            None => self.set_single_part(part_type, Some(id)),
            Some(capacity) => {
                let index = match self.state.part(part_type) {
                    Some(PartSelection::Slots(slots)) => slots
                        .iter()
                        .position(Option::is_none)
                        .unwrap_or(slots.len()),
                    _ => 0,
                };
                if index >= capacity {
                    tracing::debug!(part_type, id, "no free slot, part ignored");
                    return false;
                }
                self.set_slot_part(part_type, index, Some(id))
            }
        }
    }

    /// Rarity choices for the current weapon
    pub fn rarity_choices(&self) -> RarityTable {
        self.weapon()
            .map(|(m, t)| self.catalog.rarity_for(m, t))
            .unwrap_or_default()
    }

    /// Pick a rarity category, or clear it with `None`
    pub fn set_rarity_category(&mut self, pick: Option<RarityPick<'_>>) -> bool {
        if self.weapon().is_none() {
            return false;
        }
        let choice = match pick {
            None => None,
            Some(RarityPick::Legendary) => Some(RarityChoice::Legendary),
            Some(RarityPick::Regular(id)) => match self.rarity_choices().regular_by_id(id) {
                Some(entry) => Some(RarityChoice::Regular(entry.clone())),
                None => {
                    tracing::debug!(id, "unknown rarity ignored");
                    return false;
                }
            },
        };
        self.state.set_rarity_category(choice, &mut self.rng);
        true
    }

    /// Resolve or clear the concrete legendary
    pub fn set_legendary_subchoice(&mut self, id: Option<&str>) -> bool {
        let entry = match id {
            Some(id) => match self.rarity_choices().legendary_by_id(id) {
                Some(entry) => Some(entry.clone()),
                None => {
                    tracing::debug!(id, "unknown legendary ignored");
                    return false;
                }
            },
            None => None,
        };
        self.state.set_legendary_subchoice(entry, &mut self.rng)
    }

    fn is_special(&self) -> bool {
        self.state
            .manufacturer()
            .is_some_and(|m| self.catalog.is_special_manufacturer(m))
    }

    /// Set or clear the first element.
    ///
    /// The element is looked up in the manufacturer's table first and the
    /// default table second.
    pub fn set_element1(&mut self, name: Option<&str>) -> bool {
        let Some(name) = name else {
            self.state.set_element1(None);
            return true;
        };
        let Some(base) = base_element_by_name(name) else {
            tracing::debug!(element = name, "unknown element ignored");
            return false;
        };
        let entry = self
            .catalog
            .element_table(self.is_special())
            .get(base.name)
            .or_else(|| self.catalog.element_table(false).get(base.name))
            .cloned();
        match entry {
            Some(entry) => {
                self.state.set_element1(Some((base.name.to_string(), entry)));
                true
            }
            None => {
                tracing::debug!(element = base.name, "element missing from catalog");
                false
            }
        }
    }

    /// Set or clear the second element.
    ///
    /// Needs a first element and a different base element; the pair must
    /// exist in the manufacturer's combination table.
    pub fn set_element2(&mut self, name: Option<&str>) -> bool {
        let Some(first) = self.state.elements().first_name().map(str::to_string) else {
            return false;
        };
        let Some(name) = name else {
            self.state.set_element2(None);
            return true;
        };
        let Some(second) = base_element_by_name(name) else {
            return false;
        };
        if second.name == first {
            return false;
        }

        let key = combination_key(&first, second.name);
        match self.catalog.element_table(self.is_special()).get(&key) {
            Some(entry) => {
                let resolved = ResolvedElement {
                    key,
                    entry: entry.clone(),
                };
                self.state.set_element2(Some(resolved));
                true
            }
            None => {
                tracing::debug!(combination = %key, "element combination not in catalog");
                false
            }
        }
    }

    /// Base elements that may follow the current first element
    pub fn element2_candidates(&self) -> Vec<&'static str> {
        let Some(first) = self.state.elements().first_name() else {
            return Vec::new();
        };
        BASE_ELEMENTS
            .iter()
            .map(|e| e.name)
            .filter(|name| *name != first)
            .collect()
    }

    /// Part groups of the current weapon
    pub fn part_groups(&self) -> Vec<PartGroup> {
        self.weapon()
            .map(|(m, t)| self.catalog.parts_for(m, t))
            .unwrap_or_default()
    }

    /// Selected parts in output order, with display labels
    pub fn selected_parts(&self) -> Vec<SelectedPart> {
        let mut out = Vec::new();
        for (part_type, selection) in self.state.parts() {
            match selection {
                PartSelection::Single(part) => out.push(selected(part_type, None, part)),
                PartSelection::Slots(slots) => {
                    for (i, part) in slots.iter().enumerate() {
                        if let Some(part) = part {
                            out.push(selected(part_type, Some(i), part));
                        }
                    }
                }
            }
        }
        out
    }

    /// Clear manufacturer, weapon type and all selections
    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn type_id(&self) -> Option<u32> {
        let (manufacturer, weapon_type) = self.weapon()?;
        self.catalog.type_id(manufacturer, weapon_type)
    }

    pub fn tokens(&self) -> Vec<Token<'_>> {
        encode::tokens(&self.state, self.type_id())
    }

    /// Encoded string in the current output mode
    pub fn encode(&self) -> String {
        self.encode_as(self.mode)
    }

    pub fn encode_as(&self, mode: OutputMode) -> String {
        encode::encode(&self.state, self.type_id(), mode)
    }
}

fn selected(part_type: &str, slot: Option<usize>, part: &Part) -> SelectedPart {
    SelectedPart {
        part_type: part_type.to_string(),
        slot,
        part: part.clone(),
        label: names::normalize(&part.string, part.stats()),
    }
}

//! Weapon selection state
//!
//! Everything the user has picked for one weapon: manufacturer, weapon
//! type, parts, rarity, elements and the base block. The state only knows
//! how to mutate itself consistently; resolving names and IDs against the
//! catalog is the builder's job.

use crate::catalog::{ElementEntry, Part, RarityEntry};
use rand::Rng;

/// Inclusive lower bound of the base block value (rounded up before use)
pub const BASE_BLOCK_MIN: f64 = 1.0;

/// Exclusive upper bound of the base block value (rounded down before use)
pub const BASE_BLOCK_MAX: f64 = 9999.0;

/// Mandatory preamble of every deserialized string.
///
/// Issued as soon as a weapon type is selected, and reissued with a fresh
/// random value each time the rarity changes. Its meaning is opaque; only
/// the shape and the `[1, 9999)` range are relied on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseBlock {
    value: u32,
    text: String,
}

impl BaseBlock {
    pub fn new(value: u32) -> Self {
        Self {
            value,
            text: format!("0, 1, 50| 2, {}||", value),
        }
    }

    /// Draw a new block with a value uniform in `[1, 9999)`
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let min = BASE_BLOCK_MIN.ceil();
        let max = BASE_BLOCK_MAX.floor();
        let value = (rng.gen::<f64>() * (max - min)).floor() + min;
        Self::new(value as u32)
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Selection for one part type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartSelection {
    Single(Part),
    /// Slot-indexed parts; never ends with an empty slot
    Slots(Vec<Option<Part>>),
}

impl PartSelection {
    /// Selected parts in slot order, skipping empty slots
    pub fn parts(&self) -> Box<dyn Iterator<Item = &Part> + '_> {
        match self {
            PartSelection::Single(part) => Box::new(std::iter::once(part)),
            PartSelection::Slots(slots) => Box::new(slots.iter().flatten()),
        }
    }
}

/// A rarity category picked from the rarity dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RarityChoice {
    Regular(RarityEntry),
    /// The legendary category; the concrete legendary comes from a second pick
    Legendary,
}

/// Rarity sub-state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RaritySelection {
    #[default]
    Unset,
    Regular(RarityEntry),
    /// Legendary category picked; `None` until the sub-choice is made
    Legendary(Option<RarityEntry>),
}

impl RaritySelection {
    /// The rarity that goes into the output, if any
    pub fn resolved(&self) -> Option<&RarityEntry> {
        match self {
            RaritySelection::Unset => None,
            RaritySelection::Regular(entry) => Some(entry),
            RaritySelection::Legendary(entry) => entry.as_ref(),
        }
    }

    pub fn is_legendary(&self) -> bool {
        matches!(self, RaritySelection::Legendary(_))
    }
}

/// One resolved element or element combination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedElement {
    /// Base element name, or the combination key for the second entry
    pub key: String,
    pub entry: ElementEntry,
}

/// Zero, one or two resolved elements in resolution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSelection {
    resolved: Vec<ResolvedElement>,
    first_name: Option<String>,
}

impl ElementSelection {
    pub fn resolved(&self) -> &[ResolvedElement] {
        &self.resolved
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Name of the first element, used to build combination keys
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    fn clear(&mut self) {
        self.resolved.clear();
        self.first_name = None;
    }

    fn set_first(&mut self, name: String, entry: ElementEntry) {
        self.resolved.clear();
        self.resolved.push(ResolvedElement {
            key: name.clone(),
            entry,
        });
        self.first_name = Some(name);
    }

    fn set_second(&mut self, resolved: Option<ResolvedElement>) {
        self.resolved.truncate(1);
        if let Some(resolved) = resolved {
            if !self.resolved.is_empty() {
                self.resolved.push(resolved);
            }
        }
    }
}

/// Complete selection for one weapon
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    manufacturer: Option<String>,
    weapon_type: Option<String>,
    /// Part type → selection, in the order part types were first chosen
    parts: Vec<(String, PartSelection)>,
    rarity: RaritySelection,
    elements: ElementSelection,
    base_block: Option<BaseBlock>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manufacturer(&self) -> Option<&str> {
        self.manufacturer.as_deref()
    }

    pub fn weapon_type(&self) -> Option<&str> {
        self.weapon_type.as_deref()
    }

    pub fn parts(&self) -> &[(String, PartSelection)] {
        &self.parts
    }

    pub fn part(&self, part_type: &str) -> Option<&PartSelection> {
        self.parts
            .iter()
            .find(|(t, _)| t == part_type)
            .map(|(_, selection)| selection)
    }

    pub fn rarity(&self) -> &RaritySelection {
        &self.rarity
    }

    pub fn elements(&self) -> &ElementSelection {
        &self.elements
    }

    pub fn base_block(&self) -> Option<&BaseBlock> {
        self.base_block.as_ref()
    }

    /// Whether any part is selected
    pub fn has_parts(&self) -> bool {
        !self.parts.is_empty()
    }

    /// Change manufacturer; clears the weapon type and everything below it
    pub fn set_manufacturer(&mut self, manufacturer: Option<String>) {
        self.reset();
        self.manufacturer = manufacturer;
        tracing::debug!(manufacturer = ?self.manufacturer, "manufacturer set");
    }

    /// Change weapon type; clears parts, rarity and elements.
    ///
    /// Selecting a type issues its base block; clearing it drops the block.
    pub fn set_weapon_type<R: Rng + ?Sized>(
        &mut self,
        weapon_type: Option<String>,
        rng: &mut R,
    ) {
        self.clear_weapon();
        self.weapon_type = weapon_type;
        tracing::debug!(weapon_type = ?self.weapon_type, "weapon type set");
        if self.weapon_type.is_some() {
            self.regenerate_base_block(rng);
        }
    }

    /// Replace or clear a single-select part type
    pub fn set_single_part(&mut self, part_type: &str, part: Option<Part>) {
        match part {
            Some(part) => match self.parts.iter_mut().find(|(t, _)| t == part_type) {
                Some((_, selection)) => *selection = PartSelection::Single(part),
                None => self
                    .parts
                    .push((part_type.to_string(), PartSelection::Single(part))),
            },
            None => self.remove_part_type(part_type),
        }
        tracing::debug!(part_type, "single part updated");
    }

    /// Write one slot of a multi-slot part type.
    ///
    /// Returns `false` without touching anything when `index` is outside
    /// `capacity`. Trailing empty slots are trimmed afterwards and a group
    /// left with no slots is removed entirely.
    pub fn set_slot_part(
        &mut self,
        part_type: &str,
        index: usize,
        part: Option<Part>,
        capacity: usize,
    ) -> bool {
        if index >= capacity {
            return false;
        }

        let position = self.parts.iter().position(|(t, _)| t == part_type);
        let mut slots = match position.map(|i| &self.parts[i].1) {
            Some(PartSelection::Slots(slots)) => slots.clone(),
            Some(PartSelection::Single(part)) => vec![Some(part.clone())],
            None => Vec::new(),
        };

        if slots.len() <= index {
            slots.resize(index + 1, None);
        }
        slots[index] = part;
        slots.truncate(capacity);
        while matches!(slots.last(), Some(None)) {
            slots.pop();
        }

        match (position, slots.is_empty()) {
            (Some(i), true) => {
                self.parts.remove(i);
            }
            (Some(i), false) => self.parts[i].1 = PartSelection::Slots(slots),
            (None, false) => self
                .parts
                .push((part_type.to_string(), PartSelection::Slots(slots))),
            (None, true) => {}
        }

        tracing::debug!(part_type, index, "slot part updated");
        true
    }

    /// Pick a rarity category, or clear it with `None`.
    ///
    /// Every call issues a new base block.
    pub fn set_rarity_category<R: Rng + ?Sized>(
        &mut self,
        choice: Option<RarityChoice>,
        rng: &mut R,
    ) {
        self.rarity = match choice {
            None => RaritySelection::Unset,
            Some(RarityChoice::Regular(entry)) => RaritySelection::Regular(entry),
            Some(RarityChoice::Legendary) => RaritySelection::Legendary(None),
        };
        self.regenerate_base_block(rng);
    }

    /// Resolve or clear the concrete legendary.
    ///
    /// Only valid while the legendary category is picked; otherwise
    /// returns `false` and leaves the state alone.
    pub fn set_legendary_subchoice<R: Rng + ?Sized>(
        &mut self,
        entry: Option<RarityEntry>,
        rng: &mut R,
    ) -> bool {
        if !self.rarity.is_legendary() {
            return false;
        }
        self.rarity = RaritySelection::Legendary(entry);
        self.regenerate_base_block(rng);
        true
    }

    /// Set the first element, collapsing any combination. `None` clears both.
    pub fn set_element1(&mut self, element: Option<(String, ElementEntry)>) {
        match element {
            Some((name, entry)) => self.elements.set_first(name, entry),
            None => self.elements.clear(),
        }
        tracing::debug!(elements = self.elements.len(), "element 1 updated");
    }

    /// Set or clear the resolved combination in the second position
    pub fn set_element2(&mut self, combination: Option<ResolvedElement>) {
        self.elements.set_second(combination);
        tracing::debug!(elements = self.elements.len(), "element 2 updated");
    }

    /// Clear manufacturer, weapon type and all dependent state
    pub fn reset(&mut self) {
        self.manufacturer = None;
        self.weapon_type = None;
        self.clear_weapon();
    }

    fn clear_weapon(&mut self) {
        self.parts.clear();
        self.rarity = RaritySelection::Unset;
        self.elements.clear();
        self.base_block = None;
    }

    fn remove_part_type(&mut self, part_type: &str) {
        self.parts.retain(|(t, _)| t != part_type);
    }

    fn regenerate_base_block<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let block = BaseBlock::generate(rng);
        tracing::debug!(value = block.value(), "base block regenerated");
        self.base_block = Some(block);
    }
}

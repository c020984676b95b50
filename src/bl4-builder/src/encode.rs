//! Deserialized string encoding
//!
//! A weapon selection is rendered as a space-separated token list:
//!
//! ```text
//! <type_id>, <base block> <rarity> <element>... <part>...
//! ```
//!
//! Rarity, element and part tokens are written either as their catalog
//! string in double quotes or as their numeric ID in braces. Parts keep the
//! order their part types were first selected; slot groups emit their
//! filled slots in slot order.

use crate::selection::SelectionState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trailing delimiter the reserialize service expects
pub const DELIMITER: char = '|';

/// How rarity, element and part tokens are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// `"JAK_PS.part_body"`
    #[default]
    Strings,
    /// `{5}`
    Ids,
}

impl OutputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Strings => "strings",
            OutputMode::Ids => "ids",
        }
    }

    /// Default export file name for this mode
    pub fn file_name(self) -> &'static str {
        match self {
            OutputMode::Strings => "weapon-strings.txt",
            OutputMode::Ids => "weapon-ids.txt",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown output mode: {0} (expected 'strings' or 'ids')")]
pub struct ParseOutputModeError(String);

impl FromStr for OutputMode {
    type Err = ParseOutputModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strings" | "string" | "names" => Ok(OutputMode::Strings),
            "ids" | "id" => Ok(OutputMode::Ids),
            other => Err(ParseOutputModeError(other.to_string())),
        }
    }
}

/// One output token, borrowed from the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    TypeId(u32),
    BaseBlock(&'a str),
    /// Rarity, element or part, rendered per output mode
    Value { id: &'a str, string: &'a str },
}

impl Token<'_> {
    pub fn render(&self, mode: OutputMode) -> String {
        match self {
            Token::TypeId(id) => format!("{},", id),
            Token::BaseBlock(block) => block.to_string(),
            Token::Value { id, string } => match mode {
                OutputMode::Strings => format!("\"{}\"", string),
                OutputMode::Ids => format!("{{{}}}", id),
            },
        }
    }
}

/// Tokens for a selection in output order.
///
/// `type_id` comes from the rarity catalog; when it is `None` the leading
/// token is omitted. The base block exists whenever a weapon type is
/// selected and always follows the type id.
pub fn tokens(state: &SelectionState, type_id: Option<u32>) -> Vec<Token<'_>> {
    let mut out = Vec::new();

    if let Some(id) = type_id {
        out.push(Token::TypeId(id));
    }

    if let Some(block) = state.base_block() {
        out.push(Token::BaseBlock(block.as_str()));
    }

    if let Some(rarity) = state.rarity().resolved() {
        out.push(Token::Value {
            id: &rarity.id,
            string: &rarity.string,
        });
    }

    for element in state.elements().resolved() {
        out.push(Token::Value {
            id: &element.entry.id,
            string: &element.entry.string,
        });
    }

    for (_, selection) in state.parts() {
        for part in selection.parts() {
            out.push(Token::Value {
                id: &part.id,
                string: &part.string,
            });
        }
    }

    out
}

/// Render a selection as a deserialized string
pub fn encode(state: &SelectionState, type_id: Option<u32>, mode: OutputMode) -> String {
    tokens(state, type_id)
        .iter()
        .map(|t| t.render(mode))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Append the trailing delimiter unless it is already there
pub fn with_delimiter(encoded: &str) -> String {
    let trimmed = encoded.trim();
    if trimmed.ends_with(DELIMITER) {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, DELIMITER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ElementEntry, Part, RarityEntry};
    use crate::selection::{RarityChoice, ResolvedElement};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn part(id: &str, part_type: &str, string: &str) -> Part {
        Part {
            id: id.to_string(),
            part_type: part_type.to_string(),
            string: string.to_string(),
            stats: None,
        }
    }

    fn common() -> RarityEntry {
        RarityEntry {
            id: "12".to_string(),
            string: "JAK_PS.comp_01_common".to_string(),
            name: None,
            legendary: false,
        }
    }

    fn jakobs_pistol(rng: &mut StdRng) -> SelectionState {
        let mut state = SelectionState::new();
        state.set_manufacturer(Some("Jakobs".into()));
        state.set_weapon_type(Some("Pistol".into()), rng);
        state
    }

    #[test]
    fn test_ids_mode_layout() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = jakobs_pistol(&mut rng);
        state.set_rarity_category(Some(RarityChoice::Regular(common())), &mut rng);
        state.set_single_part("Body", Some(part("5", "Body", "JAK_PS.part_body")));

        let block = state.base_block().unwrap().value();
        assert_eq!(
            encode(&state, Some(7), OutputMode::Ids),
            format!("7, 0, 1, 50| 2, {}|| {{12}} {{5}}", block)
        );
    }

    #[test]
    fn test_strings_mode_layout() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = jakobs_pistol(&mut rng);
        state.set_rarity_category(Some(RarityChoice::Regular(common())), &mut rng);
        state.set_single_part("Body", Some(part("5", "Body", "JAK_PS.part_body")));

        let block = state.base_block().unwrap().value();
        assert_eq!(
            encode(&state, Some(7), OutputMode::Strings),
            format!(
                "7, 0, 1, 50| 2, {}|| \"JAK_PS.comp_01_common\" \"JAK_PS.part_body\"",
                block
            )
        );
    }

    #[test]
    fn test_mode_switch_changes_only_value_tokens() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut state = jakobs_pistol(&mut rng);
        state.set_rarity_category(Some(RarityChoice::Regular(common())), &mut rng);
        state.set_element1(Some((
            "Fire".into(),
            ElementEntry {
                id: "14".into(),
                string: "elem_fire".into(),
            },
        )));
        state.set_single_part("Body", Some(part("5", "Body", "JAK_PS.part_body")));

        let ids = encode(&state, Some(7), OutputMode::Ids);
        let strings = encode(&state, Some(7), OutputMode::Strings);
        let ids_again = encode(&state, Some(7), OutputMode::Ids);

        assert_ne!(ids, strings);
        assert_eq!(ids, ids_again);
        // Same leading tokens in both modes
        let prefix = |s: &str| s.split("|| ").next().map(str::to_string);
        assert_eq!(prefix(&ids), prefix(&strings));
    }

    #[test]
    fn test_token_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = jakobs_pistol(&mut rng);
        state.set_single_part("Grip", Some(part("60", "Grip", "g")));
        state.set_slot_part("Barrel Accessory", 1, Some(part("22", "Barrel Accessory", "b")), 4);
        state.set_slot_part("Barrel Accessory", 0, Some(part("21", "Barrel Accessory", "a")), 4);
        state.set_single_part("Body", Some(part("5", "Body", "body")));
        state.set_element1(Some((
            "Fire".into(),
            ElementEntry {
                id: "14".into(),
                string: "elem_fire".into(),
            },
        )));
        state.set_element2(Some(ResolvedElement {
            key: "Fire - Cryo".into(),
            entry: ElementEntry {
                id: "99".into(),
                string: "elem_fire_cryo".into(),
            },
        }));
        state.set_rarity_category(Some(RarityChoice::Regular(common())), &mut rng);

        let encoded = encode(&state, None, OutputMode::Ids);
        let values = encoded.split("|| ").nth(1).unwrap();
        assert_eq!(values, "{12} {14} {99} {60} {21} {22} {5}");
    }

    #[test]
    fn test_base_block_present_before_rarity() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = jakobs_pistol(&mut rng);
        state.set_single_part("Body", Some(part("5", "Body", "JAK_PS.part_body")));

        let block = state.base_block().unwrap().value();
        assert_eq!(
            encode(&state, Some(7), OutputMode::Ids),
            format!("7, 0, 1, 50| 2, {}|| {{5}}", block)
        );
        let toks = tokens(&state, Some(7));
        assert!(matches!(toks[1], Token::BaseBlock(_)));
    }

    #[test]
    fn test_missing_type_id_omits_leading_token() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = jakobs_pistol(&mut rng);
        state.set_single_part("Body", Some(part("5", "Body", "JAK_PS.part_body")));
        let block = state.base_block().unwrap().value();
        assert_eq!(
            encode(&state, None, OutputMode::Ids),
            format!("0, 1, 50| 2, {}|| {{5}}", block)
        );
    }

    #[test]
    fn test_empty_state_encodes_nothing() {
        assert_eq!(encode(&SelectionState::new(), None, OutputMode::Ids), "");
    }

    #[test]
    fn test_unresolved_legendary_emits_no_rarity() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = jakobs_pistol(&mut rng);
        state.set_rarity_category(Some(RarityChoice::Legendary), &mut rng);
        let toks = tokens(&state, Some(7));
        // Nothing else is selected, so any value token would be the rarity
        assert!(!toks.iter().any(|t| matches!(t, Token::Value { .. })));
        assert!(toks.iter().any(|t| matches!(t, Token::BaseBlock(_))));
    }

    #[test]
    fn test_encode_is_pure() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = jakobs_pistol(&mut rng);
        state.set_rarity_category(Some(RarityChoice::Regular(common())), &mut rng);
        let first = encode(&state, Some(7), OutputMode::Strings);
        let second = encode(&state, Some(7), OutputMode::Strings);
        assert_eq!(first, second);
    }

    #[test]
    fn test_with_delimiter() {
        assert_eq!(with_delimiter("7, {5}"), "7, {5}|");
        assert_eq!(with_delimiter("7, {5}|"), "7, {5}|");
        assert_eq!(with_delimiter("  7, {5}  "), "7, {5}|");
    }

    #[test]
    fn test_output_mode_parse() {
        assert_eq!("ids".parse::<OutputMode>().unwrap(), OutputMode::Ids);
        assert_eq!("Strings".parse::<OutputMode>().unwrap(), OutputMode::Strings);
        assert!("hex".parse::<OutputMode>().is_err());
        assert_eq!(OutputMode::Ids.to_string(), "ids");
        assert_eq!(OutputMode::default(), OutputMode::Strings);
        assert_eq!(OutputMode::Ids.file_name(), "weapon-ids.txt");
    }
}

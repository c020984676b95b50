//! End-to-end builds against the bundled catalog

use bl4_builder::reserialize::ReserializeOutcome;
use bl4_builder::{
    render_backpack, reserialize_encoded, Backpack, Catalog, GatewayError, OutputMode,
    RarityPick, Reserializer, WeaponBuilder,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn builder(seed: u64) -> WeaponBuilder<StdRng> {
    let catalog = Catalog::embedded().expect("bundled catalog parses");
    WeaponBuilder::with_rng(Arc::new(catalog), StdRng::seed_from_u64(seed))
}

fn base_block(b: &WeaponBuilder<StdRng>) -> String {
    b.state()
        .base_block()
        .map(|block| block.as_str().to_string())
        .expect("weapon type is set")
}

#[test]
fn jakobs_pistol_full_build() {
    let mut b = builder(7);
    assert!(b.set_manufacturer(Some("Jakobs")));
    assert!(b.set_weapon_type(Some("Pistol")));
    assert!(b.set_single_part("Body", Some("1")));
    assert!(b.set_slot_part("Body Accessory", 0, Some("2")));
    assert!(b.set_slot_part("Body Accessory", 2, Some("4")));
    assert!(b.set_single_part("Barrel", Some("7")));
    assert!(b.set_rarity_category(Some(RarityPick::Legendary)));
    assert!(b.set_legendary_subchoice(Some("51")));
    assert!(b.set_element1(Some("Fire")));
    assert!(b.set_element2(Some("Cryo")));

    b.set_output_mode(OutputMode::Ids);
    assert_eq!(
        b.encode(),
        format!("2, {} {{51}} {{14}} {{33}} {{1}} {{2}} {{4}} {{7}}", base_block(&b))
    );

    b.set_output_mode(OutputMode::Strings);
    assert_eq!(
        b.encode(),
        format!(
            "2, {} \"JAK_PS.comp_05_legendary_kingsgambit\" \"part_fire\" \"part_fire_cryo\" \
             \"JAK_PS.part_body\" \"JAK_PS.part_body_a\" \"JAK_PS.part_body_c\" \
             \"JAK_PS.part_barrel_02\"",
            base_block(&b)
        )
    );
}

#[test]
fn fire_then_cryo_emits_single_then_combination() {
    let mut b = builder(1);
    b.set_manufacturer(Some("Jakobs"));
    b.set_weapon_type(Some("Pistol"));
    b.set_element1(Some("Fire"));
    b.set_element2(Some("Cryo"));

    let tokens: Vec<_> = b
        .tokens()
        .iter()
        .map(|t| t.render(OutputMode::Strings))
        .collect();
    let block = base_block(&b);
    assert_eq!(
        tokens,
        vec!["2,", block.as_str(), "\"part_fire\"", "\"part_fire_cryo\""]
    );
}

#[test]
fn maliwan_uses_special_combinations() {
    let mut b = builder(1);
    b.set_manufacturer(Some("Maliwan"));
    b.set_weapon_type(Some("SMG"));
    b.set_element1(Some("Fire"));
    assert!(b.set_element2(Some("Shock")));
    assert!(b.encode().ends_with("\"MAL.part_switch_fire_shock\""));

    // Same pair is not in the default table
    let mut b = builder(1);
    b.set_manufacturer(Some("Jakobs"));
    b.set_weapon_type(Some("Pistol"));
    b.set_element1(Some("Fire"));
    assert!(!b.set_element2(Some("Shock")));
}

#[test]
fn torgue_bodies_are_slotted() {
    let mut b = builder(1);
    b.set_manufacturer(Some("Torgue"));
    b.set_weapon_type(Some("Assault Rifle"));
    assert_eq!(b.slot_capacity("Body"), Some(2));
    assert!(b.set_slot_part("Body", 1, Some("2")));
    b.set_output_mode(OutputMode::Ids);
    assert_eq!(b.encode(), format!("136, {} {{2}}", base_block(&b)));

    assert!(b.set_slot_part("Body", 1, None));
    assert_eq!(b.encode(), format!("136, {}", base_block(&b)));
}

#[test]
fn base_block_present_without_rarity() {
    let mut b = builder(5);
    b.set_manufacturer(Some("Jakobs"));
    b.set_weapon_type(Some("Pistol"));
    assert!(b.set_single_part("Body", Some("1")));
    b.set_output_mode(OutputMode::Ids);

    let encoded = b.encode();
    let block = base_block(&b);
    assert!(block.starts_with("0, 1, 50| 2, "));
    assert_eq!(encoded, format!("2, {} {{1}}", block));

    // Picking a rarity swaps in a new block at the same position
    b.set_rarity_category(Some(RarityPick::Regular("42")));
    let encoded = b.encode();
    assert!(encoded.starts_with(&format!("2, {} {{42}}", base_block(&b))));
}

#[test]
fn reencoding_is_stable_until_rarity_changes() {
    let mut b = builder(99);
    b.set_manufacturer(Some("Jakobs"));
    b.set_weapon_type(Some("Pistol"));
    b.set_rarity_category(Some(RarityPick::Regular("42")));
    b.set_single_part("Grip", Some("20"));

    let first = b.encode();
    assert_eq!(b.encode(), first);
    b.set_output_mode(OutputMode::Ids);
    b.set_output_mode(OutputMode::Strings);
    assert_eq!(b.encode(), first);

    let mut changed = false;
    for _ in 0..4 {
        b.set_rarity_category(Some(RarityPick::Regular("42")));
        changed |= b.encode() != first;
    }
    assert!(changed);
}

struct EchoGateway;

impl Reserializer for EchoGateway {
    fn reserialize(&self, deserialized: &str) -> Result<String, GatewayError> {
        Ok(format!("@U{}", deserialized.len()))
    }
}

#[test]
fn build_reserialize_and_export() {
    let mut b = builder(3);
    b.set_manufacturer(Some("Jakobs"));
    b.set_weapon_type(Some("Pistol"));
    b.set_single_part("Body", Some("1"));

    let encoded = b.encode();
    let outcome = ReserializeOutcome {
        result: reserialize_encoded(&EchoGateway, &encoded),
        encoded,
    };
    let serial = outcome.serial().expect("echo gateway succeeds").to_string();

    let mut backpack = Backpack::new();
    backpack.store(&serial).unwrap();
    assert!(backpack.store("not-a-serial").is_err());
    assert_eq!(backpack.len(), 1);
    assert_eq!(backpack.render(), render_backpack(&[serial.as_str()]));
    assert!(backpack.render().starts_with("        slot_0:\n          serial: '@U"));
}

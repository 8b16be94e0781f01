use gemhall_core::{Gem, RulesConfig, Tier};
use gemhall_data::{
    builtin_card_set, builtin_rules, load_card_set, load_rules, parse_card_set, parse_rules,
};
use std::fs;
use std::path::PathBuf;

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

fn card_json(id: &str, tier: u8, cost: &str) -> String {
    format!(r#"{{"id": "{id}", "tier": {tier}, "gem": "ruby", "points": 0, "cost": {cost}}}"#)
}

fn catalogue_json(cards: &[String], nobles: usize) -> String {
    let nobles: Vec<String> = (0..nobles)
        .map(|n| format!(r#"{{"id": "n-{n}", "points": 3, "cost": {{"onyx": 4}}}}"#))
        .collect();
    format!(
        r#"{{"cards": [{}], "nobles": [{}]}}"#,
        cards.join(","),
        nobles.join(",")
    )
}

fn full_tiers() -> Vec<String> {
    let mut cards = Vec::new();
    for tier in 1..=3u8 {
        for n in 0..4 {
            cards.push(card_json(&format!("t{tier}-{n}"), tier, r#"{"onyx": 2}"#));
        }
    }
    cards
}

#[test]
fn builtin_catalogue_has_every_card() {
    let set = builtin_card_set().expect("built-in cards");
    assert_eq!(set.cards.len(), 89);
    assert_eq!(set.tier_cards(Tier::One).len(), 40);
    assert_eq!(set.tier_cards(Tier::Two).len(), 29);
    assert_eq!(set.tier_cards(Tier::Three).len(), 20);
    assert_eq!(set.nobles.len(), 10);

    let first = set.card("t1-01").expect("t1-01");
    assert_eq!(first.gem, Gem::Onyx);
    assert_eq!(first.points, 1);
    assert_eq!(first.cost.sapphire, 4);
    assert!(set.nobles.iter().all(|noble| noble.points == 3));
}

#[test]
fn builtin_rules_match_the_defaults() {
    assert_eq!(builtin_rules().expect("rules"), RulesConfig::default());
}

#[test]
fn asset_files_load_from_disk() {
    let rules = load_rules(&assets_root().join("rules.json")).expect("rules.json");
    let set = load_card_set(&assets_root().join("cards.json"), &rules).expect("cards.json");
    assert_eq!(set, builtin_card_set().expect("built-in"));
}

#[test]
fn missing_file_names_the_path() {
    let err = load_rules(&assets_root().join("absent.json")).unwrap_err();
    assert!(format!("{err:#}").contains("absent.json"));
}

#[test]
fn minimal_catalogue_is_accepted() {
    let raw = catalogue_json(&full_tiers(), 5);
    let set = parse_card_set(&raw, &RulesConfig::default()).expect("valid");
    assert_eq!(set.cards.len(), 12);
}

#[test]
fn duplicate_card_ids_are_rejected() {
    let mut cards = full_tiers();
    cards.push(card_json("t1-0", 1, r#"{"onyx": 3}"#));
    let err = parse_card_set(&catalogue_json(&cards, 5), &RulesConfig::default()).unwrap_err();
    assert!(err.to_string().contains("duplicate card id t1-0"), "{err}");
}

#[test]
fn free_cards_are_rejected() {
    let mut cards = full_tiers();
    cards.push(card_json("gift", 2, "{}"));
    let err = parse_card_set(&catalogue_json(&cards, 5), &RulesConfig::default()).unwrap_err();
    assert!(err.to_string().contains("gift has no cost"), "{err}");
}

#[test]
fn thin_tiers_are_rejected() {
    let mut cards = full_tiers();
    cards.pop();
    let err = parse_card_set(&catalogue_json(&cards, 5), &RulesConfig::default()).unwrap_err();
    assert!(err.to_string().contains("tier 3 has 3 cards"), "{err}");
}

#[test]
fn too_few_nobles_are_rejected() {
    let err = parse_card_set(&catalogue_json(&full_tiers(), 4), &RulesConfig::default())
        .unwrap_err();
    assert!(err.to_string().contains("need 5"), "{err}");
}

#[test]
fn rules_need_a_supply_for_every_table_size() {
    let raw = r#"{
        "max_tokens": 10, "max_reserved": 3, "board_slots": 4, "log_capacity": 25,
        "gold_supply": 5, "min_players": 2, "max_players": 4,
        "gem_supply": [{"players": 2, "gems": 4}, {"players": 4, "gems": 7}]
    }"#;
    let err = parse_rules(raw).unwrap_err();
    assert!(err.to_string().contains("no gem supply for 3 players"), "{err}");
}

#[test]
fn rules_from_a_custom_file_keep_default_target() {
    let dir = std::env::temp_dir().join(format!("gemhall-rules-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("rules.json");
    let raw = r#"{
        "max_tokens": 12, "max_reserved": 2, "board_slots": 3, "log_capacity": 10,
        "gold_supply": 4, "min_players": 2, "max_players": 2,
        "gem_supply": [{"players": 2, "gems": 5}]
    }"#;
    fs::write(&path, raw).expect("write rules");
    let rules = load_rules(&path).expect("custom rules");
    assert_eq!(rules.target_points, 15);
    assert_eq!(rules.max_tokens, 12);
    assert_eq!(rules.initial_bank(2).map(|bank| bank.gold), Some(4));
    fs::remove_dir_all(&dir).ok();
}

use anyhow::{bail, Context};
use gemhall_core::{CardSet, RulesConfig, Tier};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BUILTIN_CARDS: &str = include_str!("../../../assets/cards.json");
const BUILTIN_RULES: &str = include_str!("../../../assets/rules.json");

/// The bundled 89-card, 10-noble catalogue.
pub fn builtin_card_set() -> anyhow::Result<CardSet> {
    parse_card_set(BUILTIN_CARDS, &RulesConfig::default()).context("built-in cards.json")
}

pub fn builtin_rules() -> anyhow::Result<RulesConfig> {
    parse_rules(BUILTIN_RULES).context("built-in rules.json")
}

pub fn load_card_set(path: &Path, rules: &RulesConfig) -> anyhow::Result<CardSet> {
    let set: CardSet = load_json(path)?;
    validate_card_set(&set, rules).with_context(|| format!("validate {}", path.display()))?;
    Ok(set)
}

pub fn load_rules(path: &Path) -> anyhow::Result<RulesConfig> {
    let rules: RulesConfig = load_json(path)?;
    validate_rules(&rules).with_context(|| format!("validate {}", path.display()))?;
    Ok(rules)
}

pub fn parse_card_set(raw: &str, rules: &RulesConfig) -> anyhow::Result<CardSet> {
    let set: CardSet = serde_json::from_str(raw).context("parse card set")?;
    validate_card_set(&set, rules)?;
    Ok(set)
}

pub fn parse_rules(raw: &str) -> anyhow::Result<RulesConfig> {
    let rules: RulesConfig = serde_json::from_str(raw).context("parse rules")?;
    validate_rules(&rules)?;
    Ok(rules)
}

/// Rejects catalogues the engine could not deal a full game from.
pub fn validate_card_set(set: &CardSet, rules: &RulesConfig) -> anyhow::Result<()> {
    let mut ids = HashSet::new();
    for card in &set.cards {
        if card.id.trim().is_empty() {
            bail!("card id cannot be empty");
        }
        if !ids.insert(card.id.as_str()) {
            bail!("duplicate card id {}", card.id);
        }
        if card.cost.total() == 0 {
            bail!("card {} has no cost", card.id);
        }
    }
    for tier in Tier::ALL {
        let count = set.cards.iter().filter(|card| card.tier == tier).count();
        if count < rules.board_slots {
            bail!(
                "tier {tier} has {count} cards, fewer than the {} board slots",
                rules.board_slots
            );
        }
    }

    let mut noble_ids = HashSet::new();
    for noble in &set.nobles {
        if !noble_ids.insert(noble.id.as_str()) {
            bail!("duplicate noble id {}", noble.id);
        }
        if noble.cost.total() == 0 {
            bail!("noble {} has no requirement", noble.id);
        }
    }
    let needed = rules.max_players + 1;
    if set.nobles.len() < needed {
        bail!(
            "{} nobles cannot seat {} players (need {needed})",
            set.nobles.len(),
            rules.max_players
        );
    }
    Ok(())
}

pub fn validate_rules(rules: &RulesConfig) -> anyhow::Result<()> {
    if rules.min_players == 0 || rules.min_players > rules.max_players {
        bail!(
            "player range {}-{} is empty",
            rules.min_players,
            rules.max_players
        );
    }
    for players in rules.min_players..=rules.max_players {
        if rules.supply_rule(players).is_none() {
            bail!("no gem supply for {players} players");
        }
    }
    if rules.target_points == 0 {
        bail!("target points must be positive");
    }
    if rules.max_tokens == 0 {
        bail!("max_tokens must be positive");
    }
    if rules.board_slots == 0 {
        bail!("board_slots must be positive");
    }
    if rules.log_capacity == 0 {
        bail!("log_capacity must be positive");
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

use crate::TokenBundle;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET_POINTS: u32 = 15;

/// Gem tokens per color stocked in the bank for a given table size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupplyRule {
    pub players: usize,
    pub gems: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RulesConfig {
    #[serde(default = "default_target_points")]
    pub target_points: u32,
    pub max_tokens: u32,
    pub max_reserved: usize,
    pub board_slots: usize,
    pub log_capacity: usize,
    pub gold_supply: u32,
    pub min_players: usize,
    pub max_players: usize,
    pub gem_supply: Vec<SupplyRule>,
}

fn default_target_points() -> u32 {
    DEFAULT_TARGET_POINTS
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            target_points: DEFAULT_TARGET_POINTS,
            max_tokens: 10,
            max_reserved: 3,
            board_slots: 4,
            log_capacity: 25,
            gold_supply: 5,
            min_players: 2,
            max_players: 4,
            gem_supply: vec![
                SupplyRule { players: 2, gems: 4 },
                SupplyRule { players: 3, gems: 5 },
                SupplyRule { players: 4, gems: 7 },
            ],
        }
    }
}

impl RulesConfig {
    pub fn supply_rule(&self, players: usize) -> Option<&SupplyRule> {
        self.gem_supply.iter().find(|rule| rule.players == players)
    }

    pub fn accepts_player_count(&self, players: usize) -> bool {
        (self.min_players..=self.max_players).contains(&players)
            && self.supply_rule(players).is_some()
    }

    /// Opening bank for `players`, or `None` when the table size is unsupported.
    pub fn initial_bank(&self, players: usize) -> Option<TokenBundle> {
        if !self.accepts_player_count(players) {
            return None;
        }
        let rule = self.supply_rule(players)?;
        Some(TokenBundle::stocked(rule.gems, self.gold_supply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_supply_follows_player_count() {
        let rules = RulesConfig::default();
        assert_eq!(rules.initial_bank(2).map(|bank| bank.ruby), Some(4));
        assert_eq!(rules.initial_bank(3).map(|bank| bank.ruby), Some(5));
        assert_eq!(rules.initial_bank(4).map(|bank| bank.ruby), Some(7));
        assert_eq!(rules.initial_bank(4).map(|bank| bank.gold), Some(5));
        assert_eq!(rules.initial_bank(1), None);
        assert_eq!(rules.initial_bank(5), None);
    }
}

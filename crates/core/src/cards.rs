use crate::{Gem, GemCounts};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    One,
    Two,
    Three,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::One, Tier::Two, Tier::Three];

    /// Zero-based position, used to index per-tier arrays.
    pub fn index(self) -> usize {
        match self {
            Tier::One => 0,
            Tier::Two => 1,
            Tier::Three => 2,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Tier::One => 1,
            Tier::Two => 2,
            Tier::Three => 3,
        }
    }

    pub fn from_number(value: u8) -> Option<Tier> {
        match value {
            1 => Some(Tier::One),
            2 => Some(Tier::Two),
            3 => Some(Tier::Three),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Tier::from_number(value).ok_or_else(|| format!("invalid tier {value}, expected 1-3"))
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.number()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A development card. Immutable once dealt; ownership moves by moving the
/// value between deck, board slot and a player's hand or reserve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DevelopmentCard {
    pub id: String,
    pub tier: Tier,
    pub gem: Gem,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub cost: GemCounts,
}

impl DevelopmentCard {
    pub fn new(id: impl Into<String>, tier: Tier, gem: Gem, points: u32, cost: GemCounts) -> Self {
        Self {
            id: id.into(),
            tier,
            gem,
            points,
            cost,
        }
    }
}

/// A noble patron. `cost` holds discount thresholds, never token amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NobleCard {
    pub id: String,
    #[serde(default)]
    pub cost: GemCounts,
    pub points: u32,
}

impl NobleCard {
    pub fn new(id: impl Into<String>, points: u32, cost: GemCounts) -> Self {
        Self {
            id: id.into(),
            cost,
            points,
        }
    }
}

/// The full catalogue a match is dealt from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardSet {
    pub cards: Vec<DevelopmentCard>,
    pub nobles: Vec<NobleCard>,
}

impl CardSet {
    pub fn new(cards: Vec<DevelopmentCard>, nobles: Vec<NobleCard>) -> Self {
        Self { cards, nobles }
    }

    /// Cards of one tier in catalogue order.
    pub fn tier_cards(&self, tier: Tier) -> Vec<DevelopmentCard> {
        self.cards
            .iter()
            .filter(|card| card.tier == tier)
            .cloned()
            .collect()
    }

    pub fn card(&self, id: &str) -> Option<&DevelopmentCard> {
        self.cards.iter().find(|card| card.id == id)
    }
}

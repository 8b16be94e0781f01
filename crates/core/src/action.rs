use crate::{PlayerConfig, Tier, TokenBundle};
use serde::{Deserialize, Serialize};

/// Where a reserved card comes from: a face-up board card or a blind deck draw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReserveSource {
    Board { tier: Tier, card_id: String },
    Deck { tier: Tier },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PurchaseSource {
    Board { tier: Tier, card_id: String },
    Reserved { card_id: String },
}

impl PurchaseSource {
    pub fn card_id(&self) -> &str {
        match self {
            PurchaseSource::Board { card_id, .. } | PurchaseSource::Reserved { card_id } => card_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetupGame {
    pub players: Vec<PlayerConfig>,
    #[serde(default)]
    pub target_points: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TakeTokens {
    pub player_id: String,
    pub take: TokenBundle,
    #[serde(default)]
    pub returns: TokenBundle,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReserveCard {
    pub player_id: String,
    pub source: ReserveSource,
    #[serde(default)]
    pub returns: TokenBundle,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchaseCard {
    pub player_id: String,
    pub source: PurchaseSource,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Action {
    Setup(SetupGame),
    TakeTokens(TakeTokens),
    ReserveCard(ReserveCard),
    PurchaseCard(PurchaseCard),
    Reset,
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Setup(_) => "setup",
            Action::TakeTokens(_) => "take_tokens",
            Action::ReserveCard(_) => "reserve_card",
            Action::PurchaseCard(_) => "purchase_card",
            Action::Reset => "reset",
        }
    }

    pub fn player_id(&self) -> Option<&str> {
        match self {
            Action::TakeTokens(take) => Some(&take.player_id),
            Action::ReserveCard(reserve) => Some(&reserve.player_id),
            Action::PurchaseCard(purchase) => Some(&purchase.player_id),
            Action::Setup(_) | Action::Reset => None,
        }
    }
}

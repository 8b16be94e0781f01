use crate::{
    resolve_payment, Board, Decks, DevelopmentCard, GemCounts, NobleCard, RulesConfig, Tier,
    TokenBundle,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Setup,
    Playing,
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerConfig {
    pub id: String,
    pub name: String,
}

impl PlayerConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerState {
    pub id: String,
    pub name: String,
    pub tokens: TokenBundle,
    pub discounts: GemCounts,
    /// Purchased cards in acquisition order.
    pub cards: Vec<DevelopmentCard>,
    pub reserved: Vec<DevelopmentCard>,
    pub nobles: Vec<NobleCard>,
    pub points: u32,
}

impl PlayerState {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            id: config.id.clone(),
            name: config.name.clone(),
            tokens: TokenBundle::default(),
            discounts: GemCounts::default(),
            cards: Vec::new(),
            reserved: Vec::new(),
            nobles: Vec::new(),
            points: 0,
        }
    }

    pub fn token_total(&self) -> u32 {
        self.tokens.total()
    }

    /// Score rebuilt from owned cards and nobles; always equals `points`.
    pub fn recomputed_points(&self) -> u32 {
        let cards: u32 = self.cards.iter().map(|card| card.points).sum();
        let nobles: u32 = self.nobles.iter().map(|noble| noble.points).sum();
        cards + nobles
    }

    pub fn can_afford(&self, card: &DevelopmentCard) -> bool {
        resolve_payment(&self.discounts, &self.tokens, &card.cost).is_some()
    }

    pub fn reserved_position(&self, card_id: &str) -> Option<usize> {
        self.reserved.iter().position(|card| card.id == card_id)
    }

    pub(crate) fn award_card(&mut self, card: DevelopmentCard) {
        self.discounts.increment(card.gem);
        self.points += card.points;
        self.cards.push(card);
    }

    pub(crate) fn award_noble(&mut self, noble: NobleCard) {
        self.points += noble.points;
        self.nobles.push(noble);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionLogEntry {
    pub seq: u64,
    pub player_id: String,
    pub turn: u32,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    pub status: GameStatus,
    pub rules: RulesConfig,
    pub players: Vec<PlayerState>,
    pub bank: TokenBundle,
    pub board: Board,
    pub decks: Decks,
    pub nobles: Vec<NobleCard>,
    pub current_player_index: usize,
    pub turn: u32,
    /// Newest first, capped at `rules.log_capacity`.
    pub logs: Vec<ActionLogEntry>,
    pub target_points: u32,
    pub winner_ids: Vec<String>,
    pub final_round_trigger: Option<String>,
    #[serde(default)]
    next_log_seq: u64,
}

impl GameState {
    /// A fresh pre-game snapshot.
    pub fn new(rules: RulesConfig) -> Self {
        let board = Board::empty(rules.board_slots);
        let target_points = rules.target_points;
        Self {
            status: GameStatus::Setup,
            rules,
            players: Vec::new(),
            bank: TokenBundle::default(),
            board,
            decks: Decks::default(),
            nobles: Vec::new(),
            current_player_index: 0,
            turn: 0,
            logs: Vec::new(),
            target_points,
            winner_ids: Vec::new(),
            final_round_trigger: None,
            next_log_seq: 0,
        }
    }

    pub fn current_player(&self) -> Option<&PlayerState> {
        self.players.get(self.current_player_index)
    }

    pub fn player(&self, id: &str) -> Option<&PlayerState> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn player_index(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|player| player.id == id)
    }

    pub fn board_card(&self, tier: Tier, card_id: &str) -> Option<&DevelopmentCard> {
        let slot = self.board.find(tier, card_id)?;
        self.board.card(tier, slot)
    }

    pub fn deck_len(&self, tier: Tier) -> usize {
        self.decks.len(tier)
    }

    /// Bank plus every player's holdings.
    pub fn total_tokens_in_play(&self) -> TokenBundle {
        self.players
            .iter()
            .fold(self.bank, |acc, player| acc.add(&player.tokens))
    }

    pub(crate) fn push_log(&mut self, player_id: String, message: String) {
        let entry = ActionLogEntry {
            seq: self.next_log_seq,
            player_id,
            turn: self.turn,
            message,
        };
        self.next_log_seq += 1;
        self.logs.insert(0, entry);
        self.logs.truncate(self.rules.log_capacity);
    }
}

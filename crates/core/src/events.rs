use crate::{Tier, TokenBundle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Event {
    GameStarted {
        players: usize,
        target_points: u32,
    },
    TokensTaken {
        player_id: String,
        taken: TokenBundle,
        returned: TokenBundle,
    },
    CardReserved {
        player_id: String,
        card_id: String,
        tier: Tier,
        from_deck: bool,
        gold_gained: bool,
        returned: TokenBundle,
    },
    CardPurchased {
        player_id: String,
        card_id: String,
        payment: TokenBundle,
        points: u32,
    },
    NobleVisited {
        player_id: String,
        noble_id: String,
        points: u32,
    },
    FinalRoundTriggered {
        player_id: String,
        points: u32,
    },
    TurnPassed {
        player_id: String,
        turn: u32,
    },
    GameFinished {
        winner_ids: Vec<String>,
    },
    GameReset,
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn append(&mut self, other: &mut EventBus) {
        self.queue.append(&mut other.queue);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

use crate::{GameState, GameStatus, TokenBundle};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("tokens in play {actual} differ from the opening supply {expected}")]
    TokensNotConserved {
        expected: TokenBundle,
        actual: TokenBundle,
    },
    #[error("no opening supply is defined for {players} players")]
    UnsupportedTable { players: usize },
    #[error("{player_id} holds {total} tokens, above the limit of {limit}")]
    TokenCeiling {
        player_id: String,
        total: u32,
        limit: u32,
    },
    #[error("{player_id} has {count} reserved cards, above the limit of {limit}")]
    ReserveCeiling {
        player_id: String,
        count: usize,
        limit: usize,
    },
    #[error("{player_id} shows {cached} points but owns {recomputed}")]
    ScoreMismatch {
        player_id: String,
        cached: u32,
        recomputed: u32,
    },
    #[error("log holds {len} entries, capacity is {capacity}")]
    LogOverflow { len: usize, capacity: usize },
    #[error("card {0} is in more than one place")]
    DuplicateCard(String),
    #[error("current player index {index} is outside a table of {players}")]
    SeatOutOfRange { index: usize, players: usize },
    #[error("winners are recorded but the game is not finished")]
    PrematureWinners,
}

/// Checks everything that must hold on any reachable snapshot.
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let rules = &state.rules;

    if state.status != GameStatus::Setup {
        match rules.initial_bank(state.players.len()) {
            Some(expected) => {
                let actual = state.total_tokens_in_play();
                if actual != expected {
                    violations.push(InvariantViolation::TokensNotConserved { expected, actual });
                }
            }
            None => violations.push(InvariantViolation::UnsupportedTable {
                players: state.players.len(),
            }),
        }
        if state.current_player_index >= state.players.len() {
            violations.push(InvariantViolation::SeatOutOfRange {
                index: state.current_player_index,
                players: state.players.len(),
            });
        }
    }

    for player in &state.players {
        let total = player.token_total();
        if total > rules.max_tokens {
            violations.push(InvariantViolation::TokenCeiling {
                player_id: player.id.clone(),
                total,
                limit: rules.max_tokens,
            });
        }
        if player.reserved.len() > rules.max_reserved {
            violations.push(InvariantViolation::ReserveCeiling {
                player_id: player.id.clone(),
                count: player.reserved.len(),
                limit: rules.max_reserved,
            });
        }
        let recomputed = player.recomputed_points();
        if recomputed != player.points {
            violations.push(InvariantViolation::ScoreMismatch {
                player_id: player.id.clone(),
                cached: player.points,
                recomputed,
            });
        }
    }

    if state.logs.len() > rules.log_capacity {
        violations.push(InvariantViolation::LogOverflow {
            len: state.logs.len(),
            capacity: rules.log_capacity,
        });
    }

    let mut seen = HashSet::new();
    let owned = state
        .players
        .iter()
        .flat_map(|player| player.cards.iter().chain(&player.reserved));
    for card in state.board.cards().chain(state.decks.cards()).chain(owned) {
        if !seen.insert(card.id.as_str()) {
            violations.push(InvariantViolation::DuplicateCard(card.id.clone()));
        }
    }
    let mut nobles = HashSet::new();
    let claimed = state.players.iter().flat_map(|player| &player.nobles);
    for noble in state.nobles.iter().chain(claimed) {
        if !nobles.insert(noble.id.as_str()) {
            violations.push(InvariantViolation::DuplicateCard(noble.id.clone()));
        }
    }

    if !state.winner_ids.is_empty() && state.status != GameStatus::Finished {
        violations.push(InvariantViolation::PrematureWinners);
    }
    violations
}

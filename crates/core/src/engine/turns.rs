use crate::{Event, EventBus, GameState, GameStatus, PlayerState};

/// Passes play to the next seat, or ends the game when the round that
/// started with the final-round trigger is complete.
pub(super) fn advance_turn(state: &mut GameState, events: &mut EventBus) {
    if state.status != GameStatus::Playing || state.players.is_empty() {
        return;
    }
    let next = (state.current_player_index + 1) % state.players.len();
    if let Some(trigger) = state.final_round_trigger.as_deref() {
        match state.player_index(trigger) {
            Some(seat) if seat == next => {
                finalize_game(state, events);
                return;
            }
            Some(_) => {}
            None => {
                tracing::warn!(trigger, "final-round trigger names no player; clearing it");
                state.final_round_trigger = None;
            }
        }
    }
    state.current_player_index = next;
    state.turn += 1;
    let player_id = state.players[next].id.clone();
    events.push(Event::TurnPassed {
        player_id,
        turn: state.turn,
    });
}

fn finalize_game(state: &mut GameState, events: &mut EventBus) {
    state.status = GameStatus::Finished;
    state.winner_ids = resolve_winners(&state.players);
    tracing::info!(winners = ?state.winner_ids, turn = state.turn, "game finished");
    events.push(Event::GameFinished {
        winner_ids: state.winner_ids.clone(),
    });
}

/// Highest score wins; among tied leaders the fewest purchased cards wins,
/// and anyone still tied shares the win. Seating order is kept.
pub fn resolve_winners(players: &[PlayerState]) -> Vec<String> {
    let Some(top) = players.iter().map(|player| player.points).max() else {
        return Vec::new();
    };
    let leaders: Vec<&PlayerState> = players.iter().filter(|player| player.points == top).collect();
    let fewest = leaders
        .iter()
        .map(|player| player.cards.len())
        .min()
        .unwrap_or_default();
    leaders
        .into_iter()
        .filter(|player| player.cards.len() == fewest)
        .map(|player| player.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DevelopmentCard, Gem, GemCounts, PlayerConfig, RulesConfig, Tier};

    fn player(id: &str, points: u32, cards: usize) -> PlayerState {
        let mut player = PlayerState::new(&PlayerConfig::new(id, id.to_uppercase()));
        player.points = points;
        player.cards = (0..cards)
            .map(|n| {
                DevelopmentCard::new(
                    format!("{id}-{n}"),
                    Tier::One,
                    Gem::Onyx,
                    0,
                    GemCounts::from_pairs(&[(Gem::Ruby, 1)]),
                )
            })
            .collect();
        player
    }

    fn playing(players: Vec<PlayerState>) -> GameState {
        let mut state = GameState::new(RulesConfig::default());
        state.players = players;
        state.status = GameStatus::Playing;
        state
    }

    #[test]
    fn fewest_cards_breaks_a_score_tie() {
        let players = vec![player("a", 15, 14), player("b", 15, 12), player("c", 9, 3)];
        assert_eq!(resolve_winners(&players), vec!["b".to_string()]);
    }

    #[test]
    fn full_tie_shares_the_win() {
        let players = vec![player("a", 16, 10), player("b", 16, 10), player("c", 17, 20)];
        assert_eq!(resolve_winners(&players), vec!["c".to_string()]);
        let players = vec![player("a", 16, 10), player("b", 16, 10)];
        assert_eq!(resolve_winners(&players), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn no_players_no_winners() {
        assert!(resolve_winners(&[]).is_empty());
    }

    #[test]
    fn turn_wraps_around_the_table() {
        let mut state = playing(vec![player("a", 0, 0), player("b", 0, 0), player("c", 0, 0)]);
        let mut events = EventBus::default();
        for expected in [1, 2, 0, 1] {
            advance_turn(&mut state, &mut events);
            assert_eq!(state.current_player_index, expected);
        }
        assert_eq!(state.turn, 4);
    }

    #[test]
    fn game_ends_before_trigger_seat_moves_again() {
        let mut state = playing(vec![player("a", 15, 5), player("b", 3, 2), player("c", 4, 2)]);
        state.final_round_trigger = Some("a".to_string());
        let mut events = EventBus::default();
        advance_turn(&mut state, &mut events);
        advance_turn(&mut state, &mut events);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.current_player_index, 2);
        advance_turn(&mut state, &mut events);
        assert_eq!(state.status, GameStatus::Finished);
        assert_eq!(state.current_player_index, 2);
        assert_eq!(state.winner_ids, vec!["a".to_string()]);
        let finished = events
            .drain()
            .filter(|event| matches!(event, Event::GameFinished { .. }))
            .count();
        assert_eq!(finished, 1);
    }

    #[test]
    fn unknown_trigger_is_cleared() {
        let mut state = playing(vec![player("a", 0, 0), player("b", 0, 0)]);
        state.final_round_trigger = Some("ghost".to_string());
        advance_turn(&mut state, &mut EventBus::default());
        assert_eq!(state.final_round_trigger, None);
        assert_eq!(state.current_player_index, 1);
        assert_eq!(state.status, GameStatus::Playing);
    }
}

use crate::{
    shuffled, validate_setup, ActionError, Board, CardSet, Decks, Event, EventBus, GameState,
    GameStatus, PlayerState, SetupGame, Shuffler,
};

pub(super) fn apply_setup(
    state: &mut GameState,
    setup: &SetupGame,
    cards: &CardSet,
    shuffler: &mut dyn Shuffler,
    events: &mut EventBus,
) -> Result<(), ActionError> {
    validate_setup(state, setup)?;
    let count = setup.players.len();
    let rules = state.rules.clone();
    let bank = rules
        .initial_bank(count)
        .ok_or(ActionError::InvalidPlayerCount {
            count,
            min: rules.min_players,
            max: rules.max_players,
        })?;

    let mut fresh = GameState::new(rules);
    fresh.players = setup.players.iter().map(PlayerState::new).collect();
    fresh.bank = bank;
    fresh.decks = Decks::shuffled(cards, shuffler);
    fresh.board = Board::deal(&mut fresh.decks, fresh.rules.board_slots);
    let mut nobles = shuffled(cards.nobles.clone(), shuffler);
    nobles.truncate(count + 1);
    fresh.nobles = nobles;
    fresh.target_points = setup.target_points.unwrap_or(fresh.rules.target_points);
    fresh.status = GameStatus::Playing;

    tracing::info!(players = count, target = fresh.target_points, "game started");
    events.push(Event::GameStarted {
        players: count,
        target_points: fresh.target_points,
    });
    *state = fresh;
    Ok(())
}

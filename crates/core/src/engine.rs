use crate::{
    check_invariants, validate, Action, ActionError, CardSet, Event, EventBus, GameState,
    PlayerConfig, PurchaseCard, PurchaseSource, ReserveCard, ReserveSource, RngState,
    RulesConfig, SetupGame, Shuffler, TakeTokens, TokenBundle,
};
use std::fmt;
use std::sync::Arc;

mod actions;
mod setup;
mod turns;

pub use turns::resolve_winners;

/// A frozen snapshot. Accepted actions replace the engine's snapshot with a
/// new one; snapshots already handed out never change.
pub type Snapshot = Arc<GameState>;

/// Collaborators the reducer needs besides the state itself.
pub struct TransitionEnv<'a> {
    pub cards: &'a CardSet,
    pub shuffler: &'a mut dyn Shuffler,
    pub events: &'a mut EventBus,
}

/// Applies `action` to a copy of `state` and returns the next state.
///
/// The reducer re-checks legality on its own. An illegal action is logged
/// and the input state comes back unchanged.
pub fn transition(state: &GameState, action: &Action, env: &mut TransitionEnv<'_>) -> GameState {
    match try_transition(state, action, env) {
        Ok(next) => next,
        Err(err) => {
            tracing::warn!(
                action = action.kind(),
                player = action.player_id(),
                %err,
                "discarding illegal action"
            );
            state.clone()
        }
    }
}

/// Like [`transition`] but reports the internal rejection instead of
/// swallowing it. Nothing is committed and no events are emitted on error.
pub fn try_transition(
    state: &GameState,
    action: &Action,
    env: &mut TransitionEnv<'_>,
) -> Result<GameState, ActionError> {
    let mut draft = state.clone();
    let mut staged = EventBus::default();
    match action {
        Action::Setup(payload) => {
            setup::apply_setup(&mut draft, payload, env.cards, &mut *env.shuffler, &mut staged)?
        }
        Action::TakeTokens(payload) => actions::apply_take_tokens(&mut draft, payload, &mut staged)?,
        Action::ReserveCard(payload) => actions::apply_reserve(&mut draft, payload, &mut staged)?,
        Action::PurchaseCard(payload) => {
            actions::apply_purchase(&mut draft, payload, &mut staged)?
        }
        Action::Reset => {
            draft = GameState::new(state.rules.clone());
            staged.push(Event::GameReset);
        }
    }
    if cfg!(debug_assertions) {
        let violations = check_invariants(&draft);
        debug_assert!(
            violations.is_empty(),
            "{} broke invariants: {violations:?}",
            action.kind()
        );
    }
    tracing::debug!(
        action = action.kind(),
        turn = draft.turn,
        status = ?draft.status,
        "action applied"
    );
    env.events.append(&mut staged);
    Ok(draft)
}

/// Process-held game: owns the current snapshot, the catalogue and the
/// shuffle source, and runs every action through the validator first.
pub struct GameEngine {
    cards: CardSet,
    shuffler: Box<dyn Shuffler>,
    state: Snapshot,
    events: EventBus,
}

impl GameEngine {
    pub fn new(cards: CardSet, rules: RulesConfig, shuffler: Box<dyn Shuffler>) -> Self {
        Self {
            cards,
            shuffler,
            state: Arc::new(GameState::new(rules)),
            events: EventBus::default(),
        }
    }

    pub fn with_seed(cards: CardSet, rules: RulesConfig, seed: u64) -> Self {
        Self::new(cards, rules, Box::new(RngState::from_seed(seed)))
    }

    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.state)
    }

    /// Validates and applies `action`. On rejection the snapshot is untouched.
    pub fn submit(&mut self, action: Action) -> Result<Snapshot, ActionError> {
        if let Err(err) = validate(&self.state, &action) {
            tracing::debug!(
                action = action.kind(),
                player = action.player_id(),
                %err,
                "action rejected"
            );
            return Err(err);
        }
        let mut env = TransitionEnv {
            cards: &self.cards,
            shuffler: self.shuffler.as_mut(),
            events: &mut self.events,
        };
        let next = try_transition(&self.state, &action, &mut env)?;
        self.state = Arc::new(next);
        Ok(self.snapshot())
    }

    pub fn setup(
        &mut self,
        players: Vec<PlayerConfig>,
        target_points: Option<u32>,
    ) -> Result<Snapshot, ActionError> {
        self.submit(Action::Setup(SetupGame {
            players,
            target_points,
        }))
    }

    pub fn take_tokens(
        &mut self,
        player_id: &str,
        take: TokenBundle,
        returns: TokenBundle,
    ) -> Result<Snapshot, ActionError> {
        self.submit(Action::TakeTokens(TakeTokens {
            player_id: player_id.to_string(),
            take,
            returns,
        }))
    }

    pub fn reserve_card(
        &mut self,
        player_id: &str,
        source: ReserveSource,
        returns: TokenBundle,
    ) -> Result<Snapshot, ActionError> {
        self.submit(Action::ReserveCard(ReserveCard {
            player_id: player_id.to_string(),
            source,
            returns,
        }))
    }

    pub fn purchase_card(
        &mut self,
        player_id: &str,
        source: PurchaseSource,
    ) -> Result<Snapshot, ActionError> {
        self.submit(Action::PurchaseCard(PurchaseCard {
            player_id: player_id.to_string(),
            source,
        }))
    }

    /// Discards the match and returns a fresh pre-game snapshot.
    pub fn reset(&mut self) -> Snapshot {
        let rules = self.state.rules.clone();
        self.state = Arc::new(GameState::new(rules));
        self.events.push(Event::GameReset);
        self.snapshot()
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain().collect()
    }
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("status", &self.state.status)
            .field("turn", &self.state.turn)
            .field("cards", &self.cards.cards.len())
            .field("nobles", &self.cards.nobles.len())
            .finish_non_exhaustive()
    }
}

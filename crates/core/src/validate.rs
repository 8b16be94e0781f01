use crate::{
    resolve_payment, Action, Gem, GameState, GameStatus, InsufficientTokens, PlayerState,
    PurchaseCard, PurchaseSource, ReserveCard, ReserveSource, SetupGame, TakeTokens, Tier, Token,
    TokenBundle,
};
use std::collections::HashSet;
use thiserror::Error;

/// Why an action was rejected. `Display` gives the player-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("this game supports {min}-{max} players, got {count}")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },
    #[error("player names cannot be blank")]
    BlankPlayerName,
    #[error("player id {0} is used more than once")]
    DuplicatePlayerId(String),
    #[error("{0}")]
    NotYourTurn(TurnIssue),
    #[error("{0}")]
    InvalidTokenSelection(SelectionIssue),
    #[error("players cannot hold more than {limit} tokens (this would leave {total})")]
    TokenLimitExceeded { total: u32, limit: u32 },
    #[error("you already have {limit} reserved cards")]
    ReserveLimitExceeded { limit: usize },
    #[error("{0}")]
    CardUnavailable(CardIssue),
    #[error("you don't have the right tokens to buy {card_id}")]
    Unaffordable { card_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnIssue {
    #[error("the game has not started yet")]
    NotStarted,
    #[error("the game is over")]
    Finished,
    #[error("it isn't {player_id}'s turn")]
    OutOfTurn { player_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionIssue {
    #[error("select at least one token")]
    Empty,
    #[error("gold can only be gained by reserving a card")]
    GoldRequested,
    #[error("taking two of the same color uses your entire action")]
    DoubleWithOthers,
    #[error("need at least four {0} tokens in the bank to take two")]
    DoubleNeedsFour(Gem),
    #[error("you may take up to three different colors per turn")]
    TooManyColors,
    #[error("all selected colors must be different")]
    RepeatedColor,
    #[error("not enough {0} tokens remain in the bank")]
    BankShort(Token),
    #[error("token selection is invalid: {0}")]
    Overdraw(InsufficientTokens),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardIssue {
    #[error("card {card_id} is no longer on the tier {tier} board")]
    NotOnBoard { tier: Tier, card_id: String },
    #[error("the tier {0} deck is empty")]
    DeckEmpty(Tier),
    #[error("card {card_id} is not among your reserved cards")]
    NotReserved { card_id: String },
}

impl From<InsufficientTokens> for ActionError {
    fn from(err: InsufficientTokens) -> Self {
        ActionError::InvalidTokenSelection(SelectionIssue::Overdraw(err))
    }
}

/// Pre-flight legality check for any action against `state`.
pub fn validate(state: &GameState, action: &Action) -> Result<(), ActionError> {
    match action {
        Action::Setup(setup) => validate_setup(state, setup),
        Action::TakeTokens(take) => validate_take_tokens(state, take),
        Action::ReserveCard(reserve) => validate_reserve(state, reserve),
        Action::PurchaseCard(purchase) => validate_purchase(state, purchase),
        Action::Reset => Ok(()),
    }
}

/// Setup is accepted in any status; a game under way is replaced.
pub fn validate_setup(state: &GameState, setup: &SetupGame) -> Result<(), ActionError> {
    let rules = &state.rules;
    let count = setup.players.len();
    if !rules.accepts_player_count(count) {
        return Err(ActionError::InvalidPlayerCount {
            count,
            min: rules.min_players,
            max: rules.max_players,
        });
    }
    if setup.players.iter().any(|player| player.name.trim().is_empty()) {
        return Err(ActionError::BlankPlayerName);
    }
    let mut seen = HashSet::new();
    for player in &setup.players {
        if !seen.insert(player.id.as_str()) {
            return Err(ActionError::DuplicatePlayerId(player.id.clone()));
        }
    }
    Ok(())
}

pub fn validate_take_tokens(state: &GameState, take: &TakeTokens) -> Result<(), ActionError> {
    let player = acting_player(state, &take.player_id)?;
    check_take_pattern(&state.bank, &take.take)?;
    let after_take = player.tokens.add(&take.take);
    let after_return = after_take.subtract(&take.returns)?;
    ensure_token_limit(&after_return, state.rules.max_tokens)
}

pub fn validate_reserve(state: &GameState, reserve: &ReserveCard) -> Result<(), ActionError> {
    let player = acting_player(state, &reserve.player_id)?;
    if player.reserved.len() >= state.rules.max_reserved {
        return Err(ActionError::ReserveLimitExceeded {
            limit: state.rules.max_reserved,
        });
    }
    match &reserve.source {
        ReserveSource::Board { tier, card_id } => {
            if state.board.find(*tier, card_id).is_none() {
                return Err(ActionError::CardUnavailable(CardIssue::NotOnBoard {
                    tier: *tier,
                    card_id: card_id.clone(),
                }));
            }
        }
        ReserveSource::Deck { tier } => {
            if state.decks.is_empty(*tier) {
                return Err(ActionError::CardUnavailable(CardIssue::DeckEmpty(*tier)));
            }
        }
    }
    let after_gold = player.tokens.add(&gold_grant(&state.bank));
    let after_return = after_gold.subtract(&reserve.returns)?;
    ensure_token_limit(&after_return, state.rules.max_tokens)
}

pub fn validate_purchase(state: &GameState, purchase: &PurchaseCard) -> Result<(), ActionError> {
    let player = acting_player(state, &purchase.player_id)?;
    let card = match &purchase.source {
        PurchaseSource::Board { tier, card_id } => state.board_card(*tier, card_id).ok_or_else(|| {
            ActionError::CardUnavailable(CardIssue::NotOnBoard {
                tier: *tier,
                card_id: card_id.clone(),
            })
        })?,
        PurchaseSource::Reserved { card_id } => player
            .reserved
            .iter()
            .find(|card| &card.id == card_id)
            .ok_or_else(|| {
                ActionError::CardUnavailable(CardIssue::NotReserved {
                    card_id: card_id.clone(),
                })
            })?,
    };
    if resolve_payment(&player.discounts, &player.tokens, &card.cost).is_none() {
        return Err(ActionError::Unaffordable {
            card_id: card.id.clone(),
        });
    }
    Ok(())
}

/// Resolves the player to move, rejecting when the game is not under way or
/// `player_id` is someone else.
pub(crate) fn acting_index(state: &GameState, player_id: &str) -> Result<usize, ActionError> {
    match state.status {
        GameStatus::Setup => return Err(ActionError::NotYourTurn(TurnIssue::NotStarted)),
        GameStatus::Finished => return Err(ActionError::NotYourTurn(TurnIssue::Finished)),
        GameStatus::Playing => {}
    }
    match state.current_player() {
        Some(player) if player.id == player_id => Ok(state.current_player_index),
        _ => Err(ActionError::NotYourTurn(TurnIssue::OutOfTurn {
            player_id: player_id.to_string(),
        })),
    }
}

fn acting_player<'a>(state: &'a GameState, player_id: &str) -> Result<&'a PlayerState, ActionError> {
    let index = acting_index(state, player_id)?;
    Ok(&state.players[index])
}

/// Either two of a single color from a stack of at least four, or up to three
/// distinct colors one each. Gold is never taken directly.
pub(crate) fn check_take_pattern(bank: &TokenBundle, take: &TokenBundle) -> Result<(), ActionError> {
    if take.gold > 0 {
        return reject(SelectionIssue::GoldRequested);
    }
    if Gem::ALL.into_iter().any(|gem| take[gem.token()] > 2) {
        return reject(SelectionIssue::RepeatedColor);
    }
    let total = take.total();
    if total == 0 {
        return reject(SelectionIssue::Empty);
    }
    let double = Gem::ALL.into_iter().find(|gem| take[gem.token()] == 2);
    if let Some(gem) = double {
        if total != 2 {
            return reject(SelectionIssue::DoubleWithOthers);
        }
        if bank[gem.token()] < 4 {
            return reject(SelectionIssue::DoubleNeedsFour(gem));
        }
    } else {
        if total > 3 {
            return reject(SelectionIssue::TooManyColors);
        }
        if Gem::ALL.into_iter().any(|gem| take[gem.token()] > 1) {
            return reject(SelectionIssue::RepeatedColor);
        }
    }
    if let Some(gem) = Gem::ALL
        .into_iter()
        .find(|gem| take[gem.token()] > bank[gem.token()])
    {
        return reject(SelectionIssue::BankShort(gem.token()));
    }
    Ok(())
}

fn reject(issue: SelectionIssue) -> Result<(), ActionError> {
    Err(ActionError::InvalidTokenSelection(issue))
}

pub(crate) fn ensure_token_limit(tokens: &TokenBundle, limit: u32) -> Result<(), ActionError> {
    let total = tokens.total();
    if total > limit {
        return Err(ActionError::TokenLimitExceeded { total, limit });
    }
    Ok(())
}

/// The single gold token a reservation grants, if the bank still has one.
pub(crate) fn gold_grant(bank: &TokenBundle) -> TokenBundle {
    if bank.gold > 0 {
        TokenBundle::single(Token::Gold, 1)
    } else {
        TokenBundle::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> TokenBundle {
        TokenBundle::stocked(4, 5)
    }

    fn take(pairs: &[(Token, u32)]) -> TokenBundle {
        TokenBundle::from_pairs(pairs)
    }

    fn issue(result: Result<(), ActionError>) -> SelectionIssue {
        match result {
            Err(ActionError::InvalidTokenSelection(issue)) => issue,
            other => panic!("expected a selection issue, got {other:?}"),
        }
    }

    #[test]
    fn three_distinct_colors_are_legal() {
        let request = take(&[(Token::Diamond, 1), (Token::Sapphire, 1), (Token::Emerald, 1)]);
        assert_eq!(check_take_pattern(&bank(), &request), Ok(()));
    }

    #[test]
    fn fewer_than_three_colors_are_legal() {
        assert_eq!(check_take_pattern(&bank(), &take(&[(Token::Ruby, 1)])), Ok(()));
    }

    #[test]
    fn double_requires_four_in_bank() {
        let mut short = bank();
        short.ruby = 3;
        assert_eq!(
            issue(check_take_pattern(&short, &take(&[(Token::Ruby, 2)]))),
            SelectionIssue::DoubleNeedsFour(Gem::Ruby)
        );
        assert_eq!(check_take_pattern(&bank(), &take(&[(Token::Ruby, 2)])), Ok(()));
    }

    #[test]
    fn double_cannot_mix_with_other_colors() {
        let request = take(&[(Token::Ruby, 2), (Token::Onyx, 1)]);
        assert_eq!(
            issue(check_take_pattern(&bank(), &request)),
            SelectionIssue::DoubleWithOthers
        );
    }

    #[test]
    fn malformed_selections_are_rejected() {
        assert_eq!(
            issue(check_take_pattern(&bank(), &TokenBundle::default())),
            SelectionIssue::Empty
        );
        assert_eq!(
            issue(check_take_pattern(&bank(), &take(&[(Token::Gold, 1)]))),
            SelectionIssue::GoldRequested
        );
        assert_eq!(
            issue(check_take_pattern(&bank(), &take(&[(Token::Onyx, 3)]))),
            SelectionIssue::RepeatedColor
        );
        let four = take(&[
            (Token::Diamond, 1),
            (Token::Sapphire, 1),
            (Token::Emerald, 1),
            (Token::Ruby, 1),
        ]);
        assert_eq!(
            issue(check_take_pattern(&bank(), &four)),
            SelectionIssue::TooManyColors
        );
    }

    #[test]
    fn oversized_counts_are_rejected_not_summed() {
        let request = take(&[(Token::Diamond, u32::MAX), (Token::Sapphire, 1)]);
        assert_eq!(
            issue(check_take_pattern(&bank(), &request)),
            SelectionIssue::RepeatedColor
        );
        let spread = TokenBundle::stocked(u32::MAX, u32::MAX);
        assert_eq!(spread.total(), u32::MAX);
        assert_eq!(
            ensure_token_limit(&spread, 10),
            Err(ActionError::TokenLimitExceeded {
                total: u32::MAX,
                limit: 10
            })
        );
    }

    #[test]
    fn bank_shortage_is_reported_per_color() {
        let mut empty_onyx = bank();
        empty_onyx.onyx = 0;
        let request = take(&[(Token::Ruby, 1), (Token::Onyx, 1)]);
        assert_eq!(
            issue(check_take_pattern(&empty_onyx, &request)),
            SelectionIssue::BankShort(Token::Onyx)
        );
    }

    #[test]
    fn token_limit_counts_every_kind() {
        let held = TokenBundle::stocked(2, 1);
        assert_eq!(
            ensure_token_limit(&held, 10),
            Err(ActionError::TokenLimitExceeded { total: 11, limit: 10 })
        );
        assert_eq!(ensure_token_limit(&TokenBundle::stocked(2, 0), 10), Ok(()));
    }

    #[test]
    fn gold_grant_depends_on_bank_stock() {
        assert_eq!(gold_grant(&bank()).gold, 1);
        assert!(gold_grant(&TokenBundle::stocked(4, 0)).is_empty());
    }
}

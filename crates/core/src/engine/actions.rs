use super::turns::advance_turn;
use crate::validate::{acting_index, check_take_pattern, ensure_token_limit, gold_grant};
use crate::{
    claim_noble, resolve_payment, ActionError, CardIssue, DevelopmentCard, Event, EventBus,
    GameState, GemCounts, PurchaseCard, PurchaseSource, ReserveCard, ReserveSource, TakeTokens,
    Tier,
};

pub(super) fn apply_take_tokens(
    state: &mut GameState,
    take: &TakeTokens,
    events: &mut EventBus,
) -> Result<(), ActionError> {
    let index = acting_index(state, &take.player_id)?;
    check_take_pattern(&state.bank, &take.take)?;
    let bank = state.bank.subtract(&take.take)?.add(&take.returns);
    let tokens = state.players[index]
        .tokens
        .add(&take.take)
        .subtract(&take.returns)?;
    ensure_token_limit(&tokens, state.rules.max_tokens)?;

    state.bank = bank;
    let player = &mut state.players[index];
    player.tokens = tokens;
    let mut message = format!("{} took {}", player.name, take.take);
    if !take.returns.is_empty() {
        message.push_str(&format!(" and returned {}", take.returns));
    }
    let player_id = player.id.clone();
    state.push_log(player_id.clone(), message);
    events.push(Event::TokensTaken {
        player_id,
        taken: take.take,
        returned: take.returns,
    });
    advance_turn(state, events);
    Ok(())
}

pub(super) fn apply_reserve(
    state: &mut GameState,
    reserve: &ReserveCard,
    events: &mut EventBus,
) -> Result<(), ActionError> {
    let index = acting_index(state, &reserve.player_id)?;
    let limit = state.rules.max_reserved;
    if state.players[index].reserved.len() >= limit {
        return Err(ActionError::ReserveLimitExceeded { limit });
    }
    let grant = gold_grant(&state.bank);
    let tokens = state.players[index]
        .tokens
        .add(&grant)
        .subtract(&reserve.returns)?;
    ensure_token_limit(&tokens, state.rules.max_tokens)?;
    let bank = state.bank.subtract(&grant)?.add(&reserve.returns);

    let (card, from_deck) = match &reserve.source {
        ReserveSource::Board { tier, card_id } => {
            let card = state
                .board
                .find(*tier, card_id)
                .and_then(|slot| state.board.take(*tier, slot, &mut state.decks))
                .ok_or_else(|| not_on_board(*tier, card_id))?;
            (card, false)
        }
        ReserveSource::Deck { tier } => {
            let card = state
                .decks
                .draw(*tier)
                .ok_or(ActionError::CardUnavailable(CardIssue::DeckEmpty(*tier)))?;
            (card, true)
        }
    };

    state.bank = bank;
    let player = &mut state.players[index];
    player.tokens = tokens;
    let card_id = card.id.clone();
    let tier = card.tier;
    player.reserved.push(card);
    let mut message = if from_deck {
        format!("{} reserved a card from the tier {tier} deck", player.name)
    } else {
        format!("{} reserved {card_id}", player.name)
    };
    if !grant.is_empty() {
        message.push_str(" and took a gold token");
    }
    if !reserve.returns.is_empty() {
        message.push_str(&format!(", returning {}", reserve.returns));
    }
    let player_id = player.id.clone();
    state.push_log(player_id.clone(), message);
    events.push(Event::CardReserved {
        player_id,
        card_id,
        tier,
        from_deck,
        gold_gained: !grant.is_empty(),
        returned: reserve.returns,
    });
    advance_turn(state, events);
    Ok(())
}

enum Origin {
    Board { tier: Tier, slot: usize },
    Reserved { position: usize },
}

pub(super) fn apply_purchase(
    state: &mut GameState,
    purchase: &PurchaseCard,
    events: &mut EventBus,
) -> Result<(), ActionError> {
    let index = acting_index(state, &purchase.player_id)?;
    let (origin, cost) = locate_purchase(state, index, &purchase.source)?;
    let player = &state.players[index];
    let payment = resolve_payment(&player.discounts, &player.tokens, &cost).ok_or_else(|| {
        ActionError::Unaffordable {
            card_id: purchase.source.card_id().to_string(),
        }
    })?;
    let tokens = player.tokens.subtract(&payment)?;

    let card: DevelopmentCard = match origin {
        Origin::Board { tier, slot } => state
            .board
            .take(tier, slot, &mut state.decks)
            .ok_or_else(|| not_on_board(tier, purchase.source.card_id()))?,
        Origin::Reserved { position } => state.players[index].reserved.remove(position),
    };

    state.bank = state.bank.add(&payment);
    let player = &mut state.players[index];
    player.tokens = tokens;
    let card_id = card.id.clone();
    let card_points = card.points;
    player.award_card(card);
    let name = player.name.clone();
    let player_id = player.id.clone();
    let mut message = if payment.is_empty() {
        format!("{name} bought {card_id} for free")
    } else {
        format!("{name} bought {card_id} paying {payment}")
    };
    events.push(Event::CardPurchased {
        player_id: player_id.clone(),
        card_id,
        payment,
        points: card_points,
    });

    // Only card points count toward the trigger on this purchase.
    let points = state.players[index].points;
    if state.final_round_trigger.is_none() && points >= state.target_points {
        state.final_round_trigger = Some(player_id.clone());
        message.push_str(&format!(", reaching {points} points"));
        events.push(Event::FinalRoundTriggered {
            player_id: player_id.clone(),
            points,
        });
    }

    if let Some(noble) = claim_noble(&mut state.nobles, &mut state.players[index]) {
        message.push_str(&format!("; noble {} visited", noble.id));
        events.push(Event::NobleVisited {
            player_id: player_id.clone(),
            noble_id: noble.id,
            points: noble.points,
        });
    }
    state.push_log(player_id, message);
    advance_turn(state, events);
    Ok(())
}

fn locate_purchase(
    state: &GameState,
    index: usize,
    source: &PurchaseSource,
) -> Result<(Origin, GemCounts), ActionError> {
    match source {
        PurchaseSource::Board { tier, card_id } => {
            let slot = state
                .board
                .find(*tier, card_id)
                .ok_or_else(|| not_on_board(*tier, card_id))?;
            let card = state
                .board
                .card(*tier, slot)
                .ok_or_else(|| not_on_board(*tier, card_id))?;
            Ok((Origin::Board { tier: *tier, slot }, card.cost))
        }
        PurchaseSource::Reserved { card_id } => {
            let player = &state.players[index];
            let position = player.reserved_position(card_id).ok_or_else(|| {
                ActionError::CardUnavailable(CardIssue::NotReserved {
                    card_id: card_id.clone(),
                })
            })?;
            Ok((
                Origin::Reserved { position },
                player.reserved[position].cost,
            ))
        }
    }
}

fn not_on_board(tier: Tier, card_id: &str) -> ActionError {
    ActionError::CardUnavailable(CardIssue::NotOnBoard {
        tier,
        card_id: card_id.to_string(),
    })
}

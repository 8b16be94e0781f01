use crate::{
    affordable_cards, validate, Action, GameState, GameStatus, Gem, PurchaseCard, ReserveCard,
    ReserveSource, TakeTokens, Tier, Token, TokenBundle,
};

/// Every action the player to move can submit right now.
///
/// Token takes and reservations that would break the holding limit come with
/// returns already filled in, taken from the player's largest stacks first
/// and gold last. Returns an empty list when the game is not being played
/// or the player has no legal move.
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    if state.status != GameStatus::Playing {
        return Vec::new();
    }
    let Some(player) = state.current_player() else {
        return Vec::new();
    };
    let limit = state.rules.max_tokens;
    let mut actions = Vec::new();

    for take in token_takes(&state.bank) {
        let returns = auto_returns(&player.tokens.add(&take), limit);
        actions.push(Action::TakeTokens(TakeTokens {
            player_id: player.id.clone(),
            take,
            returns,
        }));
    }

    if player.reserved.len() < state.rules.max_reserved {
        let grant = if state.bank.gold > 0 {
            TokenBundle::single(Token::Gold, 1)
        } else {
            TokenBundle::default()
        };
        let returns = auto_returns(&player.tokens.add(&grant), limit);
        for tier in Tier::ALL {
            for card in state.board.row(tier).iter().flatten() {
                actions.push(Action::ReserveCard(ReserveCard {
                    player_id: player.id.clone(),
                    source: ReserveSource::Board {
                        tier,
                        card_id: card.id.clone(),
                    },
                    returns,
                }));
            }
            if !state.decks.is_empty(tier) {
                actions.push(Action::ReserveCard(ReserveCard {
                    player_id: player.id.clone(),
                    source: ReserveSource::Deck { tier },
                    returns,
                }));
            }
        }
    }

    for source in affordable_cards(state, &player.id) {
        actions.push(Action::PurchaseCard(PurchaseCard {
            player_id: player.id.clone(),
            source,
        }));
    }

    actions.retain(|action| validate(state, action).is_ok());
    actions
}

/// Take patterns the bank can honor: one to three distinct colors, or a
/// double from a stack of four or more.
fn token_takes(bank: &TokenBundle) -> Vec<TokenBundle> {
    let stocked: Vec<Gem> = Gem::ALL
        .into_iter()
        .filter(|gem| bank[gem.token()] > 0)
        .collect();
    let mut takes = Vec::new();
    for mask in 1u32..(1 << stocked.len()) {
        if mask.count_ones() > 3 {
            continue;
        }
        let mut take = TokenBundle::default();
        for (bit, gem) in stocked.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                take[gem.token()] = 1;
            }
        }
        takes.push(take);
    }
    for gem in Gem::ALL {
        if bank[gem.token()] >= 4 {
            takes.push(TokenBundle::single(gem.token(), 2));
        }
    }
    takes
}

fn auto_returns(held: &TokenBundle, limit: u32) -> TokenBundle {
    let mut remaining = *held;
    let mut returns = TokenBundle::default();
    while remaining.total() > limit {
        let largest = Gem::ALL
            .into_iter()
            .rev()
            .map(Gem::token)
            .filter(|token| remaining[*token] > 0)
            .max_by_key(|token| remaining[*token])
            .unwrap_or(Token::Gold);
        if remaining[largest] == 0 {
            break;
        }
        remaining[largest] -= 1;
        returns[largest] += 1;
    }
    returns
}

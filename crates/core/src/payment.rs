use crate::{Gem, GemCounts, GameState, PurchaseSource, Tier, Token, TokenBundle};

/// Computes the only legal payment for `cost`.
///
/// Per color the discount applies first, then tokens of that color, and any
/// shortfall is charged in gold. Returns `None` when the gold shortfall is
/// larger than the gold held.
pub fn resolve_payment(
    discounts: &GemCounts,
    tokens: &TokenBundle,
    cost: &GemCounts,
) -> Option<TokenBundle> {
    let mut payment = TokenBundle::default();
    let mut gold_needed = 0u32;
    for gem in Gem::ALL {
        let remaining = cost[gem].saturating_sub(discounts[gem]);
        let held = tokens[gem.token()];
        let from_color = remaining.min(held);
        payment[gem.token()] = from_color;
        gold_needed = gold_needed.saturating_add(remaining - from_color);
    }
    if gold_needed > tokens[Token::Gold] {
        return None;
    }
    payment.gold = gold_needed;
    Some(payment)
}

/// Board and reserved cards `player_id` could buy right now.
pub fn affordable_cards(state: &GameState, player_id: &str) -> Vec<PurchaseSource> {
    let Some(player) = state.player(player_id) else {
        return Vec::new();
    };
    let mut sources = Vec::new();
    for tier in Tier::ALL {
        for card in state.board.row(tier).iter().flatten() {
            if player.can_afford(card) {
                sources.push(PurchaseSource::Board {
                    tier,
                    card_id: card.id.clone(),
                });
            }
        }
    }
    for card in &player.reserved {
        if player.can_afford(card) {
            sources.push(PurchaseSource::Reserved {
                card_id: card.id.clone(),
            });
        }
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn gold_covers_the_shortfall_after_discount() {
        let discounts = GemCounts::from_pairs(&[(Gem::Ruby, 1)]);
        let tokens = TokenBundle::from_pairs(&[(Token::Ruby, 1), (Token::Gold, 5)]);
        let cost = GemCounts::from_pairs(&[(Gem::Ruby, 3)]);
        let payment = resolve_payment(&discounts, &tokens, &cost).expect("affordable");
        assert_eq!(
            payment,
            TokenBundle::from_pairs(&[(Token::Ruby, 1), (Token::Gold, 1)])
        );
    }

    #[test]
    fn discounts_can_make_a_card_free() {
        let discounts = GemCounts::from_pairs(&[(Gem::Onyx, 4)]);
        let cost = GemCounts::from_pairs(&[(Gem::Onyx, 3)]);
        let payment = resolve_payment(&discounts, &TokenBundle::default(), &cost);
        assert_eq!(payment, Some(TokenBundle::default()));
    }

    #[test]
    fn short_on_gold_is_unaffordable() {
        let tokens = TokenBundle::from_pairs(&[(Token::Diamond, 2), (Token::Gold, 1)]);
        let cost = GemCounts::from_pairs(&[(Gem::Diamond, 2), (Gem::Emerald, 2)]);
        assert_eq!(resolve_payment(&GemCounts::default(), &tokens, &cost), None);
    }

    #[test]
    fn regular_tokens_are_spent_before_gold() {
        let tokens = TokenBundle::from_pairs(&[(Token::Sapphire, 4), (Token::Gold, 3)]);
        let cost = GemCounts::from_pairs(&[(Gem::Sapphire, 3)]);
        let payment = resolve_payment(&GemCounts::default(), &tokens, &cost).expect("payment");
        assert_eq!(payment.sapphire, 3);
        assert_eq!(payment.gold, 0);
    }

    fn gem_counts(max: u32) -> impl Strategy<Value = GemCounts> {
        prop::array::uniform5(0..=max).prop_map(|[diamond, sapphire, emerald, ruby, onyx]| {
            GemCounts {
                diamond,
                sapphire,
                emerald,
                ruby,
                onyx,
            }
        })
    }

    fn token_bundle(max: u32) -> impl Strategy<Value = TokenBundle> {
        prop::array::uniform6(0..=max).prop_map(
            |[diamond, sapphire, emerald, ruby, onyx, gold]| TokenBundle {
                diamond,
                sapphire,
                emerald,
                ruby,
                onyx,
                gold,
            },
        )
    }

    proptest! {
        #[test]
        fn payment_exactly_covers_the_requirement(
            discounts in gem_counts(4),
            tokens in token_bundle(6),
            cost in gem_counts(7),
        ) {
            let shortfall: u32 = Gem::ALL
                .into_iter()
                .map(|gem| cost[gem].saturating_sub(discounts[gem]).saturating_sub(tokens[gem.token()]))
                .sum();
            match resolve_payment(&discounts, &tokens, &cost) {
                Some(payment) => {
                    prop_assert!(tokens.has_at_least(&payment));
                    prop_assert_eq!(payment.gold, shortfall);
                    for gem in Gem::ALL {
                        let required = cost[gem].saturating_sub(discounts[gem]);
                        prop_assert_eq!(payment[gem.token()], required.min(tokens[gem.token()]));
                    }
                    let required_total: u32 = Gem::ALL
                        .into_iter()
                        .map(|gem| cost[gem].saturating_sub(discounts[gem]))
                        .sum();
                    prop_assert_eq!(payment.total(), required_total);
                }
                None => prop_assert!(shortfall > tokens.gold),
            }
        }
    }
}

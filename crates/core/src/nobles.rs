use crate::{GemCounts, NobleCard, PlayerState};

/// A noble visits once the player's discounts meet every threshold.
pub fn is_eligible(discounts: &GemCounts, noble: &NobleCard) -> bool {
    discounts.covers(&noble.cost)
}

/// Position of the first eligible noble in pool order.
pub fn first_eligible(pool: &[NobleCard], discounts: &GemCounts) -> Option<usize> {
    pool.iter().position(|noble| is_eligible(discounts, noble))
}

/// Moves the first eligible noble from `pool` to `player`.
///
/// At most one noble visits per purchase, even when several qualify.
pub fn claim_noble(pool: &mut Vec<NobleCard>, player: &mut PlayerState) -> Option<NobleCard> {
    let index = first_eligible(pool, &player.discounts)?;
    let noble = pool.remove(index);
    player.award_noble(noble.clone());
    Some(noble)
}

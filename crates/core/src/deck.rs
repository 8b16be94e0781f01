use crate::{shuffled, CardSet, DevelopmentCard, Shuffler, Tier};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// The three draw piles. The front of each pile is the next card drawn.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Decks {
    piles: [VecDeque<DevelopmentCard>; 3],
}

impl Decks {
    /// Shuffles each tier of `cards` independently, tier one first.
    pub fn shuffled(cards: &CardSet, shuffler: &mut dyn Shuffler) -> Self {
        let mut decks = Self::default();
        for tier in Tier::ALL {
            let pile = shuffled(cards.tier_cards(tier), shuffler);
            decks.piles[tier.index()] = pile.into();
        }
        decks
    }

    pub fn draw(&mut self, tier: Tier) -> Option<DevelopmentCard> {
        self.piles[tier.index()].pop_front()
    }

    pub fn len(&self, tier: Tier) -> usize {
        self.piles[tier.index()].len()
    }

    pub fn is_empty(&self, tier: Tier) -> bool {
        self.piles[tier.index()].is_empty()
    }

    pub fn cards(&self) -> impl Iterator<Item = &DevelopmentCard> + '_ {
        self.piles.iter().flatten()
    }
}

/// Face-up slots, one row per tier. Empty slots hold `None`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    rows: [Vec<Option<DevelopmentCard>>; 3],
}

impl Board {
    pub fn empty(slots: usize) -> Self {
        Self {
            rows: std::array::from_fn(|_| vec![None; slots]),
        }
    }

    /// Fills `slots` per tier from the front of each pile; slots stay empty
    /// once a pile runs out.
    pub fn deal(decks: &mut Decks, slots: usize) -> Self {
        let mut board = Self::empty(slots);
        for tier in Tier::ALL {
            for slot in 0..slots {
                board.rows[tier.index()][slot] = decks.draw(tier);
            }
        }
        board
    }

    pub fn row(&self, tier: Tier) -> &[Option<DevelopmentCard>] {
        &self.rows[tier.index()]
    }

    pub fn card(&self, tier: Tier, slot: usize) -> Option<&DevelopmentCard> {
        self.rows[tier.index()].get(slot)?.as_ref()
    }

    /// Slot currently holding `card_id` in `tier`.
    pub fn find(&self, tier: Tier, card_id: &str) -> Option<usize> {
        self.rows[tier.index()]
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|card| card.id == card_id))
    }

    /// Removes the card in `slot` and immediately refills it from the tier's pile.
    pub fn take(&mut self, tier: Tier, slot: usize, decks: &mut Decks) -> Option<DevelopmentCard> {
        let entry = self.rows[tier.index()].get_mut(slot)?;
        let card = entry.take()?;
        *entry = decks.draw(tier);
        Some(card)
    }

    pub fn cards(&self) -> impl Iterator<Item = &DevelopmentCard> + '_ {
        self.rows.iter().flatten().flatten()
    }

    pub fn occupied(&self, tier: Tier) -> usize {
        self.rows[tier.index()].iter().flatten().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Gem, GemCounts, InOrder};

    fn catalogue(per_tier: usize) -> CardSet {
        let mut cards = Vec::new();
        for tier in Tier::ALL {
            for n in 0..per_tier {
                cards.push(DevelopmentCard::new(
                    format!("t{}-{n:02}", tier.number()),
                    tier,
                    Gem::Ruby,
                    0,
                    GemCounts::from_pairs(&[(Gem::Onyx, 1)]),
                ));
            }
        }
        CardSet::new(cards, Vec::new())
    }

    #[test]
    fn draw_is_fifo_from_the_shuffle_order() {
        let mut decks = Decks::shuffled(&catalogue(3), &mut InOrder);
        assert_eq!(decks.draw(Tier::Two).map(|card| card.id), Some("t2-00".to_string()));
        assert_eq!(decks.draw(Tier::Two).map(|card| card.id), Some("t2-01".to_string()));
        assert_eq!(decks.len(Tier::Two), 1);
        assert_eq!(decks.len(Tier::One), 3);
    }

    #[test]
    fn deal_leaves_slots_empty_when_pile_runs_out() {
        let mut decks = Decks::shuffled(&catalogue(2), &mut InOrder);
        let board = Board::deal(&mut decks, 4);
        assert_eq!(board.occupied(Tier::Three), 2);
        assert!(board.card(Tier::Three, 3).is_none());
        assert!(decks.is_empty(Tier::Three));
    }

    #[test]
    fn take_refills_the_same_slot() {
        let mut decks = Decks::shuffled(&catalogue(6), &mut InOrder);
        let mut board = Board::deal(&mut decks, 4);
        let slot = board.find(Tier::One, "t1-02").expect("dealt");
        let taken = board.take(Tier::One, slot, &mut decks).expect("card");
        assert_eq!(taken.id, "t1-02");
        assert_eq!(board.card(Tier::One, slot).map(|card| card.id.as_str()), Some("t1-04"));
        assert_eq!(decks.len(Tier::One), 1);
    }

    #[test]
    fn take_from_empty_slot_returns_none() {
        let mut decks = Decks::default();
        let mut board = Board::empty(4);
        assert!(board.take(Tier::One, 0, &mut decks).is_none());
        assert!(board.take(Tier::One, 9, &mut decks).is_none());
    }
}

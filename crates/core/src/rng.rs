use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Source of random permutations for deck and noble shuffles.
///
/// `permutation(len)` returns the order in which the `len` inputs are laid
/// out: output position `k` receives input `perm[k]`. Any closure of shape
/// `FnMut(usize) -> Vec<usize>` works, which keeps deals reproducible in tests.
pub trait Shuffler {
    fn permutation(&mut self, len: usize) -> Vec<usize>;
}

impl<F> Shuffler for F
where
    F: FnMut(usize) -> Vec<usize>,
{
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        self(len)
    }
}

/// Leaves every sequence in catalogue order.
#[derive(Debug, Clone, Copy, Default)]
pub struct InOrder;

impl Shuffler for InOrder {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        (0..len).collect()
    }
}

/// Seeded shuffle source; equal seeds deal equal games.
#[derive(Debug, Clone)]
pub struct RngState {
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Shuffler for RngState {
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        order
    }
}

/// Reorders `items` with a permutation drawn from `shuffler`.
///
/// A permutation of the wrong length or with repeated indices is ignored and
/// the input order is kept.
pub fn shuffled<T>(items: Vec<T>, shuffler: &mut dyn Shuffler) -> Vec<T> {
    let order = shuffler.permutation(items.len());
    if !is_permutation(&order, items.len()) {
        tracing::warn!(
            len = items.len(),
            got = order.len(),
            "shuffler returned an invalid permutation; keeping input order"
        );
        return items;
    }
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect()
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &index in order {
        if index >= len || seen[index] {
            return false;
        }
        seen[index] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_permutations_are_reproducible() {
        let mut left = RngState::from_seed(42);
        let mut right = RngState::from_seed(42);
        assert_eq!(left.permutation(40), right.permutation(40));
        assert_eq!(left.permutation(40), right.permutation(40));
    }

    #[test]
    fn closure_permutation_is_applied() {
        let mut reverse = |len: usize| -> Vec<usize> { (0..len).rev().collect() };
        assert_eq!(shuffled(vec!['a', 'b', 'c'], &mut reverse), vec!['c', 'b', 'a']);
    }

    #[test]
    fn invalid_permutation_keeps_input_order() {
        let mut broken = |_len: usize| -> Vec<usize> { vec![0, 0, 1] };
        assert_eq!(shuffled(vec![1, 2, 3], &mut broken), vec![1, 2, 3]);
        let mut short = |_len: usize| -> Vec<usize> { vec![1] };
        assert_eq!(shuffled(vec![1, 2], &mut short), vec![1, 2]);
    }

    #[test]
    fn rng_permutation_is_a_bijection() {
        let mut rng = RngState::from_seed(7);
        let order = rng.permutation(90);
        assert!(is_permutation(&order, 90));
    }
}

use rustc_hash::FxHashMap;

/// A request to force, suppress, or leave alone the blank line before an anchor token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlankLineWish {
    Yes,
    No,
    /// Keep whatever the source had.
    Preserve,
}

impl BlankLineWish {
    pub fn wanted(self) -> Option<bool> {
        match self {
            BlankLineWish::Yes => Some(true),
            BlankLineWish::No => Some(false),
            BlankLineWish::Preserve => None,
        }
    }
}

/// Combines two wishes recorded for the same anchor.
pub trait WishMerge: Send + Sync {
    fn merge(&self, existing: BlankLineWish, incoming: BlankLineWish) -> BlankLineWish;
}

impl<F> WishMerge for F
where
    F: Fn(BlankLineWish, BlankLineWish) -> BlankLineWish + Send + Sync,
{
    fn merge(&self, existing: BlankLineWish, incoming: BlankLineWish) -> BlankLineWish {
        self(existing, incoming)
    }
}

/// An explicit wish, once recorded, stays; an incoming explicit wish only fills a `Preserve`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstExplicitWins;

impl WishMerge for FirstExplicitWins {
    fn merge(&self, existing: BlankLineWish, incoming: BlankLineWish) -> BlankLineWish {
        match existing {
            BlankLineWish::Preserve => incoming,
            explicit => explicit,
        }
    }
}

/// Blank-line wishes keyed by anchor token index.
pub struct BlankLineLedger {
    wishes: FxHashMap<usize, BlankLineWish>,
    policy: Box<dyn WishMerge>,
}

impl BlankLineLedger {
    pub fn new(policy: Box<dyn WishMerge>) -> Self {
        Self {
            wishes: FxHashMap::default(),
            policy,
        }
    }

    /// Wishes already recorded are kept as they are.
    pub fn set_policy(&mut self, policy: Box<dyn WishMerge>) {
        self.policy = policy;
    }

    pub fn record_wish(&mut self, anchor: usize, wish: BlankLineWish) {
        let merged = match self.wishes.get(&anchor) {
            Some(&existing) => self.policy.merge(existing, wish),
            None => wish,
        };
        self.wishes.insert(anchor, merged);
    }

    /// Records `Yes` at `anchor` unless something is already recorded there, so a suppression
    /// at a block or declaration edge keeps winning.
    pub fn force(&mut self, anchor: usize) {
        self.wishes.entry(anchor).or_insert(BlankLineWish::Yes);
    }

    pub fn resolve(&self, anchor: usize) -> Option<BlankLineWish> {
        self.wishes.get(&anchor).copied()
    }

    pub fn len(&self) -> usize {
        self.wishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wishes.is_empty()
    }
}

impl Default for BlankLineLedger {
    fn default() -> Self {
        Self::new(Box::new(FirstExplicitWins))
    }
}

impl std::fmt::Debug for BlankLineLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut entries: Vec<_> = self.wishes.iter().collect();
        entries.sort_unstable_by_key(|(anchor, _)| **anchor);
        f.debug_map().entries(entries).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_yes_survives_later_requests() {
        let mut ledger = BlankLineLedger::default();
        ledger.force(3);
        ledger.record_wish(3, BlankLineWish::Preserve);
        ledger.record_wish(3, BlankLineWish::No);
        assert_eq!(ledger.resolve(3), Some(BlankLineWish::Yes));
    }

    #[test]
    fn force_respects_an_existing_suppression() {
        let mut ledger = BlankLineLedger::default();
        ledger.record_wish(7, BlankLineWish::No);
        ledger.force(7);
        assert_eq!(ledger.resolve(7), Some(BlankLineWish::No));
        assert_eq!(ledger.resolve(8), None);
    }

    #[test]
    fn explicit_wish_fills_an_unset_entry() {
        let mut ledger = BlankLineLedger::default();
        ledger.record_wish(1, BlankLineWish::Preserve);
        ledger.record_wish(1, BlankLineWish::Yes);
        assert_eq!(ledger.resolve(1), Some(BlankLineWish::Yes));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn custom_policy_is_applied() {
        let mut ledger =
            BlankLineLedger::new(Box::new(|_: BlankLineWish, incoming: BlankLineWish| incoming));
        ledger.record_wish(2, BlankLineWish::Yes);
        ledger.record_wish(2, BlankLineWish::No);
        assert_eq!(ledger.resolve(2), Some(BlankLineWish::No));
    }

    #[test]
    fn wanted_maps_preserve_to_none() {
        assert_eq!(BlankLineWish::Yes.wanted(), Some(true));
        assert_eq!(BlankLineWish::No.wanted(), Some(false));
        assert_eq!(BlankLineWish::Preserve.wanted(), None);
    }
}

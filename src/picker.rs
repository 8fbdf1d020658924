use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::roster::NameList;

/// Uniform random choice over the roster that never repeats the previous pick.
pub struct Picker<R = StdRng> {
    names: NameList,
    last: Option<usize>,
    rng: R,
}

impl Picker<StdRng> {
    pub fn new(names: NameList) -> Self {
        Self::with_rng(names, StdRng::from_entropy())
    }
}

impl<R: Rng> Picker<R> {
    pub fn with_rng(names: NameList, rng: R) -> Self {
        Self {
            names,
            last: None,
            rng,
        }
    }

    pub fn last(&self) -> Option<&str> {
        self.last.and_then(|i| self.names.get(i))
    }

    /// Draw the next name.
    ///
    /// Candidates are every entry whose text differs from the last pick, so
    /// duplicates in the roster keep their weight. When no such entry exists
    /// (a single name, or all entries identical) the last name is returned
    /// again instead of retrying forever.
    pub fn pick(&mut self) -> &str {
        let all = self.names.as_slice();
        let last = self.last.map(|i| all[i].as_str());
        let candidates: Vec<usize> = (0..all.len())
            .filter(|&i| Some(all[i].as_str()) != last)
            .collect();

        let index = match candidates.choose(&mut self.rng) {
            Some(&i) => i,
            None => self.last.unwrap_or(0),
        };
        self.last = Some(index);
        &all[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn seeded(names: &[&str], seed: u64) -> Picker {
        let list = NameList::from_entries(names.iter().copied()).unwrap();
        Picker::with_rng(list, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn no_immediate_repeat() {
        for seed in 0..20 {
            let mut picker = seeded(&["Alice", "Bob", "Carol"], seed);
            let mut prev = picker.pick().to_string();
            for _ in 0..200 {
                let next = picker.pick().to_string();
                assert_ne!(prev, next, "seed {seed}");
                prev = next;
            }
        }
    }

    #[test]
    fn two_names_alternate() {
        let mut picker = seeded(&["Alice", "Bob"], 7);
        let first = picker.pick().to_string();
        for i in 0..50 {
            let next = picker.pick().to_string();
            if i % 2 == 0 {
                assert_ne!(next, first);
            } else {
                assert_eq!(next, first);
            }
        }
    }

    #[test]
    fn single_name_terminates() {
        let mut picker = seeded(&["Alice"], 1);
        for _ in 0..10 {
            assert_eq!(picker.pick(), "Alice");
        }
        assert_eq!(picker.last(), Some("Alice"));
    }

    #[test]
    fn identical_names_terminate() {
        let mut picker = seeded(&["Alice", "Alice", " Alice "], 3);
        for _ in 0..10 {
            assert_eq!(picker.pick(), "Alice");
        }
    }

    #[test]
    fn duplicates_of_last_are_excluded() {
        let mut picker = seeded(&["Alice", "Bob", "Alice"], 11);
        let mut prev = picker.pick().to_string();
        for _ in 0..100 {
            let next = picker.pick().to_string();
            assert_ne!(prev, next);
            prev = next;
        }
    }

    #[test]
    fn never_returns_last_and_is_roughly_uniform() {
        let list = NameList::from_entries(["Alice", "Bob", "Carol"]).unwrap();
        let mut picker = Picker::with_rng(list, StdRng::seed_from_u64(42));
        let mut counts: HashMap<String, u32> = HashMap::new();
        for _ in 0..3000 {
            // Force the previous pick back to Alice every round.
            picker.last = Some(0);
            *counts.entry(picker.pick().to_string()).or_default() += 1;
        }
        assert_eq!(counts.get("Alice"), None);
        let bob = counts["Bob"];
        let carol = counts["Carol"];
        assert_eq!(bob + carol, 3000);
        assert!((1300..=1700).contains(&bob), "bob={bob}");
    }

    #[test]
    fn first_pick_can_be_any_name() {
        let mut seen = std::collections::HashSet::new();
        for seed in 0..64 {
            let mut picker = seeded(&["Alice", "Bob", "Carol"], seed);
            seen.insert(picker.pick().to_string());
        }
        assert_eq!(seen.len(), 3);
    }
}

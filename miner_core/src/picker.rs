use crate::error::{CoreError, CoreResult};
use crate::rng::RandomSource;

/// Items with integer weights, picked by cumulative sum over a single draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedTable<T> {
    entries: Vec<(T, u32)>,
    total: u32,
}

impl<T: Copy + PartialEq> WeightedTable<T> {
    pub fn new(entries: Vec<(T, u32)>) -> CoreResult<Self> {
        if entries.is_empty() {
            return Err(CoreError::InvalidConfig("weight table is empty".into()));
        }
        let total = entries
            .iter()
            .try_fold(0u32, |acc, (_, w)| acc.checked_add(*w))
            .ok_or_else(|| CoreError::InvalidConfig("total weight overflows u32".into()))?;
        if total == 0 {
            return Err(CoreError::InvalidConfig("total weight must be positive".into()));
        }
        Ok(Self { entries, total })
    }

    pub fn total_weight(&self) -> u32 {
        self.total
    }

    /// Draws r in [1, total] and returns the first item whose running
    /// weight reaches r.
    pub fn pick(&self, rng: &mut dyn RandomSource) -> T {
        let r = rng.uniform_int(1, self.total);
        let mut cumulative = 0u32;
        for (item, weight) in &self.entries {
            cumulative += weight;
            if r <= cumulative {
                return *item;
            }
        }
        // r never exceeds total; keep the last entry as the fallback anyway.
        self.entries[self.entries.len() - 1].0
    }

    pub fn probability(&self, item: &T) -> f64 {
        let weight: u32 = self
            .entries
            .iter()
            .filter(|(t, _)| t == item)
            .map(|(_, w)| *w)
            .sum();
        weight as f64 / self.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;
    use crate::symbols::{default_symbol_weights, Symbol};

    struct Fixed(u32);

    impl RandomSource for Fixed {
        fn uniform_int(&mut self, lo: u32, hi: u32) -> u32 {
            self.0.clamp(lo, hi)
        }
    }

    #[test]
    fn rejects_bad_tables() {
        assert!(WeightedTable::<u8>::new(vec![]).is_err());
        assert!(WeightedTable::new(vec![('a', 0), ('b', 0)]).is_err());
        assert!(WeightedTable::new(vec![('a', u32::MAX), ('b', 1)]).is_err());
    }

    #[test]
    fn cumulative_boundaries_follow_list_order() {
        let table = WeightedTable::new(vec![('a', 2), ('b', 3), ('c', 5)]).unwrap();
        assert_eq!(table.total_weight(), 10);
        assert_eq!(table.pick(&mut Fixed(1)), 'a');
        assert_eq!(table.pick(&mut Fixed(2)), 'a');
        assert_eq!(table.pick(&mut Fixed(3)), 'b');
        assert_eq!(table.pick(&mut Fixed(5)), 'b');
        assert_eq!(table.pick(&mut Fixed(6)), 'c');
        assert_eq!(table.pick(&mut Fixed(10)), 'c');
    }

    #[test]
    fn zero_weight_entries_are_never_picked() {
        let table = WeightedTable::new(vec![('a', 1), ('z', 0), ('b', 1)]).unwrap();
        assert_eq!(table.pick(&mut Fixed(1)), 'a');
        assert_eq!(table.pick(&mut Fixed(2)), 'b');
        assert_eq!(table.probability(&'z'), 0.0);
    }

    #[test]
    fn empirical_frequencies_match_weights() {
        let table = WeightedTable::new(default_symbol_weights()).unwrap();
        let mut rng = SeededRandom::new("picker", "frequencies", 0);
        let n = 200_000u32;
        let mut counts = std::collections::HashMap::new();
        for _ in 0..n {
            *counts.entry(table.pick(&mut rng)).or_insert(0u32) += 1;
        }
        for s in Symbol::ALL {
            let observed = *counts.get(&s).unwrap_or(&0) as f64 / n as f64;
            let expected = table.probability(&s);
            assert!(
                (observed - expected).abs() < 0.01,
                "{:?}: observed {observed}, expected {expected}",
                s
            );
        }
    }
}

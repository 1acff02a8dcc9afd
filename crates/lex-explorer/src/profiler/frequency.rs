//! Frequency counting shared by all profilers.
//!
//! Counts keep the order in which each distinct value was first seen, and
//! ranking uses a stable sort, so ties always resolve to first occurrence.

use crate::types::FrequencyEntry;
use std::collections::HashMap;
use std::hash::Hash;

/// Distinct values with their counts, in first-encountered order.
#[derive(Debug, Clone)]
pub(crate) struct FrequencyCounter<K> {
    order: Vec<K>,
    counts: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> FrequencyCounter<K> {
    pub(crate) fn new() -> Self {
        Self {
            order: Vec::new(),
            counts: HashMap::new(),
        }
    }

    pub(crate) fn add(&mut self, key: K) {
        match self.counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                self.order.push(key.clone());
                self.counts.insert(key, 1);
            }
        }
    }

    /// Number of distinct keys seen.
    pub(crate) fn distinct(&self) -> usize {
        self.order.len()
    }

    /// All keys by descending count; ties keep first-encountered order.
    pub(crate) fn ranked(&self) -> Vec<(&K, usize)> {
        let mut ranked: Vec<(&K, usize)> = self
            .order
            .iter()
            .map(|key| (key, self.counts.get(key).copied().unwrap_or(0)))
            .collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The most frequent key, first-encountered on ties.
    pub(crate) fn mode(&self) -> Option<&K> {
        let mut best: Option<(&K, usize)> = None;
        for key in &self.order {
            let count = self.counts.get(key).copied().unwrap_or(0);
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((key, count));
            }
        }
        best.map(|(key, _)| key)
    }

    /// Full ranked aggregation with keys rendered through `label`.
    pub(crate) fn entries(&self, label: impl Fn(&K) -> String) -> Vec<FrequencyEntry> {
        self.ranked()
            .into_iter()
            .map(|(key, count)| FrequencyEntry {
                value: label(key),
                count,
            })
            .collect()
    }

    /// The `k` most frequent keys; the rest are dropped, not folded into "other".
    pub(crate) fn top_k(&self, k: usize, label: impl Fn(&K) -> String) -> Vec<FrequencyEntry> {
        let mut entries = self.entries(label);
        entries.truncate(k);
        entries
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyCounter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = Self::new();
        for key in iter {
            counter.add(key);
        }
        counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn counter(values: &[&'static str]) -> FrequencyCounter<&'static str> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_ranked_descending_with_stable_ties() {
        let c = counter(&["b", "a", "c", "a", "b", "d"]);
        let ranked: Vec<_> = c.ranked().into_iter().map(|(k, n)| (*k, n)).collect();

        assert_eq!(ranked, vec![("b", 2), ("a", 2), ("c", 1), ("d", 1)]);
    }

    #[test]
    fn test_mode_prefers_first_encountered() {
        let c = counter(&["x", "y", "y", "x"]);
        assert_eq!(c.mode(), Some(&"x"));

        let c = counter(&["x", "y", "y"]);
        assert_eq!(c.mode(), Some(&"y"));
    }

    #[test]
    fn test_mode_empty() {
        let c: FrequencyCounter<&str> = FrequencyCounter::new();
        assert_eq!(c.mode(), None);
        assert_eq!(c.distinct(), 0);
    }

    #[test]
    fn test_top_k_truncates() {
        let c = counter(&["a", "b", "c", "a"]);
        let top = c.top_k(2, |k| k.to_string());

        assert_eq!(
            top,
            vec![
                FrequencyEntry {
                    value: "a".to_string(),
                    count: 2
                },
                FrequencyEntry {
                    value: "b".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_entries_is_non_increasing() {
        let c = counter(&["q", "r", "r", "s", "s", "s", "q"]);
        let entries = c.entries(|k| k.to_string());

        assert!(entries.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(entries.iter().map(|e| e.count).sum::<usize>(), 7);
    }
}

//! Encounter-ordered frequency counter.
//!
//! Ranking is a stable sort on the count, so keys with equal counts keep the
//! order in which they were first seen. Serializes as a JSON object in
//! encounter order.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone)]
pub struct Tally<K> {
    entries: Vec<(K, u64)>,
    index: HashMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        self.add_n(key, 1);
    }

    pub fn add_n(&mut self, key: K, n: u64) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 += n,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, n));
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map_or(0, |&pos| self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Entries in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, n)| (k, *n))
    }

    /// Entries by descending count; ties keep first-encounter order.
    pub fn ranked(&self) -> Vec<(&K, u64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The `n` highest-ranked entries, cloned.
    pub fn most_common(&self, n: usize) -> Vec<(K, u64)> {
        self.ranked()
            .into_iter()
            .take(n)
            .map(|(k, c)| (k.clone(), c))
            .collect()
    }
}

impl<K: PartialEq> PartialEq for Tally<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}

impl<K: Serialize> Serialize for Tally<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_is_stable_on_ties() {
        let tally: Tally<&str> = ["b", "a", "c", "a", "c", "d"].into_iter().collect();
        let ranked: Vec<_> = tally.ranked().into_iter().map(|(k, n)| (*k, n)).collect();
        assert_eq!(ranked, vec![("a", 2), ("c", 2), ("b", 1), ("d", 1)]);
    }

    #[test]
    fn test_get_and_total() {
        let mut tally = Tally::new();
        tally.add("x".to_string());
        tally.add_n("y".to_string(), 4);
        assert_eq!(tally.get("y"), 4);
        assert_eq!(tally.get("missing"), 0);
        assert_eq!(tally.total(), 5);
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn test_serializes_in_encounter_order() {
        let tally: Tally<&str> = ["z", "a", "z"].into_iter().collect();
        assert_eq!(serde_json::to_string(&tally).unwrap(), r#"{"z":2,"a":1}"#);
    }
}

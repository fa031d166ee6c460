//! First-seen numbering of distinct keys.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Assigns `1, 2, 3, ...` to keys in the order they are first seen.
///
/// Numbers are never reassigned: once a key has a number, every later lookup
/// returns the same one.
#[derive(Debug, Clone)]
pub struct StableEnumeration<K> {
    numbers: HashMap<K, usize>,
    order: Vec<K>,
}

impl<K: Eq + Hash + Clone> StableEnumeration<K> {
    pub fn new() -> Self {
        Self {
            numbers: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Number of `key`, assigning the next one if it has not been seen.
    pub fn number<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        if let Some(&num) = self.numbers.get(key) {
            return num;
        }
        let num = self.order.len() + 1;
        let owned = key.to_owned();
        self.numbers.insert(owned.clone(), num);
        self.order.push(owned);
        num
    }

    /// Number of `key` without assigning one.
    pub fn get<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.numbers.get(key).copied()
    }

    /// `(number, key)` pairs in number order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &K)> {
        self.order.iter().enumerate().map(|(i, k)| (i + 1, k))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<K: Eq + Hash + Clone> Default for StableEnumeration<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// One line of a method legend: the assigned number and the original name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodLegend {
    pub num: usize,
    pub method: String,
}

impl StableEnumeration<String> {
    /// The legend for this enumeration, in number order.
    pub fn legend(&self) -> Vec<MethodLegend> {
        self.entries()
            .map(|(num, method)| MethodLegend {
                num,
                method: method.clone(),
            })
            .collect()
    }
}

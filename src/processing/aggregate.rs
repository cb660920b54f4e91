// Aggregate operations for grouped retail records
// Author: Gabriel Demetrios Lafis

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use rust_decimal::Decimal;

use crate::data::Record;
use super::QueryError;

/// Represents an aggregation function over values of type `T`
pub trait Aggregate<T> {
    /// Running state, starting from `Default`
    type State: Default;

    /// Final value of the aggregation
    type Output;

    /// Get the name of the aggregation function
    fn name(&self) -> &str;

    /// Update the aggregation state with a new value
    ///
    /// Fails with `QueryError::Overflow` instead of wrapping or panicking.
    fn update(&self, state: &mut Self::State, value: T) -> Result<(), QueryError>;

    /// Finalize the aggregation; `None` when the result is undefined
    fn finalize(&self, state: Self::State) -> Option<Self::Output>;
}

/// Addition that reports overflow
pub trait CheckedSum: Sized {
    fn checked_sum(self, other: Self) -> Option<Self>;
}

impl CheckedSum for i64 {
    fn checked_sum(self, other: i64) -> Option<i64> {
        self.checked_add(other)
    }
}

impl CheckedSum for Decimal {
    fn checked_sum(self, other: Decimal) -> Option<Decimal> {
        self.checked_add(other)
    }
}

/// Number of distinct values
pub struct CountDistinct;

impl<T: Eq + Hash> Aggregate<T> for CountDistinct {
    type State = HashSet<T>;
    type Output = usize;

    fn name(&self) -> &str {
        "count_distinct"
    }

    fn update(&self, state: &mut Self::State, value: T) -> Result<(), QueryError> {
        state.insert(value);
        Ok(())
    }

    fn finalize(&self, state: Self::State) -> Option<usize> {
        Some(state.len())
    }
}

/// Sum of values
pub struct Sum;

impl<T: Default + Copy + CheckedSum> Aggregate<T> for Sum {
    type State = T;
    type Output = T;

    fn name(&self) -> &str {
        "sum"
    }

    fn update(&self, state: &mut T, value: T) -> Result<(), QueryError> {
        *state = state
            .checked_sum(value)
            .ok_or_else(|| QueryError::Overflow(Aggregate::<T>::name(self).to_string()))?;
        Ok(())
    }

    fn finalize(&self, state: T) -> Option<T> {
        Some(state)
    }
}

/// Arithmetic mean of decimal values
pub struct Mean;

impl Aggregate<Decimal> for Mean {
    type State = (Decimal, u64);
    type Output = Decimal;

    fn name(&self) -> &str {
        "mean"
    }

    fn update(&self, state: &mut Self::State, value: Decimal) -> Result<(), QueryError> {
        state.0 = state
            .0
            .checked_add(value)
            .ok_or_else(|| QueryError::Overflow(self.name().to_string()))?;
        state.1 += 1;
        Ok(())
    }

    fn finalize(&self, (sum, count): Self::State) -> Option<Decimal> {
        if count == 0 {
            None
        } else {
            sum.checked_div(Decimal::from(count))
        }
    }
}

/// Records partitioned by a key
///
/// Records whose key function returns `None` are left out of every group.
pub struct GroupBy<'a, K> {
    groups: HashMap<K, Vec<&'a Record>>,
}

impl<'a, K: Eq + Hash + Clone> GroupBy<'a, K> {
    /// Group the records by the given key
    pub fn new<I, F>(records: I, key: F) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
        F: Fn(&'a Record) -> Option<K>,
    {
        let mut groups: HashMap<K, Vec<&'a Record>> = HashMap::new();

        for record in records {
            if let Some(k) = key(record) {
                groups.entry(k).or_default().push(record);
            }
        }

        GroupBy { groups }
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Apply an aggregation to one value per record in every group
    pub fn aggregate<V, A, F>(&self, value: F, function: &A) -> Result<Vec<(K, A::Output)>, QueryError>
    where
        A: Aggregate<V>,
        F: Fn(&'a Record) -> V,
    {
        let mut results = Vec::with_capacity(self.groups.len());

        for (key, rows) in &self.groups {
            let mut state = A::State::default();
            for &row in rows {
                function.update(&mut state, value(row))?;
            }
            if let Some(output) = function.finalize(state) {
                results.push((key.clone(), output));
            }
        }

        Ok(results)
    }
}

/// Sort by value descending, ties by `tie_break`, and keep at most `limit`
pub fn rank_by<K, V, F>(mut groups: Vec<(K, V)>, limit: Option<usize>, tie_break: F) -> Vec<(K, V)>
where
    V: Ord,
    F: Fn(&K, &K) -> Ordering,
{
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| tie_break(&a.0, &b.0)));

    if let Some(limit) = limit {
        groups.truncate(limit);
    }

    groups
}

/// Top `limit` groups by value, ties in ascending key order
pub fn top_n<K: Ord, V: Ord>(groups: Vec<(K, V)>, limit: usize) -> Vec<(K, V)> {
    rank_by(groups, Some(limit), K::cmp)
}

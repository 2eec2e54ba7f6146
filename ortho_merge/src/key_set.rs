//! Key-set algebra across several key collections.
//!
//! Each function takes the key lists of two or more structures and derives a
//! flat list in first-occurrence order. The merge engine uses these to pick
//! which keys a recursion level visits when a [`KeySetMode`] other than
//! [`KeySetMode::All`] is active.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Which keys a merge level visits when several sources are merged.
///
/// When more than one of the corresponding options is set, the first in
/// declaration order after [`KeySetMode::All`] wins.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum KeySetMode {
    /// Every key of every source.
    #[default]
    All,
    /// Keys present in at least two sources.
    Common,
    /// Keys present in every source.
    Universal,
    /// Keys present in exactly one source.
    SkipCommon,
    /// Keys missing from at least one source.
    SkipUniversal,
}

impl KeySetMode {
    /// Derive the key list for `lists`, or `None` when the mode imposes no
    /// derived list. Modes only apply to two or more lists.
    #[must_use]
    pub fn derive<T, C>(self, lists: &[C]) -> Option<Vec<T>>
    where
        T: Eq + Hash + Clone,
        C: AsRef<[T]>,
    {
        if lists.len() < 2 {
            return None;
        }
        match self {
            Self::All => None,
            Self::Common => Some(in_multiple(lists)),
            Self::Universal => Some(in_all(lists)),
            Self::SkipCommon => Some(not_in_multiple(lists)),
            Self::SkipUniversal => Some(not_in_all(lists)),
        }
    }
}

/// Occurrence count of every distinct item, in first-occurrence order.
///
/// # Examples
///
/// ```
/// use ortho_merge::key_set::count_occurrences;
/// let counts = count_occurrences(&[vec![1, 2], vec![2, 3]]);
/// assert_eq!(counts, [(1, 1), (2, 2), (3, 1)]);
/// ```
#[must_use]
pub fn count_occurrences<T, C>(lists: &[C]) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    C: AsRef<[T]>,
{
    let mut order: Vec<T> = Vec::new();
    let mut counts: HashMap<T, usize> = HashMap::new();
    for item in lists.iter().flat_map(AsRef::as_ref) {
        let count = counts.entry(item.clone()).or_insert_with(|| {
            order.push(item.clone());
            0
        });
        *count += 1;
    }
    order
        .into_iter()
        .map(|item| {
            let count = counts.get(&item).copied().unwrap_or_default();
            (item, count)
        })
        .collect()
}

fn filter_counts<T, C>(lists: &[C], keep: impl Fn(usize) -> bool) -> Vec<T>
where
    T: Eq + Hash + Clone,
    C: AsRef<[T]>,
{
    count_occurrences(lists)
        .into_iter()
        .filter_map(|(item, count)| keep(count).then_some(item))
        .collect()
}

/// Items found in more than one list entry.
///
/// Counts are per occurrence, so an item repeated inside a single list also
/// qualifies; key lists never repeat a key.
#[must_use]
pub fn in_multiple<T, C>(lists: &[C]) -> Vec<T>
where
    T: Eq + Hash + Clone,
    C: AsRef<[T]>,
{
    filter_counts(lists, |count| count > 1)
}

/// Items found in every list, in the order of the first list.
#[must_use]
pub fn in_all<T, C>(lists: &[C]) -> Vec<T>
where
    T: Eq + Hash + Clone,
    C: AsRef<[T]>,
{
    let Some((first, rest)) = lists.split_first() else {
        return Vec::new();
    };
    let others: Vec<HashSet<&T>> = rest
        .iter()
        .map(|list| list.as_ref().iter().collect())
        .collect();
    first
        .as_ref()
        .iter()
        .filter(|item| others.iter().all(|set| set.contains(item)))
        .cloned()
        .collect()
}

/// Items found exactly once across all lists.
#[must_use]
pub fn not_in_multiple<T, C>(lists: &[C]) -> Vec<T>
where
    T: Eq + Hash + Clone,
    C: AsRef<[T]>,
{
    filter_counts(lists, |count| count == 1)
}

/// Items missing from at least one list.
#[must_use]
pub fn not_in_all<T, C>(lists: &[C]) -> Vec<T>
where
    T: Eq + Hash + Clone,
    C: AsRef<[T]>,
{
    let total = lists.len();
    filter_counts(lists, |count| count < total)
}

/// Items present in every list. Alias of [`in_all`] for flat sequences.
#[must_use]
pub fn intersection<T, C>(lists: &[C]) -> Vec<T>
where
    T: Eq + Hash + Clone,
    C: AsRef<[T]>,
{
    in_all(lists)
}

/// Items of the first list that appear in none of the others.
///
/// # Examples
///
/// ```
/// use ortho_merge::key_set::difference;
/// assert_eq!(difference(&[vec!["a", "b", "c"], vec!["b"], vec!["c", "d"]]), ["a"]);
/// ```
#[must_use]
pub fn difference<T, C>(lists: &[C]) -> Vec<T>
where
    T: Eq + Hash + Clone,
    C: AsRef<[T]>,
{
    let Some((first, rest)) = lists.split_first() else {
        return Vec::new();
    };
    let excluded: HashSet<&T> = rest.iter().flat_map(AsRef::as_ref).collect();
    first
        .as_ref()
        .iter()
        .filter(|item| !excluded.contains(item))
        .cloned()
        .collect()
}

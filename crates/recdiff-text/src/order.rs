//! Relative-order comparison of two name sequences.

use std::collections::HashSet;

/// Decide whether two name sequences preserve relative order.
///
/// Returns `true` iff the sequences are equal element-wise, or neither
/// contains duplicates and every pair of names common to both appears in
/// the same relative order. Duplicates in either sequence force `false`.
/// Sequences with no common elements are trivially consistent.
pub fn check_order_consistency(first: &[String], second: &[String]) -> bool {
    if first == second {
        return true;
    }
    if has_duplicates(first) || has_duplicates(second) {
        return false;
    }

    // With no duplicates, every common pair keeps its order exactly when
    // the common-element subsequences coincide.
    let in_first: HashSet<&str> = first.iter().map(String::as_str).collect();
    let in_second: HashSet<&str> = second.iter().map(String::as_str).collect();

    let common1: Vec<&str> = first
        .iter()
        .map(String::as_str)
        .filter(|name| in_second.contains(name))
        .collect();
    let common2: Vec<&str> = second
        .iter()
        .map(String::as_str)
        .filter(|name| in_first.contains(name))
        .collect();

    common1 == common2
}

fn has_duplicates(names: &[String]) -> bool {
    let mut seen = HashSet::with_capacity(names.len());
    names.iter().any(|name| !seen.insert(name.as_str()))
}

//! Mutation rate calculation
//!
//! Position-wise comparison of a target sequence against a reference of the
//! same alignment width, with optional exclusion of gap columns.

use thiserror::Error;

/// Alignment gap symbol.
pub const GAP: char = '-';

/// Errors raised by [`compute_mutation_rate`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MutationError {
    #[error("sequences must be of equal length (reference {reference}, target {target})")]
    UnequalLength { reference: usize, target: usize },
}

/// Outcome of comparing one target against the reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationStats {
    /// Comparable positions where target and reference differ
    pub mutations: usize,
    /// Positions counted toward the rate denominator
    pub comparable_positions: usize,
    /// `mutations / comparable_positions`, or 0.0 with no comparable positions
    pub rate: f64,
}

impl MutationStats {
    pub fn new(mutations: usize, comparable_positions: usize) -> Self {
        Self {
            mutations,
            comparable_positions,
            rate: Self::rate_for(mutations, comparable_positions),
        }
    }

    pub fn rate_for(mutations: usize, comparable_positions: usize) -> f64 {
        if comparable_positions == 0 {
            return 0.0;
        }
        mutations as f64 / comparable_positions as f64
    }
}

/// Compare `target` to `reference` column by column.
///
/// With `exclude_gaps`, any column holding [`GAP`] in either sequence is
/// skipped entirely. Every other column is comparable, and counts as a
/// mutation when the characters differ. Characters are compared literally,
/// so a gap against a residue is a mismatch when gaps are not excluded.
/// Case is not normalized here.
pub fn compute_mutation_rate(
    reference: &str,
    target: &str,
    exclude_gaps: bool,
) -> Result<MutationStats, MutationError> {
    let reference_len = reference.chars().count();
    let target_len = target.chars().count();
    if reference_len != target_len {
        return Err(MutationError::UnequalLength {
            reference: reference_len,
            target: target_len,
        });
    }

    let mut mutations = 0;
    let mut comparable = 0;

    for (r, t) in reference.chars().zip(target.chars()) {
        if exclude_gaps && (r == GAP || t == GAP) {
            continue;
        }
        comparable += 1;
        if r != t {
            mutations += 1;
        }
    }

    Ok(MutationStats::new(mutations, comparable))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn aligned_pair(max_len: usize) -> impl Strategy<Value = (String, String)> {
        let residue = prop_oneof![Just('A'), Just('C'), Just('G'), Just('T'), Just('-')];
        proptest::collection::vec((residue.clone(), residue), 0..=max_len).prop_map(|columns| {
            let (r, t): (String, String) = columns.into_iter().unzip();
            (r, t)
        })
    }

    proptest! {
        #[test]
        fn counts_every_mismatch_without_exclusion((r, t) in aligned_pair(64)) {
            let stats = compute_mutation_rate(&r, &t, false).unwrap();
            let expected = r.chars().zip(t.chars()).filter(|(a, b)| a != b).count();
            prop_assert_eq!(stats.mutations, expected);
            prop_assert_eq!(stats.comparable_positions, r.len());
        }

        #[test]
        fn gap_exclusion_restricts_columns((r, t) in aligned_pair(64)) {
            let stats = compute_mutation_rate(&r, &t, true).unwrap();
            let kept: Vec<(char, char)> = r.chars().zip(t.chars())
                .filter(|&(a, b)| a != GAP && b != GAP)
                .collect();
            prop_assert_eq!(stats.comparable_positions, kept.len());
            prop_assert_eq!(stats.mutations, kept.iter().filter(|(a, b)| a != b).count());
        }

        #[test]
        fn rate_in_unit_interval((r, t) in aligned_pair(64), exclude in any::<bool>()) {
            let stats = compute_mutation_rate(&r, &t, exclude).unwrap();
            prop_assert!(stats.rate >= 0.0 && stats.rate <= 1.0, "rate={} out of [0,1]", stats.rate);
            if stats.comparable_positions > 0 {
                let expected = stats.mutations as f64 / stats.comparable_positions as f64;
                prop_assert_eq!(stats.rate, expected);
            } else {
                prop_assert_eq!(stats.rate, 0.0);
            }
        }

        #[test]
        fn computation_is_deterministic((r, t) in aligned_pair(64), exclude in any::<bool>()) {
            let first = compute_mutation_rate(&r, &t, exclude).unwrap();
            let second = compute_mutation_rate(&r, &t, exclude).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn self_comparison_has_no_mutations((r, _t) in aligned_pair(64), exclude in any::<bool>()) {
            let stats = compute_mutation_rate(&r, &r, exclude).unwrap();
            prop_assert_eq!(stats.mutations, 0);
            let gaps = if exclude { r.chars().filter(|&c| c == GAP).count() } else { 0 };
            prop_assert_eq!(stats.comparable_positions, r.len() - gaps);
        }
    }
}

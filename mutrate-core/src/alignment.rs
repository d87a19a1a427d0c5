//! Alignment-wide validation and per-sequence comparison against a reference

use rayon::prelude::*;
use thiserror::Error;

use crate::fasta::SequenceCollection;
use crate::mutation::{compute_mutation_rate, MutationError};
use crate::report::MutationRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("alignment contains no sequences")]
    Empty,
    #[error("sequences have different lengths: {lengths:?}")]
    Mismatch { lengths: Vec<usize> },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("reference sequence not found: {0}")]
    ReferenceNotFound(String),
    #[error("input is not aligned: {0}")]
    Alignment(#[from] AlignmentError),
    #[error("{sequence_id}: {source}")]
    Mutation {
        sequence_id: String,
        #[source]
        source: MutationError,
    },
}

/// Width shared by every sequence in the collection.
pub fn alignment_width(collection: &SequenceCollection) -> Result<usize, AlignmentError> {
    let lengths = collection.distinct_lengths();
    match lengths.len() {
        0 => Err(AlignmentError::Empty),
        1 => Ok(lengths.into_iter().next().unwrap_or_default()),
        _ => Err(AlignmentError::Mismatch {
            lengths: lengths.into_iter().collect(),
        }),
    }
}

/// Compare every sequence in `collection`, the reference included, against
/// the sequence named `reference_id`.
///
/// The reference is looked up first, then the collection is checked to be a
/// true alignment. Records come back in collection order.
pub fn compare_all(
    collection: &SequenceCollection,
    reference_id: &str,
    exclude_gaps: bool,
) -> Result<Vec<MutationRecord>, AnalysisError> {
    let reference = collection.get(reference_id).ok_or_else(|| {
        log::debug!("Known ids: {}", collection.ids().collect::<Vec<_>>().join(", "));
        AnalysisError::ReferenceNotFound(reference_id.to_string())
    })?;

    let width = alignment_width(collection)?;
    log::info!(
        "Comparing {} sequences of width {} against '{}' (exclude gaps: {})",
        collection.len(),
        width,
        reference_id,
        exclude_gaps
    );

    collection
        .entries()
        .par_iter()
        .map(|(id, seq)| {
            compute_mutation_rate(reference, seq, exclude_gaps)
                .map(|stats| MutationRecord::new(id.as_str(), stats))
                .map_err(|source| AnalysisError::Mutation {
                    sequence_id: id.clone(),
                    source,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(records: &[(&str, &str)]) -> SequenceCollection {
        records
            .iter()
            .map(|(id, seq)| (id.to_string(), seq.to_string()))
            .collect()
    }

    #[test]
    fn test_alignment_width() {
        let seqs = collection(&[("a", "ACGT"), ("b", "A-GT")]);
        assert_eq!(alignment_width(&seqs), Ok(4));
    }

    #[test]
    fn test_alignment_width_mismatch() {
        let seqs = collection(&[("a", "ACGT"), ("b", "ACG"), ("c", "ACGTA")]);
        assert_eq!(
            alignment_width(&seqs),
            Err(AlignmentError::Mismatch { lengths: vec![3, 4, 5] })
        );
    }

    #[test]
    fn test_alignment_width_empty() {
        assert_eq!(alignment_width(&SequenceCollection::new()), Err(AlignmentError::Empty));
    }

    #[test]
    fn test_compare_all_in_collection_order() {
        let seqs = collection(&[("q1", "AGGT"), ("ref", "ACGT"), ("q2", "A-GA")]);
        let records = compare_all(&seqs, "ref", false).unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.sequence_id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "ref", "q2"]);
        assert_eq!((records[0].mutations, records[0].comparable_positions), (1, 4));
        assert_eq!((records[1].mutations, records[1].comparable_positions), (0, 4));
        assert_eq!((records[2].mutations, records[2].comparable_positions), (2, 4));
    }

    #[test]
    fn test_compare_all_excluding_gaps() {
        let seqs = collection(&[("ref", "AC-T"), ("q", "AG-T")]);
        let records = compare_all(&seqs, "ref", true).unwrap();
        assert_eq!(records[0].comparable_positions, 3);
        assert_eq!(records[1].mutations, 1);
        assert_eq!(records[1].to_csv_row(), "q,1,3,0.333333");
    }

    #[test]
    fn test_missing_reference_checked_before_alignment() {
        let seqs = collection(&[("a", "ACGT"), ("b", "AC")]);
        assert_eq!(
            compare_all(&seqs, "nope", false),
            Err(AnalysisError::ReferenceNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_unaligned_collection_rejected() {
        let seqs = collection(&[("a", "ACGT"), ("b", "AC")]);
        let err = compare_all(&seqs, "a", false).unwrap_err();
        assert!(matches!(err, AnalysisError::Alignment(AlignmentError::Mismatch { .. })));
    }
}

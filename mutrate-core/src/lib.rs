//! mutrate core library
//!
//! Aligned FASTA loading, alignment validation, and per-sequence mutation
//! rates against a chosen reference.

pub mod fasta;
pub mod mutation;
pub mod alignment;
pub mod report;

// Re-export commonly used types and functions
pub use fasta::{read_alignment, parse_reader, FastaError, SequenceCollection};
pub use mutation::{compute_mutation_rate, MutationError, MutationStats, GAP};
pub use alignment::{alignment_width, compare_all, AlignmentError, AnalysisError};
pub use report::{render_csv, MutationRecord, CSV_HEADER};

/// Version information for the mutrate core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Mutation records and their CSV rendering

use crate::mutation::MutationStats;

/// Header row of the CSV report.
pub const CSV_HEADER: &str = "sequence_id,mutations,comparable_positions,mutation_rate";

/// Result of comparing one sequence against the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRecord {
    pub sequence_id: String,
    pub mutations: usize,
    pub comparable_positions: usize,
    pub mutation_rate: f64,
}

impl MutationRecord {
    pub fn new(sequence_id: impl Into<String>, stats: MutationStats) -> Self {
        Self {
            sequence_id: sequence_id.into(),
            mutations: stats.mutations,
            comparable_positions: stats.comparable_positions,
            mutation_rate: stats.rate,
        }
    }

    /// One CSV row, rate in fixed point with six decimals. Ids are not quoted.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{:.6}",
            self.sequence_id, self.mutations, self.comparable_positions, self.mutation_rate
        )
    }
}

/// Render the full report: header plus one newline-terminated row per record.
pub fn render_csv(records: &[MutationRecord]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + records.len() * 32);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&record.to_csv_row());
        out.push('\n');
    }
    out
}

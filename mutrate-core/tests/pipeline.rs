use mutrate_core::{compare_all, read_alignment, render_csv, AlignmentError, AnalysisError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_fasta(text: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("create temp fasta");
    f.write_all(text.as_bytes()).unwrap();
    f
}

#[test]
fn fasta_to_csv_report() {
    let fasta = write_fasta(">ref\nACGT\n>q1\nagGT\n\n>q2\nA-\n-T\n");

    let seqs = read_alignment(fasta.path()).expect("read alignment");
    let records = compare_all(&seqs, "ref", false).expect("compare");

    assert_eq!(
        render_csv(&records),
        "sequence_id,mutations,comparable_positions,mutation_rate\n\
         ref,0,4,0.000000\n\
         q1,1,4,0.250000\n\
         q2,2,4,0.500000\n"
    );
}

#[test]
fn fasta_to_csv_report_excluding_gaps() {
    let fasta = write_fasta(">ref\nAC-T\n>q\nAG-T\n>gappy\n----\n");

    let seqs = read_alignment(fasta.path()).expect("read alignment");
    let records = compare_all(&seqs, "ref", true).expect("compare");

    assert_eq!(
        render_csv(&records),
        "sequence_id,mutations,comparable_positions,mutation_rate\n\
         ref,0,3,0.000000\n\
         q,1,3,0.333333\n\
         gappy,0,0,0.000000\n"
    );
}

#[test]
fn duplicate_ids_report_once_with_last_content() {
    let fasta = write_fasta(">X\nAAAA\n>ref\nAAAA\n>X\nAACC\n");

    let seqs = read_alignment(fasta.path()).expect("read alignment");
    let records = compare_all(&seqs, "ref", false).expect("compare");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].sequence_id, "X");
    assert_eq!(records[0].mutations, 2);
}

#[test]
fn unaligned_input_is_rejected() {
    let fasta = write_fasta(">ref\nACGT\n>short\nACG\n");

    let seqs = read_alignment(fasta.path()).expect("read alignment");
    let err = compare_all(&seqs, "ref", false).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::Alignment(AlignmentError::Mismatch { lengths: vec![3, 4] })
    );
}

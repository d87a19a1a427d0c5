//! Aligned FASTA loading
//!
//! Reads header-marked records into an insertion-ordered id -> sequence map.
//! Residues are uppercased when a record is committed. No length checks are
//! made here; see [`crate::alignment`] for that.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use thiserror::Error;

/// Marker character that opens a record header line.
pub const HEADER_MARKER: char = '>';

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FastaError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Ordered mapping from sequence identifier to sequence content.
///
/// Iteration follows first-insertion order. Re-inserting an existing id
/// replaces its sequence but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceCollection {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl SequenceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a sequence. Returns the previous sequence for `id`, if any.
    pub fn insert(&mut self, id: String, sequence: String) -> Option<String> {
        match self.index.get(&id) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, sequence)),
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push((id, sequence));
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.index
            .get(id)
            .and_then(|&slot| self.entries.get(slot))
            .map(|(_, seq)| seq.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub(crate) fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Distinct sequence lengths, counted in characters.
    pub fn distinct_lengths(&self) -> BTreeSet<usize> {
        self.entries
            .iter()
            .map(|(_, seq)| seq.chars().count())
            .collect()
    }
}

impl FromIterator<(String, String)> for SequenceCollection {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut collection = Self::new();
        for (id, seq) in iter {
            collection.insert(id, seq);
        }
        collection
    }
}

/// Load an aligned FASTA file. Paths ending in `.gz` are decompressed on the fly.
pub fn read_alignment<P: AsRef<Path>>(path: P) -> Result<SequenceCollection, FastaError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| FastaError::io(path, e))?;

    let parsed = if path.to_string_lossy().ends_with(".gz") {
        log::debug!("Reading gzip-compressed alignment: {}", path.display());
        parse_reader(BufReader::new(GzDecoder::new(file)))
    } else {
        parse_reader(BufReader::new(file))
    };
    let collection = parsed.map_err(|e| FastaError::io(path, e))?;

    log::info!("Loaded {} sequences from {}", collection.len(), path.display());
    Ok(collection)
}

/// Parse FASTA text from any buffered reader.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Input must be UTF-8; anything
/// else fails with [`std::io::ErrorKind::InvalidData`].
pub fn parse_reader<R: BufRead>(mut reader: R) -> std::io::Result<SequenceCollection> {
    let mut collection = SequenceCollection::new();
    let mut current_id = String::new();
    let mut chunks = String::new();
    let mut orphan_lines = 0usize;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let text = std::str::from_utf8(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        for line in text.split('\r') {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix(HEADER_MARKER) {
                commit(&mut collection, &current_id, &chunks);
                current_id = header.trim().to_string();
                chunks.clear();
            } else {
                if current_id.is_empty() {
                    orphan_lines += 1;
                }
                chunks.push_str(line);
            }
        }
    }
    commit(&mut collection, &current_id, &chunks);

    if orphan_lines > 0 {
        log::debug!("Discarded {} sequence lines with no usable header", orphan_lines);
    }

    Ok(collection)
}

fn commit(collection: &mut SequenceCollection, id: &str, chunks: &str) {
    // Records without an identifier have nothing to key them by.
    if id.is_empty() {
        return;
    }
    let sequence = chunks.to_uppercase();
    log::trace!("Record '{}': {} residues", id, sequence.chars().count());
    if collection.insert(id.to_string(), sequence).is_some() {
        log::warn!("Duplicate sequence id '{}': later record replaces earlier one", id);
    }
}

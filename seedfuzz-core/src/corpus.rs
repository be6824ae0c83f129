//! Seed corpus.
//!
//! The corpus is an ordered, append-only set of [`ByteSequence`] seeds.
//! Membership is keyed by [`ByteSequence::digest`], so registering a seed
//! that is already present changes nothing.
//!
//! ## On-disk entries
//!
//! Each entry is a small JSON document named after the hex digest of its
//! input:
//!
//! ```json
//! {"format":"seedfuzz-corpus","version":1,"input":"78"}
//! ```
//!
//! An absent input is stored as `"input":null`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{HarnessError, Result};
use crate::input::{ByteSequence, InputDigest};

/// Format marker written into every corpus entry.
pub const CORPUS_FORMAT: &str = "seedfuzz-corpus";

/// Current corpus entry version.
pub const CORPUS_VERSION: u32 = 1;

/// File extension of corpus entries.
pub const CORPUS_EXTENSION: &str = "json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CorpusEntry {
    format: String,
    version: u32,
    input: ByteSequence,
}

#[derive(Debug, Clone, Default)]
pub struct SeedCorpus {
    seeds: Vec<ByteSequence>,
    index: HashSet<InputDigest>,
}

impl SeedCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a seed. Returns `false` if an identical seed was already present.
    pub fn register(&mut self, seed: ByteSequence) -> bool {
        if !self.index.insert(seed.digest()) {
            debug!(input = %seed, "Seed already registered");
            return false;
        }
        self.seeds.push(seed);
        true
    }

    pub fn contains(&self, seed: &ByteSequence) -> bool {
        self.index.contains(&seed.digest())
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Seeds in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ByteSequence> {
        self.seeds.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ByteSequence> {
        self.seeds.get(index)
    }

    /// Register every entry found in `dir`, in file-name order.
    ///
    /// Returns the number of seeds that were new. A missing directory is
    /// treated as empty; a malformed entry is an error.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        if !dir.exists() {
            debug!(path = %dir.display(), "Corpus directory does not exist");
            return Ok(0);
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(|e| HarnessError::io(dir, e))? {
            let path = entry.map_err(|e| HarnessError::io(dir, e))?.path();
            if path.extension().and_then(|e| e.to_str()) == Some(CORPUS_EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut added = 0;
        for path in paths {
            if self.register(read_entry(&path)?) {
                added += 1;
            }
        }

        debug!(path = %dir.display(), added, total = self.len(), "Loaded corpus directory");
        Ok(added)
    }
}

impl FromIterator<ByteSequence> for SeedCorpus {
    fn from_iter<I: IntoIterator<Item = ByteSequence>>(iter: I) -> Self {
        let mut corpus = Self::new();
        for seed in iter {
            corpus.register(seed);
        }
        corpus
    }
}

/// Encode one input as a corpus entry document.
pub fn encode_entry(input: &ByteSequence) -> Result<Vec<u8>> {
    let entry = CorpusEntry {
        format: CORPUS_FORMAT.to_string(),
        version: CORPUS_VERSION,
        input: input.clone(),
    };
    serde_json::to_vec_pretty(&entry).map_err(|e| HarnessError::CorpusFormat(e.to_string()))
}

/// Decode a corpus entry document.
pub fn decode_entry(data: &[u8]) -> Result<ByteSequence> {
    let entry: CorpusEntry =
        serde_json::from_slice(data).map_err(|e| HarnessError::CorpusFormat(e.to_string()))?;

    if entry.format != CORPUS_FORMAT {
        return Err(HarnessError::CorpusFormat(format!(
            "unexpected format marker {:?}",
            entry.format
        )));
    }
    if entry.version != CORPUS_VERSION {
        return Err(HarnessError::CorpusFormat(format!(
            "unsupported version {} (expected {CORPUS_VERSION})",
            entry.version
        )));
    }

    Ok(entry.input)
}

/// Read a single corpus entry file.
pub fn read_entry(path: &Path) -> Result<ByteSequence> {
    let data = std::fs::read(path).map_err(|e| HarnessError::io(path, e))?;
    decode_entry(&data).map_err(|e| match e {
        HarnessError::CorpusFormat(msg) => {
            HarnessError::CorpusFormat(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

/// Write `input` into `dir` as `<digest>.json`, creating `dir` if needed.
///
/// Writing the same input twice targets the same file.
pub fn write_entry(dir: &Path, input: &ByteSequence) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| HarnessError::io(dir, e))?;

    let path = dir.join(format!("{}.{CORPUS_EXTENSION}", input.digest_hex()));
    if path.exists() {
        warn!(path = %path.display(), "Corpus entry already exists, overwriting");
    }

    std::fs::write(&path, encode_entry(input)?).map_err(|e| HarnessError::io(&path, e))?;
    Ok(path)
}

//! Mutation engine.
//!
//! Derives new candidates from corpus seeds. The engine is deterministic:
//! the same RNG seed and corpus produce the same candidate stream, which is
//! what makes a reported campaign reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::corpus::SeedCorpus;
use crate::input::ByteSequence;

/// Boundary values that tend to trip length and sign handling.
const INTERESTING_BYTES: [u8; 6] = [0x00, 0x01, 0x7f, 0x80, 0xfe, 0xff];

/// Maximum number of stacked mutations per candidate.
const MAX_STACK: u32 = 4;

/// Length of sequences grown from an absent or empty parent.
const MAX_FRESH_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    FlipBit,
    OverwriteRandom,
    OverwriteInteresting,
    Insert,
    Remove,
    DuplicateChunk,
    Truncate,
    Splice,
}

const MUTATIONS: [Mutation; 8] = [
    Mutation::FlipBit,
    Mutation::OverwriteRandom,
    Mutation::OverwriteInteresting,
    Mutation::Insert,
    Mutation::Remove,
    Mutation::DuplicateChunk,
    Mutation::Truncate,
    Mutation::Splice,
];

pub struct Mutator {
    rng: StdRng,
    max_len: usize,
}

impl Mutator {
    pub fn new(seed: u64, max_len: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_len,
        }
    }

    /// Pick a parent from `corpus` and mutate it.
    ///
    /// An empty corpus behaves like a corpus holding only the empty
    /// sequence.
    pub fn next_candidate(&mut self, corpus: &SeedCorpus) -> ByteSequence {
        let parent = if corpus.is_empty() {
            ByteSequence::empty()
        } else {
            let index = self.rng.random_range(0..corpus.len());
            corpus.get(index).cloned().unwrap_or_default()
        };
        self.mutate(&parent, corpus)
    }

    /// Derive one candidate from `parent`. Never longer than `max_len`.
    pub fn mutate(&mut self, parent: &ByteSequence, corpus: &SeedCorpus) -> ByteSequence {
        if parent.is_absent() && self.rng.random_bool(0.25) {
            return ByteSequence::absent();
        }

        let mut bytes = parent.as_bytes().to_vec();
        bytes.truncate(self.max_len);

        if bytes.is_empty() {
            let len = self.rng.random_range(0..=MAX_FRESH_LEN.min(self.max_len));
            bytes = (0..len).map(|_| self.rng.random::<u8>()).collect();
            return ByteSequence::new(bytes);
        }

        let stack = self.rng.random_range(1..=MAX_STACK);
        for _ in 0..stack {
            let mutation = MUTATIONS[self.rng.random_range(0..MUTATIONS.len())];
            self.apply(mutation, &mut bytes, corpus);
        }

        bytes.truncate(self.max_len);
        ByteSequence::new(bytes)
    }

    fn apply(&mut self, mutation: Mutation, bytes: &mut Vec<u8>, corpus: &SeedCorpus) {
        match mutation {
            Mutation::FlipBit => {
                if let Some(i) = self.pick_index(bytes.len()) {
                    bytes[i] ^= 1 << self.rng.random_range(0..8u32);
                }
            }
            Mutation::OverwriteRandom => {
                if let Some(i) = self.pick_index(bytes.len()) {
                    bytes[i] = self.rng.random();
                }
            }
            Mutation::OverwriteInteresting => {
                if let Some(i) = self.pick_index(bytes.len()) {
                    bytes[i] = INTERESTING_BYTES[self.rng.random_range(0..INTERESTING_BYTES.len())];
                }
            }
            Mutation::Insert => {
                if bytes.len() < self.max_len {
                    let at = self.rng.random_range(0..=bytes.len());
                    bytes.insert(at, self.rng.random());
                }
            }
            Mutation::Remove => {
                if let Some(i) = self.pick_index(bytes.len()) {
                    bytes.remove(i);
                }
            }
            Mutation::DuplicateChunk => {
                if bytes.is_empty() || bytes.len() >= self.max_len {
                    return;
                }
                let start = self.rng.random_range(0..bytes.len());
                let room = self.max_len - bytes.len();
                let len = self.rng.random_range(1..=bytes.len() - start).min(room);
                let chunk = bytes[start..start + len].to_vec();
                let at = self.rng.random_range(0..=bytes.len());
                bytes.splice(at..at, chunk);
            }
            Mutation::Truncate => {
                if !bytes.is_empty() {
                    let len = self.rng.random_range(0..bytes.len());
                    bytes.truncate(len);
                }
            }
            Mutation::Splice => {
                let Some(other) = self
                    .pick_index(corpus.len())
                    .and_then(|i| corpus.get(i))
                    .filter(|s| !s.is_empty())
                else {
                    return;
                };
                let other = other.as_bytes();
                let keep = self.rng.random_range(0..=bytes.len());
                let from = self.rng.random_range(0..other.len());
                bytes.truncate(keep);
                bytes.extend_from_slice(&other[from..]);
            }
        }
    }

    fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> SeedCorpus {
        [
            ByteSequence::absent(),
            ByteSequence::empty(),
            ByteSequence::from(b"x"),
            ByteSequence::from(b"hello, corpus"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_same_seed_same_stream() {
        let corpus = corpus();
        let mut a = Mutator::new(7, 64);
        let mut b = Mutator::new(7, 64);

        for _ in 0..500 {
            assert_eq!(a.next_candidate(&corpus), b.next_candidate(&corpus));
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let corpus = corpus();
        let mut a = Mutator::new(1, 64);
        let mut b = Mutator::new(2, 64);

        let stream_a: Vec<_> = (0..50).map(|_| a.next_candidate(&corpus)).collect();
        let stream_b: Vec<_> = (0..50).map(|_| b.next_candidate(&corpus)).collect();
        assert_ne!(stream_a, stream_b);
    }

    #[test]
    fn test_respects_max_len() {
        let corpus: SeedCorpus = [ByteSequence::new(vec![0xAB; 100])].into_iter().collect();
        let mut mutator = Mutator::new(42, 8);

        for _ in 0..1_000 {
            assert!(mutator.next_candidate(&corpus).len() <= 8);
        }
    }

    #[test]
    fn test_zero_max_len_only_yields_empty_or_absent() {
        let mut mutator = Mutator::new(3, 0);
        for _ in 0..200 {
            assert!(mutator.next_candidate(&corpus()).is_empty());
        }
    }

    #[test]
    fn test_empty_corpus_still_produces_candidates() {
        let mut mutator = Mutator::new(9, 32);
        let produced: Vec<_> = (0..100)
            .map(|_| mutator.next_candidate(&SeedCorpus::new()))
            .collect();
        assert!(produced.iter().any(|c| !c.is_empty()));
    }

    #[test]
    fn test_mutation_changes_input() {
        let corpus = corpus();
        let parent = ByteSequence::from(b"hello, corpus");
        let mut mutator = Mutator::new(11, 64);

        let changed = (0..100)
            .map(|_| mutator.mutate(&parent, &corpus))
            .filter(|c| *c != parent)
            .count();
        assert!(changed > 50, "only {changed} of 100 mutations changed input");
    }
}

//! Candidate inputs.
//!
//! A [`ByteSequence`] is either absent or a (possibly empty) run of bytes.
//! The two are distinct values: an absent sequence and an empty sequence
//! are separate seeds and hash to separate digests.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

/// Digest used to identify a byte sequence inside a corpus.
pub type InputDigest = [u8; 32];

const TAG_ABSENT: u8 = 0x00;
const TAG_PRESENT: u8 = 0x01;

/// A candidate input for a fuzz trial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ByteSequence(#[serde(with = "hex_opt")] Option<Vec<u8>>);

impl ByteSequence {
    /// The absent (null) sequence.
    pub const fn absent() -> Self {
        Self(None)
    }

    /// A present sequence with no bytes.
    pub const fn empty() -> Self {
        Self(Some(Vec::new()))
    }

    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Some(bytes))
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Borrow the bytes, keeping absent and empty apart.
    pub fn as_option(&self) -> Option<&[u8]> {
        self.0.as_deref()
    }

    /// Borrow the bytes, treating absent as empty.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_deref().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// SHA3-256 over a presence tag followed by the bytes.
    pub fn digest(&self) -> InputDigest {
        let mut hasher = Sha3_256::new();
        match &self.0 {
            None => hasher.update([TAG_ABSENT]),
            Some(bytes) => {
                hasher.update([TAG_PRESENT]);
                hasher.update(bytes);
            }
        }

        let result = hasher.finalize();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&result);
        digest
    }

    /// Hex digest, used as the corpus entry file name.
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest())
    }

    /// Render the input as Rust source that rebuilds it, so a failing input
    /// can be pasted back into a harness definition as a literal seed.
    pub fn to_seed_literal(&self) -> String {
        match &self.0 {
            None => "ByteSequence::absent()".to_string(),
            Some(bytes) if bytes.is_empty() => "ByteSequence::empty()".to_string(),
            Some(bytes) => {
                let escaped: String = bytes
                    .iter()
                    .flat_map(|b| std::ascii::escape_default(*b))
                    .map(char::from)
                    .collect();
                format!("ByteSequence::from(b\"{escaped}\")")
            }
        }
    }
}

impl std::fmt::Display for ByteSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            None => write!(f, "<absent>"),
            Some(bytes) if bytes.is_empty() => write!(f, "<empty>"),
            Some(bytes) => write!(f, "{}", hex::encode(bytes)),
        }
    }
}

impl From<Vec<u8>> for ByteSequence {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for ByteSequence {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for ByteSequence {
    fn from(bytes: &[u8; N]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl From<Option<Vec<u8>>> for ByteSequence {
    fn from(bytes: Option<Vec<u8>>) -> Self {
        Self(bytes)
    }
}

mod hex_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => serializer.serialize_some(&hex::encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|h| hex::decode(h).map_err(serde::de::Error::custom))
            .transpose()
    }
}

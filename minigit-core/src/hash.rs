use crate::error::Result;
use crate::fs;
use std::fmt;
use std::path::Path;

#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({})", self.to_hex())
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

pub trait ContentHasher: Send + Sync {
    fn digest(&self, bytes: &[u8]) -> ContentDigest;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Hasher;

impl ContentHasher for Sha256Hasher {
    fn digest(&self, bytes: &[u8]) -> ContentDigest {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        ContentDigest::from_bytes(hasher.finalize().into())
    }

    fn name(&self) -> &'static str {
        "sha256"
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Blake3Hasher;

impl ContentHasher for Blake3Hasher {
    fn digest(&self, bytes: &[u8]) -> ContentDigest {
        ContentDigest::from_bytes(*blake3::hash(bytes).as_bytes())
    }

    fn name(&self) -> &'static str {
        "blake3"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sha256" => Some(HashAlgorithm::Sha256),
            "blake3" => Some(HashAlgorithm::Blake3),
            _ => None,
        }
    }

    pub fn hasher(&self) -> Box<dyn ContentHasher> {
        match self {
            HashAlgorithm::Sha256 => Box::new(Sha256Hasher),
            HashAlgorithm::Blake3 => Box::new(Blake3Hasher),
        }
    }
}

pub fn digest_file(hasher: &dyn ContentHasher, path: &Path) -> Result<ContentDigest> {
    let bytes = fs::read_all_bytes(path)?;
    Ok(hasher.digest(&bytes))
}

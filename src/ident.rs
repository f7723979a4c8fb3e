//! Document identifiers.
//!
//! Every acquisition gets a fresh [`DocumentId`], used as the base filename of
//! both the content blob and its `.meta.json` sidecar.
//!
//! ## Format
//! - 36 characters, lowercase hex in 8-4-4-4-12 hyphenated groups
//! - version nibble `4`, RFC 4122 variant bits `10`
//! - example: `6f1c2a4e-9b3d-4c58-a0e7-1d2f3b4c5d6e`
//!
//! Only the 122 random bits matter for uniqueness; the fixed bits keep ids
//! visually consistent with ordinary v4 UUIDs.
//!
//! Generation goes through the [`IdGenerator`] trait so tests can swap in a
//! deterministic source.

use std::fmt;
use uuid::Uuid;

use crate::error::{AcquireError, Result};

/// A hyphenated, lowercase, version-4-shaped identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Builds an id from 16 random bytes, forcing the version and variant bits.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Validates an externally supplied id.
    ///
    /// Only the canonical hyphenated lowercase form is accepted; braced,
    /// uppercase, or simple (unhyphenated) forms are rejected so that an id
    /// always maps to exactly one filename.
    pub fn parse(input: &str) -> Result<Self> {
        if !Self::is_canonical(input) {
            return Err(AcquireError::InvalidId(input.to_string()));
        }
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|_| AcquireError::InvalidId(input.to_string()))
    }

    /// Syntactic check for the 8-4-4-4-12 lowercase hex layout.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 36
            && input.char_indices().all(|(i, c)| match i {
                8 | 13 | 18 | 23 => c == '-',
                _ => matches!(c, '0'..='9' | 'a'..='f'),
            })
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Source of fresh document identifiers.
pub trait IdGenerator {
    /// Returns a new identifier.
    ///
    /// # Errors
    ///
    /// [`AcquireError::Entropy`] if randomness is unavailable. That error is
    /// fatal: callers must abort the acquisition and must not substitute a
    /// weaker identifier.
    fn generate(&self) -> Result<DocumentId>;
}

/// Default generator backed by the operating system entropy source.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> Result<DocumentId> {
        let mut bytes = [0u8; 16];
        getrandom::getrandom(&mut bytes).map_err(AcquireError::Entropy)?;
        Ok(DocumentId::from_random_bytes(bytes))
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn generate(&self) -> Result<DocumentId> {
        (**self).generate()
    }
}

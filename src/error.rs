//! Error types for curve, ring-signature and stealth operations.

use thiserror::Error;

/// Errors that can occur in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Bytes or coordinates do not describe a point on the curve.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Secret key outside of `[1, N)`.
    #[error("Invalid secret key: must be in [1, N)")]
    InvalidSecret,

    /// The entropy source could not be read.
    #[error("Randomness failure: {0}")]
    RandomnessFailure(String),

    /// Response list has the wrong length or holds out-of-range values.
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    /// A ring needs at least one public key.
    #[error("Ring is empty")]
    EmptyRing,

    /// Signer index does not address a ring member.
    #[error("Signer index {index} is out of range for ring of size {size}")]
    SignerOutOfRange { index: usize, size: usize },

    /// The private key does not belong to the ring member it claims.
    #[error("Private key does not match ring member {0}")]
    KeyMismatch(usize),

    /// No ring member corresponds to the private key.
    #[error("Public key is not a member of the ring")]
    KeyNotInRing,

    /// Textual integer could not be parsed.
    #[error("Invalid integer: {0}")]
    InvalidInteger(String),

    /// Rejection sampling was asked for an empty interval.
    #[error("Sampling bound must be at least 2")]
    EmptyRange,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

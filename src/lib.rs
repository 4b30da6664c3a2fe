//! Linkable ring signatures and dual-key stealth addresses over BN254 G1.

mod backend;
pub mod config;
pub mod encoding;
pub mod error;
pub mod group;
pub mod hash;
pub mod keygen;
pub mod params;
pub mod randutil;
pub mod ringsig;
pub mod stealth;
pub mod types;



pub use config::{Config, ConfigError};
pub use error::{Error, Result};
pub use group::{CurvePoint, Scalar};
pub use hash::MessageDigest;
pub use keygen::{derive_public_key, generate_keypair, is_valid_secret, KeyPair, SecretBound};
pub use ringsig::{is_linked, sign, sign_all, verify, RingSigner};
pub use stealth::{derive_session, derive_shared_secret, stealth_priv_derive, stealth_pub_derive};
pub use types::{
    InputData, PrivateKeys, PrivateStealthAddress, Ring, RingSignature, StealthAddress,
    StealthSession,
};

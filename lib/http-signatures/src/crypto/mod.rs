//!
//! Key handling for HTTP signatures
//!
//! Keys come in as PEM documents and are backed by `ring`. Signatures are exchanged Base64-encoded.
//!

mod sign;
mod verify;

pub mod parse;

pub use self::parse::{SigningKey as KeyPair, private_key, public_key};
pub use self::sign::{SigningKey, sign};
pub use self::verify::{VerifyError, verify};

//!
//! Implementation of the cavage HTTP signature draft
//!
//! <https://datatracker.ietf.org/doc/html/draft-cavage-http-signatures-12>
//!

use std::borrow::Cow;

mod parse;
mod serialise;

pub mod signature_string;

pub use self::parse::{ParseError, parse};
pub use self::serialise::{serialise, write_quoted};

/// Algorithm name for signatures whose algorithm is derived from the key
///
/// The only one allowed to sign the `(created)` and `(expires)` pseudo-headers
pub const HS2019: &str = "hs2019";

/// Parsed or to-be-serialised cavage signature header
#[derive(Clone, Debug)]
pub struct SignatureHeader<'a, I, S = &'a str> {
    /// Identifier of the key that created the signature
    ///
    /// Owned only if the parsed value contained escape sequences
    pub key_id: Cow<'a, str>,

    /// Algorithm name, as advertised by the signer
    pub algorithm: Option<&'a str>,

    /// Names of the signed components, in signing order
    pub headers: I,

    /// The encoded signature
    pub signature: S,

    /// Creation timestamp in seconds since the UNIX epoch
    pub created: Option<u64>,

    /// Expiry timestamp in seconds since the UNIX epoch
    pub expires: Option<u64>,
}

impl<'a, I, S> SignatureHeader<'a, I, S> {
    /// Replace the signature slot, keeping everything else
    #[inline]
    pub fn with_signature<T>(self, signature: T) -> SignatureHeader<'a, I, T> {
        SignatureHeader {
            key_id: self.key_id,
            algorithm: self.algorithm,
            headers: self.headers,
            signature,
            created: self.created,
            expires: self.expires,
        }
    }
}

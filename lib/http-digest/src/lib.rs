//!
//! Creation and verification of `Digest` header values
//!
//! <https://datatracker.ietf.org/doc/html/rfc3230>
//!

use http::HeaderName;
use sha2::{Digest, Sha256, Sha512};
use std::str::FromStr;
use strum::{AsRefStr, EnumString};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::debug;

/// Name of the `Digest` header
pub static DIGEST_HEADER: HeaderName = HeaderName::from_static("digest");

/// Digest error
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to decode the Base64 payload
    #[error(transparent)]
    Base64(#[from] base64_simd::Error),

    /// Header value isn't in the `<algorithm>=<base64>` form
    #[error("Malformed digest header")]
    Malformed,

    /// Digest doesn't match the data
    #[error("Digest mismatch")]
    Mismatch,

    /// None of the algorithms in the header are supported
    #[error("Unsupported digest algorithm")]
    UnsupportedAlgorithm,
}

/// Digest algorithms from the IANA registry we know how to compute
#[derive(AsRefStr, Clone, Copy, Debug, Default, EnumString, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
#[non_exhaustive]
pub enum Algorithm {
    /// SHA-256
    #[default]
    #[strum(to_string = "SHA-256", serialize = "id-sha-256")]
    Sha256,

    /// SHA-512
    #[strum(to_string = "SHA-512", serialize = "id-sha-512")]
    Sha512,
}

impl Algorithm {
    /// Hash the data
    #[must_use]
    pub fn digest(&self, data: impl AsRef<[u8]>) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

/// Compute the digest over the data and encode it as `<algorithm>=<base64>`
#[must_use]
pub fn header_value(algorithm: Algorithm, data: impl AsRef<[u8]>) -> String {
    let hash = algorithm.digest(data);
    let encoded_digest = base64_simd::STANDARD.encode_to_string(hash);

    format!("{}={encoded_digest}", algorithm.as_ref())
}

/// Split a single `<algorithm>=<base64>` entry
///
/// Returns `None` for the algorithm if the entry names an algorithm we don't support
pub fn parse_entry(entry: &str) -> Result<(Option<Algorithm>, &str), Error> {
    let (algorithm_name, encoded) = entry.trim().split_once('=').ok_or(Error::Malformed)?;

    Ok((Algorithm::from_str(algorithm_name).ok(), encoded))
}

/// Verify the data against a `Digest` header value
///
/// The header may list multiple comma-separated digests. Unsupported algorithms are skipped;
/// every supported one has to match.
pub fn verify(header_value: &str, data: impl AsRef<[u8]>) -> Result<(), Error> {
    let data = data.as_ref();
    let mut verified_any = false;

    for entry in header_value.split(',') {
        let (algorithm, encoded) = parse_entry(entry)?;
        let Some(algorithm) = algorithm else {
            debug!(entry, "skipping unsupported digest algorithm");
            continue;
        };

        let expected = base64_simd::STANDARD.decode_to_vec(encoded)?;
        let actual = algorithm.digest(data);
        if !bool::from(expected.ct_eq(&actual)) {
            return Err(Error::Mismatch);
        }

        verified_any = true;
    }

    if verified_any {
        Ok(())
    } else {
        Err(Error::UnsupportedAlgorithm)
    }
}

use crate::capability::CAPABILITY_INVOCATION_HEADER;
use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use http_digest::DIGEST_HEADER;

/// Headers of a signed capability invocation
///
/// Contains the caller's headers (lower-cased) plus `host`, `date`, `digest` when a body was given or the caller supplied one,
/// `capability-invocation` and `authorization`
#[derive(Clone, Debug)]
pub struct SignedHeaders {
    inner: HeaderMap,
}

/// Decode a header value as UTF-8, non-ASCII values included
fn as_str(value: &HeaderValue) -> Option<&str> {
    std::str::from_utf8(value.as_bytes()).ok()
}

impl SignedHeaders {
    pub(crate) fn new(inner: HeaderMap) -> Self {
        Self { inner }
    }

    /// Value of a header, if present
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).and_then(as_str)
    }

    /// The `digest` header
    ///
    /// `None` means the request carries no digest at all
    #[must_use]
    pub fn digest(&self) -> Option<&str> {
        self.inner
            .get(&DIGEST_HEADER)
            .and_then(as_str)
    }

    /// The `capability-invocation` header
    #[must_use]
    pub fn capability_invocation(&self) -> Option<&str> {
        self.inner
            .get(&CAPABILITY_INVOCATION_HEADER)
            .and_then(as_str)
    }

    /// The `authorization` header carrying the signature
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.inner
            .get(AUTHORIZATION)
            .and_then(as_str)
    }

    /// Iterate over all header name/value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().filter_map(|(name, value)| {
            as_str(value).map(|value| (name.as_str(), value))
        })
    }

    /// Borrow the underlying header map
    #[must_use]
    pub fn as_header_map(&self) -> &HeaderMap {
        &self.inner
    }

    /// Take the underlying header map, ready to be attached to an outgoing request
    #[must_use]
    pub fn into_header_map(self) -> HeaderMap {
        self.inner
    }
}

impl From<SignedHeaders> for HeaderMap {
    fn from(value: SignedHeaders) -> Self {
        value.into_header_map()
    }
}

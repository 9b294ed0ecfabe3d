use crate::BoxError;
use http_signatures::crypto::SigningKey;
use std::future::{self, Future};

/// Something that holds private key material and can sign on behalf of an invoker
///
/// The signer is only borrowed for the duration of a single invocation and is called at most once per invocation.
/// Implementations are free to suspend, for example to talk to a remote KMS or a hardware token.
pub trait InvocationSigner {
    /// Error returned by the signing operation
    ///
    /// It is propagated to the caller without modification
    type Error: Into<BoxError>;

    /// Identifier of the key, used as `keyId` and as the invoker of the capability
    fn id(&self) -> &str;

    /// Sign the data and return the raw signature bytes
    ///
    /// The future has to be `Send`, which keeps [`sign_capability_invocation`](crate::sign_capability_invocation) spawnable on multi-threaded runtimes.
    /// Signers holding `!Send` handles (single-threaded runtimes, wasm) have to hand the work to a task owning the handle and await its result.
    fn sign(&self, data: &[u8]) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send;
}

/// Invocation signer backed by an in-memory signing key
pub struct KeySigner<K> {
    id: String,
    key: K,
}

impl<K> KeySigner<K> {
    /// Pair a signing key with its identifier
    pub fn new(id: impl Into<String>, key: K) -> Self {
        Self { id: id.into(), key }
    }

    /// Reference to the underlying key
    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<K> InvocationSigner for KeySigner<K>
where
    K: SigningKey,
{
    type Error = ring::error::Unspecified;

    fn id(&self) -> &str {
        &self.id
    }

    fn sign(&self, data: &[u8]) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send {
        let signature = self
            .key
            .sign(data)
            .map(|signature| signature.as_ref().to_vec());

        future::ready(signature)
    }
}

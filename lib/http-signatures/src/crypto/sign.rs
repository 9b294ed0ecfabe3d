use ring::{
    error::Unspecified,
    rand::SystemRandom,
    signature::{Ed25519KeyPair, RSA_PKCS1_SHA256, RsaKeyPair, Signature},
};

/// Signing key definition
pub trait SigningKey {
    /// Type the signature algorithm outputs
    type Output: AsRef<[u8]>;

    /// Sign a message
    fn sign(&self, msg: &[u8]) -> Result<Self::Output, Unspecified>;
}

impl SigningKey for Ed25519KeyPair {
    type Output = Signature;

    #[inline]
    fn sign(&self, msg: &[u8]) -> Result<Self::Output, Unspecified> {
        Ok(self.sign(msg))
    }
}

impl SigningKey for RsaKeyPair {
    type Output = Vec<u8>;

    #[inline]
    fn sign(&self, msg: &[u8]) -> Result<Self::Output, Unspecified> {
        let mut buf = vec![0; self.public().modulus_len()];

        let rng = SystemRandom::new();
        self.sign(&RSA_PKCS1_SHA256, &rng, msg, &mut buf)?;

        Ok(buf)
    }
}

impl<T> SigningKey for &T
where
    T: SigningKey + ?Sized,
{
    type Output = T::Output;

    #[inline]
    fn sign(&self, msg: &[u8]) -> Result<Self::Output, Unspecified> {
        (**self).sign(msg)
    }
}

/// Sign a message with the provided signing key and encode the returned signature in Base64
#[inline]
pub fn sign<SK>(payload: &[u8], key: &SK) -> Result<String, Unspecified>
where
    SK: SigningKey,
{
    key.sign(payload)
        .map(|signature| base64_simd::STANDARD.encode_to_string(signature))
}

use miette::{Context, IntoDiagnostic};
use serde::{Deserialize, Deserializer, de};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tokio::fs;
use zcap_invoke::{DEFAULT_EXPIRES_IN, DigestAlgorithm};

fn digest_algorithm<'de, D>(deserializer: D) -> Result<DigestAlgorithm, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(|_| {
        de::Error::invalid_value(de::Unexpected::Str(&name), &"sha-256 or sha-512")
    })
}

fn default_expires_in_secs() -> u64 {
    DEFAULT_EXPIRES_IN.as_secs()
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SignerConfiguration {
    pub key_id: String,
    pub private_key_path: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SignatureConfiguration {
    #[serde(default = "default_expires_in_secs")]
    pub expires_in_secs: u64,
    #[serde(default, deserialize_with = "digest_algorithm")]
    pub digest_algorithm: DigestAlgorithm,
}

impl SignatureConfiguration {
    #[must_use]
    pub fn expires_in(&self) -> Duration {
        Duration::from_secs(self.expires_in_secs)
    }
}

impl Default for SignatureConfiguration {
    fn default() -> Self {
        Self {
            expires_in_secs: default_expires_in_secs(),
            digest_algorithm: DigestAlgorithm::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    pub signer: SignerConfiguration,
    #[serde(default)]
    pub signature: SignatureConfiguration,
}

impl Configuration {
    pub async fn load<P>(path: P) -> miette::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read the configuration at {}", path.display()))?;

        toml::from_str(&content)
            .into_diagnostic()
            .wrap_err("Failed to parse the configuration")
    }

    /// Private key in PKCS#8 PEM form, relative paths are resolved against the working directory
    pub async fn load_private_key(&self) -> miette::Result<http_signatures::crypto::KeyPair> {
        let path = &self.signer.private_key_path;
        let pem = fs::read_to_string(path)
            .await
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read the private key at {}", path.display()))?;

        http_signatures::crypto::private_key(&pem)
            .into_diagnostic()
            .wrap_err("Failed to parse the private key")
    }
}

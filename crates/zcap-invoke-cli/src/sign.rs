use crate::{args::SignArgs, config::Configuration, util::header_name};
use miette::IntoDiagnostic;
use std::io::{self, Write};
use tracing::info;
use zcap_invoke::{InvocationRequest, InvocationSigner, KeySigner, SignedHeaders};

/// Assemble the invocation from the command line and the configuration
fn request<'a, S>(
    args: SignArgs,
    config: &Configuration,
    signer: &'a S,
) -> InvocationRequest<'a, S> {
    InvocationRequest {
        url: args.url,
        method: Some(args.method),
        headers: Some(args.headers),
        body: args.body,
        invocation_signer: Some(signer),
        capability: args.capability,
        capability_action: args.action,
        created: None,
        expires_in: config.signature.expires_in(),
        digest_algorithm: config.signature.digest_algorithm,
    }
}

async fn sign(args: SignArgs) -> miette::Result<SignedHeaders> {
    let config = Configuration::load(&args.config).await?;
    let signer = KeySigner::new(
        config.signer.key_id.clone(),
        config.load_private_key().await?,
    );

    info!(key_id = signer.id(), "signing capability invocation");
    let signed = zcap_invoke::sign_capability_invocation(request(args, &config, &signer)).await?;

    Ok(signed)
}

pub async fn do_it(args: SignArgs) -> miette::Result<()> {
    let signed = sign(args).await?;

    let mut stdout = io::stdout().lock();
    for (name, value) in signed.iter() {
        writeln!(stdout, "{}: {value}", header_name(name)).into_diagnostic()?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::sign;
    use crate::args::{SignArgs, ToolArgs, ToolSubcommand};
    use clap::Parser;
    use http_signatures::cavage;
    use pkcs8::{LineEnding, SecretDocument};
    use pretty_assertions::assert_eq;
    use ring::{rand::SystemRandom, signature::Ed25519KeyPair};
    use std::{fs, path::Path};
    use tempfile::TempDir;

    fn workspace() -> TempDir {
        let dir = tempfile::tempdir().unwrap();

        let pkcs8 = Ed25519KeyPair::generate_pkcs8(&SystemRandom::new()).unwrap();
        let pem = SecretDocument::try_from(pkcs8.as_ref())
            .unwrap()
            .to_pem("PRIVATE KEY", LineEnding::LF)
            .unwrap();
        fs::write(dir.path().join("key.pem"), pem.as_bytes()).unwrap();

        let config = format!(
            "[signer]\nkey-id = \"did:key:foo\"\nprivate-key-path = {:?}\n\n[signature]\nexpires-in-secs = 60\n",
            dir.path().join("key.pem")
        );
        fs::write(dir.path().join("config.toml"), config).unwrap();

        dir
    }

    fn sign_args(config: &Path, extra: &[&str]) -> SignArgs {
        let config = config.to_str().unwrap();
        let args = ToolArgs::try_parse_from(
            ["zcap-invoke", "sign", "--config", config]
                .iter()
                .chain(extra),
        )
        .unwrap();

        let ToolSubcommand::Sign(args) = args.subcommand else {
            panic!("expected the sign subcommand");
        };

        args
    }

    #[tokio::test]
    async fn signs_with_configured_key() {
        let dir = workspace();
        let args = sign_args(
            &dir.path().join("config.toml"),
            &[
                "--url",
                "https://www.test.org/read/foo",
                "--body",
                r#"{"foo":true}"#,
                "--action",
                "read",
            ],
        );

        let signed = sign(args).await.unwrap();
        assert_eq!(
            signed.capability_invocation(),
            Some(r#"zcap id="https://www.test.org/read/foo",action="read",invoker="did:key:foo""#)
        );
        assert!(signed.digest().is_some_and(|digest| digest.starts_with("SHA-256=")));

        let signature_header = cavage::parse(signed.authorization().unwrap()).unwrap();
        assert_eq!(signature_header.key_id, "did:key:foo");
        assert_eq!(
            signature_header.expires.zip(signature_header.created).map(|(expires, created)| expires - created),
            Some(60)
        );
    }

    #[tokio::test]
    async fn missing_key_file() {
        let dir = workspace();
        fs::remove_file(dir.path().join("key.pem")).unwrap();

        let args = sign_args(
            &dir.path().join("config.toml"),
            &["--url", "https://www.test.org/"],
        );
        assert!(sign(args).await.is_err());
    }

    #[tokio::test]
    async fn invalid_invocation_is_reported() {
        let dir = workspace();
        let args = sign_args(&dir.path().join("config.toml"), &[]);

        let err = sign(args).await.unwrap_err();
        assert!(err.to_string().contains("Invalid URL"));
    }
}

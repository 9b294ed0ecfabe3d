use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use zcap_invoke::CapabilityRef;

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum SignatureScheme {
    Cavage,
}

/// Split a `name: value` pair the way curl accepts it
fn header_pair(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `name: value`, got `{raw}`"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err("header name is empty".into());
    }

    Ok((name.to_owned(), value.trim().to_owned()))
}

fn json_body(raw: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(raw).map_err(|err| err.to_string())
}

/// Either a capability identifier or a JSON capability object
fn capability(raw: &str) -> Result<CapabilityRef, String> {
    if raw.trim_start().starts_with('{') {
        serde_json::from_str(raw).map_err(|err| err.to_string())
    } else {
        Ok(CapabilityRef::from(raw))
    }
}

#[derive(Args, Debug)]
pub struct SignArgs {
    /// Path to the configuration file
    #[arg(long, short)]
    pub config: PathBuf,

    /// URL of the resource the request targets
    #[arg(long)]
    pub url: Option<String>,

    /// HTTP method of the request
    #[arg(default_value = "GET", long, short = 'X')]
    pub method: String,

    /// Additional header in the `name: value` form. Can be repeated
    #[arg(long = "header", short = 'H', value_parser = header_pair)]
    pub headers: Vec<(String, String)>,

    /// JSON body of the request
    #[arg(long, value_parser = json_body)]
    pub body: Option<serde_json::Value>,

    /// Invoked capability. Defaults to the root capability of the URL
    #[arg(long, value_parser = capability)]
    pub capability: Option<CapabilityRef>,

    /// Action the capability is invoked for
    #[arg(long)]
    pub action: Option<String>,
}

#[derive(Args, Debug)]
pub struct ParseHeaderArgs {
    /// The header to parse
    pub header: String,

    /// The scheme this header uses
    #[arg(
        default_value_t = SignatureScheme::Cavage,
        long,
        short,
        value_enum,
    )]
    pub scheme: SignatureScheme,
}

#[derive(Debug, Subcommand)]
pub enum ToolSubcommand {
    /// Sign a capability invocation and print the resulting headers
    Sign(SignArgs),

    /// Parse the HTTP Signature header and report any format errors
    ParseHeader(ParseHeaderArgs),
}

#[derive(Debug, Parser)]
#[command(about, name = "zcap-invoke", version)]
pub struct ToolArgs {
    #[clap(subcommand)]
    pub subcommand: ToolSubcommand,
}

#[cfg(test)]
mod test {
    use super::{SignatureScheme, ToolArgs, ToolSubcommand};
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use zcap_invoke::CapabilityRef;

    #[test]
    fn verify_cli() {
        ToolArgs::command().debug_assert();
    }

    #[test]
    fn sign() {
        let args = ToolArgs::try_parse_from([
            "zcap-invoke",
            "sign",
            "--config",
            "config.toml",
            "--url",
            "https://www.test.org/read/foo",
            "-X",
            "post",
            "-H",
            "Accept: application/json",
            "-H",
            "x-trace:abc: def",
            "--body",
            r#"{"foo":true}"#,
            "--capability",
            r#"{"id":"urn:zcap:1"}"#,
            "--action",
            "write",
        ])
        .unwrap();

        let ToolSubcommand::Sign(args) = args.subcommand else {
            panic!("expected the sign subcommand");
        };

        assert_eq!(args.method, "post");
        assert_eq!(
            args.headers,
            [
                ("Accept".into(), "application/json".into()),
                ("x-trace".into(), "abc: def".into()),
            ]
        );
        assert_eq!(args.body, Some(json!({ "foo": true })));
        assert_eq!(args.capability, Some(CapabilityRef::embedded("urn:zcap:1")));
        assert_eq!(args.action.as_deref(), Some("write"));
    }

    #[test]
    fn sign_defaults() {
        let args = ToolArgs::try_parse_from([
            "zcap-invoke",
            "sign",
            "-c",
            "config.toml",
            "--capability",
            "urn:zcap:2",
        ])
        .unwrap();

        let ToolSubcommand::Sign(args) = args.subcommand else {
            panic!("expected the sign subcommand");
        };

        assert_eq!(args.method, "GET");
        assert!(args.url.is_none());
        assert!(args.headers.is_empty());
        assert_eq!(args.capability, Some(CapabilityRef::from("urn:zcap:2")));
    }

    #[test]
    fn rejects_malformed_input() {
        let base = ["zcap-invoke", "sign", "-c", "config.toml"];

        for extra in [
            ["-H", "no-colon"],
            ["-H", ": value"],
            ["--body", "{not json"],
            ["--capability", r#"{"nope":1}"#],
        ] {
            assert!(
                ToolArgs::try_parse_from(base.iter().chain(extra.iter())).is_err(),
                "{extra:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_header() {
        let args = ToolArgs::try_parse_from(["zcap-invoke", "parse-header", "keyId=\"a\""]).unwrap();

        let ToolSubcommand::ParseHeader(args) = args.subcommand else {
            panic!("expected the parse-header subcommand");
        };

        assert_eq!(args.header, "keyId=\"a\"");
        assert_eq!(args.scheme, SignatureScheme::Cavage);
    }
}

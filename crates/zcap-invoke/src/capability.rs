use http::HeaderName;
use http_signatures::cavage::write_quoted;
use serde::Deserialize;
use std::fmt;
use url::Url;

/// Name of the header carrying the capability invocation
pub static CAPABILITY_INVOCATION_HEADER: HeaderName =
    HeaderName::from_static("capability-invocation");

/// Reference to the capability being invoked
///
/// Deserialises from either a bare identifier or an object with an `id` member
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CapabilityRef {
    /// Root capability of the target URL
    ///
    /// The URL is its own authority, there is no delegation chain
    #[default]
    #[serde(skip)]
    Root,

    /// Capability referenced by its identifier
    ById(String),

    /// Capability object, of which only the identifier is used
    Embedded {
        /// Identifier of the capability
        id: String,
    },
}

impl CapabilityRef {
    /// Reference to an embedded capability object
    #[must_use]
    pub fn embedded(id: impl Into<String>) -> Self {
        Self::Embedded { id: id.into() }
    }

    /// Identifier of the invoked capability
    #[must_use]
    pub fn resolve<'a>(&'a self, target: &'a Url) -> &'a str {
        match self {
            Self::Root => target.as_str(),
            Self::ById(id) | Self::Embedded { id } => id,
        }
    }
}

impl From<&str> for CapabilityRef {
    fn from(value: &str) -> Self {
        Self::ById(value.to_owned())
    }
}

impl From<String> for CapabilityRef {
    fn from(value: String) -> Self {
        Self::ById(value)
    }
}

/// Metadata of a capability invocation, rendered into the `capability-invocation` header
#[derive(Clone, Copy, Debug)]
pub struct CapabilityInvocation<'a> {
    /// Identifier of the invoked capability
    pub capability: &'a str,

    /// Action the capability is invoked for
    pub action: Option<&'a str>,

    /// Identifier of the invoker's key
    pub invoker: &'a str,
}

impl fmt::Display for CapabilityInvocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("zcap id=")?;
        write_quoted(f, self.capability)?;

        if let Some(action) = self.action {
            f.write_str(",action=")?;
            write_quoted(f, action)?;
        }

        f.write_str(",invoker=")?;
        write_quoted(f, self.invoker)
    }
}

#[cfg(test)]
mod test {
    use super::{CapabilityInvocation, CapabilityRef};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use url::Url;

    #[test]
    fn resolve() {
        let target = Url::parse("https://www.test.org/read/foo").unwrap();

        assert_eq!(
            CapabilityRef::Root.resolve(&target),
            "https://www.test.org/read/foo"
        );
        assert_eq!(CapabilityRef::from("test").resolve(&target), "test");
        assert_eq!(CapabilityRef::embedded("test").resolve(&target), "test");
    }

    #[test]
    fn deserialise() {
        let by_id: CapabilityRef = serde_json::from_value(json!("urn:zcap:1")).unwrap();
        assert_eq!(by_id, CapabilityRef::ById("urn:zcap:1".into()));

        let embedded: CapabilityRef = serde_json::from_value(json!({
            "id": "urn:zcap:2",
            "invoker": "did:key:foo",
        }))
        .unwrap();
        assert_eq!(embedded, CapabilityRef::embedded("urn:zcap:2"));

        assert!(serde_json::from_value::<CapabilityRef>(json!({ "nope": 1 })).is_err());
    }

    #[test]
    fn render() {
        let invocation = CapabilityInvocation {
            capability: "https://www.test.org/read/foo",
            action: Some("read"),
            invoker: "did:key:foo",
        };
        assert_eq!(
            invocation.to_string(),
            r#"zcap id="https://www.test.org/read/foo",action="read",invoker="did:key:foo""#
        );

        let invocation = CapabilityInvocation {
            capability: r#"odd"id"#,
            action: None,
            invoker: "did:key:foo",
        };
        assert_eq!(
            invocation.to_string(),
            r#"zcap id="odd\"id",invoker="did:key:foo""#
        );
    }
}

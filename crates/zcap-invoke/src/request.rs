use crate::capability::CapabilityRef;
use http_digest::Algorithm;
use std::time::{Duration, SystemTime};
use typed_builder::TypedBuilder;

/// Default validity window of an invocation signature
pub const DEFAULT_EXPIRES_IN: Duration = Duration::from_secs(10 * 60);

/// Header list as supplied by the caller
///
/// Names are matched case-insensitively. If a name appears multiple times, the last value wins.
pub type HeaderList = Vec<(String, String)>;

/// Everything needed to sign a single capability invocation
///
/// Required parameters are optional on the type level so that their absence is reported as a proper [`Error`](crate::Error)
#[derive(TypedBuilder)]
#[allow(explicit_outlives_requirements)] // bound is required by the `TypedBuilder` expansion
pub struct InvocationRequest<'a, S: 'a> {
    /// Absolute URL of the resource the request targets
    #[builder(default, setter(strip_option, into))]
    pub url: Option<String>,

    /// HTTP method, matched case-insensitively
    #[builder(default, setter(strip_option, into))]
    pub method: Option<String>,

    /// Headers the caller wants to send along
    #[builder(default, setter(strip_option))]
    pub headers: Option<HeaderList>,

    /// JSON body of the request
    #[builder(default, setter(strip_option))]
    pub body: Option<serde_json::Value>,

    /// Signer of the invocation
    #[builder(default, setter(strip_option))]
    pub invocation_signer: Option<&'a S>,

    /// Capability that is invoked. The root capability of the URL if absent
    #[builder(default, setter(strip_option, into))]
    pub capability: Option<CapabilityRef>,

    /// Action the capability is invoked for
    #[builder(default, setter(strip_option, into))]
    pub capability_action: Option<String>,

    /// Creation time of the signature. The current time if absent
    #[builder(default, setter(strip_option))]
    pub created: Option<SystemTime>,

    /// How long the signature stays valid after its creation
    #[builder(default = DEFAULT_EXPIRES_IN)]
    pub expires_in: Duration,

    /// Algorithm used for the body digest
    #[builder(default)]
    pub digest_algorithm: Algorithm,
}

//!
//! Capability invocations over signed HTTP messages
//!
//! Signs an outgoing HTTP request so that it proves both the integrity of the request and the invocation of a
//! [zCap](https://w3c-ccg.github.io/zcap-spec/) for a specific action against the target URL.
//!
//! The output is a set of headers (`capability-invocation`, `authorization`, and `digest` when there is a body)
//! the caller attaches to its own request. No transport happens here.
//!

pub use self::capability::{CAPABILITY_INVOCATION_HEADER, CapabilityInvocation, CapabilityRef};
pub use self::digest::canonical_body;
pub use self::error::{Error, ErrorKind};
pub use self::request::{DEFAULT_EXPIRES_IN, HeaderList, InvocationRequest};
pub use self::sign::{select_components, sign_capability_invocation};
pub use self::signed::SignedHeaders;
pub use self::signer::{InvocationSigner, KeySigner};
pub use http_digest::Algorithm as DigestAlgorithm;

mod capability;
mod digest;
mod error;
mod header;
mod request;
mod sign;
mod signed;
mod signer;
mod validate;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T, E = Error> = std::result::Result<T, E>;

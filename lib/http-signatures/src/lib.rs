//!
//! HTTP signatures library
//!
//! Only supports asymmetric signing schemes (aka. no HMAC and such)
//!

pub mod cavage;
pub mod crypto;

pub use ring;

/// Authorization scheme prefix used when the signature is transported via the `Authorization` header
pub const AUTHORIZATION_SCHEME: &str = "Signature";

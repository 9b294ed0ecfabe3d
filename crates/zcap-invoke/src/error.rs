use crate::BoxError;
use http::header::{InvalidHeaderName, InvalidHeaderValue};
use miette::Diagnostic;
use std::time::SystemTimeError;
use thiserror::Error;

/// Coarse classification of an [`Error`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-fixable input problem, detected before anything was signed
    Validation,

    /// Input couldn't be converted into the shape the signer needs (headers, URL)
    Type,

    /// The invocation signer failed
    Signing,
}

/// Capability invocation signing error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// The request body couldn't be serialised
    #[error(transparent)]
    Body(#[from] serde_json::Error),

    /// `created` lies before the UNIX epoch
    #[error(transparent)]
    CreatedBeforeEpoch(#[from] SystemTimeError),

    /// Header name isn't a valid HTTP token
    #[error(transparent)]
    InvalidHeaderName(#[from] InvalidHeaderName),

    /// Header value contains characters not allowed in HTTP headers
    #[error(transparent)]
    InvalidHeaderValue(#[from] InvalidHeaderValue),

    /// HTTP method isn't a valid token
    #[error("Invalid HTTP method")]
    #[diagnostic(code(zcap_invoke::invalid_method))]
    InvalidMethod(#[from] http::method::InvalidMethod),

    /// Request target couldn't be represented as an HTTP URI
    #[error(transparent)]
    InvalidRequestTarget(#[from] http::uri::InvalidUri),

    /// URL failed to parse or has no host
    #[error("Invalid URL")]
    #[diagnostic(code(zcap_invoke::invalid_url))]
    InvalidUrl(#[source] url::ParseError),

    /// Headers were not supplied at all
    #[error("Cannot convert missing headers into a header map")]
    #[diagnostic(
        code(zcap_invoke::missing_headers),
        help("pass an empty header list if there are no headers to send")
    )]
    MissingHeaders,

    /// A required parameter wasn't supplied
    #[error("Missing required parameter `{0}`")]
    #[diagnostic(code(zcap_invoke::missing_parameter))]
    MissingParameter(&'static str),

    /// Neither a URL nor a `host` header to derive the target from
    #[error("Invalid URL: no URL was provided and there is no host header")]
    #[diagnostic(code(zcap_invoke::invalid_url))]
    MissingUrl,

    /// The signing string couldn't be constructed
    #[error(transparent)]
    SignatureString(#[from] http_signatures::cavage::signature_string::Error),

    /// Error returned by the invocation signer, unchanged
    #[error(transparent)]
    Signing(BoxError),
}

impl Error {
    /// Classify the error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Body(..)
            | Self::CreatedBeforeEpoch(..)
            | Self::InvalidHeaderName(..)
            | Self::InvalidHeaderValue(..)
            | Self::InvalidMethod(..)
            | Self::MissingParameter(..) => ErrorKind::Validation,
            Self::InvalidRequestTarget(..)
            | Self::InvalidUrl(..)
            | Self::MissingHeaders
            | Self::MissingUrl
            | Self::SignatureString(..) => ErrorKind::Type,
            Self::Signing(..) => ErrorKind::Signing,
        }
    }
}

//!
//! Utilities for handling signature strings
//!

use super::SignatureHeader;
use http::uri::PathAndQuery;
use miette::Diagnostic;
use std::{borrow::Cow, fmt::Write};
use thiserror::Error;

/// Signature string error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Header value isn't valid UTF-8
    #[error("Value of header `{0}` isn't valid UTF-8")]
    InvalidHeaderValue(String),

    /// Component is missing from the request or the signature header
    #[error("Missing value for component `{0}`")]
    MissingComponent(String),
}

/// Resolve the value of a single component
///
/// Pseudo-headers are filled in from the request line and the signature header, everything else is looked up in the request headers
fn component<'r, B, I, S>(
    request: &'r http::Request<B>,
    signature_header: &'r SignatureHeader<'r, I, S>,
    name: &str,
) -> Result<Cow<'r, str>, Error> {
    let missing = || Error::MissingComponent(name.into());

    let value = match name {
        "(request-target)" => {
            let path_and_query = request
                .uri()
                .path_and_query()
                .map_or_else(|| request.uri().path(), PathAndQuery::as_str);

            Cow::Owned(format!(
                "{} {path_and_query}",
                request.method().as_str().to_lowercase()
            ))
        }
        "(created)" => Cow::Owned(signature_header.created.ok_or_else(missing)?.to_string()),
        "(expires)" => Cow::Owned(signature_header.expires.ok_or_else(missing)?.to_string()),
        "(key-id)" => Cow::Borrowed(&*signature_header.key_id),
        header => {
            let value = request.headers().get(header).ok_or_else(missing)?;
            let value = std::str::from_utf8(value.as_bytes())
                .map_err(|_| Error::InvalidHeaderValue(header.into()))?;

            Cow::Borrowed(value)
        }
    };

    Ok(value)
}

/// Construct a new signature string from a signature header and an HTTP request
///
/// The components are taken from the `headers` field of the signature header, in the order they appear in
#[inline]
pub fn construct<'a, B, I, S>(
    request: &http::Request<B>,
    signature_header: &SignatureHeader<'_, I, S>,
) -> Result<String, Error>
where
    I: Iterator<Item = &'a str> + Clone,
{
    let mut signature_string = String::new();
    for name in signature_header.headers.clone() {
        let value = component(request, signature_header, name)?;

        if !signature_string.is_empty() {
            signature_string.push('\n');
        }
        let _ = write!(signature_string, "{}: {value}", name.to_lowercase());
    }

    Ok(signature_string)
}

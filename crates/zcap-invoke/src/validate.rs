use crate::{Error, Result, request::HeaderList};
use http::Method;
use url::Url;

/// Inputs that passed validation
#[derive(Debug)]
pub(crate) struct Validated<'a, S> {
    pub method: Method,
    pub headers: HeaderList,
    pub signer: &'a S,
    pub target: Url,
}

/// Check the request parameters in order, bailing out on the first problem
pub(crate) fn validate<'a, S>(
    url: Option<String>,
    method: Option<String>,
    headers: Option<HeaderList>,
    signer: Option<&'a S>,
) -> Result<Validated<'a, S>> {
    let method = method.ok_or(Error::MissingParameter("method"))?;
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;

    let headers = headers.ok_or(Error::MissingHeaders)?;
    let signer = signer.ok_or(Error::MissingParameter("invocationSigner"))?;

    // The last host header wins, same as during normalisation
    let host = headers
        .iter()
        .rev()
        .find(|(name, _)| name.eq_ignore_ascii_case("host"))
        .map(|(_, value)| value.as_str());

    let target = match (url, host) {
        (Some(url), _) => Url::parse(&url).map_err(Error::InvalidUrl)?,
        (None, Some(host)) => Url::parse(&format!("https://{host}/")).map_err(Error::InvalidUrl)?,
        (None, None) => return Err(Error::MissingUrl),
    };

    if target.host_str().is_none() && host.is_none() {
        return Err(Error::InvalidUrl(url::ParseError::EmptyHost));
    }

    Ok(Validated {
        method,
        headers,
        signer,
        target,
    })
}

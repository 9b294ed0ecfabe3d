use crate::{Result, request::HeaderList};
use http::{
    HeaderMap, HeaderName, HeaderValue,
    header::{DATE, HOST},
};
use std::time::SystemTime;
use tracing::debug;
use url::Url;

/// Authority component of the URL as it would appear in a `host` header
///
/// Default ports are omitted
fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let authority = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    };

    Some(authority)
}

/// Fold the caller-supplied headers into a lower-case keyed map and make sure a `host` header is present
pub(crate) fn normalise(headers: HeaderList, target: &Url) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len() + 4);
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::try_from(value)?;
        map.insert(name, value);
    }

    if !map.contains_key(HOST) {
        if let Some(authority) = authority(target) {
            debug!(%authority, "deriving host header from the target url");
            map.insert(HOST, HeaderValue::try_from(authority)?);
        }
    }

    Ok(map)
}

/// Insert a `date` header for the creation time unless the caller already set one
pub(crate) fn ensure_date(headers: &mut HeaderMap, created: SystemTime) -> Result<()> {
    if !headers.contains_key(DATE) {
        let date = httpdate::fmt_http_date(created);
        debug!(%date, "inserting date header");
        headers.insert(DATE, HeaderValue::try_from(date)?);
    }

    Ok(())
}

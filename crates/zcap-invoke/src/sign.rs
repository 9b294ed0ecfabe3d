use crate::{
    Error, Result,
    capability::{CAPABILITY_INVOCATION_HEADER, CapabilityInvocation},
    digest, header,
    request::InvocationRequest,
    signed::SignedHeaders,
    signer::InvocationSigner,
    validate,
};
use http::{
    HeaderMap, HeaderValue, Request, Uri,
    header::AUTHORIZATION,
};
use http_signatures::{
    AUTHORIZATION_SCHEME,
    cavage::{self, HS2019, SignatureHeader},
};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{Span, debug, field::Empty, instrument};
use url::Url;

/// Components that are always signed, in this order
const LEADING_COMPONENTS: &[&str] = &[
    "(key-id)",
    "(created)",
    "(expires)",
    "(request-target)",
    "host",
    "date",
    "capability-invocation",
];

/// Headers binding the body, signed whenever present
const BODY_COMPONENTS: &[&str] = &["content-type", "digest"];

/// Headers that are never part of the signature
const NEVER_SIGNED: &[&str] = &["authorization", "signature"];

/// Select the components to sign, in signing order
///
/// The leading components come first, followed by `content-type` and `digest` if present.
/// Every other header is appended in lexicographic order.
#[must_use]
pub fn select_components(headers: &HeaderMap) -> Vec<&str> {
    let mut components: Vec<&str> = LEADING_COMPONENTS.to_vec();
    components.extend(
        BODY_COMPONENTS
            .iter()
            .copied()
            .filter(|name| headers.contains_key(*name)),
    );

    let mut remaining: Vec<&str> = headers
        .keys()
        .map(http::HeaderName::as_str)
        .filter(|name| !components.contains(name) && !NEVER_SIGNED.contains(name))
        .collect();
    remaining.sort_unstable();

    components.extend(remaining);
    components
}

/// `(request-target)` of the URL in origin-form
fn request_target(target: &Url) -> Result<Uri> {
    let path_and_query = match target.query() {
        Some(query) => format!("{}?{query}", target.path()),
        None => target.path().to_owned(),
    };

    Uri::try_from(path_and_query).map_err(Error::from)
}

/// Sign a capability invocation
///
/// Validates the request, normalises its headers, binds the body via the `digest` header, resolves the invoked capability,
/// and finally asks the invocation signer to sign the resulting signing string.
///
/// The signer is called exactly once, after every other step succeeded. Its errors are returned unchanged.
#[instrument(skip_all, fields(method = Empty, capability = Empty))]
pub async fn sign_capability_invocation<S>(request: InvocationRequest<'_, S>) -> Result<SignedHeaders>
where
    S: InvocationSigner,
{
    let InvocationRequest {
        url,
        method,
        headers,
        body,
        invocation_signer,
        capability,
        capability_action,
        created,
        expires_in,
        digest_algorithm,
    } = request;

    let validated = validate::validate(url, method, headers, invocation_signer)?;
    let span = Span::current();
    span.record("method", validated.method.as_str());

    let created = created.unwrap_or_else(SystemTime::now);
    let mut headers = header::normalise(validated.headers, &validated.target)?;
    header::ensure_date(&mut headers, created)?;
    digest::apply(&mut headers, body.as_ref(), digest_algorithm)?;

    let signer = validated.signer;
    let capability = capability.unwrap_or_default();
    let invocation = CapabilityInvocation {
        capability: capability.resolve(&validated.target),
        action: capability_action.as_deref(),
        invoker: signer.id(),
    };
    span.record("capability", invocation.capability);
    headers.insert(
        &CAPABILITY_INVOCATION_HEADER,
        HeaderValue::try_from(invocation.to_string())?,
    );
    headers.remove(AUTHORIZATION);

    let created = created.duration_since(UNIX_EPOCH)?.as_secs();
    let expires = created.saturating_add(expires_in.as_secs());

    let mut request = Request::new(());
    *request.method_mut() = validated.method;
    *request.uri_mut() = request_target(&validated.target)?;
    *request.headers_mut() = headers;

    let components = select_components(request.headers());
    let unsigned = SignatureHeader {
        key_id: signer.id().into(),
        algorithm: Some(HS2019),
        headers: components.iter().copied(),
        signature: (),
        created: Some(created),
        expires: Some(expires),
    };
    let signature_string = cavage::signature_string::construct(&request, &unsigned)?;

    debug!(components = components.len(), "signing capability invocation");
    let signature = signer
        .sign(signature_string.as_bytes())
        .await
        .map_err(|err| Error::Signing(err.into()))?;

    let encoded_signature = base64_simd::STANDARD.encode_to_string(signature);
    let authorization = format!(
        "{AUTHORIZATION_SCHEME} {}",
        cavage::serialise(unsigned.with_signature(encoded_signature))
    );

    let (parts, ()) = request.into_parts();
    let mut headers = parts.headers;
    headers.insert(AUTHORIZATION, HeaderValue::try_from(authorization)?);

    Ok(SignedHeaders::new(headers))
}

#[cfg(test)]
mod test {
    use super::select_components;
    use http::{HeaderMap, HeaderValue};
    use pretty_assertions::assert_eq;

    fn header_map(names: &[&'static str]) -> HeaderMap {
        names
            .iter()
            .map(|name| {
                (
                    http::HeaderName::from_static(*name),
                    HeaderValue::from_static("x"),
                )
            })
            .collect()
    }

    #[test]
    fn minimal_selection() {
        let headers = header_map(&["host", "date", "capability-invocation"]);

        assert_eq!(
            select_components(&headers),
            [
                "(key-id)",
                "(created)",
                "(expires)",
                "(request-target)",
                "host",
                "date",
                "capability-invocation",
            ]
        );
    }

    #[test]
    fn caller_headers_are_sorted_after_body_headers() {
        let headers = header_map(&[
            "x-custom",
            "digest",
            "host",
            "authorization",
            "accept",
            "date",
            "capability-invocation",
            "keyid",
            "content-type",
        ]);

        assert_eq!(
            select_components(&headers),
            [
                "(key-id)",
                "(created)",
                "(expires)",
                "(request-target)",
                "host",
                "date",
                "capability-invocation",
                "content-type",
                "digest",
                "accept",
                "keyid",
                "x-custom",
            ]
        );
    }
}

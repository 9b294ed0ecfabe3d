use crate::Result;
use http::{HeaderMap, HeaderValue, header::CONTENT_TYPE};
use http_digest::{Algorithm, DIGEST_HEADER};
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// JSON value that serialises its objects with their keys in lexicographic order
struct Canonical<'a>(&'a Value);

impl Serialize for Canonical<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Value::Array(values) => serializer.collect_seq(values.iter().map(Canonical)),
            Value::Object(object) => {
                let sorted: BTreeMap<&str, Canonical<'_>> = object
                    .iter()
                    .map(|(key, value)| (key.as_str(), Canonical(value)))
                    .collect();

                let mut map = serializer.serialize_map(Some(sorted.len()))?;
                for (key, value) in sorted {
                    map.serialize_entry(key, &value)?;
                }
                map.end()
            }
            value => value.serialize(serializer),
        }
    }
}

/// Encode the body the way it is hashed: compact JSON with lexicographically ordered object keys
///
/// Send exactly these bytes as the request body, otherwise the digest won't match
pub fn canonical_body(body: &Value) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&Canonical(body))
}

/// Bind the body to the headers
///
/// Without a body, a caller-supplied `digest` header is left as-is and no header is added
pub(crate) fn apply(headers: &mut HeaderMap, body: Option<&Value>, algorithm: Algorithm) -> Result<()> {
    let Some(body) = body else {
        return Ok(());
    };

    let header_value = http_digest::header_value(algorithm, canonical_body(body)?);
    if headers.contains_key(&DIGEST_HEADER) {
        debug!("replacing caller-supplied digest with the body digest");
    }

    headers.insert(&DIGEST_HEADER, HeaderValue::try_from(header_value)?);
    headers
        .entry(CONTENT_TYPE)
        .or_insert_with(|| HeaderValue::from_static("application/json"));

    Ok(())
}

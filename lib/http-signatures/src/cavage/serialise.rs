use super::SignatureHeader;
use std::fmt::{self, Write};

/// Write a quoted-string, escaping quotes and backslashes
#[inline]
pub fn write_quoted<W>(out: &mut W, value: &str) -> fmt::Result
where
    W: Write + ?Sized,
{
    out.write_char('"')?;
    for ch in value.chars() {
        if matches!(ch, '"' | '\\') {
            out.write_char('\\')?;
        }
        out.write_char(ch)?;
    }
    out.write_char('"')
}

/// Serialise a signature header into its cavage parameter list
///
/// The output doesn't carry the `Signature` scheme prefix used by the `Authorization` header
#[inline]
pub fn serialise<'a, I, S>(header: SignatureHeader<'_, I, S>) -> String
where
    I: Iterator<Item = &'a str>,
    S: AsRef<str>,
{
    let mut buffer = String::new();

    buffer.push_str("keyId=");
    let _ = write_quoted(&mut buffer, &header.key_id);

    if let Some(algorithm) = header.algorithm {
        let _ = write!(buffer, ",algorithm=\"{algorithm}\"");
    }

    buffer.push_str(",headers=\"");
    for item in itertools::intersperse(header.headers, " ") {
        buffer.push_str(item);
    }
    buffer.push('"');

    let _ = write!(buffer, ",signature=\"{}\"", header.signature.as_ref());

    if let Some(created) = header.created {
        let _ = write!(buffer, ",created={created}");
    }

    if let Some(expires) = header.expires {
        let _ = write!(buffer, ",expires={expires}");
    }

    buffer
}

use super::SignatureHeader;
use logos::{Lexer, Logos, Span};
use std::borrow::Cow;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Signature header parsing error
///
/// Spans are relative to the input passed into [`parse`], so the error can be rendered with the input as source code
#[derive(Debug, Diagnostic, Error)]
pub enum ParseError {
    /// A field was defined more than once
    #[error("Duplicate field")]
    #[diagnostic(code(http_signatures::cavage::duplicate_field))]
    DuplicateField {
        /// Location of the second definition
        #[label("this field was already defined")]
        span: SourceSpan,
    },

    /// Timestamp wasn't a valid unsigned integer
    #[error("Invalid timestamp")]
    #[diagnostic(code(http_signatures::cavage::invalid_timestamp))]
    InvalidTimestamp {
        /// Location of the timestamp
        #[label("expected seconds since the UNIX epoch")]
        span: SourceSpan,
    },

    /// A required field is missing
    #[error("Missing field `{field}`")]
    #[diagnostic(code(http_signatures::cavage::missing_field))]
    MissingField {
        /// Name of the field
        field: &'static str,
    },

    /// Input ended in the middle of a key/value pair
    #[error("Unexpected end of input")]
    #[diagnostic(code(http_signatures::cavage::unexpected_end))]
    UnexpectedEnd {
        /// End of the input
        #[label("input ends here")]
        span: SourceSpan,
    },

    /// Token was valid but didn't fit the grammar, or no token matched at all
    #[error("Unexpected token")]
    #[diagnostic(code(http_signatures::cavage::unexpected_token))]
    UnexpectedToken {
        /// Location of the token
        #[label("didn't expect this here")]
        span: SourceSpan,
    },

    /// Field isn't part of the cavage draft
    #[error("Unknown field")]
    #[diagnostic(code(http_signatures::cavage::unknown_field))]
    UnknownField {
        /// Location of the field name
        #[label("unknown field name")]
        span: SourceSpan,
    },
}

#[derive(Debug, Logos)]
#[logos(skip r"[ \t]+")]
enum TokenTy {
    #[regex(r"[A-Za-z][A-Za-z0-9_-]*")]
    Key,

    #[token("=")]
    Equals,

    #[regex(r#""([^"\\]|\\.)*""#)]
    Value,

    #[regex(r"[0-9]+")]
    Integer,

    #[token(",")]
    Comma,
}

#[derive(Debug)]
struct Token {
    pub ty: TokenTy,
    pub span: Span,
}

impl Token {
    pub fn parse(input: &str) -> impl Iterator<Item = Result<Token, Span>> + '_ {
        Lexer::<'_, TokenTy>::new(input)
            .spanned()
            .map(|(ty, span)| match ty {
                Ok(ty) => Ok(Token { ty, span }),
                Err(()) => Err(span),
            })
    }
}

macro_rules! ensure {
    ($self:expr, $pattern:pat) => {{
        let Some(token) = $self.inner.next() else {
            $self.is_broken = true;
            return Some(Err(ParseError::UnexpectedEnd {
                span: $self.end_span(),
            }));
        };

        match token {
            Ok(token) if matches!(token.ty, $pattern) => token,
            Ok(Token { span, .. }) | Err(span) => {
                $self.is_broken = true;
                return Some(Err(ParseError::UnexpectedToken {
                    span: $self.source_span(span),
                }));
            }
        }
    }};
}

struct Field<'a> {
    key: &'a str,
    key_span: Span,
    value: &'a str,
    value_span: Span,
}

struct ParseIter<'a, I> {
    /// Stream of tokens wrapped into a result
    inner: I,

    /// Reference to the input that was fed to the lexer
    input: &'a str,

    /// Offset of the lexer input inside the original input (non-zero if we stripped the scheme)
    offset: usize,

    /// Marker whether we encountered any error or illegal token
    ///
    /// If we did, the iterator will stop yielding any results
    is_broken: bool,
}

impl<I> ParseIter<'_, I> {
    fn source_span(&self, span: Span) -> SourceSpan {
        (span.start + self.offset..span.end + self.offset).into()
    }

    fn end_span(&self) -> SourceSpan {
        (self.offset + self.input.len(), 0).into()
    }
}

impl<'a, I> Iterator for ParseIter<'a, I>
where
    I: Iterator<Item = Result<Token, Span>>,
{
    type Item = Result<Field<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_broken {
            return None;
        }

        let key = match self.inner.next()? {
            Ok(token) if matches!(token.ty, TokenTy::Key) => token,
            Ok(Token { span, .. }) | Err(span) => {
                self.is_broken = true;
                return Some(Err(ParseError::UnexpectedToken {
                    span: self.source_span(span),
                }));
            }
        };
        ensure!(self, TokenTy::Equals);
        let value = ensure!(self, TokenTy::Value | TokenTy::Integer);

        if let Some(next) = self.inner.next() {
            match next {
                Ok(Token {
                    ty: TokenTy::Comma,
                    ..
                }) => {}
                Ok(Token { span, .. }) | Err(span) => {
                    self.is_broken = true;
                    return Some(Err(ParseError::UnexpectedToken {
                        span: self.source_span(span),
                    }));
                }
            }
        }

        let key_str = &self.input[key.span.clone()];
        let value_str = &self.input[value.span.clone()];
        let value_str = match value.ty {
            TokenTy::Value => &value_str[1..value_str.len() - 1],
            _ => value_str,
        };

        Some(Ok(Field {
            key: key_str,
            key_span: key.span,
            value: value_str,
            value_span: value.span,
        }))
    }
}

/// Resolve the escape sequences of a quoted-string's contents
fn unescape(value: &str) -> Cow<'_, str> {
    if !value.contains('\\') {
        return Cow::Borrowed(value);
    }

    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => unescaped.extend(chars.next()),
            ch => unescaped.push(ch),
        }
    }

    Cow::Owned(unescaped)
}

/// Parse a cavage signature header into its components
///
/// Accepts both the bare parameter list of the `Signature` header and the `Signature <params>` form of the `Authorization` header.
#[inline]
pub fn parse(
    input: &str,
) -> Result<SignatureHeader<'_, impl Iterator<Item = &str> + Clone + std::fmt::Debug>, ParseError> {
    let (offset, params) = match input.strip_prefix(crate::AUTHORIZATION_SCHEME) {
        Some(rest) if rest.starts_with(' ') => (input.len() - rest.len(), rest),
        _ => (0, input),
    };

    let kv_iter = ParseIter {
        inner: Token::parse(params),
        input: params,
        offset,
        is_broken: false,
    };
    let to_source_span = |span: Span| SourceSpan::from(span.start + offset..span.end + offset);

    let mut key_id = None;
    let mut algorithm = None;
    let mut signature = None;
    let mut headers = None;
    let mut created = None;
    let mut expires = None;

    for field in kv_iter {
        let field = field?;

        let is_duplicate = match field.key {
            "algorithm" => algorithm.replace(field.value).is_some(),
            "keyId" => key_id.replace(field.value).is_some(),
            "signature" => signature.replace(field.value).is_some(),
            "headers" => headers.replace(field.value).is_some(),
            "created" | "expires" => {
                let timestamp = atoi_radix10::parse_from_str::<u64, _>(field.value).map_err(|_| {
                    ParseError::InvalidTimestamp {
                        span: to_source_span(field.value_span.clone()),
                    }
                })?;

                let slot = if field.key == "created" {
                    &mut created
                } else {
                    &mut expires
                };
                slot.replace(timestamp).is_some()
            }
            _ => {
                return Err(ParseError::UnknownField {
                    span: to_source_span(field.key_span),
                });
            }
        };

        if is_duplicate {
            return Err(ParseError::DuplicateField {
                span: to_source_span(field.key_span),
            });
        }
    }

    Ok(SignatureHeader {
        key_id: unescape(key_id.ok_or(ParseError::MissingField { field: "keyId" })?),
        algorithm,
        headers: headers
            .ok_or(ParseError::MissingField { field: "headers" })?
            .split_whitespace(),
        signature: signature.ok_or(ParseError::MissingField { field: "signature" })?,
        created,
        expires,
    })
}

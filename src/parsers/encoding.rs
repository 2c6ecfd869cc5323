//! Character decoding for response bodies.
//!
//! Bodies are decoded with the encoding the extractor was configured with,
//! never one sniffed from the page. Decoding is strict: bytes that are
//! malformed under the configured encoding are an error rather than being
//! replaced with U+FFFD.

use crate::error::{ExtractError, Result};
use encoding_rs::Encoding;
use std::borrow::Cow;

/// Resolve a WHATWG encoding label such as `utf-8`, `euc-kr` or `latin1`.
pub fn resolve(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ExtractError::UnknownEncoding(label.to_string()))
}

/// Decode `bytes` under the encoding named by `label`.
pub fn decode<'a>(bytes: &'a [u8], label: &str) -> Result<Cow<'a, str>> {
    let encoding = resolve(label)?;
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(|| ExtractError::Decode {
            encoding: encoding.name().to_string(),
        })
}

//! The input normalizer.
//!
//! Per element, produces the canonical byte buffer the engines expect: the
//! raw bytes in byte modes, validated UTF-8 in the UTF-8 and wide modes
//! (Latin-1-tagged input is up-converted). Element buffers borrow from the
//! input where possible and drop at the end of the element's iteration.

use std::borrow::Cow;

use crate::core::context::Locale;
use crate::core::error::Error;
use crate::core::mode::Mode;
use crate::core::types::{Encoding, TextValue};

/// Canonical buffer for a non-missing element, or `None` when the content
/// is invalid in the execution encoding (the caller warns and soft-fails
/// that element).
pub(crate) fn normalize<'a>(
    value: &'a TextValue,
    mode: Mode,
    locale: Locale,
) -> Option<Cow<'a, [u8]>> {
    let bytes = value.as_bytes().expect("missing handled by caller");
    if mode.is_byte_based() {
        return Some(Cow::Borrowed(bytes));
    }
    match value.encoding() {
        Some(Encoding::Latin1) => Some(Cow::Owned(latin1_to_utf8(bytes))),
        Some(Encoding::Unknown) if locale.latin1 => Some(Cow::Owned(latin1_to_utf8(bytes))),
        _ => {
            if std::str::from_utf8(bytes).is_ok() {
                Some(Cow::Borrowed(bytes))
            } else {
                None
            }
        }
    }
}

/// Like [`normalize`] but for the pattern/replacement/separator side, where
/// invalid content is fatal. `what` names the offender in the error.
pub(crate) fn normalize_required<'a>(
    value: &'a TextValue,
    mode: Mode,
    locale: Locale,
    what: &str,
) -> Result<Cow<'a, [u8]>, Error> {
    normalize(value, mode, locale).ok_or_else(|| Error::InvalidEncoding {
        what: what.to_string(),
    })
}

/// Latin-1 to UTF-8: each byte is the code point of the same value.
fn latin1_to_utf8(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + bytes.len() / 2);
    for &b in bytes {
        if b < 0x80 {
            out.push(b);
        } else {
            out.push(0xc0 | (b >> 6));
            out.push(0x80 | (b & 0x3f));
        }
    }
    out
}

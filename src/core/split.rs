//! The splitter: tokenizing one element around separator matches.
//!
//! Matching runs on the remaining suffix each round, so a `^` in the
//! separator re-anchors at every token start (the historical behavior of
//! this operation, unlike the position-reporting loops). A non-empty match
//! ends the current token and consumes the separator; an empty match emits
//! the next character as its own token. A non-empty remainder becomes the
//! final token. The empty separator splits into individual characters, and
//! an empty subject yields one empty token.

use crate::core::compile::CompiledPattern;
use crate::core::context::CallContext;
use crate::core::driver::{match_at, warn_engine_error};
use crate::core::mode::Mode;
use crate::core::position::{char_step, utf8_len};

/// Token byte buffers for one element against a non-empty separator.
pub(crate) fn split_one(
    re: &CompiledPattern,
    subject: &[u8],
    mode: Mode,
    elem: usize,
    ctx: &mut CallContext,
) -> Vec<Vec<u8>> {
    if subject.is_empty() {
        return vec![Vec::new()];
    }
    let mut tokens = Vec::new();
    let mut pos = 0usize;
    while pos < subject.len() {
        let rest = &subject[pos..];
        let m = match match_at(re, rest, 0, false) {
            Ok(Some(m)) => m,
            Ok(None) => break,
            Err(e) => {
                warn_engine_error(ctx, elem, &e);
                break;
            }
        };
        if m.end > 0 {
            tokens.push(rest[..m.start].to_vec());
            pos += m.end;
        } else {
            let step = char_step(rest, 0, mode);
            tokens.push(rest[..step].to_vec());
            pos += step;
        }
    }
    if pos < subject.len() {
        tokens.push(subject[pos..].to_vec());
    }
    tokens
}

/// Per-character split for the empty separator: UTF-8 code points in the
/// character modes, single bytes otherwise.
pub(crate) fn split_chars(subject: &[u8], mode: Mode) -> Vec<Vec<u8>> {
    if subject.is_empty() {
        return vec![Vec::new()];
    }
    let mut tokens = Vec::new();
    if mode.is_byte_based() {
        tokens.extend(subject.iter().map(|&b| vec![b]));
    } else {
        let mut i = 0;
        while i < subject.len() {
            let n = utf8_len(subject[i]).min(subject.len() - i);
            tokens.push(subject[i..i + n].to_vec());
            i += n;
        }
    }
    tokens
}

//! The raw-bytes search path.
//!
//! Pattern and text are opaque byte sequences; the pattern may contain
//! embedded NULs. The literal dialect runs on the literal matcher with
//! from-offset support; the extended dialect runs the byte regex engine on
//! the tail starting at `offset`, so a leading `^` anchors there and
//! nowhere later. After an empty match the scan stops, warning about an
//! infinite empty match iff the pattern would match empty again at the
//! very next position.

use crate::core::compile::{compile_extended, CompiledPattern};
use crate::core::context::CallContext;
use crate::core::error::Error;
use crate::core::literal;
use crate::core::mode::Mode;
use crate::core::types::RawResult;

/// Options of the raw-bytes search. `offset` is 1-based.
#[derive(Debug, Clone)]
pub struct RawOptions {
    pub offset: usize,
    pub ignore_case: bool,
    pub fixed: bool,
    pub value: bool,
    pub all: bool,
    pub invert: bool,
}

impl Default for RawOptions {
    fn default() -> Self {
        RawOptions {
            offset: 1,
            ignore_case: false,
            fixed: false,
            value: false,
            all: false,
            invert: false,
        }
    }
}

pub(crate) fn grep_raw_impl(
    pat: &[u8],
    text: &[u8],
    opts: &RawOptions,
    ctx: &mut CallContext,
) -> Result<RawResult, Error> {
    let mut ignore_case = opts.ignore_case;
    let mut invert = opts.invert;
    if opts.fixed && ignore_case {
        ctx.warn("argument 'ignore.case = TRUE' will be ignored");
        ignore_case = false;
    }
    if invert && !opts.value {
        ctx.warn("argument 'invert = TRUE' will be ignored");
        invert = false;
    }
    if opts.offset < 1 {
        return Err(Error::InvalidOffset);
    }
    if opts.offset > text.len() {
        return Ok(RawResult::Indices(Vec::new()));
    }
    let offset = opts.offset - 1;

    if opts.fixed {
        return Ok(fixed_raw(pat, text, offset, opts.all, opts.value, invert));
    }

    let compiled = match compile_extended(pat, Mode::Bytes, ignore_case) {
        Ok(re) => re,
        Err(Error::InvalidPattern { reason, .. }) => {
            return Err(Error::InvalidRawPattern { reason })
        }
        Err(e) => return Err(e),
    };
    let CompiledPattern::Extended(re) = &compiled else {
        unreachable!("raw path compiles the extended dialect");
    };
    let tail = &text[offset..];

    if !opts.all {
        return Ok(first_raw(re, text, tail, offset, opts.value, invert));
    }
    Ok(all_raw(re, text, tail, offset, opts.value, invert, ctx))
}

/// Literal dialect, both shapes.
fn fixed_raw(
    pat: &[u8],
    text: &[u8],
    offset: usize,
    all: bool,
    value: bool,
    invert: bool,
) -> RawResult {
    if pat.is_empty() {
        return if !value {
            RawResult::Indices(Vec::new())
        } else if all {
            RawResult::Pieces(Vec::new())
        } else {
            RawResult::Bytes(Vec::new())
        };
    }
    if !all {
        let hit = literal::find(text, pat, offset);
        return match hit {
            None => {
                if invert {
                    RawResult::Bytes(text.to_vec())
                } else if value {
                    RawResult::Bytes(Vec::new())
                } else {
                    RawResult::Indices(Vec::new())
                }
            }
            Some(pos) => {
                if invert {
                    let mut out = Vec::with_capacity(text.len() - pat.len());
                    out.extend_from_slice(&text[..pos]);
                    out.extend_from_slice(&text[pos + pat.len()..]);
                    RawResult::Bytes(out)
                } else if value {
                    RawResult::Bytes(pat.to_vec())
                } else {
                    RawResult::Indices(vec![(pos + 1) as i32])
                }
            }
        };
    }
    // Non-overlapping occurrences of the needle.
    let mut starts = Vec::new();
    let mut at = offset;
    while let Some(pos) = literal::find(text, pat, at) {
        starts.push(pos);
        at = pos + pat.len();
    }
    if value {
        if invert {
            if starts.is_empty() {
                return RawResult::Bytes(text.to_vec());
            }
            let mut pieces = Vec::with_capacity(starts.len() + 1);
            let mut from = 0usize;
            for &pos in &starts {
                pieces.push(text[from..pos].to_vec());
                from = pos + pat.len();
            }
            pieces.push(text[from..].to_vec());
            RawResult::Pieces(pieces)
        } else {
            RawResult::Pieces(starts.iter().map(|_| pat.to_vec()).collect())
        }
    } else {
        RawResult::Indices(starts.iter().map(|&p| (p + 1) as i32).collect())
    }
}

/// Extended dialect, first match only.
fn first_raw(
    re: &regex::bytes::Regex,
    text: &[u8],
    tail: &[u8],
    offset: usize,
    value: bool,
    invert: bool,
) -> RawResult {
    let m = re.find_at(tail, 0);
    if value {
        // An empty match carries no bytes, so it counts as no match here.
        return match m {
            None => {
                if invert {
                    RawResult::Bytes(text.to_vec())
                } else {
                    RawResult::Bytes(Vec::new())
                }
            }
            Some(m) if m.end() == m.start() => {
                if invert {
                    RawResult::Bytes(text.to_vec())
                } else {
                    RawResult::Bytes(Vec::new())
                }
            }
            Some(m) => {
                if invert {
                    let mut out = Vec::with_capacity(text.len() - (m.end() - m.start()));
                    out.extend_from_slice(&text[..offset + m.start()]);
                    out.extend_from_slice(&text[offset + m.end()..]);
                    RawResult::Bytes(out)
                } else {
                    RawResult::Bytes(tail[m.start()..m.end()].to_vec())
                }
            }
        };
    }
    match m {
        Some(m) => RawResult::Indices(vec![(offset + m.start() + 1) as i32]),
        None => RawResult::Indices(Vec::new()),
    }
}

/// Extended dialect, all matches.
#[allow(clippy::too_many_arguments)]
fn all_raw(
    re: &regex::bytes::Regex,
    text: &[u8],
    tail: &[u8],
    offset: usize,
    value: bool,
    invert: bool,
    ctx: &mut CallContext,
) -> RawResult {
    // (absolute 0-based start, length) per match
    let mut matches: Vec<(usize, usize)> = Vec::new();
    let mut at = 0usize;
    let mut first = true;
    while let Some(m) = re.find_at(tail, at) {
        matches.push((offset + m.start(), m.end() - m.start()));
        at = m.end();
        if m.end() == m.start() {
            // No progress possible; decide whether this loops forever.
            let mut infinite = true;
            if first {
                infinite = at + 1 <= tail.len()
                    && matches!(re.find_at(tail, at + 1),
                                Some(probe) if probe.end() == probe.start());
            }
            if infinite {
                ctx.warn("pattern matches an empty string infinitely, returning first match only");
            }
            break;
        }
        first = false;
        if at >= tail.len() {
            break;
        }
    }

    if value {
        if invert {
            let mut pieces = Vec::with_capacity(matches.len() + 1);
            let mut from = 0usize;
            for &(start, len) in &matches {
                pieces.push(text[from..start].to_vec());
                from = start + len;
            }
            pieces.push(text[from..].to_vec());
            RawResult::Pieces(pieces)
        } else {
            RawResult::Pieces(
                matches
                    .iter()
                    .map(|&(start, len)| text[start..start + len].to_vec())
                    .collect(),
            )
        }
    } else {
        RawResult::Indices(matches.iter().map(|&(s, _)| (s + 1) as i32).collect())
    }
}

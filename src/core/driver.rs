//! Engine drivers: first-match and all-matches loops over the normalized
//! buffer.
//!
//! Iteration uses absolute offsets, so `^` matches only at the true start
//! of the subject (the NOTBOL discipline after the first iteration falls
//! out of that). Empty matches advance by one character so every loop
//! makes progress. Perl match-time errors (match/recursion/JIT-stack
//! limits) are translated into a warning carrying the element's 1-based
//! index and truncate that element's match set; the extended and literal
//! engines cannot fail at match time.

use crate::core::compile::CompiledPattern;
use crate::core::context::CallContext;
use crate::core::literal;
use crate::core::mode::Mode;
use crate::core::position::char_step;

/// One match in byte offsets, with per-group byte ranges when requested.
#[derive(Debug, Clone)]
pub(crate) struct RawMatch {
    pub start: usize,
    pub end: usize,
    /// Capture groups 1..=n; `None` for a group that did not participate.
    pub groups: Vec<Option<(usize, usize)>>,
}

/// Attempt a match at or after `at`. The only fallible engine is PCRE2.
pub(crate) fn match_at(
    re: &CompiledPattern,
    subject: &[u8],
    at: usize,
    want_captures: bool,
) -> Result<Option<RawMatch>, pcre2::Error> {
    if at > subject.len() {
        return Ok(None);
    }
    match re {
        CompiledPattern::Literal(needle) => {
            Ok(literal::find(subject, needle, at).map(|start| RawMatch {
                start,
                end: start + needle.len(),
                groups: Vec::new(),
            }))
        }
        CompiledPattern::Extended(re) => {
            if want_captures {
                let mut locs = re.capture_locations();
                Ok(re.captures_read_at(&mut locs, subject, at).map(|m| RawMatch {
                    start: m.start(),
                    end: m.end(),
                    groups: (1..re.captures_len()).map(|k| locs.get(k)).collect(),
                }))
            } else {
                Ok(re.find_at(subject, at).map(|m| RawMatch {
                    start: m.start(),
                    end: m.end(),
                    groups: Vec::new(),
                }))
            }
        }
        CompiledPattern::Perl { re, .. } => {
            if want_captures {
                let mut locs = re.capture_locations();
                Ok(re
                    .captures_read_at(&mut locs, subject, at)?
                    .map(|m| RawMatch {
                        start: m.start(),
                        end: m.end(),
                        groups: (1..re.captures_len()).map(|k| locs.get(k)).collect(),
                    }))
            } else {
                Ok(re.find_at(subject, at)?.map(|m| RawMatch {
                    start: m.start(),
                    end: m.end(),
                    groups: Vec::new(),
                }))
            }
        }
    }
}

pub(crate) fn warn_engine_error(ctx: &mut CallContext, elem: usize, err: &pcre2::Error) {
    ctx.warn(&format!("PCRE error '{}' for element {}", err, elem + 1));
}

/// First match of the element, or `None` (including after an engine error,
/// which warns).
pub(crate) fn first_match(
    re: &CompiledPattern,
    subject: &[u8],
    want_captures: bool,
    elem: usize,
    ctx: &mut CallContext,
) -> Option<RawMatch> {
    match match_at(re, subject, 0, want_captures) {
        Ok(m) => m,
        Err(e) => {
            warn_engine_error(ctx, elem, &e);
            None
        }
    }
}

/// All matches of the element in order. A non-empty match continues from
/// its end; an empty match advances one character; reaching the end of the
/// subject stops the loop.
pub(crate) fn all_matches(
    re: &CompiledPattern,
    subject: &[u8],
    mode: Mode,
    want_captures: bool,
    elem: usize,
    ctx: &mut CallContext,
) -> Vec<RawMatch> {
    let mut out = Vec::new();
    let mut at = 0usize;
    loop {
        let m = match match_at(re, subject, at, want_captures) {
            Ok(Some(m)) => m,
            Ok(None) => break,
            Err(e) => {
                warn_engine_error(ctx, elem, &e);
                break;
            }
        };
        let (start, end) = (m.start, m.end);
        out.push(m);
        at = if end > start {
            end
        } else {
            start + char_step(subject, start, mode)
        };
        if at >= subject.len() {
            break;
        }
    }
    out
}

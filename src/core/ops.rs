//! The operations exposed to the host: split, grep/grepl, regexpr,
//! gregexpr, sub/gsub, regexec, grep_raw and pcre_config.
//!
//! Every operation follows the same shape: fix incompatible flags (warning
//! and clearing the weaker one), resolve the dialect, choose the execution
//! mode once, normalize and compile the pattern, then walk the text vector
//! element by element. Missing inputs propagate, invalid inputs soft-fail
//! with a capped warning, and the cooperative-interrupt flag is honored
//! between elements.

use std::borrow::Cow;

use crate::core::compile::{compile, CompiledPattern};
use crate::core::context::CallContext;
use crate::core::driver;
use crate::core::error::Error;
use crate::core::literal;
use crate::core::mode::{choose_mode, Dialect, Mode};
use crate::core::normalize::{normalize, normalize_required};
use crate::core::position::{char_step, CharMapper};
use crate::core::rawgrep::{grep_raw_impl, RawOptions};
use crate::core::replace::{append_replacement, count_subs, initial_capacity, MAX_RESULT};
use crate::core::split::{split_chars, split_one};
use crate::core::types::{
    output_value, CaptureInfo, GrepResult, IndexType, MatchInfo, MatchSet, RawResult, SplitResult,
    TextValue, TextVec,
};

/// Options of the test/locate-any operation.
#[derive(Debug, Clone, Default)]
pub struct GrepOptions {
    pub ignore_case: bool,
    pub value: bool,
    pub perl: bool,
    pub fixed: bool,
    pub use_bytes: bool,
    pub invert: bool,
}

/// Options shared by regexpr/gregexpr/sub/gsub and grepl.
#[derive(Debug, Clone, Default)]
pub struct MatchOptions {
    pub ignore_case: bool,
    pub perl: bool,
    pub fixed: bool,
    pub use_bytes: bool,
}

/// Options of split.
#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    pub fixed: bool,
    pub perl: bool,
    pub use_bytes: bool,
}

/// Options of submatch extraction (extended dialect only).
#[derive(Debug, Clone, Default)]
pub struct RegexecOptions {
    pub ignore_case: bool,
    pub fixed: bool,
    pub use_bytes: bool,
}

/// Warn about and clear flags that do not combine, then pick the dialect.
fn resolve_flags(
    fixed: bool,
    perl: bool,
    ignore_case: bool,
    ctx: &mut CallContext,
) -> (Dialect, bool) {
    let mut perl = perl;
    let mut ignore_case = ignore_case;
    if fixed && perl {
        ctx.warn("argument 'perl = TRUE' will be ignored");
        perl = false;
    }
    if fixed && ignore_case {
        ctx.warn("argument 'ignore.case = TRUE' will be ignored");
        ignore_case = false;
    }
    let dialect = if fixed {
        Dialect::Literal
    } else if perl {
        Dialect::Perl
    } else {
        Dialect::Extended
    };
    (dialect, ignore_case)
}

/// Per-element hit vector shared by grep and grepl: `None` for missing
/// input, `Some(false)` for bad input or no match.
fn grep_hits(
    pat: &TextValue,
    x: &TextVec,
    dialect: Dialect,
    ignore_case: bool,
    use_bytes: bool,
    ctx: &mut CallContext,
) -> Result<Vec<Option<bool>>, Error> {
    let mode = choose_mode(&[pat], None, x, dialect, use_bytes, false, ctx.locale);
    let pat_buf = normalize_required(pat, mode, ctx.locale, "'pattern'")?;
    let re = compile(&pat_buf, dialect, mode, ignore_case, ctx)?;
    let mut hits = Vec::with_capacity(x.len());
    for (i, v) in x.iter().enumerate() {
        ctx.check_interrupt()?;
        if v.is_missing() {
            hits.push(None);
            continue;
        }
        let Some(buf) = normalize(v, mode, ctx.locale) else {
            ctx.warn_invalid_input(i);
            hits.push(Some(false));
            continue;
        };
        hits.push(Some(driver::first_match(&re, &buf, false, i, ctx).is_some()));
    }
    Ok(hits)
}

/// Indices of matching elements, or the matching elements themselves.
pub fn grep(
    pat: &TextValue,
    x: &TextVec,
    opts: &GrepOptions,
    ctx: &mut CallContext,
) -> Result<GrepResult, Error> {
    let (dialect, ignore_case) = resolve_flags(opts.fixed, opts.perl, opts.ignore_case, ctx);
    let n = x.len();
    if pat.is_missing() {
        return Ok(if opts.value {
            let values = vec![TextValue::missing(); n];
            let mut out = TextVec::new(values);
            if let Some(names) = x.names() {
                out = out.with_names(names.to_vec());
            }
            GrepResult::Values(out)
        } else {
            GrepResult::Indices(vec![None; n])
        });
    }
    let hits = grep_hits(pat, x, dialect, ignore_case, opts.use_bytes, ctx)?;
    let selected: Vec<usize> = hits
        .iter()
        .enumerate()
        .filter(|(_, h)| h.unwrap_or(false) != opts.invert)
        .map(|(i, _)| i)
        .collect();
    if opts.value {
        let values = selected.iter().map(|&i| x.get(i).clone()).collect();
        let mut out = TextVec::new(values);
        if let Some(names) = x.names() {
            out = out.with_names(selected.iter().map(|&i| names[i].clone()).collect());
        }
        Ok(GrepResult::Values(out))
    } else {
        Ok(GrepResult::Indices(
            selected.iter().map(|&i| Some(i as i32 + 1)).collect(),
        ))
    }
}

/// Boolean presence per element; missing input stays missing.
pub fn grepl(
    pat: &TextValue,
    x: &TextVec,
    opts: &MatchOptions,
    ctx: &mut CallContext,
) -> Result<Vec<Option<bool>>, Error> {
    let (dialect, ignore_case) = resolve_flags(opts.fixed, opts.perl, opts.ignore_case, ctx);
    if pat.is_missing() {
        return Ok(vec![None; x.len()]);
    }
    grep_hits(pat, x, dialect, ignore_case, opts.use_bytes, ctx)
}

/// Map a raw match (and its groups) into 1-based user positions.
fn user_positions(
    m: &driver::RawMatch,
    mapper: &mut CharMapper,
) -> (i32, i32, Vec<(Option<i32>, Option<i32>)>) {
    let start_c = mapper.map(m.start);
    let len_c = mapper.map(m.end) - start_c;
    let groups = m
        .groups
        .iter()
        .map(|g| match g {
            Some((gs, ge)) => {
                let s = mapper.map(*gs);
                let l = mapper.map(*ge) - s;
                (Some(s as i32 + 1), Some(l as i32))
            }
            None => (Some(-1), Some(-1)),
        })
        .collect();
    (start_c as i32 + 1, len_c as i32, groups)
}

/// First match position and length per element, with capture groups for
/// the Perl dialect.
pub fn regexpr(
    pat: &TextValue,
    x: &TextVec,
    opts: &MatchOptions,
    ctx: &mut CallContext,
) -> Result<MatchInfo, Error> {
    let (dialect, ignore_case) = resolve_flags(opts.fixed, opts.perl, opts.ignore_case, ctx);
    let n = x.len();
    if pat.is_missing() {
        return Ok(MatchInfo {
            start: vec![None; n],
            length: vec![None; n],
            index_type: IndexType::Chars,
            use_bytes: false,
            captures: None,
        });
    }
    let mode = choose_mode(&[pat], None, x, dialect, opts.use_bytes, true, ctx.locale);
    let pat_buf = normalize_required(pat, mode, ctx.locale, "'pattern'")?;
    let re = compile(&pat_buf, dialect, mode, ignore_case, ctx)?;
    let ncap = re.capture_count();
    let want_caps = dialect == Dialect::Perl && ncap > 0;

    let mut start = Vec::with_capacity(n);
    let mut length = Vec::with_capacity(n);
    let mut cap_start = Vec::new();
    let mut cap_length = Vec::new();

    for (i, v) in x.iter().enumerate() {
        ctx.check_interrupt()?;
        if v.is_missing() {
            start.push(None);
            length.push(None);
            if want_caps {
                cap_start.push(vec![None; ncap]);
                cap_length.push(vec![None; ncap]);
            }
            continue;
        }
        let Some(buf) = normalize(v, mode, ctx.locale) else {
            ctx.warn_invalid_input(i);
            start.push(Some(-1));
            length.push(Some(-1));
            if want_caps {
                cap_start.push(vec![Some(-1); ncap]);
                cap_length.push(vec![Some(-1); ncap]);
            }
            continue;
        };
        match driver::first_match(&re, &buf, want_caps, i, ctx) {
            Some(m) => {
                let mut mapper = CharMapper::new(&buf, mode);
                let (s, l, groups) = user_positions(&m, &mut mapper);
                start.push(Some(s));
                length.push(Some(l));
                if want_caps {
                    cap_start.push(groups.iter().map(|g| g.0).collect());
                    cap_length.push(groups.iter().map(|g| g.1).collect());
                }
            }
            None => {
                start.push(Some(-1));
                length.push(Some(-1));
                if want_caps {
                    cap_start.push(vec![Some(-1); ncap]);
                    cap_length.push(vec![Some(-1); ncap]);
                }
            }
        }
    }

    Ok(MatchInfo {
        start,
        length,
        index_type: mode.index_type(),
        use_bytes: mode.use_bytes(),
        captures: want_caps.then(|| CaptureInfo {
            names: re.capture_names().to_vec(),
            start: cap_start,
            length: cap_length,
        }),
    })
}

/// All match positions per element, with capture groups for the Perl
/// dialect.
pub fn gregexpr(
    pat: &TextValue,
    x: &TextVec,
    opts: &MatchOptions,
    ctx: &mut CallContext,
) -> Result<Vec<MatchSet>, Error> {
    let (dialect, ignore_case) = resolve_flags(opts.fixed, opts.perl, opts.ignore_case, ctx);
    let n = x.len();
    if pat.is_missing() {
        return Ok((0..n).map(|_| missing_match_set()).collect());
    }
    let mode = choose_mode(&[pat], None, x, dialect, opts.use_bytes, true, ctx.locale);
    let pat_buf = normalize_required(pat, mode, ctx.locale, "'pattern'")?;
    let re = compile(&pat_buf, dialect, mode, ignore_case, ctx)?;
    let ncap = re.capture_count();
    let want_caps = dialect == Dialect::Perl && ncap > 0;

    let mut out = Vec::with_capacity(n);
    for (i, v) in x.iter().enumerate() {
        ctx.check_interrupt()?;
        if v.is_missing() {
            out.push(missing_match_set());
            continue;
        }
        let Some(buf) = normalize(v, mode, ctx.locale) else {
            ctx.warn_invalid_input(i);
            out.push(MatchSet {
                start: vec![Some(-1)],
                length: vec![Some(-1)],
                index_type: mode.index_type(),
                use_bytes: mode.use_bytes(),
                captures: None,
            });
            continue;
        };
        let matches = driver::all_matches(&re, &buf, mode, want_caps, i, ctx);
        let mut set = MatchSet {
            start: Vec::new(),
            length: Vec::new(),
            index_type: mode.index_type(),
            use_bytes: mode.use_bytes(),
            captures: None,
        };
        let mut cap_start = Vec::new();
        let mut cap_length = Vec::new();
        if matches.is_empty() {
            set.start.push(Some(-1));
            set.length.push(Some(-1));
            if want_caps {
                cap_start.push(vec![Some(-1); ncap]);
                cap_length.push(vec![Some(-1); ncap]);
            }
        } else {
            let mut mapper = CharMapper::new(&buf, mode);
            for m in &matches {
                let (s, l, groups) = user_positions(m, &mut mapper);
                set.start.push(Some(s));
                set.length.push(Some(l));
                if want_caps {
                    cap_start.push(groups.iter().map(|g| g.0).collect());
                    cap_length.push(groups.iter().map(|g| g.1).collect());
                }
            }
        }
        if want_caps {
            set.captures = Some(CaptureInfo {
                names: re.capture_names().to_vec(),
                start: cap_start,
                length: cap_length,
            });
        }
        out.push(set);
    }
    Ok(out)
}

fn missing_match_set() -> MatchSet {
    MatchSet {
        start: vec![None],
        length: vec![None],
        index_type: IndexType::Chars,
        use_bytes: false,
        captures: None,
    }
}

/// First match plus every group position per element (extended dialect;
/// `fixed` quotes the pattern).
pub fn regexec(
    pat: &TextValue,
    x: &TextVec,
    opts: &RegexecOptions,
    ctx: &mut CallContext,
) -> Result<Vec<MatchSet>, Error> {
    let mut ignore_case = opts.ignore_case;
    if opts.fixed && ignore_case {
        ctx.warn("argument 'ignore.case = TRUE' will be ignored");
        ignore_case = false;
    }
    let n = x.len();
    if pat.is_missing() {
        return Ok((0..n).map(|_| missing_match_set()).collect());
    }
    let mode = choose_mode(
        &[pat],
        None,
        x,
        Dialect::Extended,
        opts.use_bytes,
        true,
        ctx.locale,
    );
    let pat_buf = normalize_required(pat, mode, ctx.locale, "'pattern'")?;
    let quoted;
    let source: &[u8] = if opts.fixed {
        let s = std::str::from_utf8(&pat_buf).map_err(|_| Error::InvalidEncoding {
            what: "'pattern'".to_string(),
        })?;
        quoted = regex::escape(s);
        quoted.as_bytes()
    } else {
        &pat_buf
    };
    let re = compile(source, Dialect::Extended, mode, ignore_case, ctx)?;

    let mut out = Vec::with_capacity(n);
    for (i, v) in x.iter().enumerate() {
        ctx.check_interrupt()?;
        if v.is_missing() {
            out.push(missing_match_set());
            continue;
        }
        let Some(buf) = normalize(v, mode, ctx.locale) else {
            ctx.warn_invalid_input(i);
            out.push(MatchSet {
                start: vec![Some(-1)],
                length: vec![Some(-1)],
                index_type: mode.index_type(),
                use_bytes: mode.use_bytes(),
                captures: None,
            });
            continue;
        };
        let set = match driver::first_match(&re, &buf, true, i, ctx) {
            Some(m) => {
                let mut mapper = CharMapper::new(&buf, mode);
                let (s, l, groups) = user_positions(&m, &mut mapper);
                let mut start = vec![Some(s)];
                let mut length = vec![Some(l)];
                for (gs, gl) in groups {
                    start.push(gs);
                    length.push(gl);
                }
                MatchSet {
                    start,
                    length,
                    index_type: mode.index_type(),
                    use_bytes: mode.use_bytes(),
                    captures: None,
                }
            }
            None => MatchSet {
                start: vec![Some(-1)],
                length: vec![Some(-1)],
                index_type: mode.index_type(),
                use_bytes: mode.use_bytes(),
                captures: None,
            },
        };
        out.push(set);
    }
    Ok(out)
}

/// Replace the first match per element.
pub fn sub(
    pat: &TextValue,
    rep: &TextValue,
    x: &TextVec,
    opts: &MatchOptions,
    ctx: &mut CallContext,
) -> Result<TextVec, Error> {
    sub_impl(pat, rep, x, opts, false, ctx)
}

/// Replace every match per element.
pub fn gsub(
    pat: &TextValue,
    rep: &TextValue,
    x: &TextVec,
    opts: &MatchOptions,
    ctx: &mut CallContext,
) -> Result<TextVec, Error> {
    sub_impl(pat, rep, x, opts, true, ctx)
}

enum SubOutcome {
    Unchanged,
    Replaced(Vec<u8>),
}

fn sub_impl(
    pat: &TextValue,
    rep: &TextValue,
    x: &TextVec,
    opts: &MatchOptions,
    global: bool,
    ctx: &mut CallContext,
) -> Result<TextVec, Error> {
    let (dialect, ignore_case) = resolve_flags(opts.fixed, opts.perl, opts.ignore_case, ctx);
    let n = x.len();
    let names = x.names().map(|ns| ns.to_vec());
    if pat.is_missing() {
        let mut out = TextVec::new(vec![TextValue::missing(); n]);
        if let Some(names) = names {
            out = out.with_names(names);
        }
        return Ok(out);
    }
    let mode = choose_mode(
        &[pat],
        Some(rep),
        x,
        dialect,
        opts.use_bytes,
        true,
        ctx.locale,
    );
    let pat_buf = normalize_required(pat, mode, ctx.locale, "'pattern'")?;
    if dialect == Dialect::Literal && pat_buf.is_empty() {
        return Err(Error::ZeroLengthPattern);
    }
    let rep_missing = rep.is_missing();
    let rep_buf: Cow<[u8]> = if rep_missing {
        Cow::Borrowed(&[][..])
    } else {
        normalize_required(rep, mode, ctx.locale, "'replacement'")?
    };
    let re = compile(&pat_buf, dialect, mode, ignore_case, ctx)?;
    let nsubs = count_subs(&rep_buf);

    let mut values = Vec::with_capacity(n);
    for (i, v) in x.iter().enumerate() {
        ctx.check_interrupt()?;
        if v.is_missing() {
            values.push(TextValue::missing());
            continue;
        }
        let Some(buf) = normalize(v, mode, ctx.locale) else {
            ctx.warn_invalid_input(i);
            values.push(TextValue::missing());
            continue;
        };
        let outcome = match &re {
            CompiledPattern::Literal(needle) => sub_literal(needle, &rep_buf, &buf, global)?,
            _ => sub_regex(&re, &rep_buf, &buf, dialect, mode, nsubs, global, i, ctx)?,
        };
        values.push(match outcome {
            SubOutcome::Unchanged => v.clone(),
            SubOutcome::Replaced(_) if rep_missing => TextValue::missing(),
            SubOutcome::Replaced(bytes) => output_value(bytes, mode),
        });
    }

    let mut out = TextVec::new(values);
    if let Some(names) = names {
        out = out.with_names(names);
    }
    Ok(out)
}

fn sub_literal(
    needle: &[u8],
    rep: &[u8],
    s: &[u8],
    global: bool,
) -> Result<SubOutcome, Error> {
    let Some(first) = literal::find(s, needle, 0) else {
        return Ok(SubOutcome::Unchanged);
    };
    let mut out = Vec::with_capacity(s.len() + rep.len() + 16);
    let mut pos = 0usize;
    let mut st = first;
    loop {
        out.extend_from_slice(&s[pos..st]);
        out.extend_from_slice(rep);
        pos = st + needle.len();
        if out.len() > MAX_RESULT {
            return Err(Error::ResultTooLong);
        }
        if !global {
            break;
        }
        match literal::find(s, needle, pos) {
            Some(next) => st = next,
            None => break,
        }
    }
    out.extend_from_slice(&s[pos..]);
    Ok(SubOutcome::Replaced(out))
}

#[allow(clippy::too_many_arguments)]
fn sub_regex(
    re: &CompiledPattern,
    rep: &[u8],
    s: &[u8],
    dialect: Dialect,
    mode: Mode,
    nsubs: usize,
    global: bool,
    elem: usize,
    ctx: &mut CallContext,
) -> Result<SubOutcome, Error> {
    let mut out = Vec::with_capacity(initial_capacity(s.len(), rep.len(), nsubs, global));
    let mut at = 0usize;
    let mut nmatch = 0usize;
    let mut last_end: Option<usize> = None;
    loop {
        let m = match driver::match_at(re, s, at, true) {
            Ok(Some(m)) => m,
            Ok(None) => break,
            Err(e) => {
                driver::warn_engine_error(ctx, elem, &e);
                break;
            }
        };
        nmatch += 1;
        out.extend_from_slice(&s[at..m.start]);
        // Guard against re-substituting at a position already covered.
        if last_end.map_or(true, |le| m.end > le) {
            append_replacement(&mut out, s, &m.groups, rep, dialect, mode);
            last_end = Some(m.end);
        }
        at = m.end;
        if !global || at >= s.len() {
            break;
        }
        if m.end == m.start {
            let step = char_step(s, at, mode);
            out.extend_from_slice(&s[at..at + step]);
            at += step;
        }
        if out.len() > MAX_RESULT {
            return Err(Error::ResultTooLong);
        }
    }
    if nmatch == 0 {
        return Ok(SubOutcome::Unchanged);
    }
    out.extend_from_slice(&s[at..]);
    if out.len() > MAX_RESULT {
        return Err(Error::ResultTooLong);
    }
    Ok(SubOutcome::Replaced(out))
}

/// Split each element around matches of the recycled separator vector.
pub fn split(
    x: &TextVec,
    tok: &TextVec,
    opts: &SplitOptions,
    ctx: &mut CallContext,
) -> Result<SplitResult, Error> {
    let mut perl = opts.perl;
    if opts.fixed && perl {
        ctx.warn("argument 'perl = TRUE' will be ignored");
        perl = false;
    }
    let dialect = if opts.fixed {
        Dialect::Literal
    } else if perl {
        Dialect::Perl
    } else {
        Dialect::Extended
    };
    let n = x.len();
    let empty_tok = TextValue::from_str("");
    let toks: Vec<&TextValue> = if tok.is_empty() {
        vec![&empty_tok]
    } else {
        tok.iter().collect()
    };
    let tlen = toks.len();
    let mode = choose_mode(&toks, None, x, dialect, opts.use_bytes, false, ctx.locale);

    let mut out: Vec<Option<TextVec>> = (0..n).map(|_| None).collect();
    for (itok, t) in toks.iter().enumerate() {
        if itok >= n {
            break;
        }
        if t.is_missing() {
            // A missing separator does not split.
            for i in (itok..n).step_by(tlen) {
                out[i] = Some(TextVec::new(vec![x.get(i).clone()]));
            }
            continue;
        }
        let sep = normalize_required(
            t,
            mode,
            ctx.locale,
            &format!("'split' string {}", itok + 1),
        )?;
        let re = if sep.is_empty() {
            None
        } else {
            Some(compile(&sep, dialect, mode, false, ctx)?)
        };
        for i in (itok..n).step_by(tlen) {
            ctx.check_interrupt()?;
            let v = x.get(i);
            if v.is_missing() {
                out[i] = Some(TextVec::new(vec![TextValue::missing()]));
                continue;
            }
            let Some(buf) = normalize(v, mode, ctx.locale) else {
                ctx.warn_invalid_input(i);
                out[i] = Some(TextVec::new(vec![TextValue::missing()]));
                continue;
            };
            let tokens = match &re {
                None => split_chars(&buf, mode),
                Some(re) => split_one(re, &buf, mode, i, ctx),
            };
            out[i] = Some(TextVec::new(
                tokens.into_iter().map(|b| output_value(b, mode)).collect(),
            ));
        }
    }

    Ok(SplitResult {
        tokens: out.into_iter().map(|o| o.unwrap_or_default()).collect(),
        names: x.names().map(|ns| ns.to_vec()),
    })
}

/// Search an opaque byte sequence for an opaque byte pattern.
pub fn grep_raw(
    pat: &[u8],
    text: &[u8],
    opts: &RawOptions,
    ctx: &mut CallContext,
) -> Result<RawResult, Error> {
    grep_raw_impl(pat, text, opts, ctx)
}


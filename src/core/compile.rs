//! The pattern compiler façade: one compile/free contract over the three
//! dialects.
//!
//! A compiled pattern is created once per call after mode selection and
//! dropped on every exit path (ownership does the freeing). The Perl
//! dialect compiles through PCRE2 with JIT attempted; its JIT stack ceiling
//! comes from `PCRE_JIT_STACK_MAXSIZE` (floating-point megabytes, clamped
//! to `[0, 1000]`, default 64). Locale character tables for non-UTF case
//! folding live inside the engine binding, so their ownership never crosses
//! this façade.
//!
//! PCRE2 of the vintage bundled here (>= 10.30) matches with heap-allocated
//! frames, never stack recursion, so the recursion-limit knob of older
//! engines has no effect and is not configured; `pcre_config()` reports
//! `stack: false` accordingly.

use crate::core::context::CallContext;
use crate::core::error::Error;
use crate::core::mode::{Dialect, Mode};

/// Default JIT stack ceiling in megabytes. The engine help suggests 1 MB
/// suffices, but subjects around a million bytes need more.
const JIT_STACK_DEFAULT_MB: f64 = 64.0;

/// A compiled pattern, owned by one call.
#[derive(Debug)]
pub(crate) enum CompiledPattern {
    Literal(Vec<u8>),
    Extended(regex::bytes::Regex),
    Perl {
        re: pcre2::bytes::Regex,
        /// Capture-group names in group order, "" when unnamed.
        capture_names: Vec<String>,
        /// Number of capturing groups, excluding the whole match.
        capture_count: usize,
    },
}

impl CompiledPattern {
    /// Number of capturing groups (excluding the whole match).
    pub fn capture_count(&self) -> usize {
        match self {
            CompiledPattern::Literal(_) => 0,
            CompiledPattern::Extended(re) => re.captures_len() - 1,
            CompiledPattern::Perl { capture_count, .. } => *capture_count,
        }
    }

    pub fn capture_names(&self) -> &[String] {
        match self {
            CompiledPattern::Perl { capture_names, .. } => capture_names,
            _ => &[],
        }
    }
}

/// Compile `pattern` for `dialect` under `mode`.
pub(crate) fn compile(
    pattern: &[u8],
    dialect: Dialect,
    mode: Mode,
    ignore_case: bool,
    ctx: &mut CallContext,
) -> Result<CompiledPattern, Error> {
    match dialect {
        Dialect::Literal => Ok(CompiledPattern::Literal(pattern.to_vec())),
        Dialect::Extended => compile_extended(pattern, mode, ignore_case),
        Dialect::Perl => compile_perl(pattern, mode, ignore_case, ctx),
    }
}

pub(crate) fn compile_extended(
    pattern: &[u8],
    mode: Mode,
    ignore_case: bool,
) -> Result<CompiledPattern, Error> {
    let source = pattern_source(pattern)?;
    let re = regex::bytes::RegexBuilder::new(source)
        .unicode(!mode.is_byte_based())
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| Error::InvalidPattern {
            pattern: source.to_string(),
            reason: e.to_string(),
        })?;
    Ok(CompiledPattern::Extended(re))
}

fn compile_perl(
    pattern: &[u8],
    mode: Mode,
    ignore_case: bool,
    ctx: &mut CallContext,
) -> Result<CompiledPattern, Error> {
    let source = pattern_source(pattern)?;
    let mut builder = pcre2::bytes::RegexBuilder::new();
    builder
        .utf(mode == Mode::Utf8)
        .caseless(ignore_case)
        .jit_if_available(true)
        .max_jit_stack_size(Some(jit_stack_bytes(
            std::env::var("PCRE_JIT_STACK_MAXSIZE").ok().as_deref(),
            &mut |msg| ctx.warn(msg),
        )));
    let re = builder.build(source).map_err(|e| Error::InvalidPattern {
        pattern: source.to_string(),
        reason: e.to_string(),
    })?;
    let capture_count = re.captures_len() - 1;
    let capture_names = re
        .capture_names()
        .iter()
        .skip(1)
        .map(|n| n.clone().unwrap_or_default())
        .collect();
    Ok(CompiledPattern::Perl {
        re,
        capture_names,
        capture_count,
    })
}

/// Engine dialects take the pattern source as a string; embedded NULs are
/// fine, but the source itself must be valid UTF-8.
fn pattern_source(pattern: &[u8]) -> Result<&str, Error> {
    std::str::from_utf8(pattern).map_err(|_| Error::InvalidPattern {
        pattern: String::from_utf8_lossy(pattern).into_owned(),
        reason: "pattern source is not valid UTF-8".to_string(),
    })
}

/// JIT stack ceiling in bytes from the raw env-var value.
fn jit_stack_bytes(raw: Option<&str>, warn: &mut dyn FnMut(&str)) -> usize {
    let default = (JIT_STACK_DEFAULT_MB * 1024.0 * 1024.0) as usize;
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(mb) if (0.0..=1000.0).contains(&mb) => (mb * 1024.0 * 1024.0) as usize,
        _ => {
            warn("PCRE_JIT_STACK_MAXSIZE invalid and ignored");
            default
        }
    }
}

/// Engine capabilities reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcreConfig {
    pub utf8: bool,
    pub unicode_properties: bool,
    pub jit: bool,
    /// Whether the engine matches by stack recursion (never, since PCRE2
    /// 10.30).
    pub stack: bool,
}

impl PcreConfig {
    /// The named-boolean shape the host surface expects.
    pub fn as_named(&self) -> [(&'static str, bool); 4] {
        [
            ("UTF-8", self.utf8),
            ("Unicode properties", self.unicode_properties),
            ("JIT", self.jit),
            ("stack", self.stack),
        ]
    }
}

pub fn pcre_config() -> PcreConfig {
    PcreConfig {
        utf8: true,
        unicode_properties: true,
        jit: pcre2::is_jit_available(),
        stack: false,
    }
}

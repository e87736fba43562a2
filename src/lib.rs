//! grepvec - vectorized string pattern matching
//!
//! The string-matching core of a vector-oriented statistical runtime:
//! - split / grep / grepl / regexpr / gregexpr / sub / gsub / regexec over
//!   encoding-tagged text vectors, plus raw-byte search
//! - three pattern dialects: literal, extended regex, Perl regex (PCRE2
//!   with JIT)
//! - per-call encoding classification (bytes / ASCII / UTF-8 / wide) with
//!   character-indexed positions wherever the input is not byte-tagged
//! - missing-value propagation, capped encoding warnings and cooperative
//!   interruption
//!
//! ```
//! use grepvec::{gsub, CallContext, MatchOptions, TextValue, TextVec, Warnings};
//!
//! let mut sink = Warnings::default();
//! let mut ctx = CallContext::new(&mut sink);
//! let out = gsub(
//!     &TextValue::from_str(r"(\w+) (\w+)"),
//!     &TextValue::from_str(r"\2 \1"),
//!     &TextVec::from_strs(&["hello world"]),
//!     &MatchOptions { perl: true, ..Default::default() },
//!     &mut ctx,
//! )
//! .unwrap();
//! assert_eq!(out.get(0).as_bytes(), Some(&b"world hello"[..]));
//! ```

pub mod core;

pub use core::{
    grep, grep_raw, gregexpr, grepl, gsub, pcre_config, regexec, regexpr, split, sub,
    CallContext, CaptureInfo, Dialect, Encoding, Error, GrepOptions, GrepResult, IndexType,
    Locale, MatchInfo, MatchOptions, MatchSet, Mode, PcreConfig, RawOptions, RawResult,
    RegexecOptions, SplitOptions, SplitResult, TextValue, TextVec, WarningSink, Warnings,
};

//! Core pattern-matching engine for grepvec.
//!
//! This module implements the vectorized string-matching operations of a
//! statistical runtime: split, presence tests, match-position extraction
//! (first or all, with capture groups), substitution and raw-byte search,
//! each dispatching to one of three dialects:
//!
//! - **literal**: direct byte scans, the fastest path
//! - **extended**: POSIX-style regular expressions via the `regex` crate
//! - **Perl**: PCRE2 with JIT via the `pcre2` crate
//!
//! # Architecture
//!
//! A call flows through the components in a fixed order:
//!
//! - [`mode`]: the encoding classifier picks one of four execution modes
//!   (`Bytes`, `Ascii`, `Utf8`, `Wide`) from the inputs' encoding tags, the
//!   locale and the user flags, once per call and before any element work
//! - `normalize`: per element, the canonical byte buffer the engines
//!   expect, validating UTF-8 and up-converting Latin-1
//! - [`compile`]: the compiler façade builds one compiled pattern per call
//!   (JIT-compiled for the Perl dialect, with the stack ceiling taken from
//!   `PCRE_JIT_STACK_MAXSIZE`)
//! - `driver`: first-match / all-matches loops with empty-match
//!   advancement and per-element engine-error warnings
//! - [`position`]: byte offsets from the engines become the character
//!   positions users see
//! - `replace` / `split` / `rawgrep`: the operation-specific cores
//! - `ops`: the host surface tying it all together
//!
//! Everything is single-threaded and cooperative: element order is strict,
//! and an optional interrupt flag is honored between elements.

pub mod compile;
pub mod context;
mod driver;
pub mod error;
mod literal;
pub mod mode;
mod normalize;
mod ops;
pub mod position;
mod rawgrep;
mod replace;
mod split;
pub mod types;

pub use compile::{pcre_config, PcreConfig};
pub use context::{CallContext, Locale, WarningSink, Warnings};
pub use error::Error;
pub use mode::{Dialect, Mode};
pub use ops::{
    grep, grep_raw, gregexpr, grepl, gsub, regexec, regexpr, split, sub, GrepOptions,
    MatchOptions, RegexecOptions, SplitOptions,
};
pub use rawgrep::RawOptions;
pub use types::{
    CaptureInfo, Encoding, GrepResult, IndexType, MatchInfo, MatchSet, RawResult, SplitResult,
    TextValue, TextVec,
};

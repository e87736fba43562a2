//! The encoding classifier.
//!
//! Every call resolves its execution mode exactly once, before any
//! per-element work, from the pattern(s), the optional replacement, the
//! text vector and the locale. The rules, in order:
//!
//! 1. `use_bytes` forces `Bytes`.
//! 2. All-ASCII inputs run as `Ascii`: byte-wise execution whose positions
//!    are character positions by construction.
//! 3. Any byte-tagged input forces `Bytes` (those bytes must never be
//!    reinterpreted).
//! 4. Otherwise UTF-8 when the dialect demands it in a multibyte locale,
//!    when any input is UTF-8 (tagged, or untagged non-ASCII in a UTF-8
//!    locale), or when a Latin-1-tagged input must be up-converted because
//!    the locale is not Latin-1; else tentatively `Bytes`.
//! 5. The extended dialect upgrades UTF-8 (or tentative bytes in a
//!    multibyte non-UTF-8 locale) to `Wide`, the character-indexed path.

use crate::core::context::Locale;
use crate::core::types::{Encoding, IndexType, TextValue, TextVec};

/// Execution mode, fixed per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Bytes,
    Ascii,
    Utf8,
    Wide,
}

impl Mode {
    /// Byte-wise execution and advancement (no character decoding).
    #[inline]
    pub fn is_byte_based(self) -> bool {
        matches!(self, Mode::Bytes | Mode::Ascii)
    }

    /// What the user-visible indices count under this mode.
    pub fn index_type(self) -> IndexType {
        match self {
            Mode::Bytes => IndexType::Bytes,
            _ => IndexType::Chars,
        }
    }

    pub fn use_bytes(self) -> bool {
        self == Mode::Bytes
    }
}

/// Pattern syntax family, resolved from the `fixed`/`perl` flags after
/// incompatible-flag fixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Literal,
    Extended,
    Perl,
}

/// Choose the execution mode for one call.
///
/// `char_positions` is set by operations that report character positions or
/// substitute (those force UTF-8 for any non-literal dialect in a multibyte
/// locale, not just the Perl one).
pub(crate) fn choose_mode(
    patterns: &[&TextValue],
    replacement: Option<&TextValue>,
    text: &TextVec,
    dialect: Dialect,
    use_bytes: bool,
    char_positions: bool,
    locale: Locale,
) -> Mode {
    if use_bytes {
        return Mode::Bytes;
    }

    let each = |f: &dyn Fn(&TextValue) -> bool| {
        patterns.iter().all(|p| f(p))
            && replacement.map_or(true, |r| f(r))
            && text.iter().all(|v| f(v))
    };
    let any = |f: &dyn Fn(&TextValue) -> bool| {
        patterns.iter().any(|p| f(p))
            || replacement.map_or(false, |r| f(r))
            || text.iter().any(|v| f(v))
    };

    if each(&|v| v.is_missing() || v.is_ascii()) {
        return Mode::Ascii;
    }
    if any(&|v| v.is_bytes_tagged()) {
        return Mode::Bytes;
    }

    let dialect_demands = locale.mbcs
        && match dialect {
            Dialect::Perl => true,
            Dialect::Extended => char_positions,
            Dialect::Literal => false,
        };
    let mut utf8 = dialect_demands || any(&|v| treats_as_utf8(v, locale));
    if !utf8 && !locale.latin1 {
        utf8 = any(&|v| v.is_latin1_tagged());
    }

    let mode = if utf8 { Mode::Utf8 } else { Mode::Bytes };
    if dialect == Dialect::Extended {
        if mode == Mode::Utf8 || (locale.mbcs && !locale.utf8) {
            return Mode::Wide;
        }
    }
    mode
}

/// A value whose content is UTF-8 for matching purposes: tagged UTF-8, or
/// untagged non-ASCII in a UTF-8 locale (untagged means locale-encoded).
fn treats_as_utf8(v: &TextValue, locale: Locale) -> bool {
    v.is_utf8_tagged()
        || (v.encoding() == Some(Encoding::Unknown) && locale.utf8 && !v.is_ascii())
}

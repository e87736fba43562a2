//! Text values, text vectors and the result carriers handed back to the host.
//!
//! The host runtime owns its strings; this crate sees them as immutable byte
//! sequences tagged with a declared encoding, with a distinguished missing
//! value that propagates through every operation. Results use 1-based
//! positions with `-1` as the "no match" sentinel and `None` as the missing
//! analogue, mirroring the host's integer vector conventions.

use crate::core::mode::Mode;

/// Declared encoding of a text value.
///
/// `Bytes` means the content must never be reinterpreted under any encoding;
/// `Unknown` means "whatever the current locale says".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Unknown,
    Latin1,
    Utf8,
    Bytes,
    Ascii,
}

/// One element of a text vector: tagged bytes, or the missing value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextValue {
    data: Option<(Vec<u8>, Encoding)>,
}

impl TextValue {
    /// The distinguished missing value.
    pub fn missing() -> Self {
        TextValue { data: None }
    }

    /// A value with an explicit encoding tag.
    pub fn new(bytes: impl Into<Vec<u8>>, encoding: Encoding) -> Self {
        TextValue {
            data: Some((bytes.into(), encoding)),
        }
    }

    /// A value from a Rust string, tagged `Ascii` or `Utf8` by content.
    pub fn from_str(s: &str) -> Self {
        let enc = if s.is_ascii() {
            Encoding::Ascii
        } else {
            Encoding::Utf8
        };
        TextValue::new(s.as_bytes().to_vec(), enc)
    }

    pub fn is_missing(&self) -> bool {
        self.data.is_none()
    }

    /// Content bytes; `None` for the missing value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.data.as_ref().map(|(b, _)| b.as_slice())
    }

    pub fn encoding(&self) -> Option<Encoding> {
        self.data.as_ref().map(|(_, e)| *e)
    }

    /// True when the content is pure ASCII (missing is not ASCII).
    pub fn is_ascii(&self) -> bool {
        self.as_bytes().is_some_and(|b| b.is_ascii())
    }

    pub fn is_bytes_tagged(&self) -> bool {
        self.encoding() == Some(Encoding::Bytes)
    }

    pub fn is_utf8_tagged(&self) -> bool {
        self.encoding() == Some(Encoding::Utf8)
    }

    pub fn is_latin1_tagged(&self) -> bool {
        self.encoding() == Some(Encoding::Latin1)
    }
}

/// Tag an operation's output bytes according to the mode it ran under.
///
/// UTF-8 modes produce UTF-8-tagged output (downgraded to `Ascii` when the
/// content allows); byte modes produce byte-tagged output so nothing
/// downstream reinterprets it.
pub(crate) fn output_value(bytes: Vec<u8>, mode: Mode) -> TextValue {
    let enc = if bytes.is_ascii() {
        Encoding::Ascii
    } else if mode.is_byte_based() {
        Encoding::Bytes
    } else {
        Encoding::Utf8
    };
    TextValue::new(bytes, enc)
}

/// An ordered vector of text values with an optional parallel names vector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextVec {
    values: Vec<TextValue>,
    names: Option<Vec<String>>,
}

impl TextVec {
    pub fn new(values: Vec<TextValue>) -> Self {
        TextVec {
            values,
            names: None,
        }
    }

    /// Convenience constructor for tests and embedders.
    pub fn from_strs<S: AsRef<str>>(strs: &[S]) -> Self {
        TextVec::new(strs.iter().map(|s| TextValue::from_str(s.as_ref())).collect())
    }

    /// Attach a names vector. Panics if the length differs.
    pub fn with_names(mut self, names: Vec<String>) -> Self {
        assert_eq!(names.len(), self.values.len(), "names length mismatch");
        self.names = Some(names);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize) -> &TextValue {
        &self.values[i]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TextValue> {
        self.values.iter()
    }

    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }
}

/// Whether user-visible positions are byte or character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    Bytes,
    Chars,
}

impl IndexType {
    pub fn as_str(self) -> &'static str {
        match self {
            IndexType::Bytes => "bytes",
            IndexType::Chars => "chars",
        }
    }
}

/// Capture-group positions parallel to a set of matches.
///
/// `start[r][g]` / `length[r][g]` address row `r` (one element for
/// first-match operations, one match for all-match operations) and capture
/// group `g`. `Some(-1)` marks an unset group or a no-match row, `None` a
/// missing input row. `names` holds the empty string for unnamed groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureInfo {
    pub names: Vec<String>,
    pub start: Vec<Vec<Option<i32>>>,
    pub length: Vec<Vec<Option<i32>>>,
}

/// First-match positions for a whole text vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchInfo {
    /// 1-based match starts; `Some(-1)` no match, `None` missing input.
    pub start: Vec<Option<i32>>,
    /// Match lengths parallel to `start`.
    pub length: Vec<Option<i32>>,
    pub index_type: IndexType,
    pub use_bytes: bool,
    /// Present for the Perl dialect when the pattern has capture groups.
    pub captures: Option<CaptureInfo>,
}

/// All match positions for one element (or one element's first match with
/// its groups, for submatch extraction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    /// 1-based starts; `[Some(-1)]` when nothing matched, `[None]` for
    /// missing input.
    pub start: Vec<Option<i32>>,
    pub length: Vec<Option<i32>>,
    pub index_type: IndexType,
    pub use_bytes: bool,
    pub captures: Option<CaptureInfo>,
}

/// Result of the test/locate-any operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrepResult {
    /// 1-based indices of matching elements; all-`None` for a missing
    /// pattern.
    Indices(Vec<Option<i32>>),
    /// The matching elements themselves, names preserved.
    Values(TextVec),
}

/// Result of the raw-bytes search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResult {
    /// 1-based byte offsets of matches.
    Indices(Vec<i32>),
    /// A single byte string (matched slice, complement, or the input).
    Bytes(Vec<u8>),
    /// Matched slices, or the complement pieces when inverted.
    Pieces(Vec<Vec<u8>>),
}

/// Result of split: one token vector per input element, input names kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitResult {
    pub tokens: Vec<TextVec>,
    pub names: Option<Vec<String>>,
}

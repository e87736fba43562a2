//! The literal matcher: direct byte scans for the fixed dialect.
//!
//! Specialized for needle lengths 1, 2 and 3, which are common because they
//! cover single ASCII separators and single UTF-8 characters up to three
//! bytes; longer needles use a first-byte skip plus a tail comparison.

use memchr::{memchr, memchr_iter};

/// Byte offset of the first occurrence of `needle` in `hay` at or after
/// `from`. An empty needle matches (emptily) at `from`.
pub(crate) fn find(hay: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > hay.len() {
        return None;
    }
    if needle.is_empty() {
        return Some(from);
    }
    if needle.len() > hay.len() - from {
        return None;
    }
    match needle.len() {
        1 => memchr(needle[0], &hay[from..]).map(|i| from + i),
        2 => {
            let end = hay.len() - 1;
            (from..end).find(|&i| hay[i] == needle[0] && hay[i + 1] == needle[1])
        }
        3 => {
            let end = hay.len() - 2;
            (from..end).find(|&i| {
                hay[i] == needle[0] && hay[i + 1] == needle[1] && hay[i + 2] == needle[2]
            })
        }
        _ => {
            let last = hay.len() - needle.len();
            memchr_iter(needle[0], &hay[from..])
                .map(|i| from + i)
                .take_while(|&i| i <= last)
                .find(|&i| &hay[i + 1..i + needle.len()] == &needle[1..])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_byte() {
        assert_eq!(find(b"abcabc", b"c", 0), Some(2));
        assert_eq!(find(b"abcabc", b"c", 3), Some(5));
        assert_eq!(find(b"abcabc", b"x", 0), None);
    }

    #[test]
    fn test_two_and_three_bytes() {
        assert_eq!(find(b"xxabxab", b"ab", 0), Some(2));
        assert_eq!(find(b"xxabxab", b"ab", 3), Some(5));
        assert_eq!(find(b"xyzxyz", b"yzx", 0), Some(1));
        assert_eq!(find(b"xyzxyz", b"yzy", 0), None);
    }

    #[test]
    fn test_generic_needle() {
        assert_eq!(find(b"the quick brown fox", b"brown", 0), Some(10));
        assert_eq!(find(b"aaaaab", b"aaab", 0), Some(2));
        assert_eq!(find(b"abcd", b"abcde", 0), None);
    }

    #[test]
    fn test_empty_needle_matches_at_from() {
        assert_eq!(find(b"abc", b"", 1), Some(1));
        assert_eq!(find(b"abc", b"", 3), Some(3));
        assert_eq!(find(b"abc", b"", 4), None);
    }

    #[test]
    fn test_embedded_nul() {
        assert_eq!(find(&[0xff, 0x00, 0x01, 0x00, 0x01], &[0x00, 0x01], 0), Some(1));
        assert_eq!(find(&[0xff, 0x00, 0x01, 0x00, 0x01], &[0x00, 0x01], 2), Some(3));
    }

    #[test]
    fn test_from_past_end() {
        assert_eq!(find(b"ab", b"a", 3), None);
    }
}

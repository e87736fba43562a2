//! Integration tests for grep, grepl and pcre_config.

use std::sync::atomic::{AtomicBool, Ordering};

use grepvec::{
    grep, grepl, pcre_config, CallContext, Encoding, Error, GrepOptions, GrepResult,
    MatchOptions, TextValue, TextVec, Warnings,
};

fn run_grep(pat: &TextValue, x: &TextVec, opts: GrepOptions) -> (GrepResult, Vec<String>) {
    let mut sink = Warnings::default();
    let res = {
        let mut ctx = CallContext::new(&mut sink);
        grep(pat, x, &opts, &mut ctx).unwrap()
    };
    (res, sink.0)
}

fn values(res: &GrepResult) -> Vec<String> {
    match res {
        GrepResult::Values(v) => v
            .iter()
            .map(|e| String::from_utf8(e.as_bytes().unwrap().to_vec()).unwrap())
            .collect(),
        GrepResult::Indices(_) => panic!("expected values"),
    }
}

#[test]
fn test_grep_value_filters() {
    let x = TextVec::from_strs(&["x1", "y", "xx"]);
    let (res, _) = run_grep(
        &TextValue::from_str("^x"),
        &x,
        GrepOptions { value: true, ..Default::default() },
    );
    assert_eq!(values(&res), ["x1", "xx"]);
}

#[test]
fn test_grep_indices_are_one_based() {
    let x = TextVec::from_strs(&["b", "ab", "c", "a"]);
    let (res, _) = run_grep(&TextValue::from_str("a"), &x, GrepOptions::default());
    assert_eq!(res, GrepResult::Indices(vec![Some(2), Some(4)]));
}

#[test]
fn test_grep_invert_and_names() {
    let x = TextVec::from_strs(&["apple", "pear", "avocado"])
        .with_names(vec!["a".into(), "b".into(), "c".into()]);
    let (res, _) = run_grep(
        &TextValue::from_str("^a"),
        &x,
        GrepOptions { value: true, invert: true, ..Default::default() },
    );
    match res {
        GrepResult::Values(v) => {
            assert_eq!(v.len(), 1);
            assert_eq!(v.get(0).as_bytes(), Some(&b"pear"[..]));
            assert_eq!(v.names(), Some(&["b".to_string()][..]));
        }
        _ => panic!("expected values"),
    }
}

#[test]
fn test_missing_element_counts_as_match_when_inverted() {
    let x = TextVec::new(vec![TextValue::from_str("b"), TextValue::missing()]);
    let (res, _) = run_grep(
        &TextValue::from_str("a"),
        &x,
        GrepOptions { invert: true, ..Default::default() },
    );
    assert_eq!(res, GrepResult::Indices(vec![Some(1), Some(2)]));
}

#[test]
fn test_grepl_missing_propagates() {
    let x = TextVec::new(vec![
        TextValue::from_str("abc"),
        TextValue::missing(),
        TextValue::from_str("xyz"),
    ]);
    let mut sink = Warnings::default();
    let mut ctx = CallContext::new(&mut sink);
    let res = grepl(&TextValue::from_str("a"), &x, &MatchOptions::default(), &mut ctx).unwrap();
    assert_eq!(res, vec![Some(true), None, Some(false)]);
}

#[test]
fn test_missing_pattern_shapes() {
    let x = TextVec::from_strs(&["a", "b"]);
    let (res, _) = run_grep(&TextValue::missing(), &x, GrepOptions::default());
    assert_eq!(res, GrepResult::Indices(vec![None, None]));

    let mut sink = Warnings::default();
    let mut ctx = CallContext::new(&mut sink);
    let res = grepl(&TextValue::missing(), &x, &MatchOptions::default(), &mut ctx).unwrap();
    assert_eq!(res, vec![None, None]);
}

#[test]
fn test_fixed_clears_ignore_case() {
    let x = TextVec::from_strs(&["abc"]);
    let (res, warnings) = run_grep(
        &TextValue::from_str("A"),
        &x,
        GrepOptions { fixed: true, ignore_case: true, ..Default::default() },
    );
    // ignore.case is dropped for the literal dialect, so nothing matches.
    assert_eq!(res, GrepResult::Indices(vec![]));
    assert_eq!(warnings, ["argument 'ignore.case = TRUE' will be ignored"]);
}

#[test]
fn test_perl_case_insensitive_unicode() {
    let x = TextVec::from_strs(&["GRÜN"]);
    let (res, _) = run_grep(
        &TextValue::from_str("grün"),
        &x,
        GrepOptions { perl: true, ignore_case: true, ..Default::default() },
    );
    assert_eq!(res, GrepResult::Indices(vec![Some(1)]));
}

#[test]
fn test_invalid_pattern_is_fatal_with_reason() {
    let x = TextVec::from_strs(&["a"]);
    let mut sink = Warnings::default();
    let mut ctx = CallContext::new(&mut sink);
    let err = grep(
        &TextValue::from_str("(unclosed"),
        &x,
        &GrepOptions::default(),
        &mut ctx,
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { .. }));
}

#[test]
fn test_invalid_utf8_elements_warn_capped_at_five() {
    let mut elems = Vec::new();
    for _ in 0..7 {
        elems.push(TextValue::new(vec![0xff, 0xfe], Encoding::Utf8));
    }
    let x = TextVec::new(elems);
    let mut sink = Warnings::default();
    let res = {
        let mut ctx = CallContext::new(&mut sink);
        grepl(&TextValue::from_str("a"), &x, &MatchOptions::default(), &mut ctx).unwrap()
    };
    assert_eq!(res, vec![Some(false); 7]);
    assert_eq!(sink.0.len(), 5);
    assert!(sink.0[0].contains("invalid UTF-8"));
}

#[test]
fn test_interrupt_aborts_the_call() {
    let flag = AtomicBool::new(true);
    flag.store(true, Ordering::Relaxed);
    let x = TextVec::from_strs(&["a"]);
    let mut sink = Warnings::default();
    let mut ctx = CallContext::new(&mut sink).with_interrupt(&flag);
    let err = grep(&TextValue::from_str("a"), &x, &GrepOptions::default(), &mut ctx).unwrap_err();
    assert!(matches!(err, Error::Interrupted));
}

#[test]
fn test_byte_tagged_input_matches_bytewise() {
    let x = TextVec::new(vec![TextValue::new(vec![0x61, 0xff, 0x62], Encoding::Bytes)]);
    let (res, _) = run_grep(&TextValue::from_str("ab"), &x, GrepOptions::default());
    assert_eq!(res, GrepResult::Indices(vec![]));
    let (res, _) = run_grep(&TextValue::from_str("b"), &x, GrepOptions::default());
    assert_eq!(res, GrepResult::Indices(vec![Some(1)]));
}

#[test]
fn test_pcre_config_names() {
    let named = pcre_config().as_named();
    let names: Vec<&str> = named.iter().map(|(n, _)| *n).collect();
    assert_eq!(names, ["UTF-8", "Unicode properties", "JIT", "stack"]);
    assert!(named[0].1);
    assert!(named[1].1);
    assert!(!named[3].1);
}

//! Integration tests for the split operation.
//!
//! Covers the fixed and regex dialects, the empty-separator character
//! split, separator recycling, missing propagation and the split/join
//! round-trip.

use grepvec::{split, CallContext, SplitOptions, SplitResult, TextValue, TextVec, Warnings};

fn run(x: &TextVec, tok: &TextVec, opts: SplitOptions) -> (SplitResult, Vec<String>) {
    let mut sink = Warnings::default();
    let res = {
        let mut ctx = CallContext::new(&mut sink);
        split(x, tok, &opts, &mut ctx).unwrap()
    };
    (res, sink.0)
}

fn tokens(res: &SplitResult, i: usize) -> Vec<String> {
    res.tokens[i]
        .iter()
        .map(|v| String::from_utf8(v.as_bytes().unwrap().to_vec()).unwrap())
        .collect()
}

#[test]
fn test_fixed_split_basic() {
    let x = TextVec::from_strs(&["a,b,,c"]);
    let tok = TextVec::from_strs(&[","]);
    let (res, _) = run(&x, &tok, SplitOptions { fixed: true, ..Default::default() });
    assert_eq!(tokens(&res, 0), ["a", "b", "", "c"]);
}

#[test]
fn test_split_of_empty_string_is_one_empty_token() {
    let x = TextVec::from_strs(&[""]);
    let tok = TextVec::from_strs(&[","]);
    let (res, _) = run(&x, &tok, SplitOptions { fixed: true, ..Default::default() });
    assert_eq!(tokens(&res, 0), [""]);
}

#[test]
fn test_regex_split() {
    let x = TextVec::from_strs(&["a1b22c333d"]);
    let tok = TextVec::from_strs(&["[0-9]+"]);
    let (res, _) = run(&x, &tok, SplitOptions::default());
    assert_eq!(tokens(&res, 0), ["a", "b", "c", "d"]);
}

#[test]
fn test_empty_separator_splits_characters() {
    let x = TextVec::from_strs(&["日本a"]);
    let tok = TextVec::from_strs(&[""]);
    let (res, _) = run(&x, &tok, SplitOptions::default());
    assert_eq!(tokens(&res, 0), ["日", "本", "a"]);
}

#[test]
fn test_empty_separator_with_use_bytes_splits_bytes() {
    let x = TextVec::from_strs(&["日a"]);
    let tok = TextVec::from_strs(&[""]);
    let (res, _) = run(
        &x,
        &tok,
        SplitOptions { use_bytes: true, ..Default::default() },
    );
    assert_eq!(res.tokens[0].len(), 4);
}

#[test]
fn test_empty_separator_vector_means_empty_separator() {
    let x = TextVec::from_strs(&["ab"]);
    let tok = TextVec::new(vec![]);
    let (res, _) = run(&x, &tok, SplitOptions::default());
    assert_eq!(tokens(&res, 0), ["a", "b"]);
}

#[test]
fn test_missing_separator_does_not_split() {
    let x = TextVec::from_strs(&["a,b"]);
    let tok = TextVec::new(vec![TextValue::missing()]);
    let (res, _) = run(&x, &tok, SplitOptions::default());
    assert_eq!(tokens(&res, 0), ["a,b"]);
}

#[test]
fn test_missing_element_propagates() {
    let x = TextVec::new(vec![TextValue::missing(), TextValue::from_str("a b")]);
    let tok = TextVec::from_strs(&[" "]);
    let (res, _) = run(&x, &tok, SplitOptions { fixed: true, ..Default::default() });
    assert_eq!(res.tokens[0].len(), 1);
    assert!(res.tokens[0].get(0).is_missing());
    assert_eq!(tokens(&res, 1), ["a", "b"]);
}

#[test]
fn test_separator_recycling() {
    let x = TextVec::from_strs(&["a,b", "a;b", "c,d"]);
    let tok = TextVec::from_strs(&[",", ";"]);
    let (res, _) = run(&x, &tok, SplitOptions { fixed: true, ..Default::default() });
    assert_eq!(tokens(&res, 0), ["a", "b"]);
    assert_eq!(tokens(&res, 1), ["a", "b"]);
    assert_eq!(tokens(&res, 2), ["c", "d"]);
}

#[test]
fn test_names_preserved() {
    let x = TextVec::from_strs(&["a b"]).with_names(vec!["first".into()]);
    let tok = TextVec::from_strs(&[" "]);
    let (res, _) = run(&x, &tok, SplitOptions::default());
    assert_eq!(res.names, Some(vec!["first".to_string()]));
}

#[test]
fn test_fixed_and_perl_warns_and_prefers_fixed() {
    let x = TextVec::from_strs(&["a.b"]);
    let tok = TextVec::from_strs(&["."]);
    let (res, warnings) = run(
        &x,
        &tok,
        SplitOptions { fixed: true, perl: true, ..Default::default() },
    );
    // "." is literal, so it splits on the dot rather than every character.
    assert_eq!(tokens(&res, 0), ["a", "b"]);
    assert_eq!(warnings, ["argument 'perl = TRUE' will be ignored"]);
}

#[test]
fn test_split_join_round_trip() {
    let inputs = ["a,b,,c", "no separators", ",leading", "a,b"];
    let tok = TextVec::from_strs(&[","]);
    for input in inputs {
        let x = TextVec::from_strs(&[input]);
        let (res, _) = run(&x, &tok, SplitOptions { fixed: true, ..Default::default() });
        let joined = tokens(&res, 0).join(",");
        assert_eq!(joined, *input, "round-trip failed for {input:?}");
    }
}

#[test]
fn test_perl_lookahead_separator() {
    let x = TextVec::from_strs(&["a,b,c"]);
    let tok = TextVec::from_strs(&["(?=,)"]);
    // The empty match before each comma emits the comma as its own token.
    let (res, _) = run(&x, &tok, SplitOptions { perl: true, ..Default::default() });
    assert_eq!(tokens(&res, 0), ["a", ",", "b", ",", "c"]);
}

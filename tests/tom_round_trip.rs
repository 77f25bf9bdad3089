//! Round-trip properties of parse and stringify
//!
//! Canonical text survives parse + stringify unchanged. Hand-written text is normalised once
//! (attribute spacing, implicit closers) and is stable from then on.

use proptest::prelude::*;
use rstest::rstest;
use tom_engine::tom::prerender::prerender;
use tom_engine::tom::random::FixedRandom;
use tom_engine::tom::{parse, preparse, stringify, ParserConfig, ParserLimitError};

fn read_round_trip(source: &str) -> String {
    stringify(&parse(source).unwrap(), &ParserConfig::read())
}

#[rstest]
#[case("plain text, nothing else")]
#[case("[bld]bold[/bld] and [itl]italic[/itl]")]
#[case("[clr red glow]hi[/clr]")]
#[case("[dice 1 6]4[/dice]")]
#[case("[calc (+ 3 (* 2 4))][/calc]")]
#[case("[calcn 3+4+ [dice 1 10]5[/dice]][/calcn]")]
#[case("[ruby かん じ]漢字[/ruby]")]
#[case("[youtube dQw4w9WgXcQ][hr]after")]
#[case("[spo][sub]deep[/sub][/spo]")]
#[case("[aa]  ascii  art  [/aa]")]
#[case("stray ] and ) and ( are literal")]
#[case("[foo] is not a tag, [[bld]x[/bld] keeps its bracket")]
#[case("trailing [")]
fn test_canonical_text_is_unchanged(#[case] source: &str) {
    assert_eq!(read_round_trip(source), source);
}

#[rstest]
#[case("[clr   red]x[/clr]", "[clr red]x[/clr]")]
#[case("[clrred]x[/clrred]", "[clr red]x[/clr]")]
#[case("[calcn 3+4+[dice 1 10]5[/dice]][/calcn]", "[calcn 3+4+ [dice 1 10]5[/dice]][/calcn]")]
#[case("[bld]never closed", "[bld]never closed[/bld]")]
#[case("[calc ( + 1  2 )][/calc]", "[calc (+ 1 2)][/calc]")]
fn test_first_pass_normalises(#[case] source: &str, #[case] expected: &str) {
    let once = read_round_trip(source);
    assert_eq!(once, expected);
    assert_eq!(read_round_trip(&once), once);
}

#[test]
fn test_demoted_opener_in_implicit_body_keeps_changing() {
    let once = read_round_trip("[itl]a[bld");
    assert_eq!(once, "[itl]a[bld[/itl]");
    assert_eq!(read_round_trip(&once), "[itl]a[bld [/itl][/itl]");
}

#[test]
fn test_write_mode_round_trip() {
    let source = "[dice 1 6] then [hr][youtube abc]";
    let root = preparse(source).unwrap();
    assert_eq!(stringify(&root, &ParserConfig::write()), source);
}

/// Body fragments that are not markup
fn junk() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("a".to_string()),
        Just("b c".to_string()),
        Just(" ".to_string()),
        Just("]".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just("[".to_string()),
        Just("[foo]".to_string()),
        Just(">>12".to_string()),
        Just("漢字".to_string()),
    ]
}

/// Canonical TOM documents: closed elements around junk text
fn document() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        junk(),
        Just("[dice 1 6]3[/dice]".to_string()),
        Just("[calc (+ 1 (* 2 3))][/calc]".to_string()),
        Just("[calcn 1+2][/calcn]".to_string()),
        Just("[hr]".to_string()),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|parts| parts.concat()),
            inner.clone().prop_map(|body| format!("[bld]{}[/bld]", body)),
            inner.clone().prop_map(|body| format!("[clr red]{}[/clr]", body)),
            inner.prop_map(|body| format!("[spo]{}[/spo]", body)),
        ]
    })
}

proptest! {
    #[test]
    fn prop_canonical_documents_round_trip(source in document()) {
        prop_assert_eq!(read_round_trip(&source), source);
    }

    #[test]
    fn prop_never_panics(source in "[\\[\\]() a-z/0-9+*-]{0,80}") {
        match parse(&source) {
            Ok(root) => {
                let text = stringify(&root, &ParserConfig::read());
                let _ = parse(&text);
                let _ = prerender(root, &mut FixedRandom(1));
            }
            Err(err) => prop_assert!(matches!(err, ParserLimitError::TooDeep { .. }), "unexpected parse error: {:?}", err),
        }
    }
}

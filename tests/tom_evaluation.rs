//! calc and calcn evaluation through the read path

use rstest::rstest;
use tom_engine::tom::ast::{CalcKind, Node};
use tom_engine::tom::pipeline::read;
use tom_engine::tom::prerender::prerender;
use tom_engine::tom::random::FixedRandom;
use tom_engine::tom::testing::assert_tree;
use tom_engine::tom::preparse;

fn value_of(persisted: &str) -> f64 {
    let root = read(persisted, &mut FixedRandom(1)).unwrap();
    match &root.children[..] {
        [Node::CalcResult(calc)] => calc.result,
        other => panic!("{} did not evaluate: {:?}", persisted, other),
    }
}

#[rstest]
#[case::sum("[calc (+ 3 4)][/calc]", 7.0)]
#[case::negate("[calc (- 3)][/calc]", -3.0)]
#[case::subtract("[calc (- 10 1 2)][/calc]", 7.0)]
#[case::product("[calc (* 2 3 4)][/calc]", 24.0)]
#[case::reciprocal("[calc (/ 8)][/calc]", 0.125)]
#[case::divide("[calc (/ 100 5 2)][/calc]", 10.0)]
#[case::nested("[calc (+ 1 (* 2 (- 5 3)))][/calc]", 5.0)]
#[case::fractions("[calc (+ 0.5 0.25)][/calc]", 0.75)]
#[case::frozen_dice("[calc (* 2 [dice 1 6]5[/dice])][/calc]", 10.0)]
fn test_calc(#[case] persisted: &str, #[case] expected: f64) {
    assert_eq!(value_of(persisted), expected);
}

#[rstest]
#[case::precedence("[calcn 2+3*4][/calcn]", 14.0)]
#[case::spaced("[calcn 2 + 3 * 4][/calcn]", 14.0)]
#[case::group("[calcn (2+3) *4][/calcn]", 20.0)]
#[case::power("[calcn 2^10][/calcn]", 1024.0)]
#[case::modulo("[calcn 10%4][/calcn]", 2.0)]
#[case::unary("[calcn -3+5][/calcn]", 2.0)]
#[case::frozen_dice("[calcn 3+4+ [dice 1 10]5[/dice]][/calcn]", 12.0)]
#[case::calc_inside("[calcn 1+ [calc (* 2 3)][/calc]][/calcn]", 7.0)]
fn test_calcn(#[case] persisted: &str, #[case] expected: f64) {
    assert_eq!(value_of(persisted), expected);
}

#[test]
fn test_calcn_with_fresh_dice_uses_random() {
    let root = prerender(
        preparse("[calcn 3+4+[dice 1 10]][/calcn]").unwrap(),
        &mut FixedRandom(5),
    );
    assert_tree(&root).child_count(1).child(0, |n| {
        n.calc_result(|c| {
            c.kind(CalcKind::Calcn)
                .result(12.0)
                .expression_contains("[1~10]5")
                .original_expression("3+4+ [dice 1 10]");
        });
    });
}

#[test]
fn test_calcn_expressions() {
    let root = read(
        "[calcn ([dice 1 6]2[/dice] +1) * 3][/calcn]",
        &mut FixedRandom(1),
    )
    .unwrap();
    assert_tree(&root).child(0, |n| {
        n.calc_result(|c| {
            c.result(9.0)
                .expression("([1~6]2 +1) * 3")
                .original_expression("([dice 1 6] +1) * 3");
        });
    });
}

#[rstest]
#[case::no_operands("[calc (*)][/calc]")]
#[case::bad_operator("[calc (^ 2 3)][/calc]")]
#[case::two_groups("[calc (+ 1) (+ 2)][/calc]")]
#[case::not_a_number("[calc (+ 1 two)][/calc]")]
#[case::division_by_zero("[calc (/ 1 0)][/calc]")]
#[case::bad_dice_operand("[calc (+ 1 [dice 6 1]3[/dice])][/calc]")]
#[case::infix_garbage("[calcn 1+*][/calcn]")]
#[case::infix_letters("[calcn x+1][/calcn]")]
#[case::infix_divide_by_zero("[calcn 4/ (2-2)][/calcn]")]
#[case::foreign_element("[calcn 1+ [bld]2[/bld]][/calcn]")]
fn test_failures_render_as_typed(#[case] persisted: &str) {
    let root = read(persisted, &mut FixedRandom(1)).unwrap();
    assert_tree(&root).child_count(1).child(0, |n| {
        n.text(persisted);
    });
}

#[test]
fn test_failure_is_local() {
    let root = read("ok [calc (+ 1 1)][/calc] bad [calc (+)][/calc]", &mut FixedRandom(1)).unwrap();
    assert_tree(&root)
        .child_count(4)
        .child(1, |n| {
            n.calc_result(|c| {
                c.result(2.0);
            });
        })
        .child(3, |n| {
            n.text("[calc (+)][/calc]");
        });
}

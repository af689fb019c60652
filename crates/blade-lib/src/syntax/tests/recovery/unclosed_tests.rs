use super::expect_errors;

#[test]
fn unclosed_block() {
    let res = expect_errors("{ q;");
    insta::assert_snapshot!(res, @"error at 0..4: missing closing `}`: block never closed (related: opened here at 0..1)");
}

#[test]
fn unclosed_paren() {
    let res = expect_errors("(q;");
    insta::assert_snapshot!(res, @"error at 0..3: missing closing `)`: parenthesis never closed (related: opened here at 0..1)");
}

#[test]
fn unclosed_array() {
    let res = expect_errors("[1, 2");
    insta::assert_snapshot!(res, @"error at 0..5: missing closing `]`: array literal never closed (related: opened here at 0..1)");
}

#[test]
fn unclosed_call_suppresses_inner_errors() {
    // the `;` inside the argument list also trips "expected an argument",
    // but the wider unclosed-paren span swallows it
    let res = expect_errors("f(1;");
    insta::assert_snapshot!(res, @"error at 1..4: missing closing `)`: call never closed (related: opened here at 1..2)");
}

#[test]
fn inner_unclosed_paren_recovers_outer_block() {
    let res = expect_errors("{ (q; }");
    insta::assert_snapshot!(res, @"error at 2..5: missing closing `)`: parenthesis never closed (related: opened here at 2..3)");
}

use super::expect_errors;
use crate::Transform;

#[test]
fn garbage_statement() {
    let res = expect_errors("@@@ q;");
    insta::assert_snapshot!(res, @"error at 0..3: unexpected token: expected a statement");
}

#[test]
fn garbage_does_not_derail_following_statements() {
    let transform = Transform::try_from("@@@ const a = 1;").expect("out of fuel");
    assert!(!transform.is_valid());
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      Error
        Garbage "@@@"
      VarDecl
        KwConst "const"
        Declarator
          Ident "a"
          Equals "="
          Literal
            Number "1"
        Semicolon ";"
    "#);
}

#[test]
fn assignment_to_a_literal() {
    let res = expect_errors("1 = x;");
    insta::assert_snapshot!(res, @"error at 2..3: cannot assign to this expression");
}

#[test]
fn export_without_default() {
    let res = expect_errors("export createQuery;");
    insta::assert_snapshot!(res, @"error at 7..18: unexpected token: expected `default`");
}

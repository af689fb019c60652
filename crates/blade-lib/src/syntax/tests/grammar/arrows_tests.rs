use crate::Transform;
use indoc::indoc;

#[test]
fn bare_parameter() {
    let input = indoc! {r#"
    x => x;
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ExprStmt
        ArrowFn
          ParamList
            Ident "x"
          Arrow "=>"
          NameRef
            Ident "x"
        Semicolon ";"
    "#);
}

#[test]
fn paren_params_with_block_body() {
    let input = indoc! {r#"
    (a, b) => { return a; };
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ExprStmt
        ArrowFn
          ParamList
            ParenOpen "("
            Ident "a"
            Comma ","
            Ident "b"
            ParenClose ")"
          Arrow "=>"
          Block
            BraceOpen "{"
            ReturnStmt
              KwReturn "return"
              NameRef
                Ident "a"
              Semicolon ";"
            BraceClose "}"
        Semicolon ";"
    "#);
}

#[test]
fn empty_params_with_expression_body() {
    let input = indoc! {r#"
    () => 1;
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ExprStmt
        ArrowFn
          ParamList
            ParenOpen "("
            ParenClose ")"
          Arrow "=>"
          Literal
            Number "1"
        Semicolon ";"
    "#);
}

#[test]
fn arrow_body_can_be_a_chain() {
    let input = indoc! {r#"
    cb => cb.data;
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ExprStmt
        ArrowFn
          ParamList
            Ident "cb"
          Arrow "=>"
          MemberExpr
            NameRef
              Ident "cb"
            Dot "."
            Ident "data"
        Semicolon ";"
    "#);
}

use crate::Transform;
use indoc::indoc;

#[test]
fn string_literal() {
    let input = indoc! {r#"
    'hi';
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ExprStmt
        Literal
          SingleQuote "'"
          StrVal "hi"
          SingleQuote "'"
        Semicolon ";"
    "#);
}

#[test]
fn keyword_literals() {
    let input = indoc! {r#"
    true; null;
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ExprStmt
        Literal
          KwTrue "true"
        Semicolon ";"
      ExprStmt
        Literal
          KwNull "null"
        Semicolon ";"
    "#);
}

#[test]
fn assignment_is_right_associative() {
    let input = indoc! {r#"
    a = b = c;
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ExprStmt
        AssignExpr
          NameRef
            Ident "a"
          Equals "="
          AssignExpr
            NameRef
              Ident "b"
            Equals "="
            NameRef
              Ident "c"
        Semicolon ";"
    "#);
}

#[test]
fn parenthesized_expression() {
    let input = indoc! {r#"
    (a);
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ExprStmt
        ParenExpr
          ParenOpen "("
          NameRef
            Ident "a"
          ParenClose ")"
        Semicolon ";"
    "#);
}

#[test]
fn object_literal_entry_forms() {
    let input = indoc! {r#"
    ({ id: 1, "key": name, short });
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ExprStmt
        ParenExpr
          ParenOpen "("
          ObjectLit
            BraceOpen "{"
            ObjectEntry
              Ident "id"
              Colon ":"
              Literal
                Number "1"
            Comma ","
            ObjectEntry
              DoubleQuote "\""
              StrVal "key"
              DoubleQuote "\""
              Colon ":"
              NameRef
                Ident "name"
            Comma ","
            ObjectEntry
              Ident "short"
            BraceClose "}"
          ParenClose ")"
        Semicolon ";"
    "#);
}

#[test]
fn array_literal() {
    let input = indoc! {r#"
    [1, x];
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ExprStmt
        ArrayLit
          BracketOpen "["
          Literal
            Number "1"
          Comma ","
          NameRef
            Ident "x"
          BracketClose "]"
        Semicolon ";"
    "#);
}

#[test]
fn function_expression() {
    let input = indoc! {r#"
    const f = function g() {};
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      VarDecl
        KwConst "const"
        Declarator
          Ident "f"
          Equals "="
          FnDecl
            KwFunction "function"
            Ident "g"
            ParamList
              ParenOpen "("
              ParenClose ")"
            Block
              BraceOpen "{"
              BraceClose "}"
        Semicolon ";"
    "#);
}

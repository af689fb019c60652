use crate::Transform;
use indoc::indoc;

#[test]
fn comments_do_not_break_statements() {
    let input = indoc! {r#"
    // leading comment
    const a = 1; /* inline */ a;
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      VarDecl
        KwConst "const"
        Declarator
          Ident "a"
          Equals "="
          Literal
            Number "1"
        Semicolon ";"
      ExprStmt
        NameRef
          Ident "a"
        Semicolon ";"
    "#);
}

#[test]
fn tree_is_lossless() {
    let input = indoc! {r#"
    // comment
    const a   = 1;   /* block
    spanning lines */
    a;
    "#};

    let transform = Transform::expect_valid(input);
    assert_eq!(transform.as_cst().text().to_string(), input);
}

#[test]
fn trailing_trivia_attaches_to_root() {
    let input = "const a = 1; // trailing\n";
    let transform = Transform::expect_valid(input);
    assert_eq!(transform.as_cst().text().to_string(), input);
}

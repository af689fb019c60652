use crate::Transform;
use indoc::indoc;

#[test]
fn member_chain_nests_leftward() {
    let input = indoc! {r#"
    q.movie.title;
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ExprStmt
        MemberExpr
          MemberExpr
            NameRef
              Ident "q"
            Dot "."
            Ident "movie"
          Dot "."
          Ident "title"
        Semicolon ";"
    "#);
}

#[test]
fn call_then_member() {
    let input = indoc! {r#"
    q.movie({ id: 1 }).title;
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ExprStmt
        MemberExpr
          CallExpr
            MemberExpr
              NameRef
                Ident "q"
              Dot "."
              Ident "movie"
            ArgList
              ParenOpen "("
              ObjectLit
                BraceOpen "{"
                ObjectEntry
                  Ident "id"
                  Colon ":"
                  Literal
                    Number "1"
                BraceClose "}"
              ParenClose ")"
          Dot "."
          Ident "title"
        Semicolon ";"
    "#);
}

#[test]
fn call_of_call() {
    let input = indoc! {r#"
    f()();
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ExprStmt
        CallExpr
          CallExpr
            NameRef
              Ident "f"
            ArgList
              ParenOpen "("
              ParenClose ")"
          ArgList
            ParenOpen "("
            ParenClose ")"
        Semicolon ";"
    "#);
}

#[test]
fn parenthesized_chain() {
    let input = indoc! {r#"
    (q.movie).title;
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ExprStmt
        MemberExpr
          ParenExpr
            ParenOpen "("
            MemberExpr
              NameRef
                Ident "q"
              Dot "."
              Ident "movie"
            ParenClose ")"
          Dot "."
          Ident "title"
        Semicolon ";"
    "#);
}

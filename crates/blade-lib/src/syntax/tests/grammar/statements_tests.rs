use crate::Transform;
use indoc::indoc;

#[test]
fn empty_input() {
    let transform = Transform::expect_valid("");
    insta::assert_snapshot!(transform.dump_cst(), @"Root");
}

#[test]
fn const_declaration() {
    let input = indoc! {r#"
    const a = 1;
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
    "#);
}

#[test]
fn multiple_declarators() {
    let input = indoc! {r#"
    let a = 1, b = 2;
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      VarDecl
        KwLet "let"
        Declarator
          Ident "a"
          Equals "="
          Literal
            Number "1"
        Comma ","
        Declarator
          Ident "b"
          Equals "="
          Literal
            Number "2"
        Semicolon ";"
    "#);
}

#[test]
fn destructuring_declarator() {
    let input = indoc! {r#"
    const { title, poster: cover } = movie;
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      VarDecl
        KwConst "const"
        Declarator
          ObjectPattern
            BraceOpen "{"
            PatternProp
              Ident "title"
            Comma ","
            PatternProp
              Ident "poster"
              Colon ":"
              Ident "cover"
            BraceClose "}"
          Equals "="
          NameRef
            Ident "movie"
        Semicolon ";"
    "#);
}

#[test]
fn named_import() {
    let input = indoc! {r#"
    import { createQuery } from 'blade';
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ImportDecl
        KwImport "import"
        NamedImports
          BraceOpen "{"
          Ident "createQuery"
          BraceClose "}"
        KwFrom "from"
        SingleQuote "'"
        StrVal "blade"
        SingleQuote "'"
        Semicolon ";"
    "#);
}

#[test]
fn default_and_named_import() {
    let input = indoc! {r#"
    import blade, { createQuery } from "blade";
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ImportDecl
        KwImport "import"
        Ident "blade"
        Comma ","
        NamedImports
          BraceOpen "{"
          Ident "createQuery"
          BraceClose "}"
        KwFrom "from"
        DoubleQuote "\""
        StrVal "blade"
        DoubleQuote "\""
        Semicolon ";"
    "#);
}

#[test]
fn export_default() {
    let input = indoc! {r#"
    export default fetchData;
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      ExportDefault
        KwExport "export"
        KwDefault "default"
        NameRef
          Ident "fetchData"
        Semicolon ";"
    "#);
}

#[test]
fn function_declaration() {
    let input = indoc! {r#"
    function f(a, b) { return a; }
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      FnDecl
        KwFunction "function"
        Ident "f"
        ParamList
          ParenOpen "("
          Ident "a"
          Comma ","
          Ident "b"
          ParenClose ")"
        Block
          BraceOpen "{"
          ReturnStmt
            KwReturn "return"
            NameRef
              Ident "a"
            Semicolon ";"
          BraceClose "}"
    "#);
}

#[test]
fn if_else() {
    let input = indoc! {r#"
    if (ready) { go; } else stop;
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      IfStmt
        KwIf "if"
        ParenOpen "("
        NameRef
          Ident "ready"
        ParenClose ")"
        Block
          BraceOpen "{"
          ExprStmt
            NameRef
              Ident "go"
            Semicolon ";"
          BraceClose "}"
        KwElse "else"
        ExprStmt
          NameRef
            Ident "stop"
          Semicolon ";"
    "#);
}

#[test]
fn empty_statements() {
    let transform = Transform::expect_valid(";;");
    insta::assert_snapshot!(transform.dump_cst(), @r#"
    Root
      Semicolon ";"
      Semicolon ";"
    "#);
}

use indoc::indoc;

use crate::{Error, Transform};

/// Run the pipeline, assert errors, and summarize them one per line.
#[track_caller]
fn error_summary(source: &str) -> String {
    let transform = Transform::try_from(source).expect("out of fuel");
    assert!(
        !transform.is_valid(),
        "expected diagnostics, but the unit is valid"
    );
    transform
        .diagnostics()
        .filtered()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn chain_accesses_become_a_document() {
    let input = indoc! {r#"
    import { createQuery } from 'blade';
    const q = createQuery('Movie');
    q.movie.title;
    q.movie.year;
    fetchQuery(q);
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_documents(), @r"
    -- Movie
    query Movie {
      movie {
        title
        year
      }
    }
    ");
    insta::assert_snapshot!(transform.dump_output(), @r"
    data.movie.title;
    data.movie.year;
    fetchQuery(`
    query Movie {
      movie {
        title
        year
      }
    }`);
    ");
}

#[test]
fn variables_and_arguments() {
    let input = indoc! {r#"
    import { createQuery } from 'blade';
    const q = createQuery('Movie', { id: 'ID' });
    const m = q.movie({ id: '$id' });
    m.title;
    fetchQuery(q);
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_tree(), @r"
    query Movie $id: ID
      m: movie id=$id
        title
    ");
    insta::assert_snapshot!(transform.dump_output(), @r"
    const m = data.m;
    m.title;
    fetchQuery(`
    query Movie($id: ID) {
      m: movie(id: $id) {
        title
      }
    }`);
    ");
}

#[test]
fn export_default_with_destructuring() {
    let input = indoc! {r#"
    import { createQuery } from 'blade';
    export default createQuery({ page: 'Int' });
    DATA.feed({ page: '$page' });
    const { items } = DATA.feed;
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_documents(), @r"
    -- (anonymous)
    query ($page: Int) {
      feed(page: $page) {
        items
      }
    }
    ");
    insta::assert_snapshot!(transform.dump_output(), @r"
    export default `
    query ($page: Int) {
      feed(page: $page) {
        items
      }
    }`;
    const { items } = data.feed;
    ");
}

#[test]
fn destructuring_with_rename_aliases_the_field() {
    let input = indoc! {r#"
    const q = createQuery('Q');
    const { poster: cover } = q.movie;
    fetchQuery(q);
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_output(), @r"
    const { cover } = data.movie;
    fetchQuery(`
    query Q {
      movie {
        cover: poster
      }
    }`);
    ");
}

#[test]
fn rebinding_the_placeholder_reads_the_payload() {
    let input = indoc! {r#"
    const q = createQuery('Q');
    const d = q;
    d.title;
    fetchQuery(q);
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_output(), @r"
    const d = data;
    data.title;
    fetchQuery(`
    query Q {
      title
    }`);
    ");
}

#[test]
fn shared_import_keeps_the_other_specifiers() {
    let input = indoc! {r#"
    import { createQuery, fetchQuery } from 'blade';
    const q = createQuery('Q');
    q.title;
    fetchQuery(q);
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_output(), @r"
    import {  fetchQuery } from 'blade';
    data.title;
    fetchQuery(`
    query Q {
      title
    }`);
    ");
}

#[test]
fn two_constructors_produce_two_documents() {
    let input = indoc! {r#"
    const a = createQuery('A');
    const b = createQuery('B');
    a.x;
    b.y;
    fetchQuery(a);
    fetchQuery(b);
    "#};

    let transform = Transform::expect_valid(input);
    insta::assert_snapshot!(transform.dump_documents(), @r"
    -- A
    query A {
      x
    }
    -- B
    query B {
      y
    }
    ");
}

#[test]
fn operation_name_falls_back_to_the_binding() {
    let transform = Transform::expect_valid("const movieQuery = createQuery(); fetchQuery(movieQuery);");
    assert_eq!(transform.documents()[0].name.as_deref(), Some("movieQuery"));
}

#[test]
fn default_export_binding_name_stays_anonymous() {
    let transform = Transform::expect_valid("const DATA = createQuery(); fetchQuery(DATA);");
    assert_eq!(transform.documents()[0].name, None);
}

#[test]
fn explicit_name_wins_over_the_binding() {
    let transform = Transform::expect_valid("const q = createQuery('Named'); fetchQuery(q);");
    assert_eq!(transform.documents()[0].name.as_deref(), Some("Named"));
}

#[test]
fn unit_without_queries_passes_through() {
    let transform = Transform::expect_valid("const a = 1;\n");
    assert!(transform.documents().is_empty());
    assert_eq!(transform.output(), Some("const a = 1;\n"));
}

#[test]
fn document_serializes_to_json() {
    let transform = Transform::expect_valid(
        "const q = createQuery('Q', { id: 'ID' }); q.movie({ id: '$id' }); fetchQuery(q);",
    );
    let value = serde_json::to_value(&transform.documents()[0]).unwrap();
    assert_eq!(value["name"], "Q");
    assert_eq!(value["variables"]["id"], "ID");
    assert!(value["text"].as_str().unwrap().starts_with("query Q($id: ID)"));
}

#[test]
fn cyclic_binding_is_reported() {
    let res = error_summary("const q = createQuery(); q = q.movie;");
    insta::assert_snapshot!(res, @"error at 6..7: `q` is defined in terms of itself");
}

#[test]
fn cycle_through_an_intermediate_alias_is_reported() {
    let input = indoc! {"
    const a = createQuery('Q');
    let b = a;
    a = b;
    a.title;
    "};

    let res = error_summary(input);
    insta::assert_snapshot!(res, @"error at 6..7: `a` is defined in terms of itself");
}

#[test]
fn rebinding_to_a_different_selection_is_reported() {
    let input = indoc! {r#"
    const q = createQuery();
    const a = q.movie;
    a = q.actor;
    "#};

    let res = error_summary(input);
    insta::assert_snapshot!(res, @"error at 31..32: `a` is already bound to a different query selection");
}

#[test]
fn reference_escaping_its_scope_is_reported() {
    let input = indoc! {r#"
    function page() { const q = createQuery(); return q.title; }
    q;
    "#};

    let res = error_summary(input);
    insta::assert_snapshot!(res, @"error at 61..62: `q` is used outside the scope of its query binding");
}

#[test]
fn use_before_declaration_is_reported() {
    let input = indoc! {r#"
    q.movie;
    const q = createQuery();
    "#};

    let res = error_summary(input);
    insta::assert_snapshot!(res, @"error at 0..1: `q` is used outside the scope of its query binding");
}

#[test]
fn colliding_payload_keys_are_reported() {
    let input = indoc! {r#"
    const q = createQuery();
    const movie = q.film;
    q.movie.title;
    "#};

    let res = error_summary(input);
    insta::assert_snapshot!(res, @"error at 49..54: alias `movie` is used more than once in this document (related: first used here at 41..45)");
}

#[test]
fn repeated_field_names_across_parents_collide() {
    let input = indoc! {"
    const q = createQuery('Q');
    q.movie.title;
    q.show.title;
    "};

    let res = error_summary(input);
    insta::assert_snapshot!(res, @"error at 50..55: alias `title` is used more than once in this document (related: first used here at 36..41)");
}

#[test]
fn query_without_selections_is_reported() {
    let res = error_summary("const q = createQuery('Q'); fetchQuery(q);");
    insta::assert_snapshot!(res, @"error at 10..26: query `Q` selects no fields");
}

#[test]
fn undeclared_variable_is_reported() {
    let res = error_summary("const q = createQuery('Q'); q.movie({ id: '$id' });");
    insta::assert_snapshot!(res, @"error at 38..40: `$id` is not declared on the query root");
}

#[test]
fn unused_variable_warns_but_stays_valid() {
    let input = indoc! {r#"
    const q = createQuery('Q', { id: 'ID' });
    q.movie.title;
    fetchQuery(q);
    "#};

    let transform = Transform::expect_valid(input);
    assert!(transform.diagnostics().has_warnings());
    assert!(transform.output().is_some());
    let summary = transform
        .diagnostics()
        .filtered()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(summary, @"warning at 29..31: variable `$id` is declared but never used");
}

#[test]
fn non_object_arguments_are_rejected() {
    let res = error_summary("const q = createQuery(); q.movie(1);");
    insta::assert_snapshot!(res, @"error at 25..35: arguments must be passed in a single object literal");
}

#[test]
fn calling_the_query_root_is_rejected() {
    let res = error_summary("const q = createQuery(); q({ id: 1 });");
    insta::assert_snapshot!(res, @"error at 25..37: variables are declared at the constructor, not on the query root");
}

#[test]
fn pattern_bound_placeholder_is_rejected() {
    let res = error_summary("const { q } = createQuery();");
    insta::assert_snapshot!(res, @"error at 14..27: bind the query placeholder to a single name, not a pattern");
}

#[test]
fn unbound_placeholder_is_rejected() {
    let res = error_summary("createQuery();");
    insta::assert_snapshot!(res, @"error at 0..13: the query placeholder must be bound to a declaration or exported");
}

#[test]
fn invalid_units_produce_no_output() {
    let transform = Transform::try_from("createQuery();").expect("out of fuel");
    assert!(!transform.is_valid());
    assert!(transform.documents().is_empty());
    assert!(transform.output().is_none());
}

#[test]
fn exec_fuel_exhaustion_is_fatal() {
    let result = Transform::new("const a = 1;").with_exec_fuel(Some(2)).exec();
    assert!(matches!(result, Err(Error::ExecFuelExhausted)));
}

#[test]
fn recursion_fuel_exhaustion_is_fatal() {
    let source = format!("{}1{};", "(".repeat(64), ")".repeat(64));
    let result = Transform::new(&source).with_recursion_fuel(Some(8)).exec();
    assert!(matches!(result, Err(Error::RecursionLimitExceeded)));
}

#[test]
fn try_from_string_reference() {
    let source = String::from("const a = 1;");
    let transform = Transform::try_from(&source).expect("out of fuel");
    assert!(transform.is_valid());
}

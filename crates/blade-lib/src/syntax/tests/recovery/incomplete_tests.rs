use super::expect_errors;

#[test]
fn declarator_without_name() {
    let res = expect_errors("const = 1;");
    insta::assert_snapshot!(res, @"error at 6..7: expected a binding name");
}

#[test]
fn dangling_dot() {
    let res = expect_errors("q.;");
    insta::assert_snapshot!(res, @"error at 2..3: expected a property name");
}

#[test]
fn declarator_without_initializer_expression() {
    let res = expect_errors("const q = ;");
    insta::assert_snapshot!(res, @"error at 10..11: expected an expression");
}

#[test]
fn import_without_module_name() {
    let res = expect_errors("import { a } from;");
    insta::assert_snapshot!(res, @"error at 17..18: expected a module name string");
}

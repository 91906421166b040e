use pretty_assertions::assert_eq;

use super::*;

// ── Argument tests ────────────────────────────────────────────

#[test]
fn arguments_in_parameter_order() {
    let table = parse_and_extract("int f(int b, char *a, unsigned long c) { return 0; }");
    let f = function(&table, "f");
    assert_eq!(names(&f.arguments), vec!["b", "a", "c"]);
    assert_eq!(type_of(f, "a"), vec!["char"]);
    assert_eq!(type_of(f, "c"), vec!["unsigned", "long"]);
}

#[test]
fn void_parameter_list_has_no_arguments() {
    let table = parse_and_extract("int f(void) { return 0; }");
    assert!(function(&table, "f").arguments.is_empty());
}

#[test]
fn unnamed_parameters_are_skipped() {
    let table = parse_and_extract("int f(int, char *, int named) { return named; }");
    assert_eq!(names(&function(&table, "f").arguments), vec!["named"]);
}

#[test]
fn variadic_marker_is_not_an_argument() {
    let table = parse_and_extract("int f(const char *fmt, ...) { return 0; }");
    assert_eq!(names(&function(&table, "f").arguments), vec!["fmt"]);
}

#[test]
fn function_pointer_parameter_is_named_by_its_declarator() {
    let table =
        parse_and_extract("int f(int (*cmp)(const void *, const void *), int n) { return n; }");
    let f = function(&table, "f");
    assert_eq!(names(&f.arguments), vec!["cmp", "n"]);
    assert_eq!(type_of(f, "cmp"), vec!["int"]);
}

#[test]
fn unknown_typedef_argument_keeps_type_name() {
    let table = parse_and_extract("int f(HANDLE h, struct node *n) { return 0; }");
    let f = function(&table, "f");
    assert_eq!(type_of(f, "h"), vec!["HANDLE"]);
    assert_eq!(type_of(f, "n"), vec!["struct", "node"]);
}

#[test]
fn pointer_returning_function_uses_inner_parameter_list() {
    let table = parse_and_extract("char *(*pick(int which))(char *) { return 0; }");
    assert_eq!(names(&function(&table, "pick").arguments), vec!["which"]);
}

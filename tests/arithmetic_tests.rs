use smc::compile;

/// Compile `body` inside `void main { ... }` and return the emitted lines
/// without the closing `halt`.
fn code(body: &str) -> Vec<String> {
    let source = format!("void main {{ {} }}", body);
    let mut lines = compile(&source).expect("Compilation failed").lines();
    assert_eq!(lines.pop().as_deref(), Some("halt"));
    lines
}

#[test]
fn test_left_to_right_operand_order() {
    assert_eq!(
        code("int a; a = 9 - 5 + 2 * 3;"),
        vec!["push a", "push 9", "push 5", "-", "push 2", "push 3", "*", "+", "store"]
    );
}

#[test]
fn test_subtraction_and_division_chains_stay_left_associative() {
    assert_eq!(
        code("int a; a = 20 - 4 - 3;"),
        vec!["push a", "push 20", "push 4", "-", "push 3", "-", "store"]
    );
    assert_eq!(
        code("int a; a = 64 / 4 / 2 % 3;"),
        vec!["push a", "push 64", "push 4", "/", "push 2", "/", "push 3", "%", "store"]
    );
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(
        code("int a; a = (1 + 2) * (3 - 4);"),
        vec!["push a", "push 1", "push 2", "+", "push 3", "push 4", "-", "*", "store"]
    );
}

#[test]
fn test_variable_reads_load_after_push() {
    assert_eq!(
        code("int a, b; a = b * 2;"),
        vec!["push a", "push b", "load", "push 2", "*", "store"]
    );
}

#[test]
fn test_real_and_boolean_literals() {
    assert_eq!(
        code("float x; x = 1.5 * 2.0;"),
        vec!["push x", "push 1.5", "push 2.0", "*", "store"]
    );
    assert_eq!(
        code("boolean t, f; t = true; f = false;"),
        vec!["push t", "push 1", "store", "push f", "push 0", "store"]
    );
}

#[test]
fn test_relational_and_logical_tiers() {
    assert_eq!(
        code("boolean b; int x; b = x < 3 || x >= 10 && !b;"),
        vec![
            "push b", "push x", "load", "push 3", "<", "push x", "load", "push 10", ">=", "push b",
            "load", "!", "&&", "||", "store",
        ]
    );
}

#[test]
fn test_not_binds_tighter_than_arithmetic() {
    assert_eq!(
        code("int a; a = !a + 1;"),
        vec!["push a", "push a", "load", "!", "push 1", "+", "store"]
    );
    assert_eq!(
        code("boolean b; int x; b = !(x == 2);"),
        vec!["push b", "push x", "load", "push 2", "==", "!", "store"]
    );
}

#[test]
fn test_every_relational_operator() {
    for op in ["<", "<=", ">", ">=", "==", "!="] {
        let body = format!("boolean b; b = 1 {} 2;", op);
        assert_eq!(
            code(&body),
            vec!["push b", "push 1", "push 2", op, "store"],
            "operator {}",
            op
        );
    }
}

#[test]
fn test_array_read_computes_address_before_load() {
    assert_eq!(
        code("int v[4]; int i, x; x = v[i + 1];"),
        vec![
            "array v int 4", "push x", "push v", "push i", "load", "push 1", "+", "+", "load",
            "store",
        ]
    );
}

#[test]
fn test_array_store_path_has_no_load() {
    let lines = code("int arr[3]; arr[1] = 7;");
    assert_eq!(
        lines,
        vec!["array arr int 3", "push arr", "push 1", "+", "push 7", "store"]
    );
}

#[test]
fn test_initializer_may_reference_the_declared_name() {
    // the name is declared before its initializer is read
    assert_eq!(
        code("int a = a + 1;"),
        vec!["push a", "push a", "load", "push 1", "+", "store"]
    );
}

use super::*;

fn nest(depth: u32) -> u32 {
    ensure_sufficient_stack(|| if depth == 0 { 0 } else { 1 + nest(depth - 1) })
}

#[test]
fn returns_closure_value() {
    assert_eq!(ensure_sufficient_stack(|| 7), 7);
}

#[test]
fn survives_deep_recursion() {
    assert_eq!(nest(200_000), 200_000);
}
